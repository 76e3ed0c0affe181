use crate::inference_engine::interface::Observation;

/// A display-ready classification: the engine's label and its confidence
/// already formatted as a percentage string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    classification: String,
    confidence_percentage: String,
}

impl Prediction {
    pub fn new(classification: impl Into<String>, confidence_percentage: impl Into<String>) -> Self {
        Self {
            classification: classification.into(),
            confidence_percentage: confidence_percentage.into(),
        }
    }

    pub fn from_observation(observation: &Observation) -> Self {
        let percentage = f64::from(observation.confidence * 100.0);
        Self::new(
            observation.identifier.clone(),
            format_confidence_percentage(percentage),
        )
    }

    pub fn classification(&self) -> &str {
        &self.classification
    }

    pub fn confidence_percentage(&self) -> &str {
        &self.confidence_percentage
    }

    pub fn display_name(&self) -> &str {
        display_name(&self.classification)
    }
}

/// Labels may carry a comma separated chain of synonyms
/// ("tabby, tabby cat"). Only the first one is shown.
pub fn display_name(label: &str) -> &str {
    match label.find(',') {
        Some(first_comma) => &label[..first_comma],
        None => label,
    }
}

/// Formats a percentage in `[0, 100]`.
///
/// Saturated values render as `"100%"` (with the sign), anything from 1 up
/// gets one decimal, anything below 1 gets two.
pub fn format_confidence_percentage(percentage: f64) -> String {
    match percentage {
        p if p >= 100.0 => "100%".to_string(),
        p if (1.0..100.0).contains(&p) => format!("{:.1}", p),
        p if p < 1.0 => format!("{:.2}", p),
        p => format!("{:.1}", p),
    }
}
