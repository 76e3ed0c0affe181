use crate::image_predictor::orientation::ImageOrientation;
use crate::inference_engine::image_fit::fit_image;
use crate::inference_engine::interface::{
    ClassificationRequest, EngineError, InferenceEngine, Observation, RequestResults,
};
use crate::inference_engine::model_config::ModelConfig;
use crate::inference_engine::tract::tensor::{image_to_tensor, softmax};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct InferenceEngineTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: Vec<String>,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl InferenceEngineTractOnnx {
    pub fn new(
        config: ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, EngineError> {
        let logger = logger.with_namespace("inference_engine").with_namespace("tract_onnx");
        let (height, width) = config.input_shape;

        let _ = logger.info(&format!(
            "Loading model {}",
            config.onnx_model_path.display()
        ));

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    f32::fact([1, 3, height as usize, width as usize]).into(),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| EngineError::ModelLoad(e.to_string()))?;

        let labels = parse_labels(&std::fs::read_to_string(&config.labels_path)?);

        let _ = logger.info(&format!("Model loaded with {} labels", labels.len()));

        Ok(Self {
            model,
            labels,
            config,
            logger,
        })
    }

    fn classify(
        &self,
        image: &DynamicImage,
        request: &ClassificationRequest,
    ) -> Result<Vec<Observation>, EngineError> {
        let (height, width) = self.config.input_shape;
        let fitted = fit_image(image, request.crop_and_scale(), width, height);

        let input = image_to_tensor(&fitted).map_err(|e| EngineError::Inference(e.to_string()))?;

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| EngineError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| EngineError::Inference("model produced no outputs".to_string()))?;

        let scores: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| EngineError::Inference(e.to_string()))?
            .iter()
            .copied()
            .collect();

        let scores = if self.config.apply_softmax {
            softmax(&scores)
        } else {
            scores
        };

        Ok(rank_observations(&scores, &self.labels))
    }
}

impl InferenceEngine for InferenceEngineTractOnnx {
    fn perform(
        &self,
        image: Arc<DynamicImage>,
        orientation: ImageOrientation,
        requests: Vec<ClassificationRequest>,
    ) -> Result<(), EngineError> {
        if requests.is_empty() {
            return Err(EngineError::Rejected("no requests to perform".to_string()));
        }

        let upright = orientation.apply(&image);

        for request in requests {
            let outcome = self
                .classify(&upright, &request)
                .map(|observations| Some(RequestResults::Classifications(observations)));

            if let Err(error) = &outcome {
                let _ = self
                    .logger
                    .error(&format!("Request {} failed: {}", request.id(), error));
            }

            request.complete(outcome);
        }

        Ok(())
    }
}

fn parse_labels(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn rank_observations(scores: &[f32], labels: &[String]) -> Vec<Observation> {
    let mut observations: Vec<Observation> = scores
        .iter()
        .enumerate()
        .map(|(index, &score)| {
            let label = labels
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("class {}", index));
            Observation::new(label, score)
        })
        .collect();

    observations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    observations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_skips_blank_lines() {
        let labels = parse_labels("tench, Tinca tinca\n\n goldfish \n");
        assert_eq!(labels, vec!["tench, Tinca tinca", "goldfish"]);
    }

    #[test]
    fn test_rank_observations() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let observations = rank_observations(&[0.1, 0.7, 0.2], &labels);

        let ranked: Vec<&str> = observations.iter().map(|o| o.identifier.as_str()).collect();
        assert_eq!(ranked, vec!["b", "class 2", "a"]);
    }
}
