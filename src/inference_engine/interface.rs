use crate::image_predictor::orientation::ImageOrientation;
use image::DynamicImage;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Opaque handle identifying one submitted classification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One raw output of a classifier, confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub identifier: String,
    pub confidence: f32,
}

impl Observation {
    pub fn new(identifier: impl Into<String>, confidence: f32) -> Self {
        Self {
            identifier: identifier.into(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestResults {
    /// Ranked best first.
    Classifications(Vec<Observation>),
    /// Anything that is not a classification list, e.g. raw feature
    /// values from a model that is not a classifier.
    Unrecognized { kind: String },
}

impl RequestResults {
    pub fn kind(&self) -> &str {
        match self {
            RequestResults::Classifications(_) => "classifications",
            RequestResults::Unrecognized { kind } => kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropAndScale {
    #[default]
    CenterCrop,
    ScaleFit,
    ScaleFill,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to load model: {0}")]
    ModelLoad(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug)]
pub struct EngineResponse {
    pub request_id: RequestId,
    /// `Ok(None)` when the engine finished without producing any results.
    pub outcome: Result<Option<RequestResults>, EngineError>,
}

pub type CompletionHandler = Box<dyn FnOnce(EngineResponse) + Send + 'static>;

pub struct ClassificationRequest {
    id: RequestId,
    crop_and_scale: CropAndScale,
    completion: CompletionHandler,
}

impl ClassificationRequest {
    pub fn new(id: RequestId, crop_and_scale: CropAndScale, completion: CompletionHandler) -> Self {
        Self {
            id,
            crop_and_scale,
            completion,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn crop_and_scale(&self) -> CropAndScale {
        self.crop_and_scale
    }

    /// Consumes the request, so every request is answered at most once.
    pub fn complete(self, outcome: Result<Option<RequestResults>, EngineError>) {
        (self.completion)(EngineResponse {
            request_id: self.id,
            outcome,
        });
    }
}

impl fmt::Debug for ClassificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationRequest")
            .field("id", &self.id)
            .field("crop_and_scale", &self.crop_and_scale)
            .finish_non_exhaustive()
    }
}

/// An image classifier.
///
/// `perform` hands the requests over and returns once they are accepted.
/// Each accepted request is completed exactly once, either before `perform`
/// returns or later from any thread. When `perform` fails, the requests it
/// did not complete are dropped unanswered; ones it already completed stay
/// answered.
pub trait InferenceEngine: Send + Sync {
    fn perform(
        &self,
        image: Arc<DynamicImage>,
        orientation: ImageOrientation,
        requests: Vec<ClassificationRequest>,
    ) -> Result<(), EngineError>;
}
