use crate::inference_engine::interface::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImagePredictorError {
    #[error("photo has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("failed to submit classification request: {0}")]
    Submission(#[from] EngineError),
}
