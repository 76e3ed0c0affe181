use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    /// One label per line, in output index order.
    pub labels_path: PathBuf,
    /// (height, width)
    pub input_shape: (u32, u32),
    /// Off for models whose last layer is already a softmax.
    pub apply_softmax: bool,
}

impl ModelConfig {
    pub fn new(onnx_model_path: impl Into<PathBuf>, labels_path: impl Into<PathBuf>) -> Self {
        Self {
            onnx_model_path: onnx_model_path.into(),
            labels_path: labels_path.into(),
            input_shape: (224, 224),
            apply_softmax: true,
        }
    }
}
