pub mod image_fit;
pub mod impl_fake;
#[cfg(feature = "tract")]
pub mod impl_tract_onnx;
pub mod interface;
pub mod model_config;
#[cfg(feature = "tract")]
pub mod tract;
