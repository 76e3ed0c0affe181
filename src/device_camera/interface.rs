use crate::image_predictor::photo::Photo;

pub trait DeviceCamera: Send + Sync {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    /// `Ok(None)` when the user backed out without taking a photo.
    fn capture_photo(&self) -> Result<Option<Photo>, Box<dyn std::error::Error + Send + Sync>>;
}
