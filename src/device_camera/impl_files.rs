use crate::device_camera::interface::DeviceCamera;
use crate::image_predictor::photo::Photo;
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Serves image files from disk as captured photos, cycling through them.
pub struct DeviceCameraFiles {
    logger: Arc<dyn Logger + Send + Sync>,
    paths: Vec<PathBuf>,
    next: AtomicUsize,
}

impl DeviceCameraFiles {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, paths: Vec<PathBuf>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("files"),
            paths,
            next: AtomicUsize::new(0),
        }
    }
}

impl DeviceCamera for DeviceCameraFiles {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.paths.is_empty() {
            return Err("no photo files configured".into());
        }
        self.logger
            .info(&format!("Camera started with {} file(s)", self.paths.len()))?;
        Ok(())
    }

    fn capture_photo(&self) -> Result<Option<Photo>, Box<dyn std::error::Error + Send + Sync>> {
        if self.paths.is_empty() {
            return Ok(None);
        }

        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.paths.len();
        let path = &self.paths[index];

        self.logger
            .info(&format!("Reading photo {}", path.display()))?;

        let bytes = std::fs::read(path)?;

        Ok(Some(Photo::decode(&bytes)?))
    }
}
