use crate::device_camera::interface::DeviceCamera;
use crate::image_predictor::photo::Photo;
use crate::library::logger::interface::Logger;
use image::{DynamicImage, ImageBuffer, Rgb};
use rand::Rng;
use std::sync::Arc;

pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    width: u32,
    height: u32,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            width: 320,
            height: 240,
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn capture_photo(&self) -> Result<Option<Photo>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Capturing photo...")?;

        let mut rng = rand::rng();
        let base: [u8; 3] = [rng.random(), rng.random(), rng.random()];
        let orientation_tag: u16 = rng.random_range(1..=8);

        let (width, height) = (self.width, self.height);
        let image = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                base[0].wrapping_add((x * 255 / width) as u8),
                base[1].wrapping_add((y * 255 / height) as u8),
                base[2],
            ])
        });

        self.logger.info(&format!(
            "Photo captured ({}x{}, orientation {})",
            width, height, orientation_tag
        ))?;

        Ok(Some(Photo::new(
            DynamicImage::ImageRgb8(image),
            orientation_tag,
        )))
    }
}
