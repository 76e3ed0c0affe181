use crate::classifier_app::main::ClassifierApp;
use crate::config::Config;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::image_predictor::predictor::ImagePredictor;
use crate::inference_engine::impl_fake::{FakeResponse, InferenceEngineFake};
use crate::library::logger::impl_fake::LoggerFake;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct Fixture {
    pub logger: LoggerFake,
    pub screen: Arc<Mutex<Vec<String>>>,
    pub classifier_app: ClassifierApp,
}

impl Fixture {
    pub fn new(photo_count: u32, responses: Vec<FakeResponse>) -> Self {
        let config = Config {
            photo_count: Some(photo_count),
            shutter_interval: Duration::from_millis(5),
            ..Config::default()
        };
        let logger = LoggerFake::new();
        let shared_logger = Arc::new(logger.clone());

        let device_camera = Arc::new(DeviceCameraFake::new(shared_logger.clone()));
        let device_display = DeviceDisplayFake::new(shared_logger.clone(), config.display_lines());
        let screen = device_display.screen();
        let engine = Arc::new(InferenceEngineFake::scripted(
            shared_logger.clone(),
            responses,
        ));
        let image_predictor = Arc::new(ImagePredictor::new(
            engine,
            shared_logger.clone(),
            config.crop_and_scale,
        ));

        let classifier_app = ClassifierApp::new(
            config,
            shared_logger,
            device_camera,
            Arc::new(Mutex::new(device_display)),
            image_predictor,
        );

        Self {
            logger,
            screen,
            classifier_app,
        }
    }

    pub fn screen(&self) -> Vec<String> {
        self.screen.lock().unwrap().clone()
    }
}
