use crate::classifier_app::core::Msg;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::image_predictor::predictor::ImagePredictor;
use crate::library::logger::interface::Logger;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct ClassifierApp {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub image_predictor: Arc<ImagePredictor>,
    pub event_sender: Sender<Msg>,
    pub event_receiver: Arc<Mutex<Receiver<Msg>>>,
    pub running: Arc<AtomicBool>,
}

impl ClassifierApp {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        image_predictor: Arc<ImagePredictor>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        Self {
            config,
            logger: logger.with_namespace("app"),
            device_camera,
            device_display,
            image_predictor,
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn send(&self, msg: Msg) -> bool {
        self.event_sender.send(msg).is_ok()
    }

    pub fn recv(&self) -> Result<Msg, Box<dyn std::error::Error + Send + Sync>> {
        let receiver = self
            .event_receiver
            .lock()
            .map_err(|_| "event receiver lock poisoned")?;
        Ok(receiver.recv()?)
    }
}
