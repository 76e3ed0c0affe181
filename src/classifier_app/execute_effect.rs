use super::main::ClassifierApp;
use crate::classifier_app::core::{Effect, Msg};
use std::sync::atomic::Ordering;

impl ClassifierApp {
    pub fn execute_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::StartCamera => {
                let started = self.device_camera.start();
                self.send(Msg::CameraStartDone(started));
            }
            Effect::SubscribeShutter => {
                while self.running.load(Ordering::SeqCst) {
                    std::thread::sleep(self.config.shutter_interval);
                    if !self.running.load(Ordering::SeqCst) || !self.send(Msg::ShutterPressed) {
                        break;
                    }
                }
            }
            Effect::CapturePhoto => {
                let photo = self.device_camera.capture_photo();
                self.send(Msg::PhotoCaptureDone(photo));
            }
            Effect::ClassifyPhoto { photo } => {
                let sender = self.event_sender.clone();
                let submitted = self.image_predictor.make_predictions(&photo, move |predictions| {
                    let _ = sender.send(Msg::PredictionsDone(predictions));
                });

                if let Err(error) = submitted {
                    let _ = self
                        .logger
                        .error(&format!("Unable to make a prediction: {}", error));
                    self.send(Msg::PredictionsFailed);
                }
            }
        }
    }

    pub fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.execute_effect(effect));
        }
    }
}
