use crate::image_predictor::orientation::ImageOrientation;
use crate::inference_engine::interface::{
    ClassificationRequest, EngineError, InferenceEngine, Observation, RequestId, RequestResults,
};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const LABELS: [&str; 14] = [
    "golden retriever",
    "Labrador retriever",
    "tabby, tabby cat",
    "Egyptian cat",
    "tiger cat",
    "notebook, notebook computer",
    "coffee mug",
    "water bottle",
    "computer keyboard, keypad",
    "mouse, computer mouse",
    "pot, flowerpot",
    "wall clock",
    "mountain bike, all-terrain bike, off-roader",
    "desk",
];

/// What the fake engine does with the next request it receives.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum FakeResponse {
    Observations(Vec<Observation>),
    Error(String),
    NoResults,
    UnexpectedShape(String),
    /// Keep the request and never complete it.
    Never,
    /// Fail `perform` without completing anything.
    RejectSubmission(String),
    /// Complete with the observations, then fail `perform` anyway.
    CompleteThenFail(Vec<Observation>, String),
    /// Complete from a spawned thread after the delay.
    After(Duration, Box<FakeResponse>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub request_id: RequestId,
    pub orientation: ImageOrientation,
    pub image_size: (u32, u32),
}

enum Mode {
    Random,
    Scripted(Mutex<VecDeque<FakeResponse>>),
}

pub struct InferenceEngineFake {
    logger: Arc<dyn Logger + Send + Sync>,
    mode: Mode,
    submissions: Mutex<Vec<Submission>>,
    held: Mutex<Vec<ClassificationRequest>>,
}

impl InferenceEngineFake {
    /// Answers every request with randomly ranked labels.
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("inference_engine").with_namespace("fake"),
            mode: Mode::Random,
            submissions: Mutex::new(vec![]),
            held: Mutex::new(vec![]),
        }
    }

    /// Answers requests with `responses`, one per request, in order.
    #[allow(dead_code)]
    pub fn scripted(logger: Arc<dyn Logger + Send + Sync>, responses: Vec<FakeResponse>) -> Self {
        Self {
            mode: Mode::Scripted(Mutex::new(responses.into())),
            ..Self::new(logger)
        }
    }

    #[allow(dead_code)]
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions
            .lock()
            .map(|submissions| submissions.clone())
            .unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn held_requests(&self) -> usize {
        self.held.lock().map(|held| held.len()).unwrap_or_default()
    }

    fn next_response(&self) -> Result<FakeResponse, EngineError> {
        match &self.mode {
            Mode::Random => Ok(FakeResponse::Observations(random_observations())),
            Mode::Scripted(responses) => responses
                .lock()
                .map_err(|_| EngineError::Inference("fake script poisoned".to_string()))?
                .pop_front()
                .ok_or_else(|| EngineError::Rejected("no scripted response left".to_string())),
        }
    }

    fn respond(&self, request: ClassificationRequest, response: FakeResponse) {
        match response {
            FakeResponse::Never => {
                let _ = self
                    .logger
                    .info(&format!("Holding request {} forever", request.id()));
                if let Ok(mut held) = self.held.lock() {
                    held.push(request);
                }
            }
            FakeResponse::After(delay, response) => {
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    complete(request, *response);
                });
            }
            response => complete(request, response),
        }
    }
}

/// `Never` and rejections are handled before a request gets here; a delayed
/// one of them drops the request unanswered.
fn complete(request: ClassificationRequest, response: FakeResponse) {
    match response {
        FakeResponse::Observations(observations) => {
            request.complete(Ok(Some(RequestResults::Classifications(observations))))
        }
        FakeResponse::Error(message) => request.complete(Err(EngineError::Inference(message))),
        FakeResponse::NoResults => request.complete(Ok(None)),
        FakeResponse::UnexpectedShape(kind) => {
            request.complete(Ok(Some(RequestResults::Unrecognized { kind })))
        }
        FakeResponse::After(delay, response) => {
            std::thread::sleep(delay);
            complete(request, *response);
        }
        FakeResponse::CompleteThenFail(observations, _) => {
            complete(request, FakeResponse::Observations(observations))
        }
        FakeResponse::Never | FakeResponse::RejectSubmission(_) => drop(request),
    }
}

fn random_observations() -> Vec<Observation> {
    let mut rng = rand::rng();

    let weights: Vec<f32> = LABELS
        .iter()
        .map(|_| rng.random_range(0.0..1.0f32).powi(4))
        .collect();
    let total: f32 = weights.iter().sum::<f32>().max(f32::EPSILON);

    let mut observations: Vec<Observation> = LABELS
        .iter()
        .zip(weights)
        .map(|(label, weight)| Observation::new(*label, weight / total))
        .collect();

    observations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    observations
}

impl InferenceEngine for InferenceEngineFake {
    fn perform(
        &self,
        image: Arc<DynamicImage>,
        orientation: ImageOrientation,
        requests: Vec<ClassificationRequest>,
    ) -> Result<(), EngineError> {
        let _ = self.logger.info(&format!(
            "Classifying {} request(s) with fake engine...",
            requests.len()
        ));

        let mut answers = Vec::with_capacity(requests.len());
        for request in requests {
            let response = self.next_response()?;
            match response {
                FakeResponse::RejectSubmission(message) => {
                    return Err(EngineError::Rejected(message));
                }
                FakeResponse::CompleteThenFail(observations, message) => {
                    complete(request, FakeResponse::Observations(observations));
                    return Err(EngineError::Inference(message));
                }
                _ => {}
            }
            if let Ok(mut submissions) = self.submissions.lock() {
                submissions.push(Submission {
                    request_id: request.id(),
                    orientation,
                    image_size: (image.width(), image.height()),
                });
            }
            answers.push((request, response));
        }

        for (request, response) in answers {
            self.respond(request, response);
        }

        Ok(())
    }
}
