use crate::image_predictor::error::ImagePredictorError;
use crate::image_predictor::orientation::ImageOrientation;
use crate::image_predictor::pending::PendingRequests;
use crate::image_predictor::photo::Photo;
use crate::image_predictor::prediction::Prediction;
use crate::inference_engine::interface::{
    ClassificationRequest, CropAndScale, EngineError, EngineResponse, InferenceEngine,
    RequestId, RequestResults,
};
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Turns photos into ranked, display-ready predictions.
///
/// Every call to `make_predictions` submits one request to the engine and
/// parks the caller's completion in a registry until the engine answers.
/// The completion receives `None` when the engine fails or answers with
/// something other than a classification list.
///
/// Requests the engine never answers stay registered and their completion
/// never runs; `pending_requests` exposes how many there are.
pub struct ImagePredictor {
    engine: Arc<dyn InferenceEngine + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
    crop_and_scale: CropAndScale,
    pending: Arc<PendingRequests>,
    next_request_id: AtomicU64,
}

impl ImagePredictor {
    pub fn new(
        engine: Arc<dyn InferenceEngine + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
        crop_and_scale: CropAndScale,
    ) -> Self {
        Self {
            engine,
            logger: logger.with_namespace("image_predictor"),
            crop_and_scale,
            pending: Arc::new(PendingRequests::new()),
            next_request_id: AtomicU64::new(1),
        }
    }

    pub fn make_predictions<F>(
        &self,
        photo: &Photo,
        completion: F,
    ) -> Result<RequestId, ImagePredictorError>
    where
        F: FnOnce(Option<Vec<Prediction>>) + Send + 'static,
    {
        let (width, height) = photo.dimensions();
        if width == 0 || height == 0 {
            return Err(ImagePredictorError::EmptyImage { width, height });
        }

        let orientation = ImageOrientation::from_exif(photo.orientation_tag());
        let request = self.create_classification_request();
        let request_id = request.id();

        self.pending.insert(request_id, Box::new(completion));

        let submitted = self
            .engine
            .perform(Arc::clone(photo.image()), orientation, vec![request]);

        if let Err(error) = submitted {
            // The engine already completed it
            if self.pending.take(request_id).is_none() {
                let _ = self.logger.error(&format!(
                    "Engine failed after completing request {}: {}",
                    request_id, error
                ));
                return Ok(request_id);
            }
            let _ = self.logger.error(&format!(
                "Failed to submit request {}: {}",
                request_id, error
            ));
            return Err(ImagePredictorError::Submission(error));
        }

        let _ = self.logger.info(&format!(
            "Submitted request {} ({}x{}, {:?})",
            request_id, width, height, orientation
        ));

        Ok(request_id)
    }

    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, request_id: RequestId) -> bool {
        self.pending.contains(request_id)
    }

    fn create_classification_request(&self) -> ClassificationRequest {
        let request_id = RequestId::new(self.next_request_id.fetch_add(1, Ordering::Relaxed));
        let pending = Arc::clone(&self.pending);
        let logger = Arc::clone(&self.logger);

        ClassificationRequest::new(
            request_id,
            self.crop_and_scale,
            Box::new(move |response| handle_response(&pending, logger.as_ref(), response)),
        )
    }
}

fn handle_response(pending: &PendingRequests, logger: &dyn Logger, response: EngineResponse) {
    let Some(handler) = pending.take(response.request_id) else {
        let _ = logger.error(&format!(
            "No prediction handler registered for request {}",
            response.request_id
        ));
        return;
    };

    let predictions = predictions_from_outcome(logger, response.request_id, response.outcome);

    handler(predictions);
}

fn predictions_from_outcome(
    logger: &dyn Logger,
    request_id: RequestId,
    outcome: Result<Option<RequestResults>, EngineError>,
) -> Option<Vec<Prediction>> {
    match outcome {
        Err(error) => {
            let _ = logger.error(&format!(
                "Image classification error for request {}: {}",
                request_id, error
            ));
            None
        }
        Ok(None) => {
            let _ = logger.info(&format!("Request {} had no results", request_id));
            None
        }
        Ok(Some(RequestResults::Classifications(observations))) => Some(
            observations
                .iter()
                .map(Prediction::from_observation)
                .collect(),
        ),
        Ok(Some(results)) => {
            let _ = logger.error(&format!(
                "Request {} produced the wrong result type: {}",
                request_id,
                results.kind()
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference_engine::interface::Observation;
    use crate::library::logger::impl_fake::LoggerFake;

    #[test]
    fn test_response_for_unknown_request_is_logged_and_dropped() {
        let pending = PendingRequests::new();
        let logger = LoggerFake::new();

        handle_response(
            &pending,
            &logger,
            EngineResponse {
                request_id: RequestId::new(42),
                outcome: Ok(Some(RequestResults::Classifications(vec![Observation::new(
                    "cat", 0.9,
                )]))),
            },
        );

        let errors = logger.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("No prediction handler"));
        assert!(errors[0].contains("#42"));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_response_only_reaches_its_own_handler() {
        let pending = PendingRequests::new();
        let logger = LoggerFake::new();
        let (sender, receiver) = std::sync::mpsc::channel();
        pending.insert(
            RequestId::new(1),
            Box::new(move |predictions| {
                let _ = sender.send(predictions);
            }),
        );

        handle_response(
            &pending,
            &logger,
            EngineResponse {
                request_id: RequestId::new(2),
                outcome: Ok(None),
            },
        );

        assert!(pending.contains(RequestId::new(1)));
        assert!(receiver.try_recv().is_err());
        assert_eq!(logger.errors().len(), 1);
    }
}
