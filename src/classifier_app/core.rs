use crate::config::Config;
use crate::image_predictor::photo::Photo;
use crate::image_predictor::prediction::Prediction;

pub const NO_IMAGE: &str = "No Image";
pub const MAKING_PREDICTIONS: &str = "Making predictions for the photo...";
pub const NO_PREDICTIONS: &str = "No predictions.";
pub const PREDICTION_FAILED: &str = "Unable to make a prediction.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoSummary {
    pub width: u32,
    pub height: u32,
}

impl PhotoSummary {
    pub fn of(photo: &Photo) -> Self {
        let (width, height) = photo.dimensions();
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    NoImage,
    Predicting { photo: PhotoSummary },
    Predictions { photo: PhotoSummary, lines: Vec<String> },
    NoPredictions { photo: PhotoSummary },
    PredictionFailed { photo: PhotoSummary },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub screen: Screen,
    pub camera_open: bool,
    pub photos_completed: u32,
    pub stopped: bool,
}

impl Model {
    pub fn is_busy(&self) -> bool {
        self.camera_open || matches!(self.screen, Screen::Predicting { .. })
    }

    pub fn is_finished(&self, config: &Config) -> bool {
        if self.stopped {
            return true;
        }
        match config.photo_count {
            Some(count) => self.photos_completed >= count && !self.is_busy(),
            None => false,
        }
    }
}

#[derive(Debug)]
pub enum Msg {
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    ShutterPressed,
    PhotoCaptureDone(Result<Option<Photo>, Box<dyn std::error::Error + Send + Sync>>),
    PredictionsDone(Option<Vec<Prediction>>),
    /// Submission was refused; the reason has been logged.
    PredictionsFailed,
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::PhotoCaptureDone(Ok(Some(photo))) => {
                let (width, height) = photo.dimensions();
                format!("PhotoCaptureDone(Ok(Some({}x{})))", width, height)
            }
            msg => format!("{:?}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartCamera,
    SubscribeShutter,
    CapturePhoto,
    ClassifyPhoto { photo: Photo },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::ClassifyPhoto { photo } => {
                let (width, height) = photo.dimensions();
                format!("ClassifyPhoto({}x{})", width, height)
            }
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (
        Model {
            screen: Screen::NoImage,
            camera_open: false,
            photos_completed: 0,
            stopped: false,
        },
        vec![Effect::StartCamera],
    )
}

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match (model.screen.clone(), msg) {
        (_, Msg::CameraStartDone(Ok(()))) => (model, vec![Effect::SubscribeShutter]),
        (_, Msg::CameraStartDone(Err(error))) => (
            Model {
                screen: Screen::Error {
                    message: format!("Camera failed to start: {}", error),
                },
                stopped: true,
                ..model
            },
            vec![],
        ),

        (_, Msg::ShutterPressed) => {
            let quota_reached = config
                .photo_count
                .is_some_and(|count| model.photos_completed >= count);

            if model.is_busy() || quota_reached || model.stopped {
                (model, vec![])
            } else {
                (
                    Model {
                        camera_open: true,
                        ..model
                    },
                    vec![Effect::CapturePhoto],
                )
            }
        }

        (_, Msg::PhotoCaptureDone(Ok(Some(photo)))) if model.camera_open => (
            Model {
                screen: Screen::Predicting {
                    photo: PhotoSummary::of(&photo),
                },
                camera_open: false,
                ..model
            },
            vec![Effect::ClassifyPhoto { photo }],
        ),
        // Cancelled: keep whatever was on screen
        (_, Msg::PhotoCaptureDone(Ok(None))) if model.camera_open => (
            Model {
                camera_open: false,
                ..model
            },
            vec![],
        ),
        (_, Msg::PhotoCaptureDone(Err(error))) if model.camera_open => (
            Model {
                screen: Screen::Error {
                    message: error.to_string(),
                },
                camera_open: false,
                photos_completed: model.photos_completed + 1,
                ..model
            },
            vec![],
        ),

        (Screen::Predicting { photo }, Msg::PredictionsDone(Some(predictions))) => (
            Model {
                screen: Screen::Predictions {
                    photo,
                    lines: format_predictions(&predictions, config.predictions_to_show),
                },
                photos_completed: model.photos_completed + 1,
                ..model
            },
            vec![],
        ),
        (Screen::Predicting { photo }, Msg::PredictionsDone(None)) => (
            Model {
                screen: Screen::NoPredictions { photo },
                photos_completed: model.photos_completed + 1,
                ..model
            },
            vec![],
        ),
        (Screen::Predicting { photo }, Msg::PredictionsFailed) => (
            Model {
                screen: Screen::PredictionFailed { photo },
                photos_completed: model.photos_completed + 1,
                ..model
            },
            vec![],
        ),

        _ => (model, vec![]),
    }
}

/// The first `count` predictions as `"<name> - <confidence>%"`.
pub fn format_predictions(predictions: &[Prediction], count: usize) -> Vec<String> {
    predictions
        .iter()
        .take(count)
        .map(|prediction| {
            format!(
                "{} - {}%",
                prediction.display_name(),
                prediction.confidence_percentage()
            )
        })
        .collect()
}

/// What the display should show, top line first.
pub fn view(model: &Model) -> Vec<String> {
    let photo_line = |photo: &PhotoSummary| format!("Photo {}x{}", photo.width, photo.height);

    match &model.screen {
        Screen::NoImage => vec![NO_IMAGE.to_string()],
        Screen::Predicting { photo } => vec![photo_line(photo), MAKING_PREDICTIONS.to_string()],
        Screen::Predictions { photo, lines } => std::iter::once(photo_line(photo))
            .chain(lines.iter().cloned())
            .collect(),
        Screen::NoPredictions { photo } => vec![photo_line(photo), NO_PREDICTIONS.to_string()],
        Screen::PredictionFailed { photo } => {
            vec![photo_line(photo), PREDICTION_FAILED.to_string()]
        }
        Screen::Error { message } => vec![format!("Error: {}", message)],
    }
}
