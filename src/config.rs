use crate::inference_engine::interface::CropAndScale;
use crate::inference_engine::model_config::ModelConfig;
use chrono::{FixedOffset, Offset, Utc};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENV_MODEL: &str = "PHOTO_CLASSIFIER_MODEL";
pub const ENV_LABELS: &str = "PHOTO_CLASSIFIER_LABELS";
pub const ENV_PHOTOS: &str = "PHOTO_CLASSIFIER_PHOTOS";
pub const ENV_PHOTO_COUNT: &str = "PHOTO_CLASSIFIER_PHOTO_COUNT";
pub const ENV_DISPLAY: &str = "PHOTO_CLASSIFIER_DISPLAY";
pub const ENV_UTC_OFFSET_HOURS: &str = "PHOTO_CLASSIFIER_UTC_OFFSET_HOURS";

#[derive(Debug, Clone, PartialEq)]
pub enum EngineConfig {
    Fake,
    TractOnnx(ModelConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraConfig {
    Fake,
    Files { paths: Vec<PathBuf> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayConfig {
    Console,
    Gui,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub predictions_to_show: usize,
    pub logger_timezone: FixedOffset,
    pub shutter_interval: Duration,
    /// Stop after this many photos. `None` runs forever.
    pub photo_count: Option<u32>,
    pub crop_and_scale: CropAndScale,
    pub engine: EngineConfig,
    pub camera: CameraConfig,
    pub display: DisplayConfig,
    pub display_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predictions_to_show: 3,
            logger_timezone: Utc.fix(),
            shutter_interval: Duration::from_secs(3),
            photo_count: None,
            crop_and_scale: CropAndScale::CenterCrop,
            engine: EngineConfig::Fake,
            camera: CameraConfig::Fake,
            display: DisplayConfig::Console,
            display_width: 40,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("{present} is set but {missing} is not")]
    MissingPair {
        present: &'static str,
        missing: &'static str,
    },
}

impl Config {
    /// Lines a display needs: the photo line plus one per prediction.
    pub fn display_lines(&self) -> usize {
        self.predictions_to_show.max(1) + 1
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        match (lookup(ENV_MODEL), lookup(ENV_LABELS)) {
            (Some(model), Some(labels)) => {
                config.engine = EngineConfig::TractOnnx(ModelConfig::new(model, labels));
            }
            (Some(_), None) => {
                return Err(ConfigError::MissingPair {
                    present: ENV_MODEL,
                    missing: ENV_LABELS,
                })
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingPair {
                    present: ENV_LABELS,
                    missing: ENV_MODEL,
                })
            }
            (None, None) => {}
        }

        if let Some(photos) = lookup(ENV_PHOTOS) {
            let paths: Vec<PathBuf> = std::env::split_paths(&photos).collect();
            if paths.is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: ENV_PHOTOS,
                    value: photos,
                });
            }
            config.camera = CameraConfig::Files { paths };
        }

        if let Some(count) = lookup(ENV_PHOTO_COUNT) {
            let parsed = count.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                name: ENV_PHOTO_COUNT,
                value: count.clone(),
            })?;
            config.photo_count = Some(parsed);
        }

        if let Some(display) = lookup(ENV_DISPLAY) {
            config.display = match display.trim().to_lowercase().as_str() {
                "console" => DisplayConfig::Console,
                "gui" => DisplayConfig::Gui,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: ENV_DISPLAY,
                        value: display,
                    })
                }
            };
        }

        if let Some(hours) = lookup(ENV_UTC_OFFSET_HOURS) {
            config.logger_timezone = hours
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(|hours| FixedOffset::east_opt(hours * 3600))
                .ok_or(ConfigError::InvalidValue {
                    name: ENV_UTC_OFFSET_HOURS,
                    value: hours.clone(),
                })?;
        }

        Ok(config)
    }
}
