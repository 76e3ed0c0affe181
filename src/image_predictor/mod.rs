pub mod error;
pub mod orientation;
pub mod pending;
pub mod photo;
pub mod prediction;
pub mod predictor;
