use classifier_app::main::ClassifierApp;
use config::{CameraConfig, Config, DisplayConfig, EngineConfig};
use device_camera::{
    impl_fake::DeviceCameraFake, impl_files::DeviceCameraFiles, interface::DeviceCamera,
};
use device_display::{
    impl_console::DeviceDisplayConsole, impl_gui::DeviceDisplayGui, interface::DeviceDisplay,
};
use image_predictor::predictor::ImagePredictor;
use inference_engine::{impl_fake::InferenceEngineFake, interface::InferenceEngine};
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use std::sync::{Arc, Mutex};

mod classifier_app;
mod config;
mod device_camera;
mod device_display;
mod image_predictor;
mod inference_engine;
mod library;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    let config = Config::from_env()?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let engine = build_engine(&config, &logger)?;

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = match &config.camera {
        CameraConfig::Fake => Arc::new(DeviceCameraFake::new(logger.clone())),
        CameraConfig::Files { paths } => {
            Arc::new(DeviceCameraFiles::new(logger.clone(), paths.clone()))
        }
    };

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = match config.display {
        DisplayConfig::Console => Arc::new(Mutex::new(DeviceDisplayConsole::new(
            config.display_lines(),
            config.display_width,
        ))),
        DisplayConfig::Gui => Arc::new(Mutex::new(DeviceDisplayGui::new(config.display_lines()))),
    };

    let image_predictor = Arc::new(ImagePredictor::new(
        engine,
        logger.clone(),
        config.crop_and_scale,
    ));

    let classifier_app = ClassifierApp::new(
        config,
        logger.clone(),
        device_camera,
        device_display,
        image_predictor,
    );

    let model = classifier_app.run()?;

    logger.info(&format!(
        "Finished after {} photo(s)",
        model.photos_completed
    ))?;

    Ok(())
}

fn build_engine(
    config: &Config,
    logger: &Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn InferenceEngine + Send + Sync>, BoxError> {
    match &config.engine {
        EngineConfig::Fake => Ok(Arc::new(InferenceEngineFake::new(logger.clone()))),
        #[cfg(feature = "tract")]
        EngineConfig::TractOnnx(model_config) => {
            let engine = inference_engine::impl_tract_onnx::InferenceEngineTractOnnx::new(
                model_config.clone(),
                logger.clone(),
            )?;
            Ok(Arc::new(engine))
        }
        #[cfg(not(feature = "tract"))]
        EngineConfig::TractOnnx(model_config) => Err(format!(
            "{} needs a build with the `tract` feature",
            model_config.onnx_model_path.display()
        )
        .into()),
    }
}
