use super::main::ClassifierApp;
use crate::classifier_app::core::{init, transition, Model};
use std::sync::atomic::Ordering;

impl ClassifierApp {
    /// Runs until the configured number of photos is done or the camera
    /// fails to start. Returns the final model.
    pub fn run(&self) -> Result<Model, Box<dyn std::error::Error + Send + Sync>> {
        let (mut current_model, effects) = init();

        self.running.store(true, Ordering::SeqCst);

        self.device_display
            .lock()
            .map_err(|_| "display lock poisoned")?
            .init()?;
        self.render(&current_model)?;

        self.execute_effects(effects);

        let result = self.run_loop(&mut current_model);

        self.running.store(false, Ordering::SeqCst);

        result.map(|()| current_model)
    }

    fn run_loop(
        &self,
        current_model: &mut Model,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        while !current_model.is_finished(&self.config) {
            let msg = self.recv()?;

            let _ = self
                .logger
                .info(&format!("msg: {}", msg.to_display_string()));

            let (new_model, effects) = transition(&self.config, current_model.clone(), msg);

            *current_model = new_model;

            self.render(current_model)?;

            self.execute_effects(effects);
        }

        Ok(())
    }
}
