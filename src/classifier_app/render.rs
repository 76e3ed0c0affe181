use super::main::ClassifierApp;
use crate::classifier_app::core::{view, Model};

impl ClassifierApp {
    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self
            .device_display
            .lock()
            .map_err(|_| "display lock poisoned")?;

        device_display.clear()?;

        let num_lines = device_display.num_lines();
        for (line, text) in view(model).iter().take(num_lines).enumerate() {
            device_display.write_line(line, text)?;
        }

        device_display.flush()?;

        Ok(())
    }
}
