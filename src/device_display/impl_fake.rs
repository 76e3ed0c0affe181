use crate::device_display::interface::DeviceDisplay;
use crate::library::logger::interface::Logger;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Records what was last flushed so tests can read the screen back.
pub struct DeviceDisplayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    buffer: Vec<String>,
    screen: Arc<Mutex<Vec<String>>>,
}

impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, num_lines: usize) -> Self {
        Self {
            logger: logger.with_namespace("display").with_namespace("fake"),
            buffer: vec![String::new(); num_lines],
            screen: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Handle onto the flushed lines, trailing blank lines dropped.
    pub fn screen(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.screen)
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("DeviceDisplayFake::init()")?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        for row in self.buffer.iter_mut() {
            row.clear();
        }
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("DeviceDisplayFake::write_line({}, {})", line, text))?;
        let row = self.buffer.get_mut(line).ok_or("Invalid line number")?;
        *row = text.to_string();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut lines = self.buffer.clone();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        *self.screen.lock().map_err(|_| "screen lock poisoned")? = lines;
        Ok(())
    }

    fn num_lines(&self) -> usize {
        self.buffer.len()
    }
}
