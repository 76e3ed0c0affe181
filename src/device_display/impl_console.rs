use crate::device_display::interface::DeviceDisplay;
use std::error::Error;

pub struct DeviceDisplayConsole {
    display_buffer: Vec<String>,
    width: usize,
}

impl DeviceDisplayConsole {
    pub fn new(num_lines: usize, width: usize) -> Self {
        Self {
            display_buffer: vec![String::new(); num_lines],
            width,
        }
    }

    fn render_display(&self) {
        println!("┌{}┐", "─".repeat(self.width));
        for row in &self.display_buffer {
            println!("│{:<width$}│", row, width = self.width);
        }
        println!("└{}┘", "─".repeat(self.width));
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.render_display();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        for row in self.display_buffer.iter_mut() {
            row.clear();
        }
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let width = self.width;
        let row = self
            .display_buffer
            .get_mut(line)
            .ok_or("Invalid line number")?;

        *row = text.chars().take(width).collect();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.render_display();
        Ok(())
    }

    fn num_lines(&self) -> usize {
        self.display_buffer.len()
    }
}
