use std::error::Error;

/// A text panel with a fixed number of lines.
pub trait DeviceDisplay: Send + Sync {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Returns an error if `line` is out of range.
    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Pushes buffered writes to the screen.
    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn num_lines(&self) -> usize;
}
