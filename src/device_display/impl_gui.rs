use crate::device_display::interface::DeviceDisplay;
use eframe::egui;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone)]
struct DisplayWindow {
    screen: Arc<Mutex<Vec<String>>>,
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let lines = match self.screen.lock() {
            Ok(screen) => screen.clone(),
            Err(_) => return,
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);

                let mut rows = lines.iter();
                if let Some(title) = rows.next() {
                    ui.label(egui::RichText::new(title).strong().size(22.0));
                    ui.add_space(10.0);
                }
                for row in rows {
                    ui.label(egui::RichText::new(row).monospace().size(18.0));
                }
            });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }
}

/// Shows the screen in a native window running on its own thread.
pub struct DeviceDisplayGui {
    buffer: Vec<String>,
    screen: Arc<Mutex<Vec<String>>>,
}

impl DeviceDisplayGui {
    pub fn new(num_lines: usize) -> Self {
        Self {
            buffer: vec![String::new(); num_lines],
            screen: Arc::new(Mutex::new(vec![String::new(); num_lines])),
        }
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let screen = self.screen.clone();

        thread::spawn(move || {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([420.0, 240.0])
                    .with_resizable(false),
                ..Default::default()
            };

            let window = DisplayWindow { screen };

            // Blocks this thread until the window is closed
            let _ = eframe::run_native(
                "Photo Classifier",
                options,
                Box::new(|_cc| Box::new(window)),
            );
        });

        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        for row in self.buffer.iter_mut() {
            row.clear();
        }
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let row = self.buffer.get_mut(line).ok_or("Invalid line number")?;
        *row = text.to_string();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.screen.lock().map_err(|_| "screen lock poisoned")? = self.buffer.clone();
        Ok(())
    }

    fn num_lines(&self) -> usize {
        self.buffer.len()
    }
}
