//! Bottom status bar: file, position, play state, gesture phase, volume.

use eframe::egui;

use crate::core::{GesturePhase, PlayerCore};
use crate::utils::format_time;

#[derive(Default)]
pub struct StatusBar {
    pub current_message: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            current_message: String::new(),
        }
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.current_message = msg.into();
    }

    /// Render status bar at bottom of screen
    pub fn render(&self, ctx: &egui::Context, core: &PlayerCore, bookmark_count: usize) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Filename
                if core.transport.is_loaded() {
                    ui.monospace(core.transport.title());
                } else {
                    ui.monospace("No file");
                }

                ui.separator();

                // Position / duration
                ui.monospace(format!(
                    "{} / {}",
                    format_time(core.transport.position()),
                    format_time(core.transport.duration())
                ));

                ui.separator();

                // Play state
                let state = if !core.transport.is_loaded() {
                    "idle"
                } else if core.transport.is_paused() {
                    "paused"
                } else {
                    "playing"
                };
                ui.monospace(format!("{:>7}", state));

                ui.separator();

                // Active gesture, if any
                match core.gesture_phase() {
                    GesturePhase::Idle => {}
                    GesturePhase::PressedUnconfirmed => {
                        ui.monospace("press");
                        ui.separator();
                    }
                    GesturePhase::Swiping => {
                        ui.monospace("scrub");
                        ui.separator();
                    }
                }

                // Volume
                ui.monospace(format!("vol {:>3.0}%", core.transport.volume() * 100.0));

                ui.separator();
                ui.monospace(format!("{} bookmark(s)", bookmark_count));

                if !self.current_message.is_empty() {
                    ui.separator();
                    ui.label(&self.current_message);
                }
            });
        });
    }
}
