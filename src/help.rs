//! In-window help overlay.
//!
//! Static key/gesture tables rendered as a translucent panel over the video
//! surface, toggled with `?` or F1.

use eframe::egui;

/// Single help entry (gesture or key binding + description)
#[derive(Clone, Debug)]
pub struct HelpEntry {
    pub key: &'static str,
    pub desc: &'static str,
}

impl HelpEntry {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }
}

/// Touch/pointer gestures on the video surface
pub const GESTURE_HELP: &[HelpEntry] = &[
    HelpEntry::new("Tap", "Play/Pause"),
    HelpEntry::new("Double-tap left edge", "Skip backward"),
    HelpEntry::new("Double-tap right edge", "Skip forward"),
    HelpEntry::new("Drag horizontally", "Scrub (while paused)"),
    HelpEntry::new("Drag seek bar", "Seek"),
];

/// Keyboard transport
pub const PLAYBACK_HELP: &[HelpEntry] = &[
    HelpEntry::new("Space", "Play/Pause"),
    HelpEntry::new("Left / Right", "Skip backward / forward"),
    HelpEntry::new("B", "Add bookmark at current position"),
];

/// Global keys shown below the sections
pub const GLOBAL_HELP: &[HelpEntry] = &[
    HelpEntry::new("? / H / F1", "Toggle this help"),
    HelpEntry::new("Ctrl+O", "Open video file"),
    HelpEntry::new("Up / Down", "Volume"),
    HelpEntry::new("L", "Toggle bookmark panel"),
    HelpEntry::new("F", "Fullscreen"),
    HelpEntry::new("ESC", "Quit"),
];

/// All help sections in display order
pub fn all_help_sections() -> Vec<(&'static str, &'static [HelpEntry])> {
    vec![
        ("Gestures", GESTURE_HELP),
        ("Playback", PLAYBACK_HELP),
        ("Global", GLOBAL_HELP),
    ]
}

/// Render the help overlay panel
pub fn render_help_overlay(ui: &mut egui::Ui) {
    let font_id = egui::FontId::proportional(13.0);
    let text_color = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200);
    let key_color = egui::Color32::from_rgb(255, 200, 100);

    // Align descriptions on the widest key column
    let max_key_len = all_help_sections()
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|e| e.key.len())
        .max()
        .unwrap_or(10);
    let max_key_width = (max_key_len as f32) * 8.0 + 20.0;

    egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180))
        .inner_margin(12.0)
        .corner_radius(4.0)
        .show(ui, |ui| {
            for (idx, (title, entries)) in all_help_sections().into_iter().enumerate() {
                if idx > 0 {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(4.0);
                }
                ui.label(
                    egui::RichText::new(title)
                        .font(font_id.clone())
                        .color(egui::Color32::GRAY),
                );
                ui.add_space(4.0);
                for entry in entries {
                    ui.horizontal(|ui| {
                        ui.add_sized(
                            [max_key_width, 18.0],
                            egui::Label::new(
                                egui::RichText::new(entry.key)
                                    .font(font_id.clone())
                                    .color(key_color),
                            ),
                        );
                        ui.label(
                            egui::RichText::new(entry.desc)
                                .font(font_id.clone())
                                .color(text_color),
                        );
                    });
                }
            }
        });
}
