//! Persistent application settings.
//!
//! Stored through eframe's storage together with the app state; unknown or
//! missing fields fall back to defaults so older config files keep loading.

use serde::{Deserialize, Serialize};

use crate::core::GestureConfig;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Gesture/overlay tuning (click window, zones, swipe sensitivity)
    pub gesture: GestureConfig,
    pub dark_mode: bool,
    /// Last set volume, re-applied to newly loaded media
    pub volume: f32,
    pub show_help: bool,
    pub show_bookmarks: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            dark_mode: true,
            volume: 1.0,
            show_help: false,
            show_bookmarks: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert!(settings.dark_mode);
        assert_eq!(settings.volume, 1.0);
        assert_eq!(settings.gesture.click_window_ms, 300);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: AppSettings =
            serde_json::from_str("{\"volume\": 0.5, \"gesture\": {\"seek_amount_secs\": 10.0}}")
                .unwrap();
        assert_eq!(settings.volume, 0.5);
        assert_eq!(settings.gesture.seek_amount_secs, 10.0);
        assert_eq!(settings.gesture.click_window_ms, 300);
        assert!(settings.show_bookmarks);
    }
}
