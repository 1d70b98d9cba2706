//! Player core - composition root of the gesture-driven playback widget.
//!
//! **Why**: The gesture machine, overlay, timers and transport must share
//! one synchronous state container so every transition is a plain method
//! call, testable without any rendering layer.
//!
//! **Used by**: the egui app (tick + input forwarding), surface/seek-bar
//! widgets, keyboard handling.
//!
//! # Update Model
//!
//! Single-threaded and event-driven: the UI forwards input events as they
//! arrive, then calls [`PlayerCore::tick`] once per painted frame with the
//! current `Instant`. `tick` applies the deferred overlay show (the
//! two-phase fade restart) and fires due timers. Nothing here blocks.

use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use super::gesture::GestureState;
use super::overlay::{
    OverlayState, OverlayZone, SYMBOL_PAUSE, SYMBOL_PLAY, SYMBOL_SKIP_BACK, SYMBOL_SKIP_FWD,
};
use super::player_events::{PlayerEvent, PlayerEventSender};
use super::seekbar::SeekBarDrag;
use super::timers::{TimerKind, TimerRegistry};
use super::transport::Transport;
use crate::utils::format_time;

/// Tunable gesture/overlay constants. Persisted with the app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Window in which a second tap turns a tap into a double tap
    pub click_window_ms: u64,
    /// Lifetime of discrete overlay feedback before it fades out
    pub overlay_fade_ms: u64,
    /// Seconds skipped by a double tap / arrow key
    pub seek_amount_secs: f64,
    /// Double taps left of `left_zone_ratio * width` skip backward
    pub left_zone_ratio: f32,
    /// Double taps right of `right_zone_ratio * width` skip forward
    pub right_zone_ratio: f32,
    /// Horizontal movement (px) that turns a press into a scrub
    pub swipe_threshold_px: f32,
    /// Scrub sensitivity, seconds per pixel
    pub swipe_base_sensitivity: f64,
    /// Quadratic scrub acceleration, seconds per pixel^2
    pub swipe_acceleration: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            click_window_ms: 300,
            overlay_fade_ms: 600,
            seek_amount_secs: 5.0,
            left_zone_ratio: 1.0 / 3.0,
            right_zone_ratio: 2.0 / 3.0,
            swipe_threshold_px: 10.0,
            swipe_base_sensitivity: 0.01,
            swipe_acceleration: 0.0002,
        }
    }
}

impl GestureConfig {
    pub fn click_window(&self) -> Duration {
        Duration::from_millis(self.click_window_ms)
    }

    pub fn overlay_fade(&self) -> Duration {
        Duration::from_millis(self.overlay_fade_ms)
    }
}

/// The widget's synchronous state container.
pub struct PlayerCore {
    pub config: GestureConfig,
    pub transport: Transport,
    pub overlay: OverlayState,
    pub timers: TimerRegistry<PlayerCore>,
    pub(crate) gesture: GestureState,
    pub(crate) seek_drag: SeekBarDrag,
    surface_width: f32,
    events: PlayerEventSender,
    torn_down: bool,
}

impl Default for PlayerCore {
    fn default() -> Self {
        Self::new(GestureConfig::default(), PlayerEventSender::dummy())
    }
}

impl PlayerCore {
    pub fn new(config: GestureConfig, events: PlayerEventSender) -> Self {
        Self {
            config,
            transport: Transport::new(events.clone()),
            overlay: OverlayState::new(),
            timers: TimerRegistry::new(),
            gesture: GestureState::default(),
            seek_drag: SeekBarDrag::default(),
            surface_width: 0.0,
            events,
            torn_down: false,
        }
    }

    /// Current surface width, used for double-tap zone classification.
    /// The surface widget refreshes this every frame.
    pub fn set_surface_width(&mut self, width: f32) {
        self.surface_width = width;
    }

    pub fn surface_width(&self) -> f32 {
        self.surface_width
    }

    /// One update-loop turn: transport housekeeping, deferred overlay show,
    /// due timers. Called once per painted frame.
    pub fn tick(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }

        self.transport.tick();

        // Phase two of a discrete overlay restart: a frame has elapsed since
        // the hide, now re-show and arm the auto-hide.
        if let Some(show) = self.overlay.take_pending() {
            self.overlay.apply(show);
            let fade = self.config.overlay_fade();
            self.timers
                .schedule(TimerKind::OverlayHide, fade, now, |core| {
                    core.overlay.hide_now();
                });
        }

        for callback in self.timers.take_due(now) {
            callback(self);
        }
    }

    /// Teardown: cancel every pending timer and go inert. After this call
    /// no scheduled callback will ever run.
    pub fn teardown(&mut self) {
        debug!(
            "Player core teardown, {} timer(s) canceled",
            self.timers.len()
        );
        self.timers.cancel_all();
        self.overlay.hide_now();
        self.gesture.reset();
        self.seek_drag = SeekBarDrag::default();
        self.transport.eject();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ========== Overlay orchestration ==========

    /// Stage discrete overlay feedback (applied next tick, fades out).
    pub(crate) fn show_discrete(&mut self, symbol: impl Into<String>, zone: OverlayZone) {
        self.timers.cancel(TimerKind::OverlayHide);
        self.overlay.request_discrete(symbol, zone);
    }

    /// Hide the overlay immediately (drag end, teardown).
    pub(crate) fn hide_overlay(&mut self) {
        self.timers.cancel(TimerKind::OverlayHide);
        self.overlay.hide_now();
    }

    /// Paint alpha for the overlay at `now`: 1.0 while fresh, ramping to
    /// zero over the second half of the fade window. Continuous feedback
    /// never fades.
    pub fn overlay_alpha(&self, now: Instant) -> f32 {
        if !self.overlay.visible {
            return 0.0;
        }
        if !self.overlay.fade_enabled {
            return 1.0;
        }
        match self.timers.deadline(TimerKind::OverlayHide) {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(now).as_secs_f32();
                let fade = self.config.overlay_fade().as_secs_f32().max(0.001);
                (remaining / (fade * 0.5)).clamp(0.0, 1.0)
            }
            None => 1.0,
        }
    }

    // ========== Discrete actions ==========

    /// Commit a single tap (click timer fired unaborted): toggle playback
    /// and show the resulting state centered.
    pub(crate) fn commit_single_tap(&mut self) {
        if !self.transport.is_loaded() {
            return;
        }
        let playing = self.transport.toggle_play_pause();
        let symbol = if playing { SYMBOL_PLAY } else { SYMBOL_PAUSE };
        self.show_discrete(symbol, OverlayZone::Center);
    }

    /// Skip by the configured amount and show zone feedback.
    pub(crate) fn skip_with_overlay(&mut self, forward: bool) {
        if !self.transport.is_loaded() {
            return;
        }
        let amount = self.config.seek_amount_secs;
        if forward {
            self.transport.skip(amount);
            self.show_discrete(SYMBOL_SKIP_FWD, OverlayZone::Right);
        } else {
            self.transport.skip(-amount);
            self.show_discrete(SYMBOL_SKIP_BACK, OverlayZone::Left);
        }
    }

    // ========== Keyboard transport ==========

    /// Space: immediate toggle (no click-delay arbitration for keys).
    pub fn key_toggle_play(&mut self) {
        self.commit_single_tap();
    }

    /// Arrow keys: skip by the configured amount.
    pub fn key_skip(&mut self, forward: bool) {
        self.skip_with_overlay(forward);
    }

    // ========== Bookmarks ==========

    /// Place a bookmark at the current position. Returns `(time, label)`
    /// for the caller's list; the label is `"Bookmark " + formatted time`.
    pub fn bookmark_here(&mut self) -> Option<(f64, String)> {
        if !self.transport.is_loaded() {
            return None;
        }
        let time = self.transport.position();
        let label = format!("Bookmark {}", format_time(time));
        self.events.emit(PlayerEvent::BookmarkAdded {
            time,
            label: label.clone(),
        });
        Some((time, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::testing::FakeMedia;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn core_with_media(duration: f64) -> (PlayerCore, FakeMedia) {
        let mut core = PlayerCore::new(GestureConfig::default(), PlayerEventSender::dummy());
        let fake = FakeMedia::new(duration);
        core.transport.load("clip", Box::new(fake.clone()));
        core.set_surface_width(300.0);
        (core, fake)
    }

    #[test]
    fn test_discrete_overlay_lifecycle() {
        let (mut core, _) = core_with_media(60.0);
        let t0 = Instant::now();

        core.show_discrete(SYMBOL_PLAY, OverlayZone::Center);
        assert!(!core.overlay.visible);

        // Next tick applies the show and arms the hide timer
        core.tick(t0);
        assert!(core.overlay.visible);
        assert!(core.overlay.fade_enabled);
        assert!(core.timers.is_pending(TimerKind::OverlayHide));

        // Fully opaque while fresh, fading near the deadline
        assert_eq!(core.overlay_alpha(t0), 1.0);
        let fade = core.config.overlay_fade_ms;
        assert!(core.overlay_alpha(t0 + ms(fade - 50)) < 1.0);

        // Hide fires after the fade window
        core.tick(t0 + ms(fade + 1));
        assert!(!core.overlay.visible);
    }

    #[test]
    fn test_reshow_restarts_hide_timer() {
        let (mut core, _) = core_with_media(60.0);
        let t0 = Instant::now();

        core.show_discrete(SYMBOL_PLAY, OverlayZone::Center);
        core.tick(t0);

        // A second show shortly before the first would hide
        let t1 = t0 + ms(core.config.overlay_fade_ms - 10);
        core.show_discrete(SYMBOL_PAUSE, OverlayZone::Center);
        core.tick(t1);
        assert!(core.overlay.visible);

        // The first hide deadline passes without hiding (timer superseded)
        core.tick(t0 + ms(core.config.overlay_fade_ms + 5));
        assert!(core.overlay.visible);
        assert_eq!(core.overlay.symbol, SYMBOL_PAUSE);
    }

    #[test]
    fn test_teardown_silences_all_timers() {
        let (mut core, fake) = core_with_media(120.0);
        let t0 = Instant::now();

        // Arm all three timer kinds
        core.timers
            .schedule(TimerKind::Click, core.config.click_window(), t0, |core| {
                core.commit_single_tap();
            });
        core.show_discrete(SYMBOL_PLAY, OverlayZone::Center);
        core.tick(t0); // arms OverlayHide
        core.seek_bar_input(50.0, t0); // arms SeekFrame
        assert!(core.timers.is_pending(TimerKind::Click));
        assert!(core.timers.is_pending(TimerKind::OverlayHide));
        assert!(core.timers.is_pending(TimerKind::SeekFrame));

        core.teardown();
        core.tick(t0 + ms(10_000));

        // No toggle, no seek commit, overlay stays hidden
        assert_eq!(fake.play_calls(), 0);
        assert!(fake.seek_log().is_empty());
        assert!(!core.overlay.visible);
        assert!(core.timers.is_empty());
        assert!(!core.transport.is_loaded(), "teardown releases the media");
    }

    #[test]
    fn test_key_skip_clamps_and_shows_zone() {
        let (mut core, fake) = core_with_media(100.0);
        let t0 = Instant::now();

        core.key_skip(false); // backward from 0 clamps to 0
        assert_eq!(fake.position(), 0.0);
        core.tick(t0);
        assert_eq!(core.overlay.zone, OverlayZone::Left);

        core.key_skip(true);
        assert_eq!(fake.position(), 5.0);
        core.tick(t0 + ms(1));
        assert_eq!(core.overlay.zone, OverlayZone::Right);
    }

    #[test]
    fn test_bookmark_label_format() {
        let (mut core, fake) = core_with_media(7200.0);
        fake.state.lock().unwrap().position = 83.4;
        let (time, label) = core.bookmark_here().unwrap();
        assert_eq!(time, 83.4);
        assert_eq!(label, "Bookmark 1:23");

        fake.state.lock().unwrap().position = 3661.0;
        let (_, label) = core.bookmark_here().unwrap();
        assert_eq!(label, "Bookmark 1:01:01");
    }

    #[test]
    fn test_bookmark_without_media() {
        let mut core = PlayerCore::new(GestureConfig::default(), PlayerEventSender::dummy());
        assert!(core.bookmark_here().is_none());
    }

    #[test]
    fn test_gesture_config_serde_roundtrip() {
        let config = GestureConfig {
            click_window_ms: 250,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: GestureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.click_window_ms, 250);
        assert_eq!(back.seek_amount_secs, 5.0);

        // Partial settings fill in defaults
        let partial: GestureConfig = serde_json::from_str("{\"seek_amount_secs\": 10.0}").unwrap();
        assert_eq!(partial.seek_amount_secs, 10.0);
        assert_eq!(partial.click_window_ms, 300);
    }
}
