//! Media transport adapter - the boundary to the playable media element.
//!
//! **Why**: The gesture layer needs exact, normalized semantics (clamped
//! seeks, open upper bound when the duration is unknown, silent no-ops when
//! nothing is loaded) regardless of what actually plays the media.
//!
//! **Used by**: Gesture handlers, seek bar protocol, keyboard transport, UI.
//!
//! # Boundary
//!
//! [`MediaElement`] is the only thing the widget knows about playback.
//! [`ClockMedia`] implements it for local files with a monotonic playback
//! clock (anchor position + anchor instant); a decode pipeline would slot in
//! behind the same trait.

use std::time::Instant;

use log::{debug, info};

use super::player_events::{PlayerEvent, PlayerEventSender};

/// The playable media boundary.
///
/// Position/duration are in seconds. `duration()` is raw: it may be
/// non-finite or non-positive when unknown; the transport normalizes it.
pub trait MediaElement {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn position(&self) -> f64;
    /// Fire-and-forget seek; the element does not report completion.
    fn set_position(&mut self, secs: f64);
    fn duration(&self) -> f64;
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
    /// Per-frame housekeeping (end-of-media detection etc.)
    fn tick(&mut self) {}
}

/// Thin adapter over an optional [`MediaElement`].
///
/// Every operation with no media loaded is a silent no-op - the UI disables
/// controls when no source is present, the core never errors.
pub struct Transport {
    media: Option<Box<dyn MediaElement>>,
    title: String,
    was_paused: bool,
    events: PlayerEventSender,
}

impl Transport {
    pub fn new(events: PlayerEventSender) -> Self {
        Self {
            media: None,
            title: String::new(),
            was_paused: true,
            events,
        }
    }

    /// Attach a media source, replacing any prior one.
    pub fn load(&mut self, title: impl Into<String>, media: Box<dyn MediaElement>) {
        self.title = title.into();
        self.media = Some(media);
        self.was_paused = self.is_paused();
        let duration = self.duration();
        info!("Loaded '{}' ({:.1}s)", self.title, duration);
        self.events.emit(PlayerEvent::Loaded {
            title: self.title.clone(),
            duration,
        });
    }

    /// Detach the current media source.
    pub fn eject(&mut self) {
        if self.media.take().is_some() {
            info!("Ejected '{}'", self.title);
        }
        self.title.clear();
        self.was_paused = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.media.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Toggle play/pause. Returns whether media is playing afterwards.
    pub fn toggle_play_pause(&mut self) -> bool {
        let Some(media) = self.media.as_mut() else {
            return false;
        };
        if media.is_paused() {
            media.play();
        } else {
            media.pause();
        }
        let playing = !media.is_paused();
        self.was_paused = !playing;
        debug!("Toggle play/pause -> playing={}", playing);
        self.events.emit(PlayerEvent::PlayStateChanged { playing });
        playing
    }

    pub fn play(&mut self) {
        if let Some(media) = self.media.as_mut()
            && media.is_paused()
        {
            media.play();
            self.was_paused = false;
            self.events.emit(PlayerEvent::PlayStateChanged { playing: true });
        }
    }

    pub fn pause(&mut self) {
        if let Some(media) = self.media.as_mut()
            && !media.is_paused()
        {
            media.pause();
            self.was_paused = true;
            self.events
                .emit(PlayerEvent::PlayStateChanged { playing: false });
        }
    }

    /// Paused state; an empty transport reads as paused.
    pub fn is_paused(&self) -> bool {
        self.media.as_ref().map(|m| m.is_paused()).unwrap_or(true)
    }

    pub fn position(&self) -> f64 {
        self.media.as_ref().map(|m| m.position()).unwrap_or(0.0)
    }

    /// Duration normalized to 0.0 when not finite/known.
    pub fn duration(&self) -> f64 {
        let raw = self.media.as_ref().map(|m| m.duration()).unwrap_or(0.0);
        if raw.is_finite() && raw > 0.0 { raw } else { 0.0 }
    }

    /// Seek to `secs`, clamped to `[0, duration]`. An unknown duration is an
    /// open upper bound: only the lower clamp applies.
    pub fn seek(&mut self, secs: f64) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        let raw_duration = media.duration();
        let mut target = secs.max(0.0);
        if raw_duration.is_finite() && raw_duration > 0.0 {
            target = target.min(raw_duration);
        }
        let old = media.position();
        media.set_position(target);
        self.events.emit(PlayerEvent::PositionChanged { old, new: target });
    }

    /// Seek relative to the current position.
    pub fn skip(&mut self, delta: f64) {
        if self.media.is_some() {
            let target = self.position() + delta;
            debug!("Skip {:+.1}s -> {:.2}s", delta, target.max(0.0));
            self.seek(target);
        }
    }

    pub fn volume(&self) -> f32 {
        self.media.as_ref().map(|m| m.volume()).unwrap_or(1.0)
    }

    pub fn set_volume(&mut self, volume: f32) {
        if let Some(media) = self.media.as_mut() {
            media.set_volume(volume.clamp(0.0, 1.0));
        }
    }

    /// Per-frame housekeeping: lets the element run end-of-media detection
    /// and reports a resulting pause as a state change.
    pub fn tick(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        media.tick();
        let paused = media.is_paused();
        if paused != self.was_paused {
            self.was_paused = paused;
            self.events
                .emit(PlayerEvent::PlayStateChanged { playing: !paused });
        }
    }
}

/// Wall-clock playback element for local files.
///
/// Keeps an anchor position and the monotonic instant it was set; while
/// playing, the position is `anchor + elapsed`. Pauses itself when the
/// (known) duration is reached.
pub struct ClockMedia {
    duration: f64,
    anchor_position: f64,
    /// `None` while paused.
    anchor_instant: Option<Instant>,
    volume: f32,
}

impl ClockMedia {
    /// `duration <= 0.0` or non-finite means unknown.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            anchor_position: 0.0,
            anchor_instant: None,
            volume: 1.0,
        }
    }

    fn position_at(&self, now: Instant) -> f64 {
        let pos = match self.anchor_instant {
            Some(anchor) => self.anchor_position + now.duration_since(anchor).as_secs_f64(),
            None => self.anchor_position,
        };
        if self.duration.is_finite() && self.duration > 0.0 {
            pos.min(self.duration)
        } else {
            pos
        }
    }

    fn at_end(&self, now: Instant) -> bool {
        self.duration.is_finite() && self.duration > 0.0 && self.position_at(now) >= self.duration
    }
}

impl MediaElement for ClockMedia {
    fn play(&mut self) {
        if self.anchor_instant.is_none() {
            // Restart from the top when play is hit at the end.
            if self.at_end(Instant::now()) {
                self.anchor_position = 0.0;
            }
            self.anchor_instant = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        let now = Instant::now();
        self.anchor_position = self.position_at(now);
        self.anchor_instant = None;
    }

    fn is_paused(&self) -> bool {
        self.anchor_instant.is_none()
    }

    fn position(&self) -> f64 {
        self.position_at(Instant::now())
    }

    fn set_position(&mut self, secs: f64) {
        self.anchor_position = secs;
        if self.anchor_instant.is_some() {
            self.anchor_instant = Some(Instant::now());
        }
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn tick(&mut self) {
        if self.anchor_instant.is_some() && self.at_end(Instant::now()) {
            self.pause();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeMedia;
    use super::*;
    use crate::core::player_events::PlayerEventSender;

    fn transport_with(duration: f64) -> (Transport, FakeMedia) {
        let fake = FakeMedia::new(duration);
        let mut transport = Transport::new(PlayerEventSender::dummy());
        transport.load("clip", Box::new(fake.clone()));
        (transport, fake)
    }

    #[test]
    fn test_empty_transport_is_noop() {
        let mut transport = Transport::new(PlayerEventSender::dummy());
        assert!(!transport.toggle_play_pause());
        transport.seek(10.0);
        transport.skip(5.0);
        transport.set_volume(0.5);
        assert!(transport.is_paused());
        assert_eq!(transport.position(), 0.0);
        assert_eq!(transport.duration(), 0.0);
    }

    #[test]
    fn test_toggle_play_pause() {
        let (mut transport, fake) = transport_with(60.0);
        assert!(transport.toggle_play_pause());
        assert!(!fake.paused());
        assert!(!transport.toggle_play_pause());
        assert!(fake.paused());
        assert_eq!(fake.play_calls(), 1);
        assert_eq!(fake.pause_calls(), 1);
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let (mut transport, fake) = transport_with(120.0);
        transport.seek(150.0);
        assert_eq!(fake.position(), 120.0);
        transport.seek(-5.0);
        assert_eq!(fake.position(), 0.0);
        transport.seek(30.5);
        assert_eq!(fake.position(), 30.5);
    }

    #[test]
    fn test_unknown_duration_is_open_upper_bound() {
        let (mut transport, fake) = transport_with(0.0);
        transport.seek(1e6);
        assert_eq!(fake.position(), 1e6);
        transport.seek(-1.0);
        assert_eq!(fake.position(), 0.0);

        let (mut transport, fake) = transport_with(f64::INFINITY);
        transport.seek(42.0);
        assert_eq!(fake.position(), 42.0);
    }

    #[test]
    fn test_duration_normalized() {
        let (transport, _) = transport_with(f64::NAN);
        assert_eq!(transport.duration(), 0.0);
        let (transport, _) = transport_with(f64::INFINITY);
        assert_eq!(transport.duration(), 0.0);
        let (transport, _) = transport_with(90.0);
        assert_eq!(transport.duration(), 90.0);
    }

    #[test]
    fn test_skip_is_relative_and_clamped() {
        let (mut transport, fake) = transport_with(100.0);
        transport.seek(3.0);
        transport.skip(-5.0);
        assert_eq!(fake.position(), 0.0);
        transport.skip(102.0);
        assert_eq!(fake.position(), 100.0);
    }

    #[test]
    fn test_events_emitted() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut transport = Transport::new(PlayerEventSender::new(tx));
        transport.load("clip", Box::new(FakeMedia::new(10.0)));
        transport.toggle_play_pause();
        transport.seek(4.0);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], PlayerEvent::Loaded { .. }));
        assert!(matches!(
            events[1],
            PlayerEvent::PlayStateChanged { playing: true }
        ));
        assert!(matches!(
            events[2],
            PlayerEvent::PositionChanged { old: _, new } if new == 4.0
        ));
    }

    #[test]
    fn test_tick_reports_self_pause() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut transport = Transport::new(PlayerEventSender::new(tx));
        let fake = FakeMedia::new(10.0);
        transport.load("clip", Box::new(fake.clone()));
        transport.play();
        rx.try_iter().count(); // drain load/play events

        // Element pauses itself (end of media)
        fake.set_paused(true);
        transport.tick();
        let events: Vec<_> = rx.try_iter().collect();
        assert!(matches!(
            events.as_slice(),
            [PlayerEvent::PlayStateChanged { playing: false }]
        ));
    }

    #[test]
    fn test_eject_clears_source() {
        let (mut transport, _) = transport_with(60.0);
        assert!(transport.is_loaded());
        transport.eject();
        assert!(!transport.is_loaded());
        assert_eq!(transport.title(), "");
        assert!(transport.is_paused());
        transport.eject(); // safe twice
    }

    #[test]
    fn test_clock_media_anchor_math() {
        let mut clock = ClockMedia::new(10.0);
        assert!(clock.is_paused());
        clock.set_position(4.0);
        assert_eq!(clock.position(), 4.0);

        // Simulate elapsed playback against an explicit clock
        clock.anchor_instant = Some(Instant::now() - std::time::Duration::from_secs(3));
        assert!((clock.position() - 7.0).abs() < 0.1);

        // Clamped at the known duration
        clock.anchor_instant = Some(Instant::now() - std::time::Duration::from_secs(60));
        assert_eq!(clock.position(), 10.0);
        clock.tick();
        assert!(clock.is_paused());
    }
}
