//! Pointer gesture disambiguation on the video surface.
//!
//! **Why**: Touch input has no native double-click, so a single
//! down/move/up stream must be resolved into one of: single tap (toggle
//! play), double tap on a side zone (skip), or a horizontal drag (scrub) -
//! without misreading tremors or vertical scrolls as scrubs.
//!
//! **Used by**: The surface widget feeds [`SurfaceEvent`]s here; actions go
//! out through the transport and overlay.
//!
//! # State machine
//!
//! `Idle -> PressedUnconfirmed` on pointer down. From there:
//! - horizontal movement past the threshold (paused media only) confirms
//!   `Swiping`: the pointer is captured and every move remaps to a media
//!   position with non-linear sensitivity;
//! - release without crossing the threshold is a *tap*, arbitrated against
//!   the click timer: first tap arms a delayed toggle, a second tap inside
//!   the window cancels it and resolves a zone double-tap instead;
//! - pointer cancel (or capture loss) resets everything with no action.
//!
//! Swipe-to-scrub is deliberately gated to paused media: scrubbing during
//! playback would fight the seek bar and turn ordinary taps into seeks.

use std::time::Instant;

use log::{debug, trace};

use super::player::PlayerCore;
use super::timers::TimerKind;

/// Raw pointer events on the video surface, the single dispatch input of
/// the state machine. Coordinates are relative to the surface origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    PointerDown { id: u64, x: f32, y: f32, primary: bool },
    PointerMove { id: u64, x: f32, y: f32 },
    PointerUp { id: u64, x: f32, y: f32 },
    /// OS interruption or capture loss; resets with no action.
    PointerCancel { id: u64 },
}

/// Classification of the active pointer session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Pointer down, not yet a tap or a swipe
    PressedUnconfirmed,
    /// Confirmed horizontal drag, continuously scrubbing
    Swiping,
}

/// One pointer-down-to-up cycle on the video surface
#[derive(Debug, Clone)]
pub struct PointerSession {
    pub pointer_id: u64,
    pub start_x: f32,
    pub start_y: f32,
    pub current_x: f32,
    pub current_y: f32,
    /// Media position at pointer-down, the anchor for drag scrubbing
    pub start_media_time: f64,
    pub phase: GesturePhase,
    /// Pointer capture held while swiping, so moves keep arriving after
    /// the cursor leaves the surface
    pub captured: bool,
}

/// Gesture machine state: the active session, if any. The click arbiter's
/// pending tap lives in the timer registry (the pending `Click` timer *is*
/// the pending tap), keeping a single source of truth.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    pub session: Option<PointerSession>,
}

impl GestureState {
    pub fn phase(&self) -> GesturePhase {
        self.session
            .as_ref()
            .map(|s| s.phase)
            .unwrap_or(GesturePhase::Idle)
    }

    pub fn reset(&mut self) {
        self.session = None;
    }
}

/// Drag offset with one-decimal precision and an explicit sign; exact zero
/// renders unsigned.
pub(crate) fn format_offset(secs: f64) -> String {
    let rounded = (secs * 10.0).round() / 10.0;
    if rounded == 0.0 {
        "0.0s".to_string()
    } else {
        format!("{:+.1}s", rounded)
    }
}

impl PlayerCore {
    /// Scrub offset for a horizontal drag of `dx` pixels: linear base plus
    /// a small quadratic term, so short drags are fine-grained and long
    /// drags accelerate.
    pub(crate) fn scrub_offset(&self, dx: f32) -> f64 {
        let d = dx.abs() as f64;
        let magnitude =
            self.config.swipe_base_sensitivity * d + self.config.swipe_acceleration * d * d;
        magnitude * dx.signum() as f64
    }

    /// Central dispatch: one pointer event in, at most one transition out.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent, now: Instant) {
        if self.is_torn_down() {
            return;
        }
        trace!("surface event: {:?}", event);
        match event {
            SurfaceEvent::PointerDown { id, x, y, primary } => {
                self.on_pointer_down(id, x, y, primary)
            }
            SurfaceEvent::PointerMove { id, x, y } => self.on_pointer_move(id, x, y),
            SurfaceEvent::PointerUp { id, x, y } => self.on_pointer_up(id, x, y, now),
            SurfaceEvent::PointerCancel { id } => self.on_pointer_cancel(id),
        }
    }

    fn on_pointer_down(&mut self, id: u64, x: f32, y: f32, primary: bool) {
        if !primary {
            return;
        }
        // Single-pointer widget: a second contact while a session is live
        // is ignored rather than restarting the session.
        if self.gesture.session.is_some() {
            return;
        }
        // A pending click timer from a previous tap stays untouched here;
        // whether this press is the second tap is decided at pointer-up.
        self.gesture.session = Some(PointerSession {
            pointer_id: id,
            start_x: x,
            start_y: y,
            current_x: x,
            current_y: y,
            start_media_time: self.transport.position(),
            phase: GesturePhase::PressedUnconfirmed,
            captured: false,
        });
        debug!("pointer {} down at ({:.0},{:.0})", id, x, y);
    }

    fn on_pointer_move(&mut self, id: u64, x: f32, y: f32) {
        let (phase, start_x, start_y) = {
            let Some(session) = self.gesture.session.as_mut() else {
                return;
            };
            if session.pointer_id != id {
                return;
            }
            session.current_x = x;
            session.current_y = y;
            (session.phase, session.start_x, session.start_y)
        };

        match phase {
            GesturePhase::Idle => {}
            GesturePhase::PressedUnconfirmed => {
                // Swipe-to-scrub is only offered while paused.
                if !self.transport.is_paused() {
                    return;
                }
                let dx = x - start_x;
                let dy = y - start_y;
                let threshold = self.config.swipe_threshold_px;
                if dx.abs() > threshold && dx.abs() > dy.abs() {
                    if let Some(session) = self.gesture.session.as_mut() {
                        session.phase = GesturePhase::Swiping;
                        session.captured = true;
                    }
                    debug!("swipe confirmed (dx={:.0}, dy={:.0})", dx, dy);
                    self.timers.cancel(TimerKind::Click);
                    let offset = self.scrub_offset(dx);
                    self.overlay.show_continuous(format_offset(offset));
                    self.apply_scrub(offset);
                }
            }
            GesturePhase::Swiping => {
                let dx = x - start_x;
                let offset = self.scrub_offset(dx);
                self.overlay.update_continuous(format_offset(offset));
                self.apply_scrub(offset);
            }
        }
    }

    /// Write the scrub target for the computed offset. Committed
    /// immediately - drag moves already arrive at display rate, so no
    /// frame coalescing is needed here.
    fn apply_scrub(&mut self, offset: f64) {
        let anchor = self
            .gesture
            .session
            .as_ref()
            .map(|s| s.start_media_time)
            .unwrap_or(0.0);
        self.transport.seek(anchor + offset);
    }

    fn on_pointer_up(&mut self, id: u64, x: f32, _y: f32, now: Instant) {
        let Some(session) = self.gesture.session.as_ref() else {
            return;
        };
        if session.pointer_id != id {
            return;
        }
        let phase = session.phase;
        self.gesture.reset();

        match phase {
            GesturePhase::Idle => {}
            GesturePhase::Swiping => {
                // Drag end: no tap, no toggle. Hide without fade so the
                // next drag starts clean.
                debug!("swipe ended");
                self.hide_overlay();
            }
            GesturePhase::PressedUnconfirmed => {
                // A tap. Second tap inside the window resolves a double
                // tap; otherwise arm the delayed single-tap commit.
                if self.timers.is_pending(TimerKind::Click) {
                    self.timers.cancel(TimerKind::Click);
                    self.resolve_double_tap(x);
                } else {
                    let window = self.config.click_window();
                    self.timers.schedule(TimerKind::Click, window, now, |core| {
                        core.commit_single_tap();
                    });
                }
            }
        }
    }

    fn on_pointer_cancel(&mut self, id: u64) {
        let Some(session) = self.gesture.session.as_ref() else {
            return;
        };
        if session.pointer_id != id {
            return;
        }
        let phase = session.phase;
        debug!("pointer {} canceled in {:?}", id, phase);
        self.gesture.reset();
        self.timers.cancel(TimerKind::Click);
        if phase == GesturePhase::Swiping {
            self.hide_overlay();
        }
    }

    /// Zone classification for a double tap: strictly left of the left
    /// boundary skips back, strictly right of the right boundary skips
    /// forward, the middle band (boundaries included) is dropped silently.
    fn resolve_double_tap(&mut self, x: f32) {
        let width = self.surface_width();
        if width <= 0.0 {
            return;
        }
        let ratio = x / width;
        if ratio < self.config.left_zone_ratio {
            debug!("double tap left (x={:.0})", x);
            self.skip_with_overlay(false);
        } else if ratio > self.config.right_zone_ratio {
            debug!("double tap right (x={:.0})", x);
            self.skip_with_overlay(true);
        } else {
            debug!("double tap in dead middle zone, dropped (x={:.0})", x);
        }
    }

    /// Whether a pointer session is live (used by the surface widget to
    /// keep forwarding moves/releases).
    pub fn gesture_active(&self) -> bool {
        self.gesture.session.is_some()
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }
}
