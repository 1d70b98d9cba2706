//! Transient gesture-feedback overlay state.
//!
//! Owned exclusively by the player core; the gesture handlers write it, the
//! surface widget paints it, nothing reads it back for decisions.
//!
//! # Discrete vs continuous
//!
//! Discrete feedback (tap, skip) fades out and must visibly restart even
//! when an overlay is already showing. The restart is a two-phase protocol:
//! `request_discrete` hides immediately and parks a pending show that the
//! core applies on the *next* update tick, so a full frame elapses between
//! hide and re-show. Continuous feedback (drag scrub) never fades - rapid
//! updates would flicker - and is hidden explicitly on drag end.

/// Horizontal placement of the overlay on the video surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayZone {
    Center,
    Left,
    Right,
}

/// Overlay glyphs
pub const SYMBOL_PLAY: &str = "\u{25B6}"; // ▶
pub const SYMBOL_PAUSE: &str = "\u{23F8}"; // ⏸
pub const SYMBOL_SKIP_BACK: &str = "\u{23EA}"; // ⏪
pub const SYMBOL_SKIP_FWD: &str = "\u{23E9}"; // ⏩

/// A discrete show waiting for the next update tick
#[derive(Debug, Clone)]
pub struct PendingShow {
    pub symbol: String,
    pub zone: OverlayZone,
}

/// Overlay display state
#[derive(Debug, Clone)]
pub struct OverlayState {
    pub visible: bool,
    pub symbol: String,
    pub zone: OverlayZone,
    /// Whether the visible->hidden transition animates. Discrete feedback
    /// fades; continuous drag feedback does not.
    pub fade_enabled: bool,
    pending_show: Option<PendingShow>,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayState {
    pub fn new() -> Self {
        Self {
            visible: false,
            symbol: String::new(),
            zone: OverlayZone::Center,
            fade_enabled: true,
            pending_show: None,
        }
    }

    /// Stage a discrete show: hide immediately, apply on the next tick.
    pub fn request_discrete(&mut self, symbol: impl Into<String>, zone: OverlayZone) {
        self.visible = false;
        self.pending_show = Some(PendingShow {
            symbol: symbol.into(),
            zone,
        });
    }

    /// Take the staged show, if any (called once per tick by the core).
    pub fn take_pending(&mut self) -> Option<PendingShow> {
        self.pending_show.take()
    }

    /// Apply a staged show: visible, fading enabled.
    pub fn apply(&mut self, show: PendingShow) {
        self.visible = true;
        self.symbol = show.symbol;
        self.zone = show.zone;
        self.fade_enabled = true;
    }

    /// Show continuous (drag) feedback: no fade, no staging.
    pub fn show_continuous(&mut self, symbol: impl Into<String>) {
        self.pending_show = None;
        self.visible = true;
        self.symbol = symbol.into();
        self.zone = OverlayZone::Center;
        self.fade_enabled = false;
    }

    /// Update the text of continuous feedback in place.
    pub fn update_continuous(&mut self, symbol: impl Into<String>) {
        self.symbol = symbol.into();
    }

    /// Hide immediately, dropping any staged show.
    pub fn hide_now(&mut self) {
        self.visible = false;
        self.pending_show = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending_show.is_some()
    }
}
