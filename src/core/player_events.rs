//! Outward player events for the surrounding UI.
//!
//! Events are emitted when the transport or gesture layer changes playback
//! state and consumed by the application (status bar, bookmark list, log).

use crossbeam_channel::Sender;

/// Events emitted by the player core
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    /// A media source was attached (duration 0.0 when unknown)
    Loaded { title: String, duration: f64 },

    /// Playback started or stopped
    PlayStateChanged { playing: bool },

    /// Playback position changed through a seek (not normal playback)
    PositionChanged { old: f64, new: f64 },

    /// A bookmark was placed at the current position
    BookmarkAdded { time: f64, label: String },
}

/// Event sender wrapper for the player core.
///
/// The core holds this sender to notify the app when its state changes.
#[derive(Clone, Debug)]
pub struct PlayerEventSender {
    sender: Option<Sender<PlayerEvent>>,
}

impl PlayerEventSender {
    /// Create event sender (connected to channel)
    pub fn new(sender: Sender<PlayerEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Create dummy sender (for tests or when events not needed)
    pub fn dummy() -> Self {
        Self { sender: None }
    }

    /// Emit event (silent if no receiver)
    pub fn emit(&self, event: PlayerEvent) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(event); // Ignore send errors (receiver might be dropped)
        }
    }
}

impl Default for PlayerEventSender {
    fn default() -> Self {
        Self::dummy()
    }
}
