//! Player core - gesture machine, timers, overlay, transport.
//!
//! Rendering-free: everything here is plain state mutated by synchronous
//! dispatch calls, driven by the UI's update loop.

pub mod gesture;
pub mod overlay;
pub mod player;
pub mod player_events;
pub mod seekbar;
pub mod timers;
pub mod transport;

pub use gesture::{GesturePhase, GestureState, PointerSession, SurfaceEvent};
pub use overlay::{OverlayState, OverlayZone};
pub use player::{GestureConfig, PlayerCore};
pub use player_events::{PlayerEvent, PlayerEventSender};
pub use timers::{TimerKind, TimerRegistry};
pub use transport::{ClockMedia, MediaElement, Transport};
