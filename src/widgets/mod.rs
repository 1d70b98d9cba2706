//! UI widgets: video surface, seek bar, bookmark panel, status bar.

pub mod bookmarks;
pub mod status;
pub mod surface;
pub mod timeslider;
