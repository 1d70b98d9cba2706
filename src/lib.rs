//! SWIPA - Gesture-driven video player library
//!
//! Module tree shared by the binary target.

// Core engine (gesture machine, timers, overlay, transport)
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod help;
pub mod settings;
pub mod utils;
pub mod widgets;
