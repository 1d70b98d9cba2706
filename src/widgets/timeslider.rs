//! Seek bar widget, painter-drawn.
//!
//! **Why**: The built-in slider commits a value per pixel of motion; the
//! transport instead wants the grab/input/release protocol so rapid drag
//! positions coalesce into one media write per frame. This widget owns
//! the drawing and feeds that protocol.
//!
//! **Used by**: the bottom controls row of the app.

use eframe::egui::{self, Color32, Pos2, Rect, Response, Sense, Ui, Vec2};
use std::time::Instant;

use crate::core::PlayerCore;

const COLOR_TRACK: Color32 = Color32::from_rgb(40, 40, 45);
const COLOR_PROGRESS: Color32 = Color32::from_rgb(60, 100, 180);
const COLOR_BOOKMARK: Color32 = Color32::from_rgb(220, 160, 60);
const COLOR_HANDLE: Color32 = Color32::from_rgb(230, 230, 235);

/// Configuration for the seek bar widget
#[derive(Clone, Debug)]
pub struct TimeSliderConfig {
    pub height: f32,
    pub handle_radius: f32,
    pub show_bookmarks: bool,
}

impl Default for TimeSliderConfig {
    fn default() -> Self {
        Self {
            height: 18.0,
            handle_radius: 6.0,
            show_bookmarks: true,
        }
    }
}

/// Draw the seek bar and route drag interaction into the transport's
/// coalescing protocol. `bookmark_times` are drawn as tick marks.
pub fn time_slider(
    ui: &mut Ui,
    core: &mut PlayerCore,
    bookmark_times: &[f64],
    config: &TimeSliderConfig,
    now: Instant,
) {
    let duration = core.transport.duration();

    let desired_size = Vec2::new(ui.available_width(), config.height);
    let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let track = track_rect(rect);

        painter.rect_filled(track, 2.0, COLOR_TRACK);

        if duration > 0.0 {
            let ratio = (core.transport.position() / duration).clamp(0.0, 1.0) as f32;
            let mut progress = track;
            progress.set_right(track.min.x + track.width() * ratio);
            painter.rect_filled(progress, 2.0, COLOR_PROGRESS);

            if config.show_bookmarks {
                draw_bookmark_ticks(painter, track, bookmark_times, duration);
            }

            let handle = Pos2::new(track.min.x + track.width() * ratio, rect.center().y);
            painter.circle_filled(handle, config.handle_radius, COLOR_HANDLE);
        }
    }

    handle_interaction(&response, rect, duration, core, now);
}

fn track_rect(rect: Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(rect.min.x, rect.center().y - 3.0),
        Pos2::new(rect.max.x, rect.center().y + 3.0),
    )
}

fn draw_bookmark_ticks(painter: &egui::Painter, track: Rect, times: &[f64], duration: f64) {
    for &time in times {
        let ratio = (time / duration).clamp(0.0, 1.0) as f32;
        let x = track.min.x + track.width() * ratio;
        painter.line_segment(
            [
                Pos2::new(x, track.min.y - 2.0),
                Pos2::new(x, track.max.y + 2.0),
            ],
            (1.5, COLOR_BOOKMARK),
        );
    }
}

/// Drag start pauses via grab, each dragged frame stages a target, release
/// commits the last staged target and restores the play state.
fn handle_interaction(
    response: &Response,
    rect: Rect,
    duration: f64,
    core: &mut PlayerCore,
    now: Instant,
) {
    if duration <= 0.0 || !core.transport.is_loaded() {
        return;
    }

    if response.drag_started() {
        core.seek_bar_grab();
    }

    if response.dragged() || response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let ratio = ((pos.x - rect.min.x) / rect.width()).clamp(0.0, 1.0);
            core.seek_bar_input(ratio as f64 * duration, now);
        }
    }

    if response.drag_stopped() || response.clicked() {
        core.seek_bar_release();
    }
}
