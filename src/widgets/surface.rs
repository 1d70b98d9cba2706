//! Video surface widget: pointer input capture and overlay feedback.
//!
//! **Why**: The gesture machine consumes plain [`SurfaceEvent`]s, so this
//! widget is the only place that knows about egui's pointer model. It
//! translates the response of one full-area interaction region into
//! down/move/up/cancel events and paints the glyph overlay on top.
//!
//! **Used by**: the app's central panel, every frame.

use eframe::egui::{self, Align2, Color32, FontId, PointerButton, Pos2, Rect, Response, Sense, Ui};
use std::time::Instant;

use crate::core::{OverlayZone, PlayerCore, SurfaceEvent};
use crate::utils::format_time;

/// egui reports a single mouse/touch pointer; the gesture machine keys
/// sessions by id, so give that pointer a fixed one.
const POINTER_ID: u64 = 0;

const COLOR_SURFACE_BG: Color32 = Color32::from_rgb(12, 12, 14);
const COLOR_FRAME_FILL: Color32 = Color32::from_rgb(22, 24, 30);
const COLOR_HINT_TEXT: Color32 = Color32::from_rgb(120, 120, 130);

/// Draw the video surface, forward pointer input to `core`, paint the
/// overlay. Fills all remaining space in the parent layout.
pub fn video_surface(ui: &mut Ui, core: &mut PlayerCore, now: Instant) -> Response {
    let desired = ui.available_size();
    let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());

    core.set_surface_width(rect.width());
    forward_pointer_events(ui, &response, rect, core, now);

    if ui.is_rect_visible(rect) {
        draw_placeholder(ui, rect, core);
        draw_overlay(ui, rect, core, now);
    }

    response
}

/// Translate this frame's interaction into gesture machine events.
/// Press and release both arrive through the drag API because the region
/// senses click-and-drag; a press with no movement is still a drag start.
fn forward_pointer_events(
    ui: &Ui,
    response: &Response,
    rect: Rect,
    core: &mut PlayerCore,
    now: Instant,
) {
    if let Some(pos) = response.interact_pointer_pos() {
        let x = pos.x - rect.min.x;
        let y = pos.y - rect.min.y;

        if response.drag_started_by(PointerButton::Primary) {
            core.handle_surface_event(
                SurfaceEvent::PointerDown {
                    id: POINTER_ID,
                    x,
                    y,
                    primary: true,
                },
                now,
            );
        } else if response.drag_started_by(PointerButton::Secondary) {
            core.handle_surface_event(
                SurfaceEvent::PointerDown {
                    id: POINTER_ID,
                    x,
                    y,
                    primary: false,
                },
                now,
            );
        } else if response.dragged_by(PointerButton::Primary) {
            core.handle_surface_event(
                SurfaceEvent::PointerMove {
                    id: POINTER_ID,
                    x,
                    y,
                },
                now,
            );
        }

        if response.drag_stopped_by(PointerButton::Primary) {
            core.handle_surface_event(
                SurfaceEvent::PointerUp {
                    id: POINTER_ID,
                    x,
                    y,
                },
                now,
            );
        }
    } else if core.gesture_active() && !ui.input(|i| i.pointer.any_down()) {
        // The press we were tracking vanished without a release on the
        // surface (focus loss, window drag). Treat it as capture loss.
        core.handle_surface_event(SurfaceEvent::PointerCancel { id: POINTER_ID }, now);
    }
}

/// Stand-in for decoded video: a letterboxed frame with the title and a
/// running position readout, or a drop hint when nothing is loaded.
fn draw_placeholder(ui: &Ui, rect: Rect, core: &PlayerCore) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, COLOR_SURFACE_BG);

    if !core.transport.is_loaded() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Drop a video file here or press Ctrl+O",
            FontId::proportional(16.0),
            COLOR_HINT_TEXT,
        );
        return;
    }

    // 16:9 frame centered in whatever space we got
    let frame = fit_16x9(rect);
    painter.rect_filled(frame, 2.0, COLOR_FRAME_FILL);
    painter.text(
        frame.center(),
        Align2::CENTER_CENTER,
        core.transport.title(),
        FontId::proportional(18.0),
        COLOR_HINT_TEXT,
    );
    painter.text(
        frame.left_bottom() + egui::vec2(8.0, -8.0),
        Align2::LEFT_BOTTOM,
        format!(
            "{} / {}",
            format_time(core.transport.position()),
            format_time(core.transport.duration())
        ),
        FontId::monospace(12.0),
        COLOR_HINT_TEXT,
    );
}

fn fit_16x9(rect: Rect) -> Rect {
    let avail = rect.size();
    let scale = (avail.x / 16.0).min(avail.y / 9.0);
    let size = egui::vec2(16.0 * scale, 9.0 * scale);
    Rect::from_center_size(rect.center(), size)
}

/// Paint the feedback glyph. Discrete feedback fades out over the second
/// half of its lifetime; continuous scrub feedback stays opaque.
fn draw_overlay(ui: &Ui, rect: Rect, core: &PlayerCore, now: Instant) {
    let alpha = core.overlay_alpha(now);
    if alpha <= 0.0 {
        return;
    }

    let center = overlay_anchor(rect, core.overlay.zone);
    let bg = Color32::from_black_alpha((alpha * 150.0) as u8);
    let fg = Color32::from_white_alpha((alpha * 235.0) as u8);

    let painter = ui.painter_at(rect);
    painter.circle_filled(center, 46.0, bg);
    painter.text(
        center,
        Align2::CENTER_CENTER,
        &core.overlay.symbol,
        FontId::proportional(34.0),
        fg,
    );
}

fn overlay_anchor(rect: Rect, zone: OverlayZone) -> Pos2 {
    let y = rect.center().y;
    match zone {
        OverlayZone::Center => rect.center(),
        OverlayZone::Left => Pos2::new(rect.min.x + rect.width() * 0.18, y),
        OverlayZone::Right => Pos2::new(rect.min.x + rect.width() * 0.82, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_anchor_zones() {
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), egui::vec2(300.0, 100.0));
        assert_eq!(overlay_anchor(rect, OverlayZone::Center), rect.center());
        assert_eq!(overlay_anchor(rect, OverlayZone::Left).x, 54.0);
        assert_eq!(overlay_anchor(rect, OverlayZone::Right).x, 246.0);
    }

    #[test]
    fn test_fit_16x9_wide_parent() {
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), egui::vec2(1000.0, 90.0));
        let frame = fit_16x9(rect);
        assert_eq!(frame.height(), 90.0);
        assert_eq!(frame.width(), 160.0);
        assert_eq!(frame.center(), rect.center());
    }
}
