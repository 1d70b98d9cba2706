use swipa::cli::Args;
use swipa::config;
use swipa::core::{ClockMedia, PlayerCore, PlayerEvent, PlayerEventSender};
use swipa::help;
use swipa::settings::AppSettings;
use swipa::utils;
use swipa::widgets::bookmarks::{BookmarkAction, BookmarkList};
use swipa::widgets::status::StatusBar;
use swipa::widgets::surface::video_surface;
use swipa::widgets::timeslider::{TimeSliderConfig, time_slider};

use clap::Parser;
use crossbeam_channel::Receiver;
use eframe::{egui, glow};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Main application state
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
struct SwipaApp {
    #[serde(skip)]
    core: PlayerCore,
    #[serde(skip)]
    event_rx: Option<Receiver<PlayerEvent>>,
    #[serde(skip)]
    status_bar: StatusBar,
    #[serde(skip)]
    path_config: config::PathConfig,
    #[serde(skip)]
    is_fullscreen: bool,
    #[serde(skip)]
    fullscreen_dirty: bool,
    settings: AppSettings,
    /// Bookmarks persist across sessions together with the settings
    bookmarks: BookmarkList,
}

impl Default for SwipaApp {
    fn default() -> Self {
        Self {
            core: PlayerCore::default(),
            event_rx: None,
            status_bar: StatusBar::new(),
            path_config: config::PathConfig::default(),
            is_fullscreen: false,
            fullscreen_dirty: false,
            settings: AppSettings::default(),
            bookmarks: BookmarkList::default(),
        }
    }
}

impl SwipaApp {
    /// Rebuild the runtime side after deserialization: event channel,
    /// gesture config from settings, path config from CLI.
    fn rewire(&mut self, path_config: config::PathConfig) {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.core = PlayerCore::new(self.settings.gesture.clone(), PlayerEventSender::new(tx));
        self.core.transport.set_volume(self.settings.volume);
        self.event_rx = Some(rx);
        self.path_config = path_config;
    }

    /// Load a local video file into the transport. Decoding is out of
    /// scope, so playback runs on a wall clock whose duration is derived
    /// from the file size as a stand-in for the demuxed value.
    fn load_file(&mut self, path: &Path) {
        if !utils::media::is_video(path) {
            warn!("Ignoring non-video file: {}", path.display());
            self.status_bar
                .set_message(format!("Not a video file: {}", path.display()));
            return;
        }

        let title = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("video")
            .to_string();
        let duration = pseudo_duration(path);

        info!(
            "Loading {} ({}s clock duration)",
            path.display(),
            duration as u64
        );
        self.bookmarks.clear();
        self.core
            .transport
            .load(title, Box::new(ClockMedia::new(duration)));
        self.core.transport.set_volume(self.settings.volume);
        self.status_bar.set_message("");
    }

    fn open_file_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Video", utils::media::VIDEO_EXTS)
            .pick_file();
        if let Some(path) = picked {
            self.load_file(&path);
        }
    }

    /// Drain player events into UI state (status messages, bookmark list).
    /// Returns how many events were drained; a non-zero count means panel
    /// state changed after rendering and the frame must be repainted.
    fn handle_events(&mut self) -> usize {
        let Some(rx) = &self.event_rx else { return 0 };
        let events: Vec<PlayerEvent> = rx.try_iter().collect();
        let drained = events.len();
        for event in events {
            match event {
                PlayerEvent::Loaded { title, duration } => {
                    debug!("Loaded '{}', duration {:.1}s", title, duration);
                }
                PlayerEvent::PlayStateChanged { playing } => {
                    debug!("Play state: {}", if playing { "playing" } else { "paused" });
                }
                PlayerEvent::PositionChanged { old, new } => {
                    debug!("Position {:.2} -> {:.2}", old, new);
                }
                PlayerEvent::BookmarkAdded { time, label } => {
                    self.bookmarks.add(time, label.clone());
                    self.status_bar.set_message(format!("Added {}", label));
                }
            }
        }
        drained
    }

    /// Global keys. Skipped entirely while a text widget has focus.
    fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        if ctx.memory(|mem| mem.focused().is_some()) {
            return;
        }

        let (
            space,
            left,
            right,
            bookmark,
            help_key,
            fullscreen_key,
            open,
            vol_up,
            vol_down,
            toggle_panel,
        ) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::B),
                i.key_pressed(egui::Key::Questionmark)
                    || i.key_pressed(egui::Key::F1)
                    || i.key_pressed(egui::Key::H),
                i.key_pressed(egui::Key::F),
                i.modifiers.ctrl && i.key_pressed(egui::Key::O),
                i.key_pressed(egui::Key::ArrowUp),
                i.key_pressed(egui::Key::ArrowDown),
                i.key_pressed(egui::Key::L),
            )
        });

        if space {
            self.core.key_toggle_play();
        }
        if left {
            self.core.key_skip(false);
        }
        if right {
            self.core.key_skip(true);
        }
        if bookmark {
            // The list itself is filled via the BookmarkAdded event
            let _ = self.core.bookmark_here();
        }
        if help_key {
            self.settings.show_help = !self.settings.show_help;
        }
        if fullscreen_key {
            self.is_fullscreen = !self.is_fullscreen;
            self.fullscreen_dirty = true;
        }
        if open {
            self.open_file_dialog();
        }
        if vol_up || vol_down {
            let delta = if vol_up { 0.05 } else { -0.05 };
            let volume = self.core.transport.volume() + delta;
            self.core.transport.set_volume(volume);
            self.settings.volume = self.core.transport.volume();
        }
        if toggle_panel {
            self.settings.show_bookmarks = !self.settings.show_bookmarks;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.is_fullscreen {
                self.is_fullscreen = false;
                self.fullscreen_dirty = true;
            } else {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn render_controls(&mut self, ctx: &egui::Context, now: Instant) {
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            time_slider(
                ui,
                &mut self.core,
                &self.bookmarks.times(),
                &TimeSliderConfig::default(),
                now,
            );
            ui.horizontal(|ui| {
                let play_label = if self.core.transport.is_paused() {
                    "\u{25B6}"
                } else {
                    "\u{23F8}"
                };
                if ui.button(play_label).clicked() {
                    self.core.key_toggle_play();
                }
                if ui.button("\u{23EA}").clicked() {
                    self.core.key_skip(false);
                }
                if ui.button("\u{23E9}").clicked() {
                    self.core.key_skip(true);
                }
                if ui.button("\u{2690}").on_hover_text("Bookmark (B)").clicked() {
                    let _ = self.core.bookmark_here();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut volume = self.core.transport.volume();
                    if ui
                        .add(egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false))
                        .changed()
                    {
                        self.core.transport.set_volume(volume);
                        self.settings.volume = volume;
                    }
                    ui.label("\u{1F50A}");
                });
            });
            ui.add_space(4.0);
        });
    }

    fn render_bookmark_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("bookmarks")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Bookmarks");
                ui.separator();
                if let Some(BookmarkAction::Jump(time)) = self.bookmarks.show(ui) {
                    self.core.transport.seek(time);
                    self.core.transport.pause();
                }
            });
    }

    /// Ask egui to wake us exactly when the next deadline is due, instead
    /// of repainting continuously while idle.
    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if self.core.transport.is_loaded() && !self.core.transport.is_paused() {
            ctx.request_repaint();
            return;
        }
        if self.core.overlay.has_pending() {
            ctx.request_repaint();
            return;
        }
        if let Some(deadline) = self.core.timers.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        } else if self.core.overlay.visible && self.core.overlay.fade_enabled {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for SwipaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Apply theme based on settings
        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Apply pending fullscreen changes
        if self.fullscreen_dirty {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.is_fullscreen));
            self.fullscreen_dirty = false;
        }

        // Handle dropped files
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if let Some(path) = dropped.first() {
            info!("File dropped: {}", path.display());
            self.load_file(path);
        }

        // One update-loop turn for the player core
        self.core.tick(now);

        // A release anywhere in the window ends a seek-bar drag, even when
        // the widget never saw the pointer again.
        if self.core.seek_drag_active() && !ctx.input(|i| i.pointer.any_down()) {
            self.core.conclude_seek_drag();
        }

        if !self.is_fullscreen {
            self.status_bar.render(ctx, &self.core, self.bookmarks.len());
            self.render_controls(ctx, now);
            if self.settings.show_bookmarks {
                self.render_bookmark_panel(ctx);
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                video_surface(ui, &mut self.core, now);

                if self.settings.show_help {
                    egui::Area::new(egui::Id::new("help_overlay"))
                        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                        .show(ctx, |ui| {
                            help::render_help_overlay(ui);
                        });
                }
            });

        // Keyboard after panels, so text-field focus is up to date
        self.handle_keyboard_input(ctx);

        // Drain events last: anything widgets or keys emitted this frame
        // lands in the panels' state now, and the frame is repainted so it
        // becomes visible without waiting for further input.
        if self.handle_events() > 0 {
            ctx.request_repaint();
        }

        self.schedule_repaint(ctx, now);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.gesture = self.core.config.clone();
        self.settings.volume = self.core.transport.volume();
        if let Ok(json) = serde_json::to_string(self) {
            storage.set_string(eframe::APP_KEY, json);
            debug!("App state saved ({} bookmark(s))", self.bookmarks.len());
        }
    }

    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        self.core.teardown();
        debug!("Player core torn down");
    }
}

/// Stand-in duration for the simulated playback clock, derived from the
/// file size so it is stable per file.
fn pseudo_duration(path: &Path) -> f64 {
    let bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    (bytes as f64 / 250_000.0).clamp(30.0, 7200.0)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());

    // Ensure directories exist
    if let Err(e) = path_config.ensure_dir() {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // Initialize logger based on --log flag
    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| path_config.file("swipa.log"));

        let file = std::fs::File::create(&log_path)?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!(
            "Logging to file: {} (level: {:?})",
            log_path.display(),
            log_level
        );
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .init();
    }

    info!("Swipa gesture player starting...");
    debug!("Command-line args: {:?}", args);
    info!(
        "Config path: {}",
        path_config.file("swipa.json").display()
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "Swipa v{} \u{2022} F1 for help",
                env!("CARGO_PKG_VERSION")
            ))
            .with_inner_size([960.0, 600.0])
            .with_resizable(true)
            .with_drag_and_drop(true),
        persist_window: true,
        #[cfg(not(target_arch = "wasm32"))]
        persistence_path: Some(path_config.file("swipa.json")),
        ..Default::default()
    };

    eframe::run_native(
        "Swipa",
        native_options,
        Box::new(move |cc| {
            // Load persisted app state if available, otherwise create default
            let mut app: SwipaApp = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_else(|| {
                    info!("No persisted state found, creating default app");
                    SwipaApp::default()
                });

            app.rewire(path_config);

            // CLI overrides on top of persisted settings
            if let Some(volume) = args.volume {
                app.settings.volume = volume.clamp(0.0, 1.0);
                app.core.transport.set_volume(app.settings.volume);
            }
            if let Some(seek) = args.seek_amount {
                app.core.config.seek_amount_secs = seek.max(0.1);
            }
            if args.fullscreen {
                app.is_fullscreen = true;
                app.fullscreen_dirty = true;
            }

            if let Some(ref path) = args.file_path {
                app.load_file(path);
                if args.autoplay {
                    app.core.transport.play();
                }
            }

            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_emitted_by_input_drain_same_frame() {
        let mut app = SwipaApp::default();
        app.rewire(config::PathConfig::default());
        app.core
            .transport
            .load("clip", Box::new(ClockMedia::new(60.0)));
        app.core.transport.seek(12.0);
        app.handle_events();
        assert!(app.bookmarks.is_empty());

        // A bookmark key press emits after any earlier drain ran
        let _ = app.core.bookmark_here();
        let rx = app.event_rx.as_ref().unwrap();
        assert!(!rx.is_empty(), "emission must be pending until the drain");

        let drained = app.handle_events();
        assert!(drained > 0, "the late drain must pick the event up");
        assert_eq!(app.bookmarks.times(), vec![12.0]);
        assert!(app.status_bar.current_message.contains("Bookmark 0:12"));
    }
}
