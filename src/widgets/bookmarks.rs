//! Bookmark list: timestamped markers with a side-panel UI.

use eframe::egui::{self, RichText, Ui};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::format_time;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub time: f64,
    pub label: String,
}

impl Bookmark {
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            time,
            label: label.into(),
        }
    }
}

/// Bookmarks for the currently loaded file, kept ordered by time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmarkList {
    items: Vec<Bookmark>,
}

/// What the user did in the panel this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BookmarkAction {
    Jump(f64),
}

impl BookmarkList {
    pub fn add(&mut self, time: f64, label: impl Into<String>) -> &Bookmark {
        let bookmark = Bookmark::new(time, label);
        let idx = self
            .items
            .partition_point(|b| b.time <= bookmark.time);
        self.items.insert(idx, bookmark);
        &self.items[idx]
    }

    pub fn remove(&mut self, id: Uuid) {
        self.items.retain(|b| b.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn times(&self) -> Vec<f64> {
        self.items.iter().map(|b| b.time).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.items.iter()
    }

    /// Render the panel body. Returns the jump target if a row was clicked.
    pub fn show(&mut self, ui: &mut Ui) -> Option<BookmarkAction> {
        let mut action = None;
        let mut deleted = None;

        if self.items.is_empty() {
            ui.label(RichText::new("No bookmarks yet (press B)").weak());
            return None;
        }

        for bookmark in &self.items {
            ui.horizontal(|ui| {
                if ui
                    .link(format!("{}  {}", format_time(bookmark.time), bookmark.label))
                    .clicked()
                {
                    action = Some(BookmarkAction::Jump(bookmark.time));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").clicked() {
                        deleted = Some(bookmark.id);
                    }
                });
            });
        }

        if let Some(id) = deleted {
            self.remove(id);
        }
        action
    }
}
