pub mod panels;
pub mod table;
pub mod toasts;

use eframe::egui;

use csv_finder::services::ClipboardSink;
use csv_finder::settings::Settings;

/// Something the user asked for during a frame. Collected while drawing
/// and applied afterwards, so widgets only need read access to the state.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Load pasted text.
    Load(String),
    OpenFile,
    Clear,
    SetQuery(String),
    Sort(usize),
    CopyCell(String),
    /// Copy the displayed row at this position.
    CopyRow(usize),
    ToggleSettings,
    UpdateSettings(Settings),
}

/// Writes copied text to the system clipboard through egui.
pub struct ContextClipboard<'a>(pub &'a egui::Context);

impl ClipboardSink for ContextClipboard<'_> {
    fn write(&mut self, text: &str) {
        self.0.copy_text(text.to_string());
    }
}
