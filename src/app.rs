use std::path::Path;

use eframe::egui;

use csv_finder::data::loader::{decode_text, is_supported_file, read_text, CsvParser};
use csv_finder::data::model::Delimiter;
use csv_finder::services::{NotifyKind, Notifier};
use csv_finder::settings::{Settings, SettingsStore};
use csv_finder::state::{AppState, DEFAULT_DROP_TEXT, HOVER_DROP_TEXT, INVALID_DROP_TEXT};
use crate::ui::toasts::Toasts;
use crate::ui::{panels, table, ContextClipboard, UiAction};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CsvFinderApp {
    pub state: AppState,
    parser: CsvParser,
    store: Box<dyn SettingsStore>,
    toasts: Toasts,
    /// Contents of the paste box on the landing page.
    paste_text: String,
    settings_open: bool,
    /// Files are hovering over the window.
    dragging: bool,
    /// Move keyboard focus to the filter box on the next frame.
    focus_filter: bool,
}

impl CsvFinderApp {
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        let settings = store.load();
        Self {
            state: AppState::new(settings),
            parser: CsvParser,
            store,
            toasts: Toasts::default(),
            paste_text: String::new(),
            settings_open: false,
            dragging: false,
            focus_filter: false,
        }
    }

    /// Parse and show `text`. Returns whether the load succeeded.
    fn load_text(&mut self, text: &str, delimiter: Option<Delimiter>) -> bool {
        self.state
            .load_raw(text, delimiter, &self.parser, &mut self.toasts)
            .is_ok()
    }

    /// Read and show a file from disk.
    pub fn load_path(&mut self, path: &Path, delimiter: Option<Delimiter>) {
        match read_text(path) {
            Ok(text) => {
                log::info!("Opening {}", path.display());
                self.load_text(&text, delimiter);
            }
            Err(e) => {
                log::error!("Failed to open file: {e:#}");
                self.toasts
                    .notify(NotifyKind::Error, &format!("Could not open {}", path.display()));
            }
        }
    }

    fn open_file_dialog(&mut self) {
        let file = rfd::FileDialog::new()
            .set_title("Open CSV or TSV data")
            .add_filter("Delimited text", &["csv", "tsv", "txt"])
            .add_filter("All files", &["*"])
            .pick_file();

        if let Some(path) = file {
            self.load_path(&path, None);
        }
    }

    fn update_settings(&mut self, settings: Settings) {
        self.state.set_settings(settings);
        self.store.save(&settings);
    }

    // -- Input events --

    fn handle_file_drop(&mut self, ctx: &egui::Context) {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        if hovering && !self.dragging {
            self.dragging = true;
            self.state.drop_text = HOVER_DROP_TEXT.to_string();
        } else if !hovering && self.dragging {
            self.dragging = false;
            if self.state.drop_text == HOVER_DROP_TEXT {
                self.state.drop_text = DEFAULT_DROP_TEXT.to_string();
            }
        }

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        let name = file
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| file.name.clone());
        if !is_supported_file(&name) {
            log::warn!("Ignoring dropped file {name}");
            self.state.drop_text = INVALID_DROP_TEXT.to_string();
            return;
        }

        if let Some(bytes) = &file.bytes {
            self.load_text(&decode_text(bytes), None);
        } else if let Some(path) = &file.path {
            self.load_path(path, None);
        }
    }

    /// Escape clears the filter; letters and digits typed outside a text
    /// field go into the filter box.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if !self.state.has_data() {
            return;
        }
        let text_field_focused = ctx.wants_keyboard_input();
        let (escape, typed) = ctx.input(|i| {
            let typed: String = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect();
            (i.key_pressed(egui::Key::Escape), typed)
        });

        if escape {
            self.state.set_query(String::new());
        }
        if text_field_focused || self.settings_open {
            return;
        }
        for c in typed.chars().filter(char::is_ascii_alphanumeric) {
            self.state.push_query_char(c);
            self.focus_filter = true;
        }
    }

    fn apply(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::Load(text) => {
                if self.load_text(&text, None) {
                    self.paste_text.clear();
                }
            }
            UiAction::OpenFile => self.open_file_dialog(),
            UiAction::Clear => self.state.clear(),
            UiAction::SetQuery(query) => self.state.set_query(query),
            UiAction::Sort(column) => self.state.set_sort(column),
            UiAction::CopyCell(text) => {
                self.state
                    .copy_cell(&text, &mut ContextClipboard(ctx), &mut self.toasts)
            }
            UiAction::CopyRow(position) => {
                self.state
                    .copy_row(position, &mut ContextClipboard(ctx), &mut self.toasts)
            }
            UiAction::ToggleSettings => self.settings_open = !self.settings_open,
            UiAction::UpdateSettings(settings) => self.update_settings(settings),
        }
    }
}

impl eframe::App for CsvFinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_file_drop(ctx);
        self.handle_keys(ctx);

        let mut actions = Vec::new();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &mut actions);
        });

        if self.state.has_data() {
            // ---- Filter box ----
            let focus = std::mem::take(&mut self.focus_filter);
            egui::TopBottomPanel::top("filter_bar").show(ctx, |ui| {
                panels::filter_bar(ui, &self.state, focus, &mut actions);
            });

            // ---- Central panel: table ----
            egui::CentralPanel::default().show(ctx, |ui| {
                table::data_table(ui, &self.state, &mut actions);
            });
        } else {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::landing(ui, &self.state, &mut self.paste_text, &mut actions);
            });
        }

        panels::settings_window(ctx, &mut self.settings_open, self.state.settings(), &mut actions);
        self.toasts.show(ctx);

        for action in actions {
            self.apply(ctx, action);
        }
    }
}
