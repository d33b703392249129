use eframe::egui::{self, Align, Layout, RichText, Ui};

use csv_finder::data::model::Delimiter;
use csv_finder::settings::Settings;
use csv_finder::state::AppState;

use super::UiAction;

const PASTE_HINT: &str =
    "Paste your CSV or TSV data here. Spreadsheet compatible. Shortcut: Ctrl + Enter to load.";

/// Id of the filter box, so typing elsewhere can focus it.
pub fn filter_id() -> egui::Id {
    egui::Id::new("filter_query")
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, actions: &mut Vec<UiAction>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                actions.push(UiAction::OpenFile);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.has_data(), egui::Button::new("Clear"))
                .clicked()
            {
                actions.push(UiAction::Clear);
                ui.close_menu();
            }
        });

        if ui.button("Settings").clicked() {
            actions.push(UiAction::ToggleSettings);
        }

        if state.has_data() {
            ui.separator();
            ui.label(format!(
                "Loaded rows: {}, Displayed rows: {}",
                state.row_count(),
                state.displayed_count()
            ));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                if ui.button("✖").on_hover_text("Clear loaded data").clicked() {
                    actions.push(UiAction::Clear);
                }
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Filter box
// ---------------------------------------------------------------------------

pub fn filter_bar(ui: &mut Ui, state: &AppState, focus: bool, actions: &mut Vec<UiAction>) {
    let mut query = state.query().to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut query)
            .id(filter_id())
            .hint_text("Filter")
            .desired_width(f32::INFINITY),
    );
    if focus {
        response.request_focus();
    }
    if response.changed() {
        actions.push(UiAction::SetQuery(query));
    }
}

// ---------------------------------------------------------------------------
// Landing page (nothing loaded)
// ---------------------------------------------------------------------------

pub fn landing(ui: &mut Ui, state: &AppState, paste_text: &mut String, actions: &mut Vec<UiAction>) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(24.0);
        ui.heading("CSV Finder");
        ui.label("Load and search CSV data for people in a hurry.");
        ui.add_space(16.0);

        ui.label(RichText::new(&state.drop_text).italics());
        ui.add_space(8.0);

        let response = ui.add(
            egui::TextEdit::multiline(paste_text)
                .hint_text(PASTE_HINT)
                .desired_rows(12)
                .desired_width(f32::INFINITY)
                .code_editor(),
        );
        let shortcut = response.has_focus()
            && ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter));

        let ready = !paste_text.trim().is_empty();
        let clicked = ui.add_enabled(ready, egui::Button::new("Load")).clicked();
        if ready && (clicked || shortcut) {
            actions.push(UiAction::Load(paste_text.clone()));
        }

        ui.add_space(16.0);
        ui.label(
            RichText::new(
                "All file loading and data processing happen on this machine. \
                 No data is sent to any server.",
            )
            .small()
            .weak(),
        );
    });
}

// ---------------------------------------------------------------------------
// Settings window
// ---------------------------------------------------------------------------

pub fn settings_window(
    ctx: &egui::Context,
    open: &mut bool,
    current: Settings,
    actions: &mut Vec<UiAction>,
) {
    let mut settings = current;
    egui::Window::new("Settings")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            ui.checkbox(&mut settings.has_header, "First row is a header");
            ui.checkbox(&mut settings.exact_match, "Match the whole filter as one phrase");
            ui.checkbox(
                &mut settings.skip_empty_rows,
                "Skip rows with only blank cells (like \",,\") when loading",
            )
            .on_hover_text("Completely empty lines are always skipped.");
            ui.checkbox(&mut settings.simplify_numbers, "Strip $ and , from copied cells");

            ui.horizontal(|ui: &mut Ui| {
                ui.label("Delimiter");
                egui::ComboBox::from_id_salt("delimiter")
                    .selected_text(settings.delimiter.to_string())
                    .show_ui(ui, |ui: &mut Ui| {
                        for d in Delimiter::ALL {
                            ui.selectable_value(&mut settings.delimiter, d, d.to_string());
                        }
                    });
            });
            ui.label(
                RichText::new("Delimiter and empty-row settings apply to the next load.")
                    .small()
                    .weak(),
            );
        });

    if settings != current {
        actions.push(UiAction::UpdateSettings(settings));
    }
}
