use eframe::egui::text::LayoutJob;
use eframe::egui::{self, Color32, RichText, Sense, TextFormat, Ui};
use egui_extras::{Column, TableBuilder};

use csv_finder::data::highlight::Highlighter;
use csv_finder::state::AppState;

use super::UiAction;

const MATCH_BACKGROUND: Color32 = Color32::from_rgb(255, 221, 87);

// ---------------------------------------------------------------------------
// Data table (central panel)
// ---------------------------------------------------------------------------

/// Render the displayed rows. Header clicks sort, cell clicks copy.
pub fn data_table(ui: &mut Ui, state: &AppState, actions: &mut Vec<UiAction>) {
    let Some(table) = state.table() else {
        return;
    };
    let n_cols = table.column_count().max(1);
    let header = state.header();
    let sort = state.sort();
    let highlighter = state.highlighter();
    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 6.0;

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .min_scrolled_height(0.0);
    for _ in 0..n_cols {
        builder = builder.column(Column::initial(140.0).at_least(40.0).clip(true));
    }

    builder
        .header(row_height, |mut header_row| {
            for col in 0..n_cols {
                header_row.col(|ui: &mut Ui| match header {
                    Some(names) => {
                        let mut title = names.get(col).cloned().unwrap_or_default();
                        if let Some(spec) = sort.filter(|s| s.column == col) {
                            title.push(' ');
                            title.push_str(spec.direction.indicator());
                        }
                        let clicked = ui
                            .add(egui::Label::new(RichText::new(title).strong()).sense(Sense::click()))
                            .on_hover_text("Sort by this column")
                            .clicked();
                        if clicked {
                            actions.push(UiAction::Sort(col));
                        }
                    }
                    None => {
                        ui.label(RichText::new(format!("{}", col + 1)).weak());
                    }
                });
            }
        })
        .body(|body| {
            body.rows(row_height, state.displayed_count(), |mut row| {
                let position = row.index();
                let Some(cells) = state.displayed_row(position) else {
                    return;
                };
                for col in 0..n_cols {
                    let text = cells.get(col).map(String::as_str).unwrap_or("");
                    row.col(|ui: &mut Ui| {
                        let job = highlighted(ui, text, highlighter);
                        let response = ui
                            .add(egui::Label::new(job).sense(Sense::click()).truncate())
                            .on_hover_text("Click to copy");
                        if response.clicked() {
                            actions.push(UiAction::CopyCell(text.to_string()));
                        }
                        response.context_menu(|ui: &mut Ui| {
                            if ui.button("Copy cell").clicked() {
                                actions.push(UiAction::CopyCell(text.to_string()));
                                ui.close_menu();
                            }
                            if ui.button("Copy row").clicked() {
                                actions.push(UiAction::CopyRow(position));
                                ui.close_menu();
                            }
                        });
                    });
                }
            });
        });
}

/// Lay out cell text with query hits on a highlighted background.
fn highlighted(ui: &Ui, text: &str, highlighter: &Highlighter) -> LayoutJob {
    let font = egui::TextStyle::Body.resolve(ui.style());
    let color = ui.visuals().text_color();
    let mut job = LayoutJob::default();
    for span in highlighter.spans(text) {
        let format = if span.is_match {
            TextFormat {
                font_id: font.clone(),
                color: Color32::BLACK,
                background: MATCH_BACKGROUND,
                ..Default::default()
            }
        } else {
            TextFormat::simple(font.clone(), color)
        };
        job.append(span.text, 0.0, format);
    }
    job
}
