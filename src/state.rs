use thiserror::Error;

use crate::data::filter::{filtered_indices, FilterOptions};
use crate::data::highlight::Highlighter;
use crate::data::loader::{parse_options, ParseError, Parser};
use crate::data::model::{Delimiter, Row, SortSpec, Table};
use crate::data::normalize::{normalize_for_copy, row_for_copy, CopyOptions};
use crate::data::sort::sort_indices;
use crate::services::{ClipboardSink, NotifyKind, Notifier};
use crate::settings::Settings;

pub const DEFAULT_DROP_TEXT: &str = "Drag and drop a CSV file here.";
pub const HOVER_DROP_TEXT: &str = "Release to upload the CSV file";
pub const INVALID_DROP_TEXT: &str = "Please drop a valid CSV file.";
const LOADED_TEXT: &str = "Data loaded successfully.";
const INVALID_DATA_TEXT: &str = "Invalid data format.";

/// Why a load was rejected. The previous table is kept in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(
        "input could not be parsed ({} problem(s)): {}",
        .errors.len(),
        .errors.first().map(ToString::to_string).unwrap_or_default()
    )]
    Parse { errors: Vec<ParseError> },
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Displayed rows are recomputed from the table, query, sort and settings
/// whenever one of them changes.
pub struct AppState {
    /// Loaded table (None until the user loads something).
    table: Option<Table>,

    /// Delimiter setting that produced the current table.
    loaded_delimiter: Delimiter,

    settings: Settings,

    query: String,

    /// Compiled highlight pattern for `query`.
    highlighter: Highlighter,

    /// Active sort; survives query changes, reset by load and clear.
    sort: Option<SortSpec>,

    /// Indices into the table's rows, in display order.
    visible_indices: Vec<usize>,

    /// Hint shown on the landing page.
    pub drop_text: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            table: None,
            loaded_delimiter: settings.delimiter,
            settings,
            query: String::new(),
            highlighter: Highlighter::new(""),
            sort: None,
            visible_indices: Vec::new(),
            drop_text: DEFAULT_DROP_TEXT.to_string(),
        }
    }

    // -- Loading --

    /// Parse `raw` and, if it is valid, replace the current table with it.
    ///
    /// On parse errors the previous table, query and sort are left as they
    /// were and a single error notification is sent.
    pub fn load_raw(
        &mut self,
        raw: &str,
        delimiter_override: Option<Delimiter>,
        parser: &dyn Parser,
        notifier: &mut dyn Notifier,
    ) -> Result<(), LoadError> {
        let delimiter = delimiter_override.unwrap_or(self.settings.delimiter);
        let options = parse_options(raw, delimiter, self.settings.skip_empty_rows);
        let output = parser.parse(raw, options);

        if !output.errors.is_empty() {
            for e in &output.errors {
                log::warn!("Parse problem: {e}");
            }
            let err = LoadError::Parse {
                errors: output.errors,
            };
            log::error!("Rejected input: {err}");
            notifier.notify(NotifyKind::Error, INVALID_DATA_TEXT);
            return Err(err);
        }

        log::info!(
            "Loaded {} rows (delimiter {:?})",
            output.rows.len(),
            char::from(options.delimiter)
        );
        self.table = Some(Table::new(output.rows));
        self.loaded_delimiter = delimiter;
        self.sort = None;
        self.drop_text = LOADED_TEXT.to_string();
        self.refresh();
        notifier.notify(NotifyKind::Success, LOADED_TEXT);
        Ok(())
    }

    /// Drop the table, query and sort.
    pub fn clear(&mut self) {
        self.table = None;
        self.sort = None;
        self.set_query(String::new());
        self.drop_text = DEFAULT_DROP_TEXT.to_string();
        self.visible_indices.clear();
    }

    // -- Query / sort / settings --

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        log::debug!("Query changed to {query:?}");
        self.highlighter = Highlighter::new(&query);
        self.query = query;
        self.refresh();
    }

    /// Append a typed character to the query.
    pub fn push_query_char(&mut self, c: char) {
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query);
    }

    /// Sort by `column`, flipping the direction if it is already the
    /// ascending sort column.
    pub fn set_sort(&mut self, column: usize) {
        let spec = SortSpec::toggled(self.sort, column);
        log::debug!("Sorting by column {} {:?}", spec.column, spec.direction);
        self.sort = Some(spec);
        self.refresh();
    }

    pub fn set_settings(&mut self, settings: Settings) {
        if settings == self.settings {
            return;
        }
        self.settings = settings;
        self.refresh();
    }

    /// Recompute `visible_indices` from the current state.
    fn refresh(&mut self) {
        let Some(table) = &self.table else {
            self.visible_indices.clear();
            return;
        };
        let options = FilterOptions {
            has_header: self.settings.has_header,
            exact_match: self.settings.exact_match,
        };
        let indices = filtered_indices(table, &self.query, options);
        self.visible_indices =
            sort_indices(table.rows(), indices, self.sort, self.settings.has_header);
    }

    // -- Copy --

    /// Copy one cell's text, normalized per the settings.
    pub fn copy_cell(
        &self,
        text: &str,
        clipboard: &mut dyn ClipboardSink,
        notifier: &mut dyn Notifier,
    ) {
        let options = CopyOptions {
            simplify_numbers: self.settings.simplify_numbers,
        };
        let copied = normalize_for_copy(text, options);
        clipboard.write(&copied);
        notifier.notify(NotifyKind::Success, &format!("Copied: {copied}"));
    }

    /// Copy the displayed row at `position` joined by the load delimiter.
    pub fn copy_row(
        &self,
        position: usize,
        clipboard: &mut dyn ClipboardSink,
        notifier: &mut dyn Notifier,
    ) {
        let Some(row) = self.displayed_row(position) else {
            return;
        };
        let copied = row_for_copy(row, self.loaded_delimiter);
        clipboard.write(&copied);
        notifier.notify(NotifyKind::Success, "Copied row");
    }

    // -- Accessors --

    pub fn has_data(&self) -> bool {
        self.table.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn header(&self) -> Option<&Row> {
        self.table.as_ref()?.header(self.settings.has_header)
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Number of loaded data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.table
            .as_ref()
            .map(|t| t.data_rows(self.settings.has_header).len())
            .unwrap_or(0)
    }

    pub fn displayed_count(&self) -> usize {
        self.visible_indices.len()
    }

    pub fn displayed_row(&self, position: usize) -> Option<&Row> {
        let table = self.table.as_ref()?;
        let index = *self.visible_indices.get(position)?;
        table.rows().get(index)
    }

    pub fn displayed_rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.visible_indices
            .iter()
            .filter_map(|&i| self.table.as_ref().and_then(|t| t.rows().get(i)))
    }
}
