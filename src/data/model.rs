use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Row / Table – the loaded tabular text
// ---------------------------------------------------------------------------

/// One parsed line: an ordered sequence of cell strings.
///
/// Rows of a table usually share a column count, but this is not enforced;
/// short rows simply have fewer cells.
pub type Row = Vec<String>;

/// The full parsed table. Immutable once loaded; a new load replaces it whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Every row, header included.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The header row, when header mode is on and the table has any rows.
    pub fn header(&self, has_header: bool) -> Option<&Row> {
        if has_header {
            self.rows.first()
        } else {
            None
        }
    }

    /// Rows that carry data: everything after the header in header mode,
    /// otherwise all rows.
    pub fn data_rows(&self, has_header: bool) -> &[Row] {
        if has_header && !self.rows.is_empty() {
            &self.rows[1..]
        } else {
            &self.rows
        }
    }

    /// Index of the first data row inside [`Table::rows`].
    pub fn data_offset(&self, has_header: bool) -> usize {
        usize::from(has_header && !self.rows.is_empty())
    }

    /// Widest row, used to size the rendered grid.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of rows including the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Arrow shown next to the active column header.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Which column the displayed rows are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(column: usize) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Next sort state after the user selects `column`.
    ///
    /// Selecting the column that is already sorted ascending flips it to
    /// descending; any other selection sorts that column ascending. There is
    /// no way back to "unsorted" short of a reload or clear.
    pub fn toggled(current: Option<SortSpec>, column: usize) -> SortSpec {
        match current {
            Some(SortSpec {
                column: c,
                direction: SortDirection::Ascending,
            }) if c == column => SortSpec {
                column,
                direction: SortDirection::Descending,
            },
            _ => SortSpec::ascending(column),
        }
    }
}

// ---------------------------------------------------------------------------
// Delimiter
// ---------------------------------------------------------------------------

/// Column delimiter used when parsing raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// Tab if the text contains one, comma otherwise.
    #[default]
    Auto,
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl Delimiter {
    pub const ALL: [Delimiter; 5] = [
        Delimiter::Auto,
        Delimiter::Comma,
        Delimiter::Tab,
        Delimiter::Semicolon,
        Delimiter::Pipe,
    ];

    /// Concrete byte to split on for `text`.
    pub fn resolve(self, text: &str) -> u8 {
        match self {
            Delimiter::Auto => {
                if text.contains('\t') {
                    b'\t'
                } else {
                    b','
                }
            }
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Semicolon => b';',
            Delimiter::Pipe => b'|',
        }
    }

    /// Separator used when copying a whole row; `Auto` copies with commas.
    pub fn join_str(self) -> &'static str {
        match self {
            Delimiter::Auto | Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Semicolon => ";",
            Delimiter::Pipe => "|",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Delimiter::Auto => "Auto",
            Delimiter::Comma => "Comma",
            Delimiter::Tab => "Tab",
            Delimiter::Semicolon => "Semicolon",
            Delimiter::Pipe => "Pipe",
        };
        write!(f, "{name}")
    }
}
