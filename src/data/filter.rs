use super::model::{Row, Table};

// ---------------------------------------------------------------------------
// Query tokenization
// ---------------------------------------------------------------------------

/// Options that change how a query selects rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub has_header: bool,
    pub exact_match: bool,
}

/// Split a query into lower-cased, space-delimited tokens.
///
/// Runs of spaces would produce empty tokens; those are dropped, so
/// `"a  b"` searches for `a` and `b` only.
pub fn word_tokens(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokens used for filtering. Exact-match mode searches for the whole
/// trimmed query as a single phrase.
pub fn filter_tokens(query: &str, exact_match: bool) -> Vec<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if exact_match {
        vec![trimmed.to_lowercase()]
    } else {
        word_tokens(trimmed)
    }
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// A row passes when every token is a substring of at least one of its
/// cells, ignoring case.
pub fn row_matches(row: &[String], tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let cells: Vec<String> = row.iter().map(|c| c.to_lowercase()).collect();
    tokens
        .iter()
        .all(|token| cells.iter().any(|cell| cell.contains(token.as_str())))
}

/// Indices (into [`Table::rows`]) of the data rows matching `query`, in
/// their original order. A blank query selects every data row.
pub fn filtered_indices(table: &Table, query: &str, options: FilterOptions) -> Vec<usize> {
    let offset = table.data_offset(options.has_header);
    let data = table.data_rows(options.has_header);
    let tokens = filter_tokens(query, options.exact_match);

    if tokens.is_empty() {
        return (offset..offset + data.len()).collect();
    }

    data.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, &tokens))
        .map(|(i, _)| offset + i)
        .collect()
}

/// Data rows matching `query`, borrowed from the table.
pub fn filter<'a>(table: &'a Table, query: &str, options: FilterOptions) -> Vec<&'a Row> {
    filtered_indices(table, query, options)
        .into_iter()
        .map(|i| &table.rows()[i])
        .collect()
}
