use super::model::Delimiter;

/// Options for copying a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyOptions {
    /// Strip currency and thousands separators before copying.
    pub simplify_numbers: bool,
}

/// Canonical clipboard text for a cell.
///
/// With `simplify_numbers` every `$` and `,` is removed and outer whitespace
/// trimmed, so `"$1,234.56"` copies as `"1234.56"`. This is a character
/// strip, not a number parse; text is not validated. Otherwise the cell is
/// returned exactly as loaded.
pub fn normalize_for_copy(text: &str, options: CopyOptions) -> String {
    if !options.simplify_numbers {
        return text.to_string();
    }
    text.trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Clipboard text for a whole row: cells joined by the delimiter, with no
/// per-cell normalization.
pub fn row_for_copy(row: &[String], delimiter: Delimiter) -> String {
    row.join(delimiter.join_str())
}
