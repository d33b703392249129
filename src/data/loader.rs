use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::model::{Delimiter, Row};

// ---------------------------------------------------------------------------
// Parser contract
// ---------------------------------------------------------------------------

/// A problem the parser found in the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{message}", .row.map(|r| format!("row {r}: ")).unwrap_or_default())]
pub struct ParseError {
    /// 1-based line the problem was detected on, when known.
    pub row: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Concrete delimiter byte; auto-detection happens before parsing.
    pub delimiter: u8,
    /// Drop rows whose cells are all blank.
    pub skip_empty_lines: bool,
}

/// Everything the parser produced. Any entry in `errors` makes the whole
/// load invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutput {
    pub rows: Vec<Row>,
    pub errors: Vec<ParseError>,
}

/// Turns raw delimited text into rows of cells.
pub trait Parser {
    fn parse(&self, raw: &str, options: ParseOptions) -> ParseOutput;
}

// ---------------------------------------------------------------------------
// CSV / TSV parser
// ---------------------------------------------------------------------------

/// [`Parser`] backed by the `csv` crate. Rows may have differing lengths;
/// lines that are entirely empty are always skipped by the reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, raw: &str, options: ParseOptions) -> ParseOutput {
        let mut output = ParseOutput::default();

        if let Some(err) = check_quotes(raw, options.delimiter) {
            output.errors.push(err);
            return output;
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(options.delimiter)
            .from_reader(raw.as_bytes());

        for result in reader.records() {
            match result {
                Ok(record) => {
                    let row: Row = record.iter().map(str::to_string).collect();
                    if options.skip_empty_lines && row.iter().all(|c| c.trim().is_empty()) {
                        continue;
                    }
                    output.rows.push(row);
                }
                Err(e) => {
                    let row = e.position().map(|p| p.line() as usize);
                    output.errors.push(ParseError {
                        row,
                        message: e.to_string(),
                    });
                }
            }
        }

        output
    }
}

/// The `csv` reader silently runs an unclosed quote to end of input and glues
/// text after a closing quote onto the field (`"Alice"x` reads as `Alicex`).
/// Report both instead, with the line they occur on.
fn check_quotes(raw: &str, delimiter: u8) -> Option<ParseError> {
    let delimiter = char::from(delimiter);
    let mut line = 1;
    let mut opened_on = 0;
    let mut in_quotes = false;
    let mut after_quote = false;
    let mut at_field_start = true;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                }
                '"' => {
                    in_quotes = false;
                    after_quote = true;
                }
                '\n' => line += 1,
                _ => {}
            }
            continue;
        }
        if after_quote {
            after_quote = false;
            if c != delimiter && c != '\r' && c != '\n' {
                return Some(ParseError {
                    row: Some(line),
                    message: "unexpected text after closing quote".to_string(),
                });
            }
        }
        match c {
            '"' if at_field_start => {
                in_quotes = true;
                opened_on = line;
                at_field_start = false;
            }
            '\n' => {
                line += 1;
                at_field_start = true;
            }
            '\r' => at_field_start = true,
            c if c == delimiter => at_field_start = true,
            _ => at_field_start = false,
        }
    }

    in_quotes.then(|| ParseError {
        row: Some(opened_on),
        message: "quoted field is never closed".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Raw input helpers
// ---------------------------------------------------------------------------

/// Options for parsing `raw` with the chosen delimiter setting.
pub fn parse_options(raw: &str, delimiter: Delimiter, skip_empty_lines: bool) -> ParseOptions {
    ParseOptions {
        delimiter: delimiter.resolve(raw),
        skip_empty_lines,
    }
}

/// File extensions accepted from drag-and-drop.
const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

/// Whether a dropped file looks like delimited text.
pub fn is_supported_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Read a file as text. Invalid UTF-8 sequences are replaced rather than
/// rejected, so spreadsheet exports in legacy encodings still load.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(decode_text(&bytes))
}

/// Decode dropped or read bytes, dropping a leading UTF-8 byte order mark.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ParseOutput {
        CsvParser.parse(raw, parse_options(raw, Delimiter::Auto, true))
    }

    #[test]
    fn test_parse_comma_text() {
        let out = parse("name,age\nAlice,30\nBob,25");
        assert!(out.errors.is_empty());
        assert_eq!(
            out.rows,
            vec![
                vec!["name".to_string(), "age".to_string()],
                vec!["Alice".to_string(), "30".to_string()],
                vec!["Bob".to_string(), "25".to_string()],
            ]
        );
    }

    #[test]
    fn test_tab_detected_before_parsing() {
        let out = parse("a\tb,c\n1\t2,3\n");
        assert_eq!(out.rows[0], vec!["a".to_string(), "b,c".to_string()]);
        assert_eq!(out.rows[1], vec!["1".to_string(), "2,3".to_string()]);
    }

    #[test]
    fn test_quoted_fields() {
        let out = parse("name,note\n\"Smith, John\",\"said \"\"hi\"\"\"\n");
        assert!(out.errors.is_empty());
        assert_eq!(out.rows[1][0], "Smith, John");
        assert_eq!(out.rows[1][1], "said \"hi\"");
    }

    #[test]
    fn test_unterminated_quote_is_error() {
        let out = parse("name,age\nAlice,\"30\nBob,25");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].row, Some(2));
        assert!(out.rows.is_empty());
    }

    #[test]
    fn test_quote_inside_field_is_literal() {
        let out = parse("size\n5\" pipe\n");
        assert!(out.errors.is_empty());
        assert_eq!(out.rows[1][0], "5\" pipe");
    }

    #[test]
    fn test_text_after_closing_quote_is_error() {
        let out = parse("name,age\n\"Alice\"x,30\nBob,25\n");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].row, Some(2));
        assert!(out.rows.is_empty());

        let out = parse("name,age\nBob,25\n\"Carol\" ,41\n");
        assert_eq!(out.errors[0].row, Some(3));
    }

    #[test]
    fn test_closing_quote_before_delimiter_or_line_end() {
        let out = parse("\"name\",\"age\"\r\n\"Alice\",\"30\"\r\n\"multi\nline\",\"\"\n");
        assert!(out.errors.is_empty());
        assert_eq!(out.rows.len(), 3);
        assert_eq!(out.rows[2][0], "multi\nline");
        assert_eq!(out.rows[2][1], "");

        let tsv = "a\tb\n\"x\"\t\"y\"\n";
        assert!(parse(tsv).errors.is_empty());
    }

    #[test]
    fn test_blank_rows_follow_setting() {
        let raw = "a,b\n,\n\n1,2\n";
        let skipped = CsvParser.parse(raw, parse_options(raw, Delimiter::Comma, true));
        assert_eq!(skipped.rows.len(), 2);

        // The fully empty line is dropped by the reader either way.
        let kept = CsvParser.parse(raw, parse_options(raw, Delimiter::Comma, false));
        assert_eq!(kept.rows.len(), 3);
        assert_eq!(kept.rows[1], vec![String::new(), String::new()]);
    }

    #[test]
    fn test_ragged_rows_allowed() {
        let out = parse("a,b,c\n1\n1,2,3,4\n");
        assert!(out.errors.is_empty());
        assert_eq!(out.rows[1].len(), 1);
        assert_eq!(out.rows[2].len(), 4);
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        let out = parse("");
        assert!(out.errors.is_empty());
        assert!(out.rows.is_empty());
    }

    #[test]
    fn test_supported_files() {
        assert!(is_supported_file("people.CSV"));
        assert!(is_supported_file("export.tsv"));
        assert!(!is_supported_file("report.xlsx"));
        assert!(!is_supported_file("README"));
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_text(b"\xef\xbb\xbfa,b"), "a,b");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError {
            row: Some(3),
            message: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "row 3: bad");
    }
}
