//! In-memory CSV/TSV search engine: load delimited text, filter it by a
//! multi-word query, sort by a column, highlight hits and prepare cells for
//! the clipboard.

pub mod cli;
pub mod data;
pub mod services;
pub mod settings;
pub mod state;
