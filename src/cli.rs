use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::data::model::Delimiter;

/// Load, search, sort and copy CSV/TSV data.
#[derive(Debug, Parser)]
#[command(name = "csv-finder", version, about)]
pub struct Args {
    /// CSV or TSV file to open at startup
    pub file: Option<PathBuf>,

    /// Delimiter for the startup file (default: the saved setting)
    #[arg(long, value_enum)]
    pub delimiter: Option<DelimiterArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DelimiterArg {
    Auto,
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl From<DelimiterArg> for Delimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Auto => Delimiter::Auto,
            DelimiterArg::Comma => Delimiter::Comma,
            DelimiterArg::Tab => Delimiter::Tab,
            DelimiterArg::Semicolon => Delimiter::Semicolon,
            DelimiterArg::Pipe => Delimiter::Pipe,
        }
    }
}
