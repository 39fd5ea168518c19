use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a gazetteer tier, keyword list or dataset manifest.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: expected a JSON object of province → aliases", .path.display())]
    NotAnObject { path: PathBuf },
    #[error("{}: province {province:?} must map to a string or an array of strings", .path.display())]
    BadLocationSet { path: PathBuf, province: String },
}

/// Failure affecting a single sheet. The run continues with the next one.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("cannot read sheet {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(
        "sheet {} is not UTF-8 (line {line}); re-save it as \"CSV UTF-8\", GBK exports are not supported",
        .path.display()
    )]
    NotUtf8 { path: PathBuf, line: u64 },
    #[error("cannot write sheet {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("cannot flush sheet {}: {source}", .path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
