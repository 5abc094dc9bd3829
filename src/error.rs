use std::path::PathBuf;

/// Errors raised by grid operations on out-of-contract input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {column} is out of range (board has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("cannot place an empty piece")]
    EmptyPiece,

    #[error("column {column} has {len} cells, expected {rows}")]
    RaggedColumn { column: usize, len: usize, rows: usize },

    #[error("floating piece at column {column}, row {row}")]
    FloatingPiece { column: usize, row: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
