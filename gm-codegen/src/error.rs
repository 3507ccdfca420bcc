//! Error types for gm-codegen

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for gm-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to connect to database: {0}")]
    ConnectionError(String),

    #[error("Failed to fetch columns for table {table}: {message}")]
    QueryError { table: String, message: String },

    #[error("Filesystem error at {}: {source}", path.display())]
    FilesystemError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to format {}: {message}", path.display())]
    FormatError { path: PathBuf, message: String },

    /// Wraps any failure with the table that was being processed
    #[error("Failed to generate file for table {table}: {source}")]
    Table {
        table: String,
        #[source]
        source: Box<CodegenError>,
    },

    #[error("Columns {first} and {second} both map to field {field}")]
    DuplicateField {
        field: String,
        first: String,
        second: String,
    },
}

impl CodegenError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodegenError::FilesystemError {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn query(table: &str, err: impl std::fmt::Display) -> Self {
        CodegenError::QueryError {
            table: table.to_string(),
            message: err.to_string(),
        }
    }

    /// Attach the failing table name, unless the error already names it
    pub(crate) fn for_table(self, table: &str) -> Self {
        match self {
            err @ (CodegenError::QueryError { .. } | CodegenError::Table { .. }) => err,
            other => CodegenError::Table {
                table: table.to_string(),
                source: Box::new(other),
            },
        }
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}

impl From<mysql_async::UrlError> for CodegenError {
    fn from(err: mysql_async::UrlError) -> Self {
        CodegenError::ConnectionError(err.to_string())
    }
}
