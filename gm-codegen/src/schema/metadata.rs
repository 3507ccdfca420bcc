//! Metadata structures read from the information schema

use serde::{Deserialize, Serialize};

/// Columns of a single table, in the order the catalog returned them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name as configured
    pub name: String,

    /// Columns in the table
    pub columns: Vec<ColumnDescriptor>,
}

/// One row of `INFORMATION_SCHEMA.COLUMNS`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Declared type as reported by `COLUMN_TYPE` (e.g. "bigint unsigned", "varchar(64)")
    pub column_type: String,

    /// Whether the column is nullable (`IS_NULLABLE = 'YES'`)
    pub nullable: bool,

    /// Key flag from `COLUMN_KEY`: "PRI", "UNI", "MUL" or empty
    pub key: String,

    /// Column comment, empty when none is set
    pub comment: String,
}

impl ColumnDescriptor {
    /// Create a non-nullable, unkeyed column without a comment
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            nullable: false,
            key: String::new(),
            comment: String::new(),
        }
    }

    /// Set the column comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Mark the column as nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the key flag
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Check if this column is part of the primary key
    pub fn is_primary_key(&self) -> bool {
        self.key == "PRI"
    }
}

impl TableSchema {
    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of the primary key columns, in column order
    pub fn primary_key_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_primary_key())
            .map(|c| c.name.as_str())
            .collect()
    }
}
