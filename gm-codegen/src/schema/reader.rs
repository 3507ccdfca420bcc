//! Column metadata readers

use std::collections::HashMap;

use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, Row};
use tracing::{debug, info};

use super::link::describe_opts;
use super::metadata::ColumnDescriptor;
use crate::error::{CodegenError, Result};

/// Metadata query for one table of the current database.
///
/// The table name is bound as a parameter. Results are ordered by
/// `ORDINAL_POSITION`, i.e. the column order of the table definition.
/// Catalog columns are cast to CHAR so they decode as strings regardless of
/// the server's information schema collation.
const COLUMNS_QUERY: &str = r#"
    SELECT
        CAST(COLUMN_NAME AS CHAR) AS column_name,
        CAST(COLUMN_TYPE AS CHAR) AS column_type,
        CAST(IS_NULLABLE AS CHAR) AS is_nullable,
        CAST(COLUMN_KEY AS CHAR) AS column_key,
        CAST(COLUMN_COMMENT AS CHAR) AS column_comment
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION
"#;

/// A source of column metadata.
///
/// An unknown table and a table without columns both yield an empty list.
#[async_trait]
pub trait SchemaSource: Send {
    /// Fetch the columns of `table`
    async fn columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>>;
}

/// Reads column metadata over a single MySQL connection
pub struct MySqlSchemaReader {
    conn: Conn,
}

impl MySqlSchemaReader {
    /// Open the connection. Fails with `ConnectionError` if the server is
    /// unreachable or rejects the credentials.
    pub async fn connect(opts: Opts) -> Result<Self> {
        let target = describe_opts(&opts);
        debug!("Connecting to MySQL at {}", target);

        let conn = Conn::new(opts)
            .await
            .map_err(|e| CodegenError::ConnectionError(format!("{}: {}", target, e)))?;

        info!("Connected to MySQL: {}", target);
        Ok(Self { conn })
    }

    /// Close the connection
    pub async fn disconnect(self) -> Result<()> {
        self.conn
            .disconnect()
            .await
            .map_err(|e| CodegenError::ConnectionError(e.to_string()))
    }
}

#[async_trait]
impl SchemaSource for MySqlSchemaReader {
    async fn columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        debug!("Querying columns for table {}", table);
        let rows: Vec<Row> = self
            .conn
            .exec(COLUMNS_QUERY, (table,))
            .await
            .map_err(|e| CodegenError::query(table, e))?;

        let columns = rows
            .into_iter()
            .map(|row| column_from_row(table, row))
            .collect::<Result<Vec<_>>>()?;
        debug!("Table {} has {} columns", table, columns.len());
        Ok(columns)
    }
}

fn column_from_row(table: &str, row: Row) -> Result<ColumnDescriptor> {
    type Columns = (String, String, String, Option<String>, Option<String>);

    let (name, column_type, is_nullable, key, comment) =
        Columns::from_row_opt(row).map_err(|e| CodegenError::query(table, e))?;

    Ok(ColumnDescriptor {
        name,
        column_type,
        nullable: is_nullable.eq_ignore_ascii_case("YES"),
        key: key.unwrap_or_default(),
        comment: comment.unwrap_or_default(),
    })
}

/// A fixed set of tables held in memory.
///
/// Useful for generating from metadata captured elsewhere and for exercising
/// the generator without a database.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchema {
    tables: HashMap<String, Vec<ColumnDescriptor>>,
}

impl InMemorySchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a table
    pub fn with_table(mut self, name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        self.tables.insert(name.into(), columns);
        self
    }
}

#[async_trait]
impl SchemaSource for InMemorySchema {
    async fn columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }
}
