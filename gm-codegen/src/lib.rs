//! gm-codegen: Generate struct definitions from MySQL table metadata
//!
//! Reads column metadata for a configured list of tables from
//! `INFORMATION_SCHEMA.COLUMNS` and writes one source file per table holding
//! a struct with one field per column plus an accessor returning the table
//! name. Go output (the default) is run through `gofmt`; Rust output is
//! formatted in-process with `prettyplease`.
//!
//! # Configuration
//!
//! Settings live in the `[mysql]` section of an INI file (`config.ini` by
//! default):
//!
//! ```ini
//! [mysql]
//! link = root:secret@tcp(127.0.0.1:3306)/shop?charset=utf8mb4
//! prefix = biz_
//! removePrefix = t_
//! tables = t_orders,t_users
//! genDir = ./internal/model
//! ```
//!
//! # Library Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> gm_codegen::Result<()> {
//!     let config = gm_codegen::CodegenConfig::load(Path::new("config.ini"))?;
//!     gm_codegen::generate(&config).await?;
//!     Ok(())
//! }
//! ```
//!
//! Generation without a database goes through [`CodeGenerator::run`] with
//! any [`SchemaSource`], such as [`schema::InMemorySchema`].
//!
//! # CLI Usage
//!
//! ```bash
//! gm-codegen --config config.ini generate
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod schema;

use tracing::{info, info_span, warn, Instrument};

pub use codegen::{CodeGenerator, GeneratedFile, GenerationReport};
pub use config::CodegenConfig;
pub use error::{CodegenError, Result};
pub use schema::{ColumnDescriptor, MySqlSchemaReader, SchemaSource, TableSchema};

/// Main entry point for code generation
pub async fn generate(config: &CodegenConfig) -> Result<GenerationReport> {
    generate_with(config, |_| {}).await
}

/// Connect to the configured database and generate every table, calling
/// `on_generated` after each file.
///
/// Stops at the first failing table.
pub async fn generate_with<F>(config: &CodegenConfig, on_generated: F) -> Result<GenerationReport>
where
    F: FnMut(&GeneratedFile),
{
    let span = info_span!("generate", group = %config.group);
    async move {
        let mut reader = connect(config).await?;
        let result = CodeGenerator::new(config)
            .run_with(&mut reader, on_generated)
            .await;
        finish(reader, result).await
    }
    .instrument(span)
    .await
}

/// Fetch the column metadata of every configured table without generating
pub async fn inspect(config: &CodegenConfig) -> Result<Vec<TableSchema>> {
    let mut reader = connect(config).await?;
    let mut tables = Vec::new();
    let mut result = Ok(());
    for table in config.table_names() {
        match reader.columns(table).await {
            Ok(columns) => tables.push(TableSchema {
                name: table.to_string(),
                columns,
            }),
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }
    finish(reader, result.map(|()| tables)).await
}

async fn connect(config: &CodegenConfig) -> Result<MySqlSchemaReader> {
    let opts = schema::parse_link(&config.link)?;
    MySqlSchemaReader::connect(opts).await
}

/// Close the connection; a generation error takes precedence over a
/// disconnect error
async fn finish<T>(reader: MySqlSchemaReader, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            reader.disconnect().await?;
            info!("Disconnected");
            Ok(value)
        }
        Err(e) => {
            if let Err(disconnect_err) = reader.disconnect().await {
                warn!("Failed to disconnect: {}", disconnect_err);
            }
            Err(e)
        }
    }
}
