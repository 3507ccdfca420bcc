//! Main code generator orchestrator

use tracing::info;

use crate::config::CodegenConfig;
use crate::error::Result;
use crate::schema::{ColumnDescriptor, SchemaSource};

use super::emitter::{FileEmitter, GeneratedFile};
use super::formatter::{formatter_for, Formatter};

/// Files produced by one run, in table order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
}

/// Drives schema reading and file emission for the configured tables
pub struct CodeGenerator<'a> {
    config: &'a CodegenConfig,
    formatter: Box<dyn Formatter>,
}

impl<'a> CodeGenerator<'a> {
    /// Create a generator using the formatter the configuration selects
    pub fn new(config: &'a CodegenConfig) -> Self {
        Self::with_formatter(config, formatter_for(config))
    }

    /// Create a generator with an explicit formatter
    pub fn with_formatter(config: &'a CodegenConfig, formatter: Box<dyn Formatter>) -> Self {
        Self { config, formatter }
    }

    /// Generate files for every configured table
    pub async fn run<S>(&self, source: &mut S) -> Result<GenerationReport>
    where
        S: SchemaSource + ?Sized,
    {
        self.run_with(source, |_| {}).await
    }

    /// Generate files for every configured table, calling `on_generated`
    /// after each one.
    ///
    /// Tables are processed one at a time in configured order. The first
    /// failure aborts the run; files already generated stay on disk.
    pub async fn run_with<S, F>(&self, source: &mut S, mut on_generated: F) -> Result<GenerationReport>
    where
        S: SchemaSource + ?Sized,
        F: FnMut(&GeneratedFile),
    {
        let tables = self.config.table_names();
        info!(
            "Generating {} {} files into {}",
            tables.len(),
            self.config.lang,
            self.config.gen_dir.display()
        );

        let mut report = GenerationReport::default();
        for table in tables {
            let columns = source
                .columns(table)
                .await
                .map_err(|e| e.for_table(table))?;
            let file = self.generate_table(table, &columns)?;
            on_generated(&file);
            report.files.push(file);
        }

        info!("Generated {} files", report.files.len());
        Ok(report)
    }

    /// Emit the file for one table from already-fetched columns
    pub fn generate_table(&self, table: &str, columns: &[ColumnDescriptor]) -> Result<GeneratedFile> {
        if columns.is_empty() {
            info!(
                "Table {} returned no columns (missing table or no columns)",
                table
            );
        }
        FileEmitter::new(self.config, self.formatter.as_ref())
            .emit(table, columns)
            .map_err(|e| e.for_table(table))
    }
}
