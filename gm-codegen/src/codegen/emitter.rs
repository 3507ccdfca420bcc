//! File emitter - renders, writes and formats one file per table

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::CodegenConfig;
use crate::error::{CodegenError, Result};
use crate::schema::ColumnDescriptor;

use super::formatter::Formatter;
use super::language::TargetLanguage;
use super::naming::{stored_table_name, to_struct_name, JsonCase};
use super::struct_generator::{FieldSpec, StructDefinition};

/// Outcome of emitting one table
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// Table name as configured
    pub table: String,
    /// Generated struct identifier
    pub struct_name: String,
    /// Output file path
    pub path: PathBuf,
    /// Whether the file was written (false in dry-run mode)
    pub written: bool,
}

/// Writes struct definitions into the configured output directory
pub struct FileEmitter<'a> {
    out_dir: &'a Path,
    prefix: &'a str,
    remove_prefix: &'a str,
    lang: TargetLanguage,
    json_case: JsonCase,
    package: String,
    dry_run: bool,
    formatter: &'a dyn Formatter,
}

impl<'a> FileEmitter<'a> {
    /// Create an emitter for the given configuration and formatter
    pub fn new(config: &'a CodegenConfig, formatter: &'a dyn Formatter) -> Self {
        Self {
            out_dir: &config.gen_dir,
            prefix: &config.prefix,
            remove_prefix: &config.remove_prefix,
            lang: config.lang,
            json_case: config.json_case(),
            package: config.package_name(),
            dry_run: config.dry_run,
            formatter,
        }
    }

    /// Build the render input for a table
    pub fn definition(&self, table: &str, columns: &[ColumnDescriptor]) -> StructDefinition {
        StructDefinition {
            package: self.package.clone(),
            struct_name: to_struct_name(table),
            stored_table_name: stored_table_name(table, self.prefix, self.remove_prefix),
            fields: columns
                .iter()
                .map(|column| FieldSpec::from_column(column, self.lang, self.json_case))
                .collect(),
        }
    }

    /// Output path for a stored table name
    pub fn file_path(&self, stored_table_name: &str) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}", stored_table_name, self.lang.extension()))
    }

    /// Render, write and format the file for `table`.
    ///
    /// Nothing is written when two columns map to the same field. An existing
    /// file is overwritten. If formatting fails the unformatted
    /// file stays on disk.
    pub fn emit(&self, table: &str, columns: &[ColumnDescriptor]) -> Result<GeneratedFile> {
        let definition = self.definition(table, columns);
        definition.check_unique_fields()?;
        let path = self.file_path(&definition.stored_table_name);
        let code = definition.render(self.lang);
        debug!(
            "Rendered struct {} ({} fields) -> {}",
            definition.struct_name,
            definition.fields.len(),
            path.display()
        );

        if self.dry_run {
            info!("Dry run: skipping write of {}", path.display());
        } else {
            ensure_dir(self.out_dir)?;
            fs::write(&path, code).map_err(|e| CodegenError::filesystem(&path, e))?;
            debug!("Formatting {} with {}", path.display(), self.formatter.name());
            self.formatter.format(&path)?;
        }

        Ok(GeneratedFile {
            table: table.to_string(),
            struct_name: definition.struct_name,
            path,
            written: !self.dry_run,
        })
    }
}

/// Create the output directory and its parents, world-accessible
fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder
        .create(dir)
        .map_err(|e| CodegenError::filesystem(dir, e))
}
