//! Post-processing of generated files

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::language::TargetLanguage;
use crate::config::{defaults, CodegenConfig};
use crate::error::{CodegenError, Result};

/// Rewrites a generated file in place
pub trait Formatter: Send + Sync {
    /// Format the file at `path`
    fn format(&self, path: &Path) -> Result<()>;

    /// Short name for log messages
    fn name(&self) -> &str;
}

/// Runs an external formatter as `<program> <args..> <path>`
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    /// Invoke `program -w <path>`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["-w".to_string()],
        }
    }

    /// `gofmt -w <path>`
    pub fn gofmt() -> Self {
        Self::new("gofmt")
    }

    /// Parse a configured command line.
    ///
    /// A bare program name gets the `-w` flag; explicit arguments replace it.
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next()?;
        let args: Vec<String> = parts.map(str::to_string).collect();
        if args.is_empty() {
            Some(Self::new(program))
        } else {
            Some(Self {
                program: program.to_string(),
                args,
            })
        }
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, path: &Path) -> Result<()> {
        debug!("Running {} {:?} on {}", self.program, self.args, path.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| CodegenError::FormatError {
                path: path.to_path_buf(),
                message: format!("failed to run {}: {}", self.program, e),
            })?;

        if !output.status.success() {
            return Err(CodegenError::FormatError {
                path: path.to_path_buf(),
                message: format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Formats Rust files in-process with `prettyplease`
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyPleaseFormatter;

impl Formatter for PrettyPleaseFormatter {
    fn format(&self, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path).map_err(|e| CodegenError::filesystem(path, e))?;
        let file = syn::parse_file(&source).map_err(|e| CodegenError::FormatError {
            path: path.to_path_buf(),
            message: format!("generated code does not parse: {}", e),
        })?;
        fs::write(path, prettyplease::unparse(&file))
            .map_err(|e| CodegenError::filesystem(path, e))
    }

    fn name(&self) -> &str {
        "prettyplease"
    }
}

/// Leaves files untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Formatter selected by the configuration: the `formatter` command when
/// set, nothing for `none`, otherwise the language default.
pub fn formatter_for(config: &CodegenConfig) -> Box<dyn Formatter> {
    match config.formatter.trim() {
        defaults::FORMATTER_NONE => Box::new(NoopFormatter),
        command => match CommandFormatter::parse(command) {
            Some(formatter) => Box::new(formatter),
            None => match config.lang {
                TargetLanguage::Go => Box::new(CommandFormatter::gofmt()),
                TargetLanguage::Rust => Box::new(PrettyPleaseFormatter),
            },
        },
    }
}
