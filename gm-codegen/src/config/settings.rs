//! Configuration settings for gm-codegen

use config::{Config, ConfigError, Environment, File, FileFormat, Map, Source, Value};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::defaults;
use crate::codegen::{JsonCase, TargetLanguage};
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation.
///
/// Mirrors the `[mysql]` section of the settings file. Every key is optional:
/// missing strings are empty and `debug` is `false`. Keys are matched
/// case-insensitively (`removePrefix`, `removeprefix`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Database connection string (`mysql://` URL or `user:pass@tcp(host:port)/db`)
    #[serde(default)]
    pub link: String,

    /// Table group label
    #[serde(default)]
    pub group: String,

    /// Prepended to the stored table name
    #[serde(default)]
    pub prefix: String,

    /// Stripped from the start of the stored table name
    #[serde(default, rename = "removeprefix")]
    pub remove_prefix: String,

    /// Naming-case mode for serialization tags
    #[serde(default, rename = "jsoncase")]
    pub json_case: String,

    /// Enable debug logging
    #[serde(default = "default_debug", deserialize_with = "deserialize_flag")]
    pub debug: bool,

    /// Comma-separated table names
    #[serde(default)]
    pub tables: String,

    /// Output directory for generated files
    #[serde(default, rename = "gendir")]
    pub gen_dir: PathBuf,

    /// Target language of the generated files
    #[serde(default)]
    pub lang: TargetLanguage,

    /// Formatter command; empty selects the language default, `none` disables formatting
    #[serde(default)]
    pub formatter: String,

    /// Dry run mode - render without writing or formatting files
    #[serde(skip)]
    pub dry_run: bool,
}

fn default_debug() -> bool {
    defaults::DEBUG
}

/// Layout of the settings file: generator keys live under `[mysql]`
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    mysql: CodegenConfig,
}

/// Accepts native booleans as well as the string spellings an INI file
/// produces. Unparseable strings read as `false`.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
        Flag::Text(s) => parse_flag(&s),
    })
}

fn parse_flag(value: &str) -> bool {
    match value.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" | "yes" | "on" => true,
        "0" | "f" | "F" | "false" | "FALSE" | "False" | "no" | "off" | "" => false,
        other => {
            warn!("Unrecognized boolean {:?} for debug, using false", other);
            false
        }
    }
}

/// Pick the file format from the extension; anything unknown is INI
fn file_format(path: &Path) -> FileFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => FileFormat::Toml,
        Some("json") => FileFormat::Json,
        Some("yaml") | Some("yml") => FileFormat::Yaml,
        _ => FileFormat::Ini,
    }
}

/// Read `source` and return its `[mysql]` section with lower-cased keys,
/// layering `environment` on top when given.
///
/// File keys keep their spelling while environment keys arrive lower-cased,
/// so both are brought to lower case before deserializing.
fn read_settings<S>(
    source: S,
    environment: Option<Environment>,
) -> std::result::Result<SettingsFile, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    let file = Config::builder().add_source(source).build()?;
    let section: Map<String, Value> = match file.get_table(defaults::SECTION) {
        Ok(section) => section,
        Err(ConfigError::NotFound(_)) => Map::new(),
        Err(e) => return Err(e),
    };

    let mut builder = Config::builder();
    for (key, value) in section {
        builder = builder.set_default(
            format!("{}.{}", defaults::SECTION, key.to_lowercase()),
            value,
        )?;
    }
    if let Some(environment) = environment {
        builder = builder.add_source(environment);
    }
    builder.build()?.try_deserialize()
}

impl CodegenConfig {
    /// Load configuration from a settings file, with `GM_MYSQL__*`
    /// environment variables taking precedence over file values.
    pub fn load(path: &Path) -> Result<Self> {
        let environment = Environment::with_prefix(defaults::ENV_PREFIX)
            .prefix_separator("_")
            .separator("__");
        let settings = read_settings(
            File::from(path).format(file_format(path)).required(true),
            Some(environment),
        )
        .map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to load config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(settings.mysql)
    }

    /// Parse configuration from in-memory content in the given format.
    /// The environment is not consulted.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        let settings = read_settings(File::from_str(content, format), None)?;
        Ok(settings.mysql)
    }

    /// Table names in configured order.
    ///
    /// The list is split on `,` without trimming: a name with surrounding
    /// whitespace is looked up verbatim. Empty entries are skipped.
    pub fn table_names(&self) -> Vec<&str> {
        if self.tables.is_empty() {
            warn!("No tables configured");
            return Vec::new();
        }

        self.tables
            .split(',')
            .filter(|name| {
                if name.is_empty() {
                    warn!("Skipping empty entry in table list {:?}", self.tables);
                    return false;
                }
                if name.trim() != *name {
                    warn!(
                        "Table name {:?} has surrounding whitespace and will be queried as-is",
                        name
                    );
                }
                true
            })
            .collect()
    }

    /// Serialization tag case, falling back to the default for unknown modes
    pub fn json_case(&self) -> JsonCase {
        JsonCase::parse(&self.json_case).unwrap_or_else(|| {
            warn!(
                "Unknown jsonCase {:?}, using lower-cased column names",
                self.json_case
            );
            JsonCase::default()
        })
    }

    /// Package or namespace name: the final path segment of the output directory
    pub fn package_name(&self) -> String {
        self.gen_dir
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| defaults::PACKAGE_NAME.to_string())
    }

    /// Default log level when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
