//! Target languages of the generated files

use serde::{Deserialize, Serialize};

/// Language the struct definitions are emitted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    /// Go struct with `json` tags and a `TableName()` method
    #[default]
    Go,
    /// Rust struct with serde attributes and a `table_name()` function
    Rust,
}

impl TargetLanguage {
    /// File extension of generated files
    pub fn extension(self) -> &'static str {
        match self {
            TargetLanguage::Go => "go",
            TargetLanguage::Rust => "rs",
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::Go => f.write_str("go"),
            TargetLanguage::Rust => f.write_str("rust"),
        }
    }
}
