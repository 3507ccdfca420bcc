//! MySQL column type to field type mapping

use super::language::TargetLanguage;

/// Primitive category of a generated field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Int32,
    Int64,
    Float64,
    String,
}

/// Prefix rules, checked in order; the first match wins
const PREFIX_RULES: &[(&str, FieldType)] = &[
    ("int", FieldType::Int32),
    ("bigint", FieldType::Int64),
    ("varchar", FieldType::String),
    ("text", FieldType::String),
    ("datetime", FieldType::String),
    ("timestamp", FieldType::String),
    ("decimal", FieldType::Float64),
    ("float", FieldType::Float64),
    ("double", FieldType::Float64),
];

impl FieldType {
    /// Classify a `COLUMN_TYPE` string such as `bigint unsigned` or `varchar(64)`.
    ///
    /// Never fails: types no rule matches (including `tinyint`, `smallint`,
    /// `date`, `json`, ...) map to [`FieldType::String`].
    pub fn from_column_type(column_type: &str) -> Self {
        let lower = column_type.trim().to_ascii_lowercase();
        PREFIX_RULES
            .iter()
            .find(|(prefix, _)| lower.starts_with(prefix))
            .map(|(_, field_type)| *field_type)
            .unwrap_or(FieldType::String)
    }

    /// Type name in the target language
    pub fn type_name(self, lang: TargetLanguage) -> &'static str {
        match lang {
            TargetLanguage::Go => match self {
                FieldType::Int32 => "int",
                FieldType::Int64 => "int64",
                FieldType::Float64 => "float64",
                FieldType::String => "string",
            },
            TargetLanguage::Rust => match self {
                FieldType::Int32 => "i32",
                FieldType::Int64 => "i64",
                FieldType::Float64 => "f64",
                FieldType::String => "String",
            },
        }
    }
}
