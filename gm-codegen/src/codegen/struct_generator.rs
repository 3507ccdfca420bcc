//! Struct generator - renders struct definitions from column metadata

use std::collections::HashMap;

use crate::error::{CodegenError, Result};
use crate::schema::ColumnDescriptor;

use super::language::TargetLanguage;
use super::naming::{to_field_name, to_struct_name, JsonCase};
use super::type_resolver::FieldType;

/// One field of a generated struct
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Source column name
    pub column: String,
    /// Field identifier in the target language
    pub ident: String,
    /// Primitive category
    pub field_type: FieldType,
    /// Serialization tag
    pub tag: String,
    /// Inline annotation: the column comment, or the identifier when there is none
    pub annotation: String,
}

impl FieldSpec {
    /// Derive a field from a column
    pub fn from_column(column: &ColumnDescriptor, lang: TargetLanguage, json_case: JsonCase) -> Self {
        let ident = match lang {
            TargetLanguage::Go => to_struct_name(&column.name),
            TargetLanguage::Rust => to_field_name(&column.name),
        };
        let annotation = if column.comment.is_empty() {
            ident.clone()
        } else {
            single_line(&column.comment)
        };

        Self {
            column: column.name.clone(),
            field_type: FieldType::from_column_type(&column.column_type),
            tag: json_case.apply(&column.name),
            annotation,
            ident,
        }
    }
}

/// Everything needed to render one table's file
#[derive(Debug, Clone, PartialEq)]
pub struct StructDefinition {
    /// Package (Go) or module (Rust) name
    pub package: String,
    /// Struct identifier, derived from the original table name
    pub struct_name: String,
    /// Table name returned by the generated accessor
    pub stored_table_name: String,
    /// Fields in column order
    pub fields: Vec<FieldSpec>,
}

impl StructDefinition {
    /// Fail when two columns map to the same field identifier
    /// (`userId` and `user_id`, for instance)
    pub fn check_unique_fields(&self) -> Result<()> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for field in &self.fields {
            if let Some(first) = seen.insert(&field.ident, &field.column) {
                return Err(CodegenError::DuplicateField {
                    field: field.ident.clone(),
                    first: first.to_string(),
                    second: field.column.clone(),
                });
            }
        }
        Ok(())
    }

    /// Render the source text for `lang`
    pub fn render(&self, lang: TargetLanguage) -> String {
        match lang {
            TargetLanguage::Go => render_go(self),
            TargetLanguage::Rust => render_rust(self),
        }
    }
}

/// Comments are emitted as line comments, so they must not span lines
fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn go_string_literal(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// Go source, laid out so that `gofmt` only has to align fields
fn render_go(def: &StructDefinition) -> String {
    let mut fields = String::new();
    for field in &def.fields {
        fields.push_str(&format!(
            "    {} {} `json:\"{}\"` // {}\n",
            field.ident,
            field.field_type.type_name(TargetLanguage::Go),
            field.tag,
            field.annotation
        ));
    }

    let mut code = String::new();
    code.push_str(&format!("package {}\n\n", def.package));
    code.push_str(&format!("type {} struct {{\n", def.struct_name));
    code.push_str(&fields);
    code.push_str("\n}\n\n");
    code.push_str("// TableName returns the table name\n");
    code.push_str(&format!(
        "func (this {}) TableName() string {{\n",
        def.struct_name
    ));
    code.push_str(&format!(
        "\treturn {}\n",
        go_string_literal(&def.stored_table_name)
    ));
    code.push_str("}\n");
    code
}

fn render_rust(def: &StructDefinition) -> String {
    let mut code = String::new();

    code.push_str(&format!(
        "//! Model for table `{}` in module `{}`\n\n",
        def.stored_table_name, def.package
    ));
    code.push_str("use serde::{Deserialize, Serialize};\n\n");

    code.push_str("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]\n");
    code.push_str(&format!("pub struct {} {{\n", def.struct_name));
    for field in &def.fields {
        code.push_str(&format!("    /// {}\n", field.annotation));
        let bare_ident = field.ident.trim_start_matches("r#");
        if field.tag != bare_ident {
            code.push_str(&format!("    #[serde(rename = {:?})]\n", field.tag));
        }
        code.push_str(&format!(
            "    pub {}: {},\n",
            field.ident,
            field.field_type.type_name(TargetLanguage::Rust)
        ));
    }
    code.push_str("}\n\n");

    code.push_str(&format!("impl {} {{\n", def.struct_name));
    code.push_str("    /// Returns the table name\n");
    code.push_str("    pub fn table_name() -> &'static str {\n");
    code.push_str(&format!("        {:?}\n", def.stored_table_name));
    code.push_str("    }\n");
    code.push_str("}\n");

    code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_definition(lang: TargetLanguage) -> StructDefinition {
        let columns = vec![
            ColumnDescriptor::new("id", "bigint unsigned").with_key("PRI"),
            ColumnDescriptor::new("created_at", "datetime").with_comment("creation time"),
        ];
        StructDefinition {
            package: "model".to_string(),
            struct_name: "TOrders".to_string(),
            stored_table_name: "biz_orders".to_string(),
            fields: columns
                .iter()
                .map(|c| FieldSpec::from_column(c, lang, JsonCase::Lower))
                .collect(),
        }
    }

    #[test]
    fn test_field_annotation_falls_back_to_ident() {
        let column = ColumnDescriptor::new("user_id", "int");
        let field = FieldSpec::from_column(&column, TargetLanguage::Go, JsonCase::Lower);
        assert_eq!(field.ident, "UserId");
        assert_eq!(field.annotation, "UserId");
        assert_eq!(field.tag, "user_id");
        assert_eq!(field.field_type, FieldType::Int32);
    }

    #[test]
    fn test_multiline_comment_is_flattened() {
        let column = ColumnDescriptor::new("state", "int").with_comment("1: open\r\n2: closed\n");
        let field = FieldSpec::from_column(&column, TargetLanguage::Go, JsonCase::Lower);
        assert_eq!(field.annotation, "1: open 2: closed");
    }

    #[test]
    fn test_render_go() {
        let code = make_definition(TargetLanguage::Go).render(TargetLanguage::Go);
        assert!(code.starts_with("package model\n"));
        assert!(code.contains("type TOrders struct {\n"));
        assert!(code.contains("    Id int64 `json:\"id\"` // Id\n"));
        assert!(code.contains("    CreatedAt string `json:\"created_at\"` // creation time\n"));
        assert!(code.contains("func (this TOrders) TableName() string {\n\treturn \"biz_orders\"\n}"));
    }

    #[test]
    fn test_render_go_empty_struct() {
        let def = StructDefinition {
            package: "model".to_string(),
            struct_name: "Empty".to_string(),
            stored_table_name: "empty".to_string(),
            fields: vec![],
        };
        let code = def.render(TargetLanguage::Go);
        assert!(code.contains("type Empty struct {\n\n}\n"));
        assert!(code.contains("return \"empty\""));
    }

    #[test]
    fn test_colliding_field_names_are_rejected() {
        let columns = [
            ColumnDescriptor::new("userId", "int"),
            ColumnDescriptor::new("name", "varchar(32)"),
            ColumnDescriptor::new("user_id", "int"),
        ];
        for lang in [TargetLanguage::Rust, TargetLanguage::Go] {
            let def = StructDefinition {
                package: "model".to_string(),
                struct_name: "Accounts".to_string(),
                stored_table_name: "accounts".to_string(),
                fields: columns
                    .iter()
                    .map(|c| FieldSpec::from_column(c, lang, JsonCase::Lower))
                    .collect(),
            };
            match def.check_unique_fields().unwrap_err() {
                CodegenError::DuplicateField { first, second, .. } => {
                    assert_eq!(first, "userId");
                    assert_eq!(second, "user_id");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_distinct_field_names_pass() {
        let def = make_definition(TargetLanguage::Rust);
        assert!(def.check_unique_fields().is_ok());
    }

    #[test]
    fn test_go_string_literal_escapes() {
        assert_eq!(go_string_literal(r#"we"ird\name"#), r#""we\"ird\\name""#);
    }

    #[test]
    fn test_render_rust() {
        let code = make_definition(TargetLanguage::Rust).render(TargetLanguage::Rust);
        assert!(code.contains("pub struct TOrders {\n"));
        assert!(code.starts_with("//! Model for table `biz_orders` in module `model`\n"));
        assert!(code.contains("    /// id\n"));
        assert!(code.contains("    pub id: i64,\n"));
        assert!(code.contains("    /// creation time\n    pub created_at: String,\n"));
        assert!(!code.contains("#[serde(rename = \"id\")]"));
        assert!(code.contains("pub fn table_name() -> &'static str {\n        \"biz_orders\"\n"));
        syn::parse_file(&code).expect("generated Rust must parse");
    }

    #[test]
    fn test_render_rust_renames_keywords_and_cases() {
        let columns = [
            ColumnDescriptor::new("type", "varchar(16)"),
            ColumnDescriptor::new("createdAt", "timestamp"),
        ];
        let def = StructDefinition {
            package: "entity".to_string(),
            struct_name: "Events".to_string(),
            stored_table_name: "events".to_string(),
            fields: columns
                .iter()
                .map(|c| FieldSpec::from_column(c, TargetLanguage::Rust, JsonCase::Lower))
                .collect(),
        };
        let code = def.render(TargetLanguage::Rust);
        assert!(code.contains("    pub r#type: String,\n"));
        assert!(!code.contains("rename = \"type\""));
        assert!(code.contains("    #[serde(rename = \"createdat\")]\n    pub created_at: String,\n"));
        syn::parse_file(&code).expect("generated Rust must parse");
    }
}
