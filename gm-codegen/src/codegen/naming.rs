//! Naming utilities for code generation

use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

/// Convert a table or column name to a type/field identifier.
///
/// Splits on `_` and upper-cases the first character of every segment,
/// leaving the rest as-is: `user_id` -> `UserId`, `t_orders` -> `TOrders`.
/// Leading digits, doubled underscores and non-ASCII input are not treated
/// specially.
pub fn to_struct_name(name: &str) -> String {
    name.split('_').map(capitalize).collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a column name to a Rust field name (snake_case, keywords escaped)
pub fn to_field_name(column_name: &str) -> String {
    escape_field_name(column_name)
}

/// Table name literal embedded in generated output.
///
/// `remove_prefix` is stripped when the table name starts with it, then
/// `prefix` is prepended. The result is not guaranteed to name a real table.
pub fn stored_table_name(table_name: &str, prefix: &str, remove_prefix: &str) -> String {
    let base = if remove_prefix.is_empty() {
        table_name
    } else {
        table_name.strip_prefix(remove_prefix).unwrap_or(table_name)
    };
    format!("{}{}", prefix, base)
}

/// Case applied to serialization tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonCase {
    /// Lower-cased column name (`UserID` -> `userid`)
    #[default]
    Lower,
    /// `user_id`
    Snake,
    /// `userId`
    Camel,
    /// `UserId`
    Pascal,
}

impl JsonCase {
    /// Parse a configured mode; the empty string selects the default.
    /// Returns `None` for unknown modes.
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "" | "lower" => Some(JsonCase::Lower),
            "snake" => Some(JsonCase::Snake),
            "camel" | "lowercamel" => Some(JsonCase::Camel),
            "pascal" | "uppercamel" => Some(JsonCase::Pascal),
            _ => None,
        }
    }

    /// Serialization tag for a column
    pub fn apply(self, column_name: &str) -> String {
        match self {
            JsonCase::Lower => column_name.to_lowercase(),
            JsonCase::Snake => column_name.to_snake_case(),
            JsonCase::Camel => column_name.to_lower_camel_case(),
            JsonCase::Pascal => column_name.to_pascal_case(),
        }
    }
}

/// Check if a name is a Rust reserved keyword
pub fn is_rust_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "async"
            | "await"
            | "break"
            | "const"
            | "continue"
            | "crate"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "Self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "try"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
    )
}

/// Escape a field name if it's a Rust keyword
pub fn escape_field_name(name: &str) -> String {
    let snake = name.to_snake_case();
    match snake.as_str() {
        // Not valid as raw identifiers
        "self" | "super" | "crate" => format!("{}_", snake),
        s if is_rust_keyword(s) => format!("r#{}", snake),
        _ => snake,
    }
}
