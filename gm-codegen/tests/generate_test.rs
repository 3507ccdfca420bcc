//! End-to-end generation tests against in-memory schemas

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gm_codegen::codegen::{
    CodeGenerator, Formatter, NoopFormatter, PrettyPleaseFormatter, TargetLanguage,
};
use gm_codegen::schema::{ColumnDescriptor, InMemorySchema, SchemaSource};
use gm_codegen::{CodegenConfig, CodegenError};

fn config(dir: &Path, tables: &str) -> CodegenConfig {
    CodegenConfig {
        tables: tables.to_string(),
        gen_dir: dir.join("model"),
        ..Default::default()
    }
}

fn users_schema() -> InMemorySchema {
    InMemorySchema::new().with_table(
        "users",
        vec![
            ColumnDescriptor::new("id", "bigint").with_key("PRI"),
            ColumnDescriptor::new("created_at", "datetime"),
        ],
    )
}

/// Fails the query for one table, serving the rest from an in-memory schema
struct FailingSource {
    inner: InMemorySchema,
    fail_on: &'static str,
}

#[async_trait]
impl SchemaSource for FailingSource {
    async fn columns(&mut self, table: &str) -> gm_codegen::Result<Vec<ColumnDescriptor>> {
        if table == self.fail_on {
            return Err(CodegenError::QueryError {
                table: table.to_string(),
                message: "Lost connection to MySQL server during query".to_string(),
            });
        }
        self.inner.columns(table).await
    }
}

/// Records which files were formatted and fails on a chosen one
struct RecordingFormatter {
    seen: Arc<Mutex<Vec<String>>>,
    fail_on: Option<&'static str>,
}

impl Formatter for RecordingFormatter {
    fn format(&self, path: &Path) -> gm_codegen::Result<()> {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        self.seen.lock().unwrap().push(name.clone());
        if Some(name.as_str()) == self.fail_on {
            return Err(CodegenError::FormatError {
                path: path.to_path_buf(),
                message: "exit status: 2".to_string(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[tokio::test]
async fn test_users_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), "users");

    let report = CodeGenerator::with_formatter(&config, Box::new(NoopFormatter))
        .run(&mut users_schema())
        .await
        .unwrap();

    assert_eq!(report.files.len(), 1);
    let path = dir.path().join("model").join("users.go");
    assert_eq!(report.files[0].path, path);

    let code = fs::read_to_string(&path).unwrap();
    assert_eq!(
        code,
        "package model\n\
         \n\
         type Users struct {\n\
         \x20   Id int64 `json:\"id\"` // Id\n\
         \x20   CreatedAt string `json:\"created_at\"` // CreatedAt\n\
         \n\
         }\n\
         \n\
         // TableName returns the table name\n\
         func (this Users) TableName() string {\n\
         \treturn \"users\"\n\
         }\n"
    );
}

#[tokio::test]
async fn test_prefix_rewrite_names_file_and_accessor() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), "t_orders");
    config.prefix = "biz_".to_string();
    config.remove_prefix = "t_".to_string();

    let mut schema = InMemorySchema::new().with_table(
        "t_orders",
        vec![ColumnDescriptor::new("amount", "decimal(10,2)").with_comment("order total")],
    );
    let report = CodeGenerator::with_formatter(&config, Box::new(NoopFormatter))
        .run(&mut schema)
        .await
        .unwrap();

    let file = &report.files[0];
    assert_eq!(file.struct_name, "TOrders");
    assert_eq!(file.path, dir.path().join("model").join("biz_orders.go"));

    let code = fs::read_to_string(&file.path).unwrap();
    assert!(code.contains("type TOrders struct {"));
    assert!(code.contains("Amount float64 `json:\"amount\"` // order total"));
    assert!(code.contains("return \"biz_orders\""));
}

#[tokio::test]
async fn test_missing_table_generates_empty_struct() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), "ghost");

    CodeGenerator::with_formatter(&config, Box::new(NoopFormatter))
        .run(&mut InMemorySchema::new())
        .await
        .unwrap();

    let code = fs::read_to_string(dir.path().join("model").join("ghost.go")).unwrap();
    assert!(code.contains("type Ghost struct {\n\n}\n"));
}

#[tokio::test]
async fn test_regeneration_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), "users");
    let path = dir.path().join("model").join("users.go");
    let generator = CodeGenerator::with_formatter(&config, Box::new(NoopFormatter));

    generator.run(&mut users_schema()).await.unwrap();
    let first = fs::read(&path).unwrap();

    fs::write(&path, "stale content").unwrap();
    generator.run(&mut users_schema()).await.unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_query_failure_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), "users,orders,items");
    let mut source = FailingSource {
        inner: users_schema()
            .with_table("items", vec![ColumnDescriptor::new("id", "int")]),
        fail_on: "orders",
    };

    let err = CodeGenerator::with_formatter(&config, Box::new(NoopFormatter))
        .run(&mut source)
        .await
        .unwrap_err();

    assert!(matches!(err, CodegenError::QueryError { ref table, .. } if table == "orders"));
    assert!(err.to_string().contains("orders"));

    let model = dir.path().join("model");
    assert!(model.join("users.go").exists());
    assert!(!model.join("orders.go").exists());
    assert!(!model.join("items.go").exists());
}

#[tokio::test]
async fn test_format_failure_keeps_file_and_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), "users,orders,items");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let formatter = RecordingFormatter {
        seen: Arc::clone(&seen),
        fail_on: Some("orders.go"),
    };

    let err = CodeGenerator::with_formatter(&config, Box::new(formatter))
        .run(&mut users_schema())
        .await
        .unwrap_err();

    match &err {
        CodegenError::Table { table, source } => {
            assert_eq!(table, "orders");
            assert!(matches!(**source, CodegenError::FormatError { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(*seen.lock().unwrap(), vec!["users.go", "orders.go"]);
    let model = dir.path().join("model");
    assert!(model.join("orders.go").exists());
    assert!(!model.join("items.go").exists());
}

#[tokio::test]
async fn test_rust_target_is_formatted() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), "users");
    config.lang = TargetLanguage::Rust;
    config.json_case = "camel".to_string();

    let report = CodeGenerator::with_formatter(&config, Box::new(PrettyPleaseFormatter))
        .run(&mut users_schema())
        .await
        .unwrap();

    let path = &report.files[0].path;
    assert_eq!(path, &dir.path().join("model").join("users.rs"));

    let code = fs::read_to_string(path).unwrap();
    syn::parse_file(&code).unwrap();
    assert!(code.contains("pub struct Users {"));
    assert!(code.contains("pub id: i64,"));
    assert!(code.contains("#[serde(rename = \"createdAt\")]"));
    assert!(code.contains("pub created_at: String,"));
    assert!(code.contains("pub fn table_name() -> &'static str {"));
}

#[tokio::test]
async fn test_dry_run_reports_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), "users");
    config.dry_run = true;

    let report = CodeGenerator::new(&config)
        .run(&mut users_schema())
        .await
        .unwrap();

    assert!(!report.files[0].written);
    assert!(!dir.path().join("model").exists());
}

#[tokio::test]
async fn test_colliding_columns_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), "users,accounts");
    config.lang = TargetLanguage::Rust;

    let mut schema = users_schema().with_table(
        "accounts",
        vec![
            ColumnDescriptor::new("userId", "int"),
            ColumnDescriptor::new("user_id", "int"),
        ],
    );
    let err = CodeGenerator::with_formatter(&config, Box::new(NoopFormatter))
        .run(&mut schema)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("table accounts"));
    assert!(err
        .to_string()
        .contains("Columns userId and user_id both map to field user_id"));
    let model = dir.path().join("model");
    assert!(model.join("users.rs").exists());
    assert!(!model.join("accounts.rs").exists());
}
