//! End-to-end runs against a local RPC endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use mr_core::{Config, MigrationLayout, StatementErrorMode};
use mr_db::{RpcBackend, RpcConfig, ServiceKey, StatementExecutor};
use mr_run::{MigrationRunner, SilentProgress};
use mr_sql::StatementSplitter;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

type Received = Arc<Mutex<Vec<String>>>;

async fn exec_sql(
    State(received): State<Received>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, String) {
    let query = body["query"].as_str().unwrap_or_default().to_string();
    received.lock().unwrap().push(query.clone());
    if query.contains("already_there") {
        (
            StatusCode::BAD_REQUEST,
            r#"{"code":"42P07","message":"relation \"already_there\" already exists"}"#.to_string(),
        )
    } else {
        (StatusCode::OK, "null".to_string())
    }
}

async fn spawn_server() -> (SocketAddr, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/rest/v1/rpc/exec_sql", post(exec_sql))
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, received)
}

fn backend(addr: SocketAddr) -> RpcBackend {
    RpcBackend::new(&RpcConfig {
        base_url: format!("http://{}", addr),
        rpc_path: "/rest/v1/rpc/exec_sql".to_string(),
        service_key: ServiceKey::new("test-key"),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn write_project(root: &Path, schema: Option<&str>, migrations: &[(&str, &str)]) {
    let dir = root.join("supabase/migrations");
    fs::create_dir_all(&dir).unwrap();
    if let Some(sql) = schema {
        fs::write(root.join("supabase/schema.sql"), sql).unwrap();
    }
    for (name, sql) in migrations {
        fs::write(dir.join(name), sql).unwrap();
    }
}

#[tokio::test]
async fn test_full_run_without_schema() {
    let project = tempdir().unwrap();
    let three = "CREATE TABLE a (id INT);\nCREATE TABLE b (id INT);\nCREATE TABLE c (id INT);";
    write_project(
        project.path(),
        None,
        &[("20240101_init.sql", three), ("20240102_more.sql", three)],
    );

    let (addr, received) = spawn_server().await;
    let endpoint = backend(addr);
    let config = Config::default();
    let layout = MigrationLayout::resolve(project.path(), &config).unwrap();
    let executor = StatementExecutor::new(
        &endpoint,
        config.response_policy,
        config.tolerated_errors.clone(),
    );
    let splitter = StatementSplitter::naive();
    let runner = MigrationRunner::new(
        &splitter,
        &executor,
        config.on_statement_error,
        &SilentProgress,
    );

    let migrations = layout.migrations().unwrap();
    let summary = runner.run_all(layout.schema().as_ref(), &migrations).await;

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(received.lock().unwrap().len(), 6);
}

#[tokio::test]
async fn test_schema_then_migrations_with_tokenizer() {
    let project = tempdir().unwrap();
    write_project(
        project.path(),
        Some("CREATE TABLE already_there (id INT);"),
        &[(
            "001_fn.sql",
            "CREATE FUNCTION f() RETURNS int AS $$ SELECT 1; $$ LANGUAGE sql;\nSELECT f();",
        )],
    );

    let (addr, received) = spawn_server().await;
    let endpoint = backend(addr);
    let layout = MigrationLayout::resolve(project.path(), &Config::default()).unwrap();
    let executor = StatementExecutor::new(
        &endpoint,
        mr_core::ResponsePolicy::Tolerant,
        vec!["already exists".to_string()],
    );
    let splitter = StatementSplitter::postgres();
    let runner = MigrationRunner::new(
        &splitter,
        &executor,
        StatementErrorMode::AbortFile,
        &SilentProgress,
    );

    let migrations = layout.migrations().unwrap();
    let summary = runner.run_all(layout.schema().as_ref(), &migrations).await;

    let received = received.lock().unwrap().clone();
    assert_eq!(received.len(), 3);
    assert_eq!(received[0], "CREATE TABLE already_there (id INT)");
    assert_eq!(
        received[1],
        "CREATE FUNCTION f() RETURNS int AS $$ SELECT 1; $$ LANGUAGE sql"
    );

    let schema = summary.schema.as_ref().unwrap();
    assert_eq!(schema.tolerated, 1);
    assert!(schema.succeeded());
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.exit_code(), 0);
}

#[tokio::test]
async fn test_missing_migrations_dir_sends_nothing() {
    let project = tempdir().unwrap();
    let (_addr, received) = spawn_server().await;

    let result = MigrationLayout::resolve(project.path(), &Config::default());

    assert!(result.is_err());
    assert!(received.lock().unwrap().is_empty());
}
