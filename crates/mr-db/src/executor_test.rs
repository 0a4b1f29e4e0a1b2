use super::*;
use crate::error::{DbError, DbResult};
use crate::traits::EndpointResponse;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Endpoint answering from a fixed script of results
struct ScriptedEndpoint {
    replies: Mutex<Vec<DbResult<EndpointResponse>>>,
    received: Mutex<Vec<String>>,
}

impl ScriptedEndpoint {
    fn new(mut replies: Vec<DbResult<EndpointResponse>>) -> Self {
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            received: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SqlEndpoint for ScriptedEndpoint {
    async fn execute(&self, sql: &str) -> DbResult<EndpointResponse> {
        self.received.lock().unwrap().push(sql.to_string());
        self.replies.lock().unwrap().pop().unwrap()
    }

    fn endpoint_type(&self) -> &'static str {
        "scripted"
    }

    fn target(&self) -> String {
        "scripted://".to_string()
    }
}

fn status(code: u16) -> DbResult<EndpointResponse> {
    Ok(EndpointResponse {
        status: code,
        body: format!("body {}", code),
    })
}

#[tokio::test]
async fn test_success_statuses() {
    let endpoint = ScriptedEndpoint::new(vec![status(200), status(201), status(204)]);
    let executor = StatementExecutor::new(&endpoint, ResponsePolicy::Lenient, vec![]);

    for _ in 0..3 {
        let outcome = executor.execute("SELECT 1", "test").await;
        assert!(matches!(outcome, StatementOutcome::Applied { .. }));
    }
    assert_eq!(endpoint.received.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_lenient_passes_404_and_500() {
    let endpoint = ScriptedEndpoint::new(vec![status(404), status(500)]);
    let executor = StatementExecutor::new(&endpoint, ResponsePolicy::Lenient, vec![]);

    let first = executor.execute("SELECT 1", "a").await;
    let second = executor.execute("SELECT 2", "b").await;
    assert!(first.is_success());
    assert!(second.is_success());
    assert!(matches!(first, StatementOutcome::Tolerated { status: 404, .. }));
}

#[tokio::test]
async fn test_strict_fails_500() {
    let endpoint = ScriptedEndpoint::new(vec![status(500)]);
    let executor = StatementExecutor::new(&endpoint, ResponsePolicy::Strict, vec![]);

    let outcome = executor.execute("SELECT 1", "a").await;
    assert!(!outcome.is_success());
    assert_eq!(executor.policy(), ResponsePolicy::Strict);
}

#[tokio::test]
async fn test_timeout_is_failure() {
    let endpoint = ScriptedEndpoint::new(vec![Err(DbError::Timeout(Duration::from_secs(30)))]);
    let executor = StatementExecutor::new(&endpoint, ResponsePolicy::Lenient, vec![]);

    let outcome = executor.execute("SELECT pg_sleep(60)", "slow").await;
    assert!(!outcome.is_success());
    match outcome {
        StatementOutcome::Failed { error } => assert!(error.contains("D002")),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_statement_sent_verbatim() {
    let endpoint = ScriptedEndpoint::new(vec![status(200)]);
    let executor = StatementExecutor::new(&endpoint, ResponsePolicy::Lenient, vec![]);

    executor
        .execute("INSERT INTO t VALUES ('x')", "verbatim")
        .await;
    assert_eq!(
        endpoint.received.lock().unwrap().as_slice(),
        ["INSERT INTO t VALUES ('x')".to_string()]
    );
}
