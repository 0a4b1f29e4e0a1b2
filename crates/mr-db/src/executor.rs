//! Statement execution against a SQL endpoint

use crate::policy::{classify_response, StatementOutcome};
use crate::traits::SqlEndpoint;
use mr_core::ResponsePolicy;

/// Sends statements one at a time and classifies the answers.
///
/// Each statement is attempted exactly once; there is no retry.
pub struct StatementExecutor<'a> {
    endpoint: &'a dyn SqlEndpoint,
    policy: ResponsePolicy,
    tolerated: Vec<String>,
}

impl<'a> StatementExecutor<'a> {
    /// Create an executor with the given response policy
    pub fn new(endpoint: &'a dyn SqlEndpoint, policy: ResponsePolicy, tolerated: Vec<String>) -> Self {
        Self {
            endpoint,
            policy,
            tolerated,
        }
    }

    /// The policy non-success statuses are classified with
    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    /// Execute one statement; `description` names it in log output
    pub async fn execute(&self, sql: &str, description: &str) -> StatementOutcome {
        log::debug!("Executing {} via {}", description, self.endpoint.endpoint_type());

        let outcome = match self.endpoint.execute(sql).await {
            Ok(response) => classify_response(&response, self.policy, &self.tolerated),
            Err(e) => StatementOutcome::from_error(&e),
        };

        match &outcome {
            StatementOutcome::Applied { .. } => {}
            StatementOutcome::Tolerated { status, body } => {
                log::warn!("Status {} for {} (tolerated): {}", status, description, body);
            }
            StatementOutcome::Rejected { status, body } => {
                log::warn!("Status {} for {} (rejected): {}", status, description, body);
            }
            StatementOutcome::Failed { error } => {
                log::error!("{} failed: {}", description, error);
            }
        }

        outcome
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
