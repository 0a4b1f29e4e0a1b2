//! Classification of endpoint responses

use crate::error::DbError;
use crate::traits::EndpointResponse;
use mr_core::ResponsePolicy;

/// Statuses that always count as applied
pub const SUCCESS_STATUSES: [u16; 3] = [200, 201, 204];

/// What happened to one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementOutcome {
    /// The endpoint answered 200, 201 or 204
    Applied { status: u16 },

    /// The endpoint rejected the statement but the policy lets it pass
    Tolerated { status: u16, body: String },

    /// The endpoint rejected the statement and the policy fails it
    Rejected { status: u16, body: String },

    /// No usable response (connection error, timeout, unreadable body)
    Failed { error: String },
}

impl StatementOutcome {
    /// Whether the statement counts towards the file's successes
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            StatementOutcome::Applied { .. } | StatementOutcome::Tolerated { .. }
        )
    }

    /// Build the outcome of a transport failure
    pub fn from_error(err: &DbError) -> Self {
        StatementOutcome::Failed {
            error: err.to_string(),
        }
    }
}

/// Classify an HTTP response.
///
/// Under `Lenient` every rejection passes, which also masks real errors:
/// a broken statement is indistinguishable from a re-applied
/// `CREATE TABLE` that "already exists". `Tolerant` only lets rejections
/// through when the body contains one of `tolerated` (case-insensitive).
pub fn classify_response(
    response: &EndpointResponse,
    policy: ResponsePolicy,
    tolerated: &[String],
) -> StatementOutcome {
    let status = response.status;
    if SUCCESS_STATUSES.contains(&status) {
        return StatementOutcome::Applied { status };
    }

    let body = response.body.clone();
    let passes = match policy {
        ResponsePolicy::Lenient => true,
        ResponsePolicy::Strict => false,
        ResponsePolicy::Tolerant => {
            let haystack = body.to_lowercase();
            tolerated
                .iter()
                .map(|p| p.trim().to_lowercase())
                .any(|p| !p.is_empty() && haystack.contains(&p))
        }
    };

    if passes {
        StatementOutcome::Tolerated { status, body }
    } else {
        StatementOutcome::Rejected { status, body }
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod tests;
