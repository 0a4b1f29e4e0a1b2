use super::*;

fn response(status: u16, body: &str) -> EndpointResponse {
    EndpointResponse {
        status,
        body: body.to_string(),
    }
}

fn tolerated() -> Vec<String> {
    vec!["already exists".to_string()]
}

#[test]
fn test_success_statuses_applied_under_every_policy() {
    for policy in [
        ResponsePolicy::Lenient,
        ResponsePolicy::Tolerant,
        ResponsePolicy::Strict,
    ] {
        for status in [200, 201, 204] {
            let outcome = classify_response(&response(status, ""), policy, &tolerated());
            assert_eq!(outcome, StatementOutcome::Applied { status });
        }
    }
}

#[test]
fn test_lenient_tolerates_any_rejection() {
    for status in [404, 500, 409, 202] {
        let outcome = classify_response(
            &response(status, "boom"),
            ResponsePolicy::Lenient,
            &tolerated(),
        );
        assert!(outcome.is_success());
        assert_eq!(
            outcome,
            StatementOutcome::Tolerated {
                status,
                body: "boom".to_string()
            }
        );
    }
}

#[test]
fn test_strict_rejects_every_other_status() {
    let outcome = classify_response(
        &response(409, r#"{"message":"relation \"users\" already exists"}"#),
        ResponsePolicy::Strict,
        &tolerated(),
    );
    assert!(!outcome.is_success());
    assert!(matches!(outcome, StatementOutcome::Rejected { status: 409, .. }));
}

#[test]
fn test_tolerant_matches_configured_fragments() {
    let outcome = classify_response(
        &response(400, r#"{"message":"relation \"users\" ALREADY EXISTS"}"#),
        ResponsePolicy::Tolerant,
        &tolerated(),
    );
    assert!(matches!(outcome, StatementOutcome::Tolerated { status: 400, .. }));

    let outcome = classify_response(
        &response(400, r#"{"message":"syntax error at or near \"CREAT\""}"#),
        ResponsePolicy::Tolerant,
        &tolerated(),
    );
    assert!(matches!(outcome, StatementOutcome::Rejected { status: 400, .. }));
}

#[test]
fn test_tolerant_ignores_blank_fragments() {
    let outcome = classify_response(
        &response(500, "internal error"),
        ResponsePolicy::Tolerant,
        &["  ".to_string()],
    );
    assert!(!outcome.is_success());
}

#[test]
fn test_transport_error_fails() {
    let err = DbError::Timeout(std::time::Duration::from_secs(30));
    let outcome = StatementOutcome::from_error(&err);
    assert!(!outcome.is_success());
    assert!(matches!(outcome, StatementOutcome::Failed { .. }));
}
