//! API surface tests: response shapes, error mapping, and core domain
//! invariants that the HTTP layer relies on.

use axum::http::StatusCode;
use axum::response::IntoResponse;

use chronicle::domain::{Password, Role, SubmissionStatus};
use chronicle::errors::AppError;
use chronicle::types::ApiResponse;

// =============================================================================
// Response types
// =============================================================================

#[tokio::test]
async fn api_response_structure() {
    let response: ApiResponse<String> = ApiResponse::success("test data".to_string());
    assert!(response.success);
    assert_eq!(response.data.unwrap(), "test data");
    assert!(response.message.is_none());
}

#[tokio::test]
async fn message_only_response() {
    let response: ApiResponse<()> = ApiResponse::message("Success");
    assert!(response.success);
    assert!(response.data.is_none());
    assert_eq!(response.message.unwrap(), "Success");
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn error_taxonomy_maps_to_http_statuses() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::PermissionDenied, StatusCode::FORBIDDEN),
        (AppError::NotFound, StatusCode::NOT_FOUND),
        (
            AppError::conflict("already exists"),
            StatusCode::CONFLICT,
        ),
        (
            AppError::invalid_transition("pin on pending"),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            AppError::validation("missing field"),
            StatusCode::BAD_REQUEST,
        ),
        (AppError::InvalidToken, StatusCode::BAD_REQUEST),
        (
            AppError::unavailable("store timeout"),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
    ];

    for (error, expected) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }
}

// =============================================================================
// Domain invariants
// =============================================================================

#[tokio::test]
async fn role_strings_round_trip() {
    assert_eq!(Role::parse("president"), Some(Role::President));
    assert_eq!(Role::Admin.to_string(), "admin");
    // Unknown role strings are rejected, not defaulted
    assert_eq!(Role::parse("owner"), None);
}

#[tokio::test]
async fn submission_status_strings_round_trip() {
    assert_eq!(SubmissionStatus::parse("pending"), Some(SubmissionStatus::Pending));
    assert_eq!(SubmissionStatus::Approved.to_string(), "approved");
    assert_eq!(SubmissionStatus::parse("published"), None);
}

// =============================================================================
// Password hashing
// =============================================================================

#[tokio::test]
async fn password_hashing_round_trip() {
    let plain = "secure_password_123";
    let password = Password::new(plain).expect("Hashing should succeed");
    let hash = password.into_string();

    assert_ne!(hash.as_str(), plain);

    let stored = Password::from_hash(hash);
    assert!(stored.verify(plain));
    assert!(!stored.verify("wrong_password"));
}

#[tokio::test]
async fn password_hashes_are_salted() {
    let plain = "same_password";
    let first = Password::new(plain).expect("Hashing should succeed").into_string();
    let second = Password::new(plain).expect("Hashing should succeed").into_string();

    assert_ne!(first, second);
    assert!(Password::from_hash(first).verify(plain));
    assert!(Password::from_hash(second).verify(plain));
}
