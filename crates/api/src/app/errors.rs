use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use fromager_core::DomainError;
use fromager_infra::RepoError;

pub fn repo_error_to_response(err: RepoError) -> axum::response::Response {
    match err {
        RepoError::Domain(DomainError::Validation(msg)) => validation_errors(msg),
        RepoError::Domain(DomainError::NotFound(what)) => {
            tracing::debug!(what, "record not found");
            not_found("Resource not found")
        }
        RepoError::Domain(DomainError::InvalidId(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg)
        }
        RepoError::Database(e) => {
            tracing::error!(error = %e, "database operation failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "database_error", e.to_string())
        }
    }
}

/// `400 {"errors": ["validation errors", <msg>]}`.
pub fn validation_errors(message: impl Into<String>) -> axum::response::Response {
    errors_list(
        StatusCode::BAD_REQUEST,
        ["validation errors".to_string(), message.into()],
    )
}

pub fn missing_fields() -> axum::response::Response {
    errors_list(StatusCode::BAD_REQUEST, ["Missing fields".to_string()])
}

/// `{"errors": [...]}` body with the given status.
pub fn errors_list(
    status: StatusCode,
    errors: impl IntoIterator<Item = String>,
) -> axum::response::Response {
    let errors = errors.into_iter().collect::<Vec<_>>();
    (status, axum::Json(json!({ "errors": errors }))).into_response()
}

/// `404 {"error": <message>}`.
pub fn not_found(message: impl Into<String>) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({ "error": message.into() })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
