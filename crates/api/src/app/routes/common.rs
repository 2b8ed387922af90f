use core::str::FromStr;

use axum::http::StatusCode;

use fromager_core::DomainError;

use crate::app::errors;

/// Parse a path segment into a typed id, or a ready-made error response.
///
/// Non-numeric segments are a 400. A numeric segment too large for an id
/// cannot name a stored row, so it is a 404 like any other unknown id.
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(|e| {
        if is_unsigned_integer(raw) {
            errors::not_found("Resource not found")
        } else {
            errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string())
        }
    })
}

fn is_unsigned_integer(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}
