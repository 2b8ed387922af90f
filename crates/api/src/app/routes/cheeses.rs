use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{patch, post},
    Json, Router,
};

use fromager_core::{CheeseId, DomainError};
use fromager_infra::RepoError;

use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_cheese))
        .route("/:id", patch(update_cheese).delete(delete_cheese))
}

pub async fn create_cheese(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCheeseRequest>,
) -> axum::response::Response {
    let fields = match body.require_fields() {
        Ok(v) => v,
        Err(res) => return res,
    };

    // An unknown producer wins over a malformed field.
    match services.catalog.get_producer(fields.producer_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return errors::errors_list(StatusCode::NOT_FOUND, ["Producer not found".to_string()]);
        }
        Err(e) => return errors::repo_error_to_response(e),
    }

    let new = match fields.into_new_cheese() {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.catalog.create_cheese(new).await {
        Ok((cheese, producer)) => (
            StatusCode::CREATED,
            Json(dto::cheese_with_producer_json(&cheese, &producer)),
        )
            .into_response(),
        Err(RepoError::Domain(DomainError::NotFound(_))) => {
            errors::errors_list(StatusCode::NOT_FOUND, ["Producer not found".to_string()])
        }
        Err(e) => errors::repo_error_to_response(e),
    }
}

/// Partial update: only fields present in the body are touched.
pub async fn update_cheese(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateCheeseRequest>,
) -> axum::response::Response {
    let id: CheeseId = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.catalog.get_cheese(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return errors::not_found("Resource not found"),
        Err(e) => return errors::repo_error_to_response(e),
    }
    let patch = match body.into_patch() {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.catalog.update_cheese(id, &patch).await {
        Ok((cheese, producer)) => (
            StatusCode::OK,
            Json(dto::cheese_with_producer_json(&cheese, &producer)),
        )
            .into_response(),
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn delete_cheese(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CheeseId = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.catalog.delete_cheese(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::not_found("Resource not found"),
        Err(e) => errors::repo_error_to_response(e),
    }
}
