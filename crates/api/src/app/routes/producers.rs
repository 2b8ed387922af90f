use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use fromager_core::ProducerId;

use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_producers).post(create_producer))
        .route("/:id", get(get_producer).delete(delete_producer))
}

pub async fn list_producers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.catalog.list_producers().await {
        Ok(producers) => {
            let items = producers
                .iter()
                .map(dto::producer_summary_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn get_producer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProducerId = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.catalog.get_producer_with_cheeses(id).await {
        Ok(Some((producer, cheeses))) => {
            (StatusCode::OK, Json(dto::producer_detail_json(&producer, &cheeses))).into_response()
        }
        Ok(None) => errors::not_found("Producer not found"),
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn create_producer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateProducerRequest>,
) -> axum::response::Response {
    let new = match body.into_new_producer() {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.catalog.create_producer(new).await {
        Ok(producer) => {
            (StatusCode::CREATED, Json(dto::producer_summary_json(&producer))).into_response()
        }
        Err(e) => errors::repo_error_to_response(e),
    }
}

/// Removes the producer's cheeses first, then the producer.
pub async fn delete_producer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProducerId = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.catalog.delete_producer(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::not_found("Resource not found"),
        Err(e) => errors::repo_error_to_response(e),
    }
}
