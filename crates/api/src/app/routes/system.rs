use axum::{http::StatusCode, Json};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Hello Fromagers!" }))
}
