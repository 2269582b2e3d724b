use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::errors::ThreatError;

impl IntoResponse for ThreatError {
    fn into_response(self) -> axum::response::Response {
        let class = self.classify();
        let (status, error) = if class.client_fault {
            (StatusCode::BAD_REQUEST, self.to_string())
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, class.public_message.to_string())
        };

        (status, Json(json!({"error": error, "details": self.to_string()}))).into_response()
    }
}
