use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

pub async fn health_check() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "storage-gateway",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};

    use super::super::test_support::{app_with, send};
    use crate::storage::MockObjectStore;

    #[tokio::test]
    async fn test_health_does_not_touch_store() {
        let app = app_with(MockObjectStore::new());
        let request = Request::get("/health").body(Body::empty()).unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, 200);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "storage-gateway");
    }
}
