use axum::{extract::rejection::JsonRejection, Json};

use crate::error::{GatewayError, GatewayResult};
use crate::models::{PredictRequest, PredictResponse, MOCK_PREDICTION_MESSAGE};

/// Stubbed prediction: no model is called, the answer is always the same.
///
/// Every body rejection (missing or mistyped `imagePath`, invalid JSON, wrong
/// content type) is reported as a 422.
pub async fn predict(
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> GatewayResult<Json<PredictResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Rejected predict body: {}", rejection.body_text());
        GatewayError::Validation(rejection.body_text())
    })?;

    Ok(Json(PredictResponse {
        message: MOCK_PREDICTION_MESSAGE.to_string(),
        image_path: request.image_path,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::super::test_support::{app_with, json_request, send};
    use crate::models::MOCK_PREDICTION_MESSAGE;
    use crate::storage::MockObjectStore;

    #[tokio::test]
    async fn test_predict_echoes_path_with_fixed_message() {
        for path in ["images/cup.png", "", "s3://elsewhere/ünïcode.jpg"] {
            let body = json!({ "imagePath": path }).to_string();
            let (status, response) = send(
                app_with(MockObjectStore::new()),
                json_request("POST", "/predict", &body),
            )
            .await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                response,
                json!({ "message": MOCK_PREDICTION_MESSAGE, "imagePath": path })
            );
        }
    }

    #[tokio::test]
    async fn test_predict_missing_field_is_422() {
        let (status, response) = send(
            app_with(MockObjectStore::new()),
            json_request("POST", "/predict", r#"{"path": "x.png"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response["detail"].is_string());
    }

    #[tokio::test]
    async fn test_predict_wrong_type_is_422() {
        let (status, _) = send(
            app_with(MockObjectStore::new()),
            json_request("POST", "/predict", r#"{"imagePath": 12}"#),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_predict_invalid_json_is_422() {
        let (status, _) = send(
            app_with(MockObjectStore::new()),
            json_request("POST", "/predict", "{not json"),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
