use serde::{Deserialize, Serialize};

use crate::storage::ObjectSummary;

/// Canned answer of the stubbed prediction endpoint
pub const MOCK_PREDICTION_MESSAGE: &str = "Mock Chatbot Response: Your product appears to comply with US import regulations. Key compliance points:\n\n\u{2022} No prohibited symbols or markings\n\u{2022} Labeling appears to meet FDA standards\n\u{2022} No obvious restricted materials\n\nRecommendation: Proceed with export, but verify specific industry regulations that may apply.";

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully";

/// Request payload for `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub image_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub message: String,
    pub image_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub file_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    pub files: Vec<ObjectSummary>,
}
