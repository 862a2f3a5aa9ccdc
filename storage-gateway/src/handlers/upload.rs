use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;

use crate::error::{GatewayError, GatewayResult};
use crate::models::{UploadResponse, UPLOAD_SUCCESS_MESSAGE};
use crate::AppState;

/// Multipart field carrying the file
const FILE_FIELD: &str = "file";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// File part pulled out of the multipart body
#[derive(Debug)]
struct FilePart {
    filename: String,
    content_type: String,
    data: Bytes,
}

fn multipart_error(status: StatusCode, text: String) -> GatewayError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge(text)
    } else {
        GatewayError::Validation(text)
    }
}

async fn read_file_part(multipart: &mut Multipart) -> GatewayResult<FilePart> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e.status(), e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            tracing::debug!("Skipping multipart field: {:?}", field.name());
            continue;
        }

        // A part without a filename is a plain form value, not a file.
        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None => {
                return Err(GatewayError::Validation(format!(
                    "Field '{}' must be a file upload",
                    FILE_FIELD
                )))
            }
        };
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e.status(), e.body_text()))?;

        return Ok(FilePart {
            filename,
            content_type,
            data,
        });
    }

    Err(GatewayError::Validation(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}

/// Store the uploaded file under a fresh `uploads/` key and return its URL
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> GatewayResult<Json<UploadResponse>> {
    let mut multipart =
        multipart.map_err(|rejection| GatewayError::Validation(rejection.body_text()))?;

    let file = read_file_part(&mut multipart).await?;

    tracing::info!(
        "File received: filename={}, size={} bytes, content_type={}",
        file.filename,
        file.data.len(),
        file.content_type
    );

    let key = state.locator.new_key(&file.filename);

    state
        .store
        .put_object(key.clone(), file.data, file.content_type)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upload file to S3: {}", e);
            e
        })?;

    tracing::info!("File uploaded successfully: key={}", key);

    Ok(Json(UploadResponse {
        message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        file_url: state.locator.public_url(&key),
    }))
}
