//! S3 object store client
//!
//! Thin wrapper over `aws-sdk-s3` implementing [`ObjectStore`]. Works against
//! AWS S3 or any compatible service (MinIO, LocalStack, ...) when an endpoint
//! override is configured.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::Credentials;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::error::Error as StdError;
use tracing::{debug, error, info, warn};

use super::{ObjectStore, ObjectSummary, StoreError};
use crate::config::StorageConfig;

/// Service error codes meaning the request was not authenticated
const CREDENTIAL_ERROR_CODES: &[&str] = &[
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "InvalidToken",
    "InvalidClientTokenId",
    "MissingAuthenticationToken",
];

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a new S3 client from the storage configuration
    pub async fn new(config: &StorageConfig) -> Self {
        info!("Initializing S3 client for bucket: {}", config.bucket);

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        match config.static_credentials() {
            Some((access_key, secret_key)) => {
                loader = loader.credentials_provider(Credentials::new(
                    access_key,
                    secret_key,
                    None,
                    None,
                    "storage-gateway-env",
                ));
            }
            None => {
                warn!("AWS_ACCESS_KEY/AWS_SECRET_KEY not set, using the default credential chain");
            }
        }

        if let Some(endpoint) = &config.endpoint {
            info!("Using custom S3 endpoint: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        key: String,
        body: Bytes,
        content_type: String,
    ) -> Result<(), StoreError> {
        debug!("Uploading object to S3: {} ({} bytes)", key, body.len());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| classify_sdk_error("PutObject", e))?;

        Ok(())
    }

    async fn list_objects(&self) -> Result<Vec<ObjectSummary>, StoreError> {
        debug!("Listing objects in bucket: {}", self.bucket);

        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| classify_sdk_error("ListObjectsV2", e))?;

        if output.is_truncated().unwrap_or(false) {
            warn!(
                bucket = %self.bucket,
                returned = output.contents().len(),
                "Bucket listing truncated at the store's page size"
            );
        }

        Ok(output
            .contents()
            .iter()
            .map(|object| ObjectSummary {
                key: object.key().unwrap_or_default().to_string(),
                size: object.size().unwrap_or_default(),
            })
            .collect())
    }
}

/// Map an SDK failure onto the two error kinds the gateway distinguishes
pub(crate) fn classify_sdk_error<E, R>(operation: &str, err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + StdError + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let code = err.code().map(str::to_owned);
    let message = match (&code, err.message()) {
        (Some(code), Some(message)) => format!(
            "An error occurred ({}) when calling the {} operation: {}",
            code, operation, message
        ),
        _ => display_chain(&err),
    };

    error!(operation, error = ?err, "S3 request failed");

    let rejected_credentials = code
        .as_deref()
        .is_some_and(|c| CREDENTIAL_ERROR_CODES.contains(&c));

    // Identity resolution failures are not always typed all the way down.
    let mentions_credentials =
        code.is_none() && message.to_ascii_lowercase().contains("credential");

    if rejected_credentials || mentions_credentials || caused_by_credentials_provider(&err) {
        StoreError::Credentials(message)
    } else {
        StoreError::Backend(message)
    }
}

/// `Display` text of an error and its sources, joined with `: `.
/// Sources whose text is already included are skipped.
fn display_chain(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut current = err.source();
    while let Some(e) = current {
        let segment = e.to_string();
        if !segment.is_empty() && !text.contains(&segment) {
            text.push_str(": ");
            text.push_str(&segment);
        }
        current = e.source();
    }
    text
}

fn caused_by_credentials_provider(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.downcast_ref::<CredentialsError>().is_some() {
            return true;
        }
        current = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
    use aws_sdk_s3::operation::put_object::PutObjectError;

    fn service_error<E>(err: E) -> SdkError<E, ()> {
        SdkError::service_error(err, ())
    }

    #[test]
    fn test_missing_credentials_classified() {
        let err: SdkError<PutObjectError, ()> = SdkError::construction_failure(
            CredentialsError::not_loaded("no credentials in the environment"),
        );

        assert!(matches!(
            classify_sdk_error("PutObject", err),
            StoreError::Credentials(_)
        ));
    }

    #[test]
    fn test_rejected_access_key_classified() {
        let meta = ErrorMetadata::builder()
            .code("InvalidAccessKeyId")
            .message("The AWS Access Key Id you provided does not exist in our records.")
            .build();
        let err = service_error(ListObjectsV2Error::generic(meta));

        assert!(matches!(
            classify_sdk_error("ListObjectsV2", err),
            StoreError::Credentials(_)
        ));
    }

    #[test]
    fn test_other_service_error_keeps_message() {
        let meta = ErrorMetadata::builder()
            .code("NoSuchBucket")
            .message("The specified bucket does not exist")
            .build();
        let err = service_error(ListObjectsV2Error::generic(meta));

        match classify_sdk_error("ListObjectsV2", err) {
            StoreError::Backend(msg) => assert_eq!(
                msg,
                "An error occurred (NoSuchBucket) when calling the ListObjectsV2 operation: \
                 The specified bucket does not exist"
            ),
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_display_chain_joins_sources() {
        let inner = std::io::Error::other("connection refused");
        let err: SdkError<PutObjectError, ()> = SdkError::construction_failure(inner);

        assert_eq!(
            display_chain(&err),
            "failed to construct request: connection refused"
        );
    }

    #[test]
    fn test_backend_message_has_no_debug_dump() {
        let err: SdkError<PutObjectError, ()> =
            SdkError::construction_failure(std::io::Error::other("connection refused (127.0.0.1:1)"));

        match classify_sdk_error("PutObject", err) {
            StoreError::Backend(msg) => {
                assert!(msg.contains("connection refused (127.0.0.1:1)"));
                assert!(!msg.contains('{'));
                assert!(!msg.contains("ConstructionFailure"));
            }
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_credential_failure_is_backend_error() {
        let err: SdkError<PutObjectError, ()> =
            SdkError::construction_failure(std::io::Error::other("connection refused"));

        assert!(matches!(
            classify_sdk_error("PutObject", err),
            StoreError::Backend(_)
        ));
    }
}
