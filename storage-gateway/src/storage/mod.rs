// Storage module for S3 integration

pub mod location;
pub mod s3_client;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use location::ObjectLocator;
pub use s3_client::S3ObjectStore;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// Credentials were missing, expired or rejected by the store
    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("{0}")]
    Backend(String),
}

/// One entry of a bucket listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub key: String,
    pub size: i64,
}

/// Operations the gateway needs from an object store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `body` under `key` with the given content type
    async fn put_object(
        &self,
        key: String,
        body: Bytes,
        content_type: String,
    ) -> Result<(), StoreError>;

    /// List the bucket in a single call; no pagination, no prefix filter
    async fn list_objects(&self) -> Result<Vec<ObjectSummary>, StoreError>;
}
