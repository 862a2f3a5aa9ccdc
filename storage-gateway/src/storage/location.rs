use uuid::Uuid;

use crate::config::StorageConfig;

/// Namespace every uploaded object lands under
pub const UPLOAD_PREFIX: &str = "uploads/";

/// Knows where objects live: generates keys and their public URLs
#[derive(Debug, Clone)]
pub struct ObjectLocator {
    bucket: String,
    region: String,
    endpoint: Option<String>,
}

impl ObjectLocator {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Fresh key for an upload: `uploads/{uuid}_{filename}`
    pub fn new_key(&self, filename: &str) -> String {
        format!("{}{}_{}", UPLOAD_PREFIX, Uuid::new_v4(), filename)
    }

    /// Public URL of `key`. The key is not percent-encoded.
    pub fn public_url(&self, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}/{}", endpoint, self.bucket, key),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}
