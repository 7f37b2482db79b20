//! S3-backed offload store with presigned GET URLs.

use std::time::SystemTime;

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

use crate::blob::{new_object_key, BlobError, BlobStore, StoredBlob, CONTENT_ENCODING_GZIP, SIGNED_URL_TTL};

/// Uploads offloaded responses into a single bucket.
///
/// The SDK client is cheap to clone and safe to share between invocations.
#[derive(Clone, Debug)]
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the default credential and region chain.
    pub async fn from_env(bucket: impl Into<String>, region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self::new(aws_sdk_s3::Client::new(&config), bucket)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Presigned GET for `key`, valid for [`SIGNED_URL_TTL`].
    pub async fn presign_get(&self, key: &str) -> Result<String, BlobError> {
        let presigning = PresigningConfig::expires_in(SIGNED_URL_TTL)
            .map_err(|e| BlobError::Sign(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| BlobError::Sign(DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, content: Bytes, content_type: &str) -> Result<StoredBlob, BlobError> {
        let key = new_object_key();
        let length = content.len() as i64;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(content))
            .content_length(length)
            .content_type(content_type)
            .content_encoding(CONTENT_ENCODING_GZIP)
            .send()
            .await
            .map_err(|e| BlobError::Upload(DisplayErrorContext(&e).to_string()))?;

        let issued_at = SystemTime::now();
        let url = self.presign_get(&key).await?;

        tracing::debug!(bucket = %self.bucket, key = %key, bytes = length, "Offloaded response to S3");

        Ok(StoredBlob {
            key,
            url,
            expires_at: issued_at + SIGNED_URL_TTL,
        })
    }
}
