use crate::{
    domain::ObjectStore,
    errors::StorageError,
};
use anyhow::Context;
use async_trait::async_trait;
use aws_sdk_s3::{
    primitives::ByteStream,
    Client as S3Client,
};
use tracing;

/// S3-backed object store. The client is built once per process and reused
/// across invocations.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    /// Downloads an object with GetObject and collects the body into one buffer.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        tracing::debug!(s3_key = %key, %bucket, "S3: Downloading object");

        let output = self.client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|sdk_err| {
                if sdk_err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    tracing::warn!(s3_key = %key, %bucket, "S3: NoSuchKey error downloading object");
                    return StorageError::NotFound { bucket: bucket.to_string(), key: key.to_string() };
                }
                tracing::error!(s3_key = %key, %bucket, error = %sdk_err, "S3: Error downloading object");
                StorageError::BackendError(anyhow::Error::new(sdk_err).context(format!("S3: Failed to download object '{}/{}'", bucket, key)))
            })?;

        // The body is a stream; the codec needs the whole image at once
        let data = output.body
            .collect()
            .await
            .context(format!("S3: Failed to read body of object '{}/{}'", bucket, key))?;

        let bytes = data.into_bytes().to_vec();
        tracing::debug!(s3_key = %key, %bucket, size = bytes.len(), "S3: Download successful");
        Ok(bytes)
    }

    /// Uploads data with PutObject. Sets Content-Type.
    async fn put(&self, bucket: &str, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        tracing::debug!(s3_key = %key, %bucket, %content_type, size = data.len(), "S3: Uploading object");

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .context(format!("S3: Failed to upload object '{}/{}'", bucket, key))
            .map_err(|e| StorageError::UploadFailed(format!("{:#}", e)))?;

        tracing::debug!(s3_key = %key, %bucket, "S3: Upload successful");
        Ok(())
    }
}
