use crate::{
    config::ContentTypePolicy,
    domain::ObjectStore,
    errors::ThumbnailError,
    models::{ImageKind, SourceRef},
    notification, thumbnail,
};
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::LambdaEvent;
use std::sync::Arc;
use tracing;

/// Content-Type written under [`ContentTypePolicy::Legacy`]. Not a valid MIME type.
pub const LEGACY_CONTENT_TYPE: &str = "image";

/// Why an object was left alone without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoExtension,
    UnsupportedType(String),
}

/// Result of one invocation that did not fail.
#[derive(Debug)]
pub enum Outcome {
    Skipped { source: SourceRef, reason: SkipReason },
    Written {
        source: SourceRef,
        destination_key: String,
        width: u32,
        height: u32,
    },
}

/// Turns one storage notification into at most one thumbnail write.
///
/// Holds no per-invocation state; one instance serves every invocation of
/// the process.
pub struct ThumbnailGenerator {
    store: Arc<dyn ObjectStore>,
    content_type_policy: ContentTypePolicy,
}

impl ThumbnailGenerator {
    pub fn new(store: Arc<dyn ObjectStore>, content_type_policy: ContentTypePolicy) -> Self {
        Self { store, content_type_policy }
    }

    /// Runs the pipeline and reports the outcome.
    ///
    /// Precondition errors (see [`ThumbnailError::is_precondition`]) are
    /// returned so the invocation is marked failed. Fetch, codec and write
    /// failures are logged and the invocation ends normally; nothing is
    /// retried here.
    pub async fn handle(&self, event: &S3Event) -> Result<(), ThumbnailError> {
        match self.process(event).await {
            Ok(Outcome::Skipped { source, reason }) => {
                match reason {
                    SkipReason::NoExtension => tracing::info!(
                        bucket = %source.bucket, key = %source.key,
                        "Could not determine the image type."
                    ),
                    SkipReason::UnsupportedType(ext) => tracing::info!(
                        bucket = %source.bucket, key = %source.key,
                        "Unsupported image type: {}", ext
                    ),
                }
                Ok(())
            }
            Ok(Outcome::Written { source, destination_key, width, height }) => {
                tracing::info!(
                    width, height,
                    "Successfully resized {}/{} and uploaded to {}/{}",
                    source.bucket, source.key, source.bucket, destination_key
                );
                Ok(())
            }
            Err(e) if e.is_precondition() => {
                tracing::error!(error = %e, "Rejecting notification");
                Err(e)
            }
            Err(e) => {
                tracing::error!(error = %e, error.source = ?std::error::Error::source(&e), "Thumbnail generation failed");
                Ok(())
            }
        }
    }

    /// The pipeline itself: every early return happens before the single write.
    pub async fn process(&self, event: &S3Event) -> Result<Outcome, ThumbnailError> {
        let source = notification::source_ref(event)?;

        // Infer the image type from the file suffix
        let Some(ext) = notification::file_extension(&source.key) else {
            return Ok(Outcome::Skipped { source, reason: SkipReason::NoExtension });
        };
        if ImageKind::from_extension(ext).is_none() {
            let reason = SkipReason::UnsupportedType(ext.to_lowercase());
            return Ok(Outcome::Skipped { source, reason });
        }

        let destination_key = notification::destination_key(&source.key)
            .ok_or_else(|| ThumbnailError::UnexpectedKeyLayout(source.key.clone()))?;

        let original = self
            .store
            .get(&source.bucket, &source.key)
            .await
            .map_err(ThumbnailError::Fetch)?;
        tracing::debug!(bucket = %source.bucket, key = %source.key, size = original.len(), "Fetched source image");

        let thumb = thumbnail::make_thumbnail_async(original).await?;

        let content_type = match self.content_type_policy {
            ContentTypePolicy::Legacy => LEGACY_CONTENT_TYPE,
            ContentTypePolicy::Detected => thumb.format.to_mime_type(),
        };

        self.store
            .put(&source.bucket, &destination_key, thumb.data, content_type)
            .await
            .map_err(ThumbnailError::Write)?;

        Ok(Outcome::Written {
            source,
            destination_key,
            width: thumb.width,
            height: thumb.height,
        })
    }
}

/// Lambda entry point for one S3 notification.
pub(crate) async fn function_handler(
    event: LambdaEvent<S3Event>,
    generator: &ThumbnailGenerator,
) -> Result<(), lambda_runtime::Error> {
    tracing::info!(
        request_id = %event.context.request_id,
        "Reading options from event: {}",
        serde_json::to_string(&event.payload).unwrap_or_else(|e| format!("<unserializable: {}>", e))
    );
    generator.handle(&event.payload).await?;
    Ok(())
}
