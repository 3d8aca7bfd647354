use thiserror::Error; // Use thiserror for cleaner error definitions

// --- Infrastructure Errors ---

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Object upload failed: {0}")]
    UploadFailed(String), // Pass specific reason

    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Storage backend error: {0}")]
    BackendError(#[from] anyhow::Error), // Wrap Anyhow errors from Storage layer
}

// --- Invocation Errors ---

#[derive(Error, Debug)]
pub enum ThumbnailError {
    // Preconditions on the notification itself
    #[error("Notification contains no records")]
    EmptyNotification,
    #[error("Record is missing the bucket name")]
    MissingBucket,
    #[error("Record is missing the object key")]
    MissingKey,
    #[error("Object key '{key}' is not valid UTF-8 once decoded")]
    KeyDecode {
        key: String,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("Object key '{0}' has no 'original-images' segment; refusing to overwrite the source")]
    UnexpectedKeyLayout(String),

    // Pipeline failures
    #[error("Could not fetch source object")]
    Fetch(#[source] StorageError),
    #[error("Could not decode source image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Could not encode thumbnail: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Image codec task failed: {0}")]
    Codec(String),
    #[error("Could not write thumbnail")]
    Write(#[source] StorageError),
}

impl ThumbnailError {
    /// True for errors caused by a malformed or unexpected notification.
    ///
    /// These are reported back to the runtime as a failed invocation; every
    /// other variant is logged and swallowed.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ThumbnailError::EmptyNotification
                | ThumbnailError::MissingBucket
                | ThumbnailError::MissingKey
                | ThumbnailError::KeyDecode { .. }
                | ThumbnailError::UnexpectedKeyLayout(_)
        )
    }
}

// --- Startup Errors ---

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String), // Keep simple string for now
    #[error("Initialization error: {0}")]
    InitError(String),
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_split() {
        assert!(ThumbnailError::EmptyNotification.is_precondition());
        assert!(ThumbnailError::MissingKey.is_precondition());
        assert!(ThumbnailError::UnexpectedKeyLayout("a.jpg".into()).is_precondition());

        let fetch = ThumbnailError::Fetch(StorageError::NotFound {
            bucket: "b".into(),
            key: "k".into(),
        });
        assert!(!fetch.is_precondition());
        assert!(!ThumbnailError::Codec("panicked".into()).is_precondition());
    }

    #[test]
    fn config_error_maps_to_app_error() {
        let err: AppError =
            crate::config::ConfigError::InvalidVar("THUMBNAIL_CONTENT_TYPE".into(), "bogus".into())
                .into();
        assert!(matches!(err, AppError::ConfigError(msg) if msg.contains("THUMBNAIL_CONTENT_TYPE")));
    }
}
