use crate::{errors::ThumbnailError, models::SourceRef};
use aws_lambda_events::event::s3::S3Event;
use percent_encoding::percent_decode_str;

/// Path segment marking uploaded originals.
pub const SOURCE_SEGMENT: &str = "original-images";
/// Path segment thumbnails are written under.
pub const DESTINATION_SEGMENT: &str = "resized-images";

/// Resolves the object named by the first record of the notification.
///
/// Only the first record is consumed; S3 delivers one record per put, but
/// this is not guaranteed by the payload format.
pub fn source_ref(event: &S3Event) -> Result<SourceRef, ThumbnailError> {
    let record = event.records.first().ok_or(ThumbnailError::EmptyNotification)?;

    let bucket = record
        .s3
        .bucket
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or(ThumbnailError::MissingBucket)?;
    let raw_key = record
        .s3
        .object
        .key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(ThumbnailError::MissingKey)?;

    if event.records.len() > 1 {
        tracing::warn!(records = event.records.len(), "Notification has several records, only the first is processed");
    }

    Ok(SourceRef {
        bucket,
        key: decode_object_key(raw_key)?,
    })
}

/// Decodes an event object key: `+` stands for a space, everything else is
/// percent-encoded UTF-8.
pub fn decode_object_key(raw: &str) -> Result<String, ThumbnailError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|source| ThumbnailError::KeyDecode {
            key: raw.to_string(),
            source,
        })
}

/// Key the thumbnail is written to: the first `original-images` segment
/// swapped for `resized-images`. `None` when the key has no such segment,
/// since writing anyway would overwrite the original.
pub fn destination_key(source_key: &str) -> Option<String> {
    source_key
        .contains(SOURCE_SEGMENT)
        .then(|| source_key.replacen(SOURCE_SEGMENT, DESTINATION_SEGMENT, 1))
}

/// Everything after the last `.` of the key, or `None` without a dot.
pub fn file_extension(key: &str) -> Option<&str> {
    key.rsplit_once('.').map(|(_, ext)| ext)
}
