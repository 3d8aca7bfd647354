//! Image codec step: decode, scale to a fixed width, re-encode.
//!
//! The output container is pinned to the one sniffed from the source bytes,
//! so a PNG stays a PNG even when its key says otherwise.

use crate::{errors::ThumbnailError, models::Thumbnail};
use image::{imageops::FilterType, GenericImageView, Limits};
use std::io::Cursor;
use tracing::debug;

/// Width of every thumbnail, in pixels. Height follows the aspect ratio.
pub const THUMBNAIL_WIDTH: u32 = 200;

/// Height that keeps the aspect ratio at [`THUMBNAIL_WIDTH`], never below 1.
///
/// Wide enough to hold any ratio; callers check it against [`Limits`].
pub fn target_height(width: u32, height: u32) -> u64 {
    let scaled = (f64::from(height) * f64::from(THUMBNAIL_WIDTH) / f64::from(width)).round();
    (scaled as u64).max(1)
}

/// Charges the resize buffers against the codec's default allocation cap.
///
/// The resampler keeps an `Rgba<f32>` intermediate of `orig_w x new_h`
/// next to the output of `THUMBNAIL_WIDTH x new_h`.
fn reserve_resize(orig_w: u32, new_h: u64, bytes_per_pixel: u8) -> Result<u32, ThumbnailError> {
    let mut limits = Limits::default();
    let output = u64::from(THUMBNAIL_WIDTH)
        .saturating_mul(new_h)
        .saturating_mul(u64::from(bytes_per_pixel));
    let intermediate = u64::from(orig_w).saturating_mul(new_h).saturating_mul(16);
    limits.reserve(output).map_err(ThumbnailError::Decode)?;
    limits.reserve(intermediate).map_err(ThumbnailError::Decode)?;
    u32::try_from(new_h).map_err(|_| {
        ThumbnailError::Decode(image::ImageError::Limits(image::error::LimitError::from_kind(
            image::error::LimitErrorKind::DimensionError,
        )))
    })
}

/// Generate a thumbnail from the given image data (blocking version)
///
/// **Note:** CPU-bound. From async code use [`make_thumbnail_async`].
pub fn make_thumbnail(original_data: &[u8]) -> Result<Thumbnail, ThumbnailError> {
    let format = image::guess_format(original_data).map_err(ThumbnailError::Decode)?;
    let img = image::load_from_memory_with_format(original_data, format).map_err(ThumbnailError::Decode)?;

    let (orig_w, orig_h) = img.dimensions();
    let new_h = reserve_resize(orig_w, target_height(orig_w, orig_h), img.color().bytes_per_pixel())?;
    debug!(
        original_width = orig_w,
        original_height = orig_h,
        ?format,
        "Processing image for thumbnail"
    );

    // Narrower images are scaled up as well
    let resized = if orig_w == THUMBNAIL_WIDTH && orig_h == new_h {
        img
    } else {
        img.resize_exact(THUMBNAIL_WIDTH, new_h, FilterType::Lanczos3)
    };

    let mut buf = Cursor::new(Vec::new());
    resized.write_to(&mut buf, format).map_err(ThumbnailError::Encode)?;
    let data = buf.into_inner();

    debug!(width = THUMBNAIL_WIDTH, height = new_h, size = data.len(), "Thumbnail generated");

    Ok(Thumbnail {
        data,
        width: THUMBNAIL_WIDTH,
        height: new_h,
        format,
    })
}

/// Runs [`make_thumbnail`] on the blocking thread pool.
pub async fn make_thumbnail_async(original_data: Vec<u8>) -> Result<Thumbnail, ThumbnailError> {
    tokio::task::spawn_blocking(move || make_thumbnail(&original_data))
        .await
        .map_err(|e| ThumbnailError::Codec(format!("Thumbnail task panicked: {e}")))?
}
