/// Bucket and decoded key of the object named by a notification record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub bucket: String,
    pub key: String,
}

/// Source image types accepted by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpg,
    Png,
}

impl ImageKind {
    /// Matches an extension case-insensitively against the allow-list.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" => Some(ImageKind::Jpg),
            "png" => Some(ImageKind::Png),
            _ => None,
        }
    }
}

/// Encoded thumbnail ready to be written.
#[derive(Debug)]
pub struct Thumbnail {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: image::ImageFormat,
}
