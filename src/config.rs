use std::{env, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid environment variable format for {0}: {1}")]
    InvalidVar(String, String),
}

/// How the Content-Type of a written thumbnail is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ContentTypePolicy {
    /// Always the literal `"image"`, which is not a real MIME type.
    /// Kept as the default because existing consumers of the bucket see this value.
    #[default]
    Legacy,
    /// MIME type of the encoded thumbnail, e.g. `image/jpeg`.
    Detected,
}

impl FromStr for ContentTypePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(ContentTypePolicy::Legacy),
            "detected" => Ok(ContentTypePolicy::Detected),
            other => Err(format!("expected 'legacy' or 'detected', got '{}'", other)),
        }
    }
}

#[derive(Clone, Debug)] // Clone needed if passed around, Debug for logging
pub struct Config {
    // None lets the SDK default chain resolve the region (Lambda sets AWS_REGION)
    pub aws_region: Option<String>,
    // Optional endpoint for LocalStack / MinIO
    pub endpoint_url: Option<String>,
    pub content_type_policy: ContentTypePolicy,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignores errors, relies on env vars otherwise)
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let aws_region = lookup("AWS_REGION").or_else(|| lookup("AWS_DEFAULT_REGION"));

        let endpoint_url = lookup("AWS_ENDPOINT_URL").filter(|url| !url.is_empty());

        let content_type_policy = match lookup("THUMBNAIL_CONTENT_TYPE") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidVar("THUMBNAIL_CONTENT_TYPE".into(), e))?,
            None => ContentTypePolicy::default(),
        };

        Ok(Config {
            aws_region,
            endpoint_url,
            content_type_policy,
        })
    }
}
