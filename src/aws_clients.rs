use crate::config::Config;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::Client as S3Client;
use tracing;

// Creates the base AWS SDK configuration based on application config.
// Region and endpoint fall back to the default provider chain when unset.
// Uses the default credential provider chain (the Lambda execution role in production).
pub async fn create_sdk_config(config: &Config) -> SdkConfig {
    let mut config_loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.aws_region {
        tracing::info!(sdk_region = %region, "Setting SDK region");
        config_loader = config_loader.region(Region::new(region.clone()));
    }

    if let Some(endpoint_url) = &config.endpoint_url {
        tracing::info!("Using endpoint override: {}", endpoint_url);
        config_loader = config_loader.endpoint_url(endpoint_url);
    } else {
        tracing::info!("Using default AWS endpoints and credential resolution.");
    }

    config_loader.load().await
}

// Creates an S3 client from a shared SdkConfig.
// Path-style addressing is only needed for endpoint overrides (LocalStack, MinIO).
pub fn create_s3_client(sdk_config: &SdkConfig, config: &Config) -> S3Client {
    let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
        .force_path_style(config.endpoint_url.is_some())
        .build();
    S3Client::from_conf(s3_config)
}
