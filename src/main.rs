use lambda_runtime::{run, service_fn, Error};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod aws_clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod models;
mod notification;
mod storage;
mod thumbnail;

#[cfg(test)]
mod test_support;

use crate::aws_clients::{create_s3_client, create_sdk_config};
use crate::config::Config;
use crate::errors::AppError;
use crate::handlers::{function_handler, ThumbnailGenerator};
use crate::storage::S3ObjectStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing (logging). CloudWatch adds its own timestamps and does not render ANSI.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "s3_thumbnail_lambda=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).without_time())
        .init();

    // --- Configuration ---
    let config = Config::load().map_err(AppError::from)?;
    tracing::info!(content_type_policy = ?config.content_type_policy, "Configuration loaded");

    // --- AWS Client Initialization (once per execution environment) ---
    let sdk_config = create_sdk_config(&config).await;
    if sdk_config.region().is_none() {
        return Err(AppError::InitError("No AWS region configured; set AWS_REGION".into()).into());
    }
    let s3_client = create_s3_client(&sdk_config, &config);

    let generator = ThumbnailGenerator::new(
        Arc::new(S3ObjectStore::new(s3_client)),
        config.content_type_policy,
    );

    tracing::info!("Thumbnail generator ready, waiting for events");
    run(service_fn(|event| function_handler(event, &generator))).await
}
