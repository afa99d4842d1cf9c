mod config;
mod cv;
mod errors;
mod layout;
mod models;
mod render;
mod routes;
mod scoring;
mod state;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ExportBackend, S3Settings};
use crate::layout::default_layout_config;
use crate::render::export::{ExportStore, LocalExportStore, S3ExportStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobSpark API v{}", env!("CARGO_PKG_VERSION"));

    let exporter = build_export_store(&config).await?;

    // A4 with 40pt margins, Helvetica
    let layout = default_layout_config();
    layout.validate()?;
    info!(
        "Layout: {}x{}pt, margin {}pt, body {}pt",
        layout.geometry.width_pt, layout.geometry.height_pt, layout.geometry.margin_pt, layout.body_size_pt
    );

    let state = AppState {
        config: config.clone(),
        exporter,
        layout,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_export_store(config: &Config) -> Result<Arc<dyn ExportStore>> {
    match config.export_backend {
        ExportBackend::Local => {
            info!("Export backend: local directory {}", config.export_dir.display());
            Ok(Arc::new(LocalExportStore::new(config.export_dir.clone())))
        }
        ExportBackend::S3 => {
            let settings = config
                .s3
                .as_ref()
                .context("S3 export backend selected but S3 settings are missing")?;
            let client = build_s3_client(settings).await;
            info!("Export backend: s3://{}", settings.bucket);
            Ok(Arc::new(S3ExportStore::new(client, settings.bucket.clone())))
        }
    }
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(settings: &S3Settings) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &settings.access_key_id,
        &settings.secret_access_key,
        None,
        None,
        "jobspark-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&settings.endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
