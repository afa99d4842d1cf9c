//! Export storage: pluggable, trait-based sink for rendered PDFs.
//!
//! `LocalExportStore` writes into a directory, `S3ExportStore` uploads to a bucket.
//! `AppState` holds an `Arc<dyn ExportStore>`, chosen at startup via `EXPORT_BACKEND`.

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;
use uuid::Uuid;

use crate::render::RenderError;

/// Where a stored export ended up.
#[derive(Debug, Clone, Serialize)]
pub struct StoredExport {
    pub location: String,
    pub size_bytes: usize,
}

#[async_trait]
pub trait ExportStore: Send + Sync {
    async fn store(&self, file_name: &str, bytes: Bytes) -> Result<StoredExport, RenderError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LocalExportStore
// ────────────────────────────────────────────────────────────────────────────

/// Writes exports into a directory. The file is written to a temporary file
/// in the same directory and renamed into place, so readers never observe a
/// partially written PDF.
pub struct LocalExportStore {
    dir: PathBuf,
}

impl LocalExportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ExportStore for LocalExportStore {
    async fn store(&self, file_name: &str, bytes: Bytes) -> Result<StoredExport, RenderError> {
        let dir = self.dir.clone();
        let target = dir.join(file_name);
        let size_bytes = bytes.len();

        let written = tokio::task::spawn_blocking(move || -> Result<PathBuf, RenderError> {
            let storage = |e: std::io::Error| RenderError::Storage(e.to_string());
            std::fs::create_dir_all(&dir).map_err(storage)?;
            let mut tmp = NamedTempFile::new_in(&dir).map_err(storage)?;
            tmp.write_all(&bytes).map_err(storage)?;
            tmp.as_file().sync_all().map_err(storage)?;
            tmp.persist(&target)
                .map_err(|e| RenderError::Storage(e.error.to_string()))?;
            Ok(target)
        })
        .await
        .map_err(|e| RenderError::Storage(format!("spawn_blocking failed in export: {e}")))??;

        info!("Wrote CV export to {}", written.display());
        Ok(StoredExport {
            location: written.display().to_string(),
            size_bytes,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// S3ExportStore
// ────────────────────────────────────────────────────────────────────────────

/// Uploads exports to `s3://<bucket>/exports/<uuid>/<file_name>`.
pub struct S3ExportStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ExportStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ExportStore for S3ExportStore {
    async fn store(&self, file_name: &str, bytes: Bytes) -> Result<StoredExport, RenderError> {
        let key = format!("exports/{}/{}", Uuid::new_v4(), file_name);
        let size_bytes = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type("application/pdf")
            .send()
            .await
            .map_err(|e| RenderError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded CV export to s3://{}/{}", self.bucket, key);
        Ok(StoredExport {
            location: format!("s3://{}/{}", self.bucket, key),
            size_bytes,
        })
    }
}
