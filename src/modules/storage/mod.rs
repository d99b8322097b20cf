//! Storage module for uploaded files
//!
//! Complaint images and proof documents are written through [`FileStorage`],
//! backed either by a local directory (served under `/uploads`) or by a
//! MinIO/S3-compatible bucket.

mod local;
mod minio_client;

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::config::{StorageBackend, StorageConfig};
use crate::core::error::Result;

pub use local::LocalStorage;
pub use minio_client::MinIOClient;

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `data` under `key`, replacing any existing object
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()>;
    /// Remove the object; a missing object is not an error
    async fn delete(&self, key: &str) -> Result<()>;
    /// Link handed back to clients for the stored object
    fn public_url(&self, key: &str) -> String;
}

/// Build the backend selected by `STORAGE_BACKEND`
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn FileStorage>> {
    match config.backend {
        StorageBackend::Local => Ok(Arc::new(
            LocalStorage::new(&config.local_dir, &config.public_base_url).await?,
        )),
        StorageBackend::MinIO => Ok(Arc::new(MinIOClient::new(config.minio.clone()).await?)),
    }
}
