use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::modules::storage::FileStorage;

/// Files written under a local directory and served by the app at `/uploads`
pub struct LocalStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalStorage {
    pub async fn new(root: &Path, public_base_url: &str) -> Result<Self> {
        tokio::fs::create_dir_all(root).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory '{}': {}",
                root.display(),
                e
            ))
        })?;

        info!("Local file storage at {}", root.display());

        Ok(Self {
            root: root.to_path_buf(),
            base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AppError::BadRequest(format!("Invalid file key '{}'", key)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStorage for LocalStorage {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to create '{}': {}", key, e)))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write file '{}': {}", key, e)))?;

        debug!("Stored file '{}' at {}", key, path.display());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted file '{}'", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to delete file '{}': {}",
                key, e
            ))),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/uploads/{}", self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn storage() -> LocalStorage {
        let root = std::env::temp_dir().join(format!("uploads-{}", Uuid::new_v4()));
        LocalStorage::new(&root, "http://localhost:3000/").await.unwrap()
    }

    #[tokio::test]
    async fn test_put_then_delete() {
        let storage = storage().await;

        storage
            .put("complaint_image/u1/a.png", b"png".to_vec(), "image/png")
            .await
            .unwrap();
        let path = storage.root.join("complaint_image/u1/a.png");
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"png");

        storage.delete("complaint_image/u1/a.png").await.unwrap();
        assert!(!path.exists());

        // Deleting twice is fine
        storage.delete("complaint_image/u1/a.png").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_keys_escaping_the_root() {
        let storage = storage().await;

        let result = storage.put("../escape.txt", vec![], "text/plain").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        let result = storage.delete("/etc/passwd").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_public_url() {
        let storage = storage().await;
        assert_eq!(
            storage.public_url("proof_document/u1/b.pdf"),
            "http://localhost:3000/uploads/proof_document/u1/b.pdf"
        );
    }
}
