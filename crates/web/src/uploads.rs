use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Case attachments on local disk, one file per generated key
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Write `bytes` under a fresh key, keeping the original extension
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> WebResult<String> {
        if bytes.len() > self.max_bytes {
            return Err(WebError::BadRequest(format!(
                "File exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        let key = match extension(filename) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        self.ensure_root().await?;
        fs::write(self.root.join(&key), bytes).await?;

        Ok(key)
    }

    pub async fn read(&self, key: &str) -> WebResult<Vec<u8>> {
        let path = self.path_for(key)?;
        match fs::read(path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(WebError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the stored bytes; a missing file is not an error
    pub async fn remove(&self, key: &str) -> WebResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, key: &str) -> WebResult<PathBuf> {
        if key.is_empty() || Path::new(key).components().count() != 1 || key.starts_with('.') {
            return Err(WebError::NotFound);
        }
        Ok(self.root.join(key))
    }
}

fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(max_bytes: usize) -> UploadStore {
        let root = std::env::temp_dir().join(format!("uploads-test-{}", Uuid::new_v4()));
        UploadStore::new(root, max_bytes)
    }

    #[test]
    fn test_extension_kept_only_when_plain() {
        assert_eq!(extension("report.PDF"), Some("pdf".to_string()));
        assert_eq!(extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extension("noext"), None);
        assert_eq!(extension("weird.p$f"), None);
    }

    #[tokio::test]
    async fn test_save_read_remove() {
        let store = temp_store(1024);

        let key = store.save("notes.txt", b"hello").await.unwrap();
        assert!(key.ends_with(".txt"));
        assert_eq!(store.read(&key).await.unwrap(), b"hello");

        store.remove(&key).await.unwrap();
        assert!(matches!(store.read(&key).await, Err(WebError::NotFound)));
        store.remove(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected() {
        let store = temp_store(4);
        let result = store.save("big.bin", b"12345").await;
        assert!(matches!(result, Err(WebError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_keys_cannot_escape_root() {
        let store = temp_store(16);
        assert!(matches!(store.read("../etc/passwd").await, Err(WebError::NotFound)));
        assert!(matches!(store.read("").await, Err(WebError::NotFound)));
    }
}
