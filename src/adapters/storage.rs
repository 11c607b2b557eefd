use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// File-backed key-value store: one `<key>.json` file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Characters outside `[A-Za-z0-9._-]` are replaced with `_`.
    pub fn file_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", sanitize_key(key)))
    }

    /// Sibling file a write goes to before it is renamed over `file_path`.
    pub fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(
            ".{}.{}.tmp",
            sanitize_key(key),
            std::process::id()
        ))
    }
}

fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl Storage for LocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.file_path(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the file atomically: the payload is synced to a temp file
    /// which is then renamed over the previous one.
    async fn set_item(&self, key: &str, data: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;

        let full_path = self.file_path(key);
        let tmp_path = self.temp_path(key);

        let write_result = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(data).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp_path, &full_path).await
        }
        .await;

        if let Err(e) = write_result {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-process store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let items = self.items.lock().await;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, data: &[u8]) -> Result<()> {
        let mut items = self.items.lock().await;
        items.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_storage_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert!(storage.get_item("@RocketShoes:cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_local_storage_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested"));

        storage
            .set_item("@RocketShoes:cart", br#"[{"id":1,"amount":2}]"#)
            .await
            .unwrap();

        let path = storage.file_path("@RocketShoes:cart");
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "_RocketShoes_cart.json"
        );
        assert!(path.exists());

        let data = storage.get_item("@RocketShoes:cart").await.unwrap();
        assert_eq!(data.as_deref(), Some(&br#"[{"id":1,"amount":2}]"#[..]));
    }

    #[tokio::test]
    async fn test_local_storage_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.set_item("cart", b"[1]").await.unwrap();
        storage.set_item("cart", b"[]").await.unwrap();

        let data = storage.get_item("cart").await.unwrap().unwrap();
        assert_eq!(data, b"[]");
    }

    #[tokio::test]
    async fn test_local_storage_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.set_item("cart", b"[]").await.unwrap();

        assert!(storage.file_path("cart").exists());
        assert!(!storage.temp_path("cart").exists());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_payload() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        storage
            .set_item("cart", br#"[{"id":1,"amount":2}]"#)
            .await
            .unwrap();

        // a directory in the temp file's place makes the next write fail
        std::fs::create_dir(storage.temp_path("cart")).unwrap();
        let result = storage.set_item("cart", b"[]").await;

        assert!(result.is_err());
        let data = storage.get_item("cart").await.unwrap().unwrap();
        assert_eq!(data, br#"[{"id":1,"amount":2}]"#);
    }

    #[tokio::test]
    async fn test_local_storage_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        std::fs::create_dir(storage.file_path("cart")).unwrap();

        assert!(storage.get_item("cart").await.is_err());
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set_item("cart", b"[]").await.unwrap();

        assert_eq!(other.get_item("cart").await.unwrap().unwrap(), b"[]");
        assert_eq!(other.len().await, 1);
        assert!(other.get_item("missing").await.unwrap().is_none());
    }
}
