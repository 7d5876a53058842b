//! Implements TokenStore using a JSON file.
//!
//! Holds the `agentToken`/`employeeToken`/`userRole` keys between runs so a
//! vendor registration can resume without logging in again.

use crate::domain::DomainError;
use crate::ports::TokenStore;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// JSON file-based token storage. Writes go through a temp file and an
/// atomic rename so a crash mid-write cannot truncate stored credentials.
pub struct TokenJson {
    path: std::path::PathBuf,
    cache: tokio::sync::RwLock<HashMap<String, String>>,
}

impl TokenJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(HashMap::new()),
        }
    }

    /// Load stored keys from disk. Call once after construction; a missing or
    /// unreadable file starts empty.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
            Err(_) => HashMap::new(),
        };
        *self.cache.write().await = data;
        Ok(())
    }

    async fn save(&self) -> Result<(), DomainError> {
        let data = self.cache.read().await;
        let json = serde_json::to_string_pretty(&*data)
            .map_err(|e| DomainError::TokenStore(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::TokenStore(format!("create store dir: {e}")))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::TokenStore(format!("create temp file: {e}")))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::TokenStore(format!("write temp file: {e}")))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::TokenStore(format!("sync temp file: {e}")))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::TokenStore(format!("atomic rename failed: {e}")))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl TokenStore for TokenJson {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let cache = self.cache.read().await;
        Ok(cache.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        {
            let mut cache = self.cache.write().await;
            cache.insert(key.to_string(), value.to_string());
        }
        self.save().await
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let removed = {
            let mut cache = self.cache.write().await;
            cache.remove(key).is_some()
        };
        if removed {
            self.save().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "vendor-onboard-tokens-{tag}-{}.json",
            std::process::id()
        ))
    }

    #[tokio::test]
    async fn set_get_delete_roundtrip() {
        let path = temp_store_path("roundtrip");
        let store = TokenJson::new(&path);
        store.load().await.unwrap();

        store.set("agentToken", "tok-1").await.unwrap();
        assert_eq!(store.get("agentToken").await.unwrap().as_deref(), Some("tok-1"));

        store.delete("agentToken").await.unwrap();
        assert_eq!(store.get("agentToken").await.unwrap(), None);

        // Deleting an absent key is fine.
        store.delete("employeeToken").await.unwrap();

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn values_survive_a_reload() {
        let path = temp_store_path("reload");
        let store = TokenJson::new(&path);
        store.load().await.unwrap();
        store.set("userRole", "agent").await.unwrap();

        let reopened = TokenJson::new(&path);
        reopened.load().await.unwrap();
        assert_eq!(
            reopened.get("userRole").await.unwrap().as_deref(),
            Some("agent")
        );

        let _ = tokio::fs::remove_file(&path).await;
    }
}
