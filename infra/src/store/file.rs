//! JSON file token store
//!
//! Tokens are kept in a single JSON object mapping email to token. Writes
//! go to a sibling temp file which is then renamed over the target, so a
//! crash never leaves a truncated file behind. On unix the file is only
//! readable by its owner.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fint_core::services::SessionStoreTrait;
use fint_shared::utils::email::{mask_email, normalize_email};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::InfrastructureError;

type TokenMap = BTreeMap<String, String>;

/// Token store persisted to a JSON file
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<TokenMap, InfrastructureError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(TokenMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(TokenMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Token saved for an account, if any
    pub async fn load_token(&self, email: &str) -> Result<Option<String>, InfrastructureError> {
        let _guard = self.lock.lock().await;
        let map = self.read_map().await?;
        Ok(map.get(&normalize_email(email)).cloned())
    }

    async fn write_map(&self, map: &TokenMap) -> Result<(), InfrastructureError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        // A leftover temp file would keep its old permissions
        match fs::remove_file(&tmp).await {
            Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&tmp).await?;
        file.write_all(&serde_json::to_vec_pretty(map)?).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStoreTrait for FileSessionStore {
    async fn save_token(&self, email: &str, token: &str) -> Result<(), String> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await.map_err(|e| e.to_string())?;
        map.insert(normalize_email(email), token.to_string());
        self.write_map(&map).await.map_err(|e| e.to_string())?;

        debug!(
            email = %mask_email(email),
            path = %self.path.display(),
            "Auth token saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("fint-store-{}", uuid::Uuid::new_v4()))
            .join("tokens.json")
    }

    #[tokio::test]
    async fn test_missing_file_loads_nothing() {
        let store = FileSessionStore::new(temp_path());
        assert_eq!(store.load_token("user@example.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_tokens_survive_new_instance() {
        let path = temp_path();
        let store = FileSessionStore::new(&path);
        store.save_token("a@example.com", "tok-a").await.unwrap();
        store.save_token("b@example.com", "tok-b").await.unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(
            reopened.load_token("a@example.com").await.unwrap(),
            Some("tok-a".to_string())
        );
        assert_eq!(
            reopened.load_token("b@example.com").await.unwrap(),
            Some("tok-b".to_string())
        );

        reopened.save_token("a@example.com", "tok-a2").await.unwrap();
        assert_eq!(
            store.load_token("a@example.com").await.unwrap(),
            Some("tok-a2".to_string())
        );
        assert_eq!(
            store.load_token("b@example.com").await.unwrap(),
            Some("tok-b".to_string())
        );

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_path();
        let store = FileSessionStore::new(&path);
        store.save_token("user@example.com", "tok").await.unwrap();
        store.save_token("user@example.com", "tok-2").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!path.with_extension("json.tmp").exists());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.load_token("user@example.com").await.is_err());
        assert!(store.save_token("user@example.com", "tok").await.is_err());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
