//! Session credentials and credential stores.
//!
//! Credentials are created on login, read by every outgoing request,
//! replaced in-place on token refresh, and cleared on logout or refresh
//! failure. At most one credential set is current at any time.
//!
//! Two store implementations cover the original cookie semantics:
//! [`MemoryCredentialStore`] lives and dies with the process (a session
//! cookie), while [`FileCredentialStore`] additionally writes "keep me
//! logged in" sessions to disk with an absolute expiry that is honored on
//! load.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

use crate::defaults::PERSISTENT_LOGIN_DAYS;
use crate::error::{Error, Result};

/// The credential set backing an authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionCredentials {
    pub username: String,
    pub fullname: String,
    /// Raw wire role string (`ROLE_*`); parse with [`crate::roles::Role`]
    /// when making route decisions.
    pub role: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// How long stored credentials outlive their creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Persistence {
    /// No explicit expiry; the credentials end with the browsing session
    /// (here: the process).
    Session,
    /// Absolute expiry this many days after each store or token refresh.
    Days(u32),
}

impl Persistence {
    /// Policy for a "keep me logged in" choice.
    pub fn for_keep_logged_in(keep: bool) -> Persistence {
        if keep {
            Persistence::Days(PERSISTENT_LOGIN_DAYS)
        } else {
            Persistence::Session
        }
    }

    fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Persistence::Session => None,
            Persistence::Days(days) => Some(now + Duration::days(i64::from(*days))),
        }
    }
}

/// Store for the process-wide session credentials.
///
/// Replacing tokens on refresh must preserve whatever persistence policy
/// was already in effect for the session.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Current credentials, or `None` when logged out or expired.
    async fn load(&self) -> Result<Option<SessionCredentials>>;

    /// Install a fresh credential set (login).
    async fn store(
        &self,
        credentials: SessionCredentials,
        persistence: Persistence,
    ) -> Result<()>;

    /// Swap in a new token pair, keeping the rest of the credentials and
    /// the persistence policy (renewing the expiry window for persistent
    /// sessions).
    async fn replace_tokens(&self, access_token: &str, refresh_token: &str) -> Result<()>;

    /// Delete all stored credentials (logout / fatal refresh failure).
    async fn clear(&self) -> Result<()>;

    /// Persistence policy of the current session, if any.
    async fn persistence(&self) -> Result<Option<Persistence>>;
}

#[derive(Debug, Clone)]
struct SessionEntry {
    credentials: SessionCredentials,
    persistence: Persistence,
    expires_at: Option<DateTime<Utc>>,
}

impl SessionEntry {
    fn new(credentials: SessionCredentials, persistence: Persistence) -> Self {
        Self {
            credentials,
            persistence,
            expires_at: persistence.expires_at(Utc::now()),
        }
    }

    fn expired(&self) -> bool {
        matches!(self.expires_at, Some(at) if at <= Utc::now())
    }
}

/// In-memory credential store; the process is the session.
#[derive(Default)]
pub struct MemoryCredentialStore {
    entry: Mutex<Option<SessionEntry>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<SessionCredentials>> {
        let mut entry = self.entry.lock().expect("credential store poisoned");
        if entry.as_ref().is_some_and(|e| e.expired()) {
            *entry = None;
        }
        Ok(entry.as_ref().map(|e| e.credentials.clone()))
    }

    async fn store(
        &self,
        credentials: SessionCredentials,
        persistence: Persistence,
    ) -> Result<()> {
        let mut entry = self.entry.lock().expect("credential store poisoned");
        *entry = Some(SessionEntry::new(credentials, persistence));
        Ok(())
    }

    async fn replace_tokens(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        let mut entry = self.entry.lock().expect("credential store poisoned");
        let Some(current) = entry.take() else {
            return Err(Error::Storage("no session to update".to_string()));
        };
        let mut credentials = current.credentials;
        credentials.access_token = access_token.to_string();
        credentials.refresh_token = refresh_token.to_string();
        *entry = Some(SessionEntry::new(credentials, current.persistence));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.entry.lock().expect("credential store poisoned") = None;
        Ok(())
    }

    async fn persistence(&self) -> Result<Option<Persistence>> {
        let entry = self.entry.lock().expect("credential store poisoned");
        Ok(entry.as_ref().map(|e| e.persistence))
    }
}

/// On-disk record for persistent ("keep me logged in") sessions.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSessionRecord {
    credentials: SessionCredentials,
    persistence: Persistence,
    expires_at: Option<DateTime<Utc>>,
}

/// Credential store that survives restarts for persistent sessions.
///
/// `Persistence::Session` credentials are held in memory only, exactly
/// like a session cookie. `Persistence::Days(n)` credentials are written
/// to `path` as JSON; expired records read back as logged out.
pub struct FileCredentialStore {
    path: PathBuf,
    memory: MemoryCredentialStore,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            memory: MemoryCredentialStore::new(),
        }
    }

    async fn read_record(&self) -> Result<Option<StoredSessionRecord>> {
        match tokio::fs::read(&self.path).await {
            Ok(raw) => {
                let record: StoredSessionRecord = serde_json::from_slice(&raw)?;
                Ok(Some(record))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_record(&self, record: &StoredSessionRecord) -> Result<()> {
        let raw = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }

    async fn remove_record(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<SessionCredentials>> {
        if let Some(credentials) = self.memory.load().await? {
            return Ok(Some(credentials));
        }
        let Some(record) = self.read_record().await? else {
            return Ok(None);
        };
        if matches!(record.expires_at, Some(at) if at <= Utc::now()) {
            debug!("stored session expired, clearing");
            self.remove_record().await?;
            return Ok(None);
        }
        Ok(Some(record.credentials))
    }

    async fn store(
        &self,
        credentials: SessionCredentials,
        persistence: Persistence,
    ) -> Result<()> {
        self.memory.store(credentials.clone(), persistence).await?;
        match persistence {
            Persistence::Session => self.remove_record().await,
            Persistence::Days(_) => {
                self.write_record(&StoredSessionRecord {
                    expires_at: persistence.expires_at(Utc::now()),
                    credentials,
                    persistence,
                })
                .await
            }
        }
    }

    async fn replace_tokens(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        // Restarted persistent session: rehydrate memory from disk first.
        if self.memory.load().await?.is_none() {
            if let Some(record) = self.read_record().await? {
                self.memory
                    .store(record.credentials, record.persistence)
                    .await?;
            }
        }
        self.memory.replace_tokens(access_token, refresh_token).await?;
        if let Some(Persistence::Days(days)) = self.memory.persistence().await? {
            if let Some(credentials) = self.memory.load().await? {
                let persistence = Persistence::Days(days);
                self.write_record(&StoredSessionRecord {
                    expires_at: persistence.expires_at(Utc::now()),
                    credentials,
                    persistence,
                })
                .await?;
            }
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.memory.clear().await?;
        self.remove_record().await
    }

    async fn persistence(&self) -> Result<Option<Persistence>> {
        if let Some(p) = self.memory.persistence().await? {
            return Ok(Some(p));
        }
        Ok(self.read_record().await?.map(|r| r.persistence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> SessionCredentials {
        SessionCredentials {
            username: "aturing".to_string(),
            fullname: "Alan Turing".to_string(),
            role: "ROLE_ADMIN".to_string(),
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().await.unwrap().is_none());

        store
            .store(credentials(), Persistence::Session)
            .await
            .unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.access_token, "access-1");

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_keep_logged_in_maps_to_seven_days() {
        assert_eq!(Persistence::for_keep_logged_in(true), Persistence::Days(7));
        assert_eq!(Persistence::for_keep_logged_in(false), Persistence::Session);
    }

    #[tokio::test]
    async fn test_replace_tokens_preserves_policy() {
        let store = MemoryCredentialStore::new();
        store
            .store(credentials(), Persistence::Days(7))
            .await
            .unwrap();

        store.replace_tokens("access-2", "refresh-2").await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.access_token, "access-2");
        assert_eq!(loaded.refresh_token, "refresh-2");
        assert_eq!(loaded.username, "aturing");
        assert_eq!(
            store.persistence().await.unwrap(),
            Some(Persistence::Days(7))
        );
    }

    #[tokio::test]
    async fn test_replace_tokens_without_session_fails() {
        let store = MemoryCredentialStore::new();
        let err = store.replace_tokens("a", "r").await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[tokio::test]
    async fn test_file_store_session_persistence_stays_off_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileCredentialStore::new(&path);

        store
            .store(credentials(), Persistence::Session)
            .await
            .unwrap();
        assert!(store.load().await.unwrap().is_some());
        assert!(!path.exists());

        // A new store over the same path sees nothing: session ended.
        let next = FileCredentialStore::new(&path);
        assert!(next.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_persistent_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileCredentialStore::new(&path);
        store
            .store(credentials(), Persistence::Days(7))
            .await
            .unwrap();
        assert!(path.exists());

        let next = FileCredentialStore::new(&path);
        let loaded = next.load().await.unwrap().unwrap();
        assert_eq!(loaded.refresh_token, "refresh-1");
        assert_eq!(
            next.persistence().await.unwrap(),
            Some(Persistence::Days(7))
        );
    }

    #[tokio::test]
    async fn test_file_store_expired_record_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let record = StoredSessionRecord {
            credentials: credentials(),
            persistence: Persistence::Days(7),
            expires_at: Some(Utc::now() - Duration::hours(1)),
        };
        std::fs::write(&path, serde_json::to_vec(&record).unwrap()).unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(store.load().await.unwrap().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_file_store_clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileCredentialStore::new(&path);
        store
            .store(credentials(), Persistence::Days(7))
            .await
            .unwrap();
        store.clear().await.unwrap();

        assert!(store.load().await.unwrap().is_none());
        assert!(!path.exists());
    }
}
