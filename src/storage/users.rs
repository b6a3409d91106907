use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

#[derive(thiserror::Error, Debug)]
pub enum UserStoreErrorKind {
    #[error(transparent)]
    IO(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Set of registered user ids kept in a JSON array file.
///
/// Every call reads the whole file and every change rewrites it.
/// Read-modify-write is serialized by an in-process lock, so the store must have a single owner.
pub struct UserStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails, a file that can't be read is logged and taken as empty
    pub async fn load(&self) -> HashSet<i64> {
        let _guard = self.lock.lock().await;
        match self.read().await {
            Ok(users) => users,
            Err(err) => {
                warn!(%err, path = %self.path.display(), "Read users err");
                HashSet::new()
            }
        }
    }

    /// Adds the user and rewrites the file if the set changed.
    /// Returns `true` if the user is new.
    #[instrument(skip(self))]
    pub async fn record(&self, user_id: i64) -> Result<bool, UserStoreErrorKind> {
        let _guard = self.lock.lock().await;

        // An unreadable file is never replaced
        let mut users = self.read().await?;
        if !users.insert(user_id) {
            debug!("User already recorded");
            return Ok(false);
        }

        self.write(&users).await?;
        Ok(true)
    }

    /// Absent or unparsable file is an empty set, any other IO error is returned
    async fn read(&self) -> Result<HashSet<i64>, io::Error> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(err) => return Err(err),
        };

        match serde_json::from_slice(&raw) {
            Ok(users) => Ok(users),
            Err(err) => {
                warn!(%err, path = %self.path.display(), "Parse users err");
                Ok(HashSet::new())
            }
        }
    }

    async fn write(&self, users: &HashSet<i64>) -> Result<(), UserStoreErrorKind> {
        let mut ids = users.iter().copied().collect::<Vec<_>>();
        ids.sort_unstable();
        let raw = serde_json::to_vec(&ids)?;

        // Replace the file at once so a crash never leaves half of the array
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, raw).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_absent_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = UserStore::new(dir.path().join("users.json"));

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_unparsable_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(UserStore::new(&path).load().await.is_empty());

        std::fs::write(&path, r#"["a", "b"]"#).unwrap();
        assert!(UserStore::new(&path).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_record_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        let store = UserStore::new(&path);

        assert!(store.record(42).await.unwrap());
        assert!(!store.record(42).await.unwrap());
        assert!(store.record(7).await.unwrap());

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(serde_json::from_str::<Vec<i64>>(&raw).unwrap(), [7, 42]);
        assert_eq!(store.load().await, HashSet::from([7, 42]));
    }

    #[tokio::test]
    async fn test_existing_file_is_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "[1, 2, 2]").unwrap();
        let store = UserStore::new(&path);

        assert!(!store.record(2).await.unwrap());
        assert!(store.record(3).await.unwrap());
        assert_eq!(store.load().await, HashSet::from([1, 2, 3]));
    }

    #[tokio::test]
    async fn test_unreadable_file_is_not_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        // A directory in place of the file fails to be read as one
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "[1, 2]").unwrap();
        let store = UserStore::new(&path);

        assert!(matches!(store.record(3).await, Err(UserStoreErrorKind::IO(_))));
        assert!(path.join("keep").exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_records_not_lost() {
        let dir = tempdir().unwrap();
        let store = Arc::new(UserStore::new(dir.path().join("users.json")));

        let handles = (0..32_i64)
            .map(|user_id| {
                let store = store.clone();
                tokio::spawn(async move { store.record(user_id).await.unwrap() })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        assert_eq!(store.load().await, (0..32).collect::<HashSet<_>>());
    }
}
