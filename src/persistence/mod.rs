//! Save/load of the submission list
//!
//! Features:
//! - Whole list stored as one blob under a fixed key
//! - Versioned JSON envelope with upgrade from the unversioned layout
//! - Memory and file-backed slots (atomic tmp + rename on disk)

pub mod envelope;
pub mod storage;

use async_trait::async_trait;

use crate::error::PersistenceError;
use crate::submission::Submission;

pub use envelope::FORMAT_VERSION;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

/// Where the store keeps its submissions between runs
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Read every persisted submission. An empty slot is an empty list.
    async fn load(&self) -> Result<Vec<Submission>, PersistenceError>;

    /// Replace the persisted list with `submissions`
    async fn save(&self, submissions: &[Submission]) -> Result<(), PersistenceError>;
}

/// Repository backed by a single slot of a [`KeyValueStorage`]
#[derive(Debug, Clone)]
pub struct KeyValueRepository<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> KeyValueRepository<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[async_trait]
impl<S: KeyValueStorage> SubmissionRepository for KeyValueRepository<S> {
    async fn load(&self) -> Result<Vec<Submission>, PersistenceError> {
        match self.storage.get_item(&self.key)? {
            Some(json) => {
                let submissions = envelope::decode(&json)?;
                log::info!("Loaded {} submissions", submissions.len());
                Ok(submissions)
            }
            None => {
                log::info!("No saved submissions under '{}', starting fresh", self.key);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, submissions: &[Submission]) -> Result<(), PersistenceError> {
        let json = envelope::encode(submissions)?;
        self.storage.set_item(&self.key, &json)?;
        log::info!("Submissions saved ({} entries)", submissions.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{AudioRef, SubmissionId};
    use chrono::{TimeZone, Utc};

    fn sample() -> Vec<Submission> {
        (1..=3)
            .map(|i| Submission {
                id: SubmissionId(1_000 + i),
                name: format!("Player {i}"),
                score: 60.0 + i as f64 * 12.5,
                time: 10.0 * i as f64 + 0.125,
                audio_reference: (i % 2 == 1).then(|| AudioRef::new(format!("clip-{i}"))),
                created_at: Utc.timestamp_millis_opt(1_000 + i as i64).single().unwrap(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_empty_slot_loads_empty() {
        let repo = KeyValueRepository::new(MemoryStorage::new(), "submissions");
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_round_trip() {
        let repo = KeyValueRepository::new(MemoryStorage::new(), "submissions");
        let list = sample();
        repo.save(&list).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), list);
    }

    #[tokio::test]
    async fn test_file_round_trip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let list = sample();
        KeyValueRepository::new(FileStorage::new(dir.path()), "submissions")
            .save(&list)
            .await
            .unwrap();

        let reopened = KeyValueRepository::new(FileStorage::new(dir.path()), "submissions");
        assert_eq!(reopened.load().await.unwrap(), list);
    }

    #[tokio::test]
    async fn test_corrupt_slot_is_error() {
        let storage = MemoryStorage::new();
        storage.set_item("submissions", "not json").unwrap();
        let repo = KeyValueRepository::new(storage, "submissions");
        assert!(matches!(
            repo.load().await,
            Err(PersistenceError::Serialization(_))
        ));
    }
}
