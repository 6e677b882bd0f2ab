//! Encrypted store for user-authored state
//!
//! Each [`Bucket`] is one encrypted, versioned JSON blob under a fixed storage
//! key. Anything that cannot be decrypted, parsed or upgraded loads as absent.

pub mod cipher;
pub mod envelope;

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use crate::client::models::CharacterInfo;
use crate::error::{DecodeError, Result};
use crate::storage::LocalStorage;
use crate::tracker::{CustomTasks, SavedProgress};

pub use cipher::{Cipher, DEFAULT_PASSPHRASE};

/// Logical state buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    TaskProgress,
    CustomTasks,
    CharacterInfo,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::TaskProgress, Bucket::CustomTasks, Bucket::CharacterInfo];

    /// Storage key holding this bucket
    pub fn key(self) -> &'static str {
        match self {
            Bucket::TaskProgress => "save-state",
            Bucket::CustomTasks => "weekly-wow-custom-tasks",
            Bucket::CharacterInfo => "character-info",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bucket::TaskProgress => "task progress",
            Bucket::CustomTasks => "custom tasks",
            Bucket::CharacterInfo => "character info",
        };
        write!(f, "{}", name)
    }
}

/// A type stored in exactly one bucket
pub trait Persisted: Serialize + DeserializeOwned {
    const BUCKET: Bucket;
}

impl Persisted for SavedProgress {
    const BUCKET: Bucket = Bucket::TaskProgress;
}

impl Persisted for CustomTasks {
    const BUCKET: Bucket = Bucket::CustomTasks;
}

impl Persisted for CharacterInfo {
    const BUCKET: Bucket = Bucket::CharacterInfo;
}

/// What a bucket currently holds
#[derive(Debug)]
pub enum BucketHealth {
    Empty,
    Valid { version: u32 },
    Corrupt(DecodeError),
}

pub struct StateVault {
    storage: Arc<dyn LocalStorage>,
    cipher: Cipher,
}

impl StateVault {
    pub fn new(storage: Arc<dyn LocalStorage>, passphrase: &str) -> Self {
        Self {
            storage,
            cipher: Cipher::new(passphrase),
        }
    }

    /// Encrypt and store `data`. The previous value stays intact on failure.
    pub fn save<T: Persisted>(&self, data: &T) -> Result<()> {
        let plaintext = envelope::seal(data)?;
        let sealed = self.cipher.encrypt(&plaintext)?;
        self.storage.set_item(T::BUCKET.key(), &sealed)?;
        log::debug!("Saved {}", T::BUCKET);
        Ok(())
    }

    /// Load a bucket. Only a failing storage medium is an error.
    pub fn load<T: Persisted>(&self) -> Result<Option<T>> {
        let Some(stored) = self.storage.get_item(T::BUCKET.key())? else {
            return Ok(None);
        };

        match self.decode::<T>(&stored) {
            Ok((_, data)) => Ok(Some(data)),
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", T::BUCKET, e);
                Ok(None)
            }
        }
    }

    /// Delete a bucket
    pub fn reset(&self, bucket: Bucket) -> Result<()> {
        self.storage.remove_item(bucket.key())?;
        Ok(())
    }

    /// Wipe the whole storage medium, cache entries included
    pub fn clear_all(&self) -> Result<usize> {
        Ok(self.storage.clear()?)
    }

    /// Inspect a bucket without loading it into a typed value
    pub fn probe(&self, bucket: Bucket) -> Result<BucketHealth> {
        let Some(stored) = self.storage.get_item(bucket.key())? else {
            return Ok(BucketHealth::Empty);
        };

        let opened = self
            .cipher
            .decrypt(&stored)
            .and_then(|plaintext| envelope::open(bucket, &plaintext));
        Ok(match opened {
            Ok((version, _)) => BucketHealth::Valid { version },
            Err(e) => BucketHealth::Corrupt(e),
        })
    }

    fn decode<T: Persisted>(&self, stored: &str) -> std::result::Result<(u32, T), DecodeError> {
        let plaintext = self.cipher.decrypt(stored)?;
        let (version, data) = envelope::open(T::BUCKET, &plaintext)?;
        Ok((version, serde_json::from_value(data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::envelope::CURRENT_VERSION;
    use super::*;
    use crate::storage::{FailingStorage, MemoryStorage};
    use serde::Deserialize;
    use serde_json::{Value, json};
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Progress(BTreeMap<String, Value>);

    impl Persisted for Progress {
        const BUCKET: Bucket = Bucket::TaskProgress;
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Character {
        name: String,
        realm: String,
    }

    impl Persisted for Character {
        const BUCKET: Bucket = Bucket::CharacterInfo;
    }

    fn progress() -> Progress {
        Progress(BTreeMap::from([(
            "delve-1".to_string(),
            json!({"completed": true, "currentCount": 2}),
        )]))
    }

    fn setup() -> (StateVault, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (StateVault::new(storage.clone(), DEFAULT_PASSPHRASE), storage)
    }

    #[test]
    fn test_round_trip() {
        let (vault, _) = setup();

        vault.save(&progress()).unwrap();

        assert_eq!(vault.load::<Progress>().unwrap(), Some(progress()));
    }

    #[test]
    fn test_stored_text_is_encrypted() {
        let (vault, storage) = setup();
        vault.save(&progress()).unwrap();

        let raw = storage.get_item("save-state").unwrap().unwrap();
        assert!(!raw.contains("delve-1"));
    }

    #[test]
    fn test_no_prior_save_is_absent() {
        let (vault, _) = setup();
        assert_eq!(vault.load::<Progress>().unwrap(), None);
    }

    #[test]
    fn test_corrupt_text_is_absent() {
        let (vault, storage) = setup();

        storage.set_item("save-state", "definitely not ciphertext").unwrap();
        assert_eq!(vault.load::<Progress>().unwrap(), None);

        // Decrypts fine but is not JSON
        let sealed = Cipher::default().encrypt("{{{").unwrap();
        storage.set_item("save-state", &sealed).unwrap();
        assert_eq!(vault.load::<Progress>().unwrap(), None);
    }

    #[test]
    fn test_wrong_passphrase_is_absent() {
        let storage = Arc::new(MemoryStorage::new());
        StateVault::new(storage.clone(), "first")
            .save(&progress())
            .unwrap();

        let vault = StateVault::new(storage, "second");
        assert_eq!(vault.load::<Progress>().unwrap(), None);
    }

    #[test]
    fn test_schema_mismatch_is_absent() {
        let (vault, storage) = setup();
        let sealed = Cipher::default()
            .encrypt(r#"{"version": 2, "data": {"name": 5}}"#)
            .unwrap();
        storage.set_item("character-info", &sealed).unwrap();

        assert_eq!(vault.load::<Character>().unwrap(), None);
    }

    #[test]
    fn test_legacy_payload_upgraded_on_load() {
        let (vault, storage) = setup();
        let legacy = Cipher::default()
            .encrypt(r#"{"delve-1": {"completed": true, "count": 2, "lastCompleted": 1}}"#)
            .unwrap();
        storage.set_item("save-state", &legacy).unwrap();

        assert_eq!(vault.load::<Progress>().unwrap(), Some(progress()));
    }

    #[test]
    fn test_buckets_are_independent() {
        let (vault, _) = setup();
        let thrall = Character {
            name: "Thrall".to_string(),
            realm: "draenor".to_string(),
        };

        vault.save(&progress()).unwrap();
        vault.save(&thrall).unwrap();
        vault.reset(Bucket::TaskProgress).unwrap();

        assert_eq!(vault.load::<Progress>().unwrap(), None);
        assert_eq!(vault.load::<Character>().unwrap(), Some(thrall));
    }

    #[test]
    fn test_clear_all_wipes_medium() {
        let (vault, storage) = setup();
        vault.save(&progress()).unwrap();
        storage.set_item("cache_eu_realms", "{}").unwrap();

        assert_eq!(vault.clear_all().unwrap(), 2);
        assert!(storage.keys_with_prefix("").unwrap().is_empty());
    }

    #[test]
    fn test_probe_reports_health() {
        let (vault, storage) = setup();
        assert!(matches!(
            vault.probe(Bucket::TaskProgress).unwrap(),
            BucketHealth::Empty
        ));

        vault.save(&progress()).unwrap();
        assert!(matches!(
            vault.probe(Bucket::TaskProgress).unwrap(),
            BucketHealth::Valid { version: CURRENT_VERSION }
        ));

        storage.set_item("save-state", "garbage").unwrap();
        assert!(matches!(
            vault.probe(Bucket::TaskProgress).unwrap(),
            BucketHealth::Corrupt(_)
        ));
    }

    #[test]
    fn test_failing_storage_is_an_error() {
        let vault = StateVault::new(Arc::new(FailingStorage), DEFAULT_PASSPHRASE);

        assert!(vault.save(&progress()).is_err());
        assert!(vault.load::<Progress>().is_err());
    }

    #[test]
    fn test_bucket_keys() {
        let keys: Vec<_> = Bucket::ALL.iter().map(|b| b.key()).collect();
        assert_eq!(keys, vec!["save-state", "weekly-wow-custom-tasks", "character-info"]);
    }
}
