//! Patient record layout over a `KvStore`.
//!
//! # Responsibility
//! - Map profiles, visit histories and the active-user pointer onto keys.
//! - Encode records as JSON blobs.
//!
//! # Invariants
//! - Keys are `medical_assistant_profile_<id>`,
//!   `medical_assistant_history_<id>` and `medical_assistant_current_user`.
//! - The active-user pointer stores the bare UUID string, not JSON.
//! - A missing history key reads as an empty history.

use super::kv_repo::KvStore;
use super::{RepoError, RepoResult};
use crate::model::profile::{UserId, UserProfile};
use crate::model::visit::VisitRecord;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub const STORAGE_PREFIX: &str = "medical_assistant_";

pub fn profile_key(id: UserId) -> String {
    format!("{STORAGE_PREFIX}profile_{id}")
}

pub fn history_key(id: UserId) -> String {
    format!("{STORAGE_PREFIX}history_{id}")
}

pub fn current_user_key() -> String {
    format!("{STORAGE_PREFIX}current_user")
}

/// Storage contract for patient records.
pub trait PatientRepository {
    fn current_user_id(&self) -> RepoResult<Option<UserId>>;
    fn set_current_user(&self, id: UserId) -> RepoResult<()>;
    fn clear_current_user(&self) -> RepoResult<()>;

    fn load_profile(&self, id: UserId) -> RepoResult<Option<UserProfile>>;
    fn save_profile(&self, profile: &UserProfile) -> RepoResult<()>;
    fn remove_profile(&self, id: UserId) -> RepoResult<()>;
    /// Ids of every stored profile, in key order.
    fn list_profile_ids(&self) -> RepoResult<Vec<UserId>>;

    fn load_history(&self, id: UserId) -> RepoResult<Vec<VisitRecord>>;
    fn save_history(&self, id: UserId, history: &[VisitRecord]) -> RepoResult<()>;
    fn remove_history(&self, id: UserId) -> RepoResult<()>;
}

/// JSON-blob repository over any key-value store.
pub struct KvPatientRepository<S: KvStore> {
    store: S,
}

impl<S: KvStore> KvPatientRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Option<T>> {
        match self.store.get(key)? {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|source| RepoError::Json {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> RepoResult<()> {
        let text = serde_json::to_string(value).map_err(|source| RepoError::Json {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &text)
    }
}

impl<S: KvStore> PatientRepository for KvPatientRepository<S> {
    fn current_user_id(&self) -> RepoResult<Option<UserId>> {
        let key = current_user_key();
        match self.store.get(&key)? {
            Some(text) => Uuid::parse_str(text.trim()).map(Some).map_err(|_| {
                RepoError::InvalidData(format!("invalid user id `{text}` under `{key}`"))
            }),
            None => Ok(None),
        }
    }

    fn set_current_user(&self, id: UserId) -> RepoResult<()> {
        self.store.set(&current_user_key(), &id.to_string())
    }

    fn clear_current_user(&self) -> RepoResult<()> {
        self.store.remove(&current_user_key())?;
        Ok(())
    }

    fn load_profile(&self, id: UserId) -> RepoResult<Option<UserProfile>> {
        let key = profile_key(id);
        let Some(profile) = self.read_json::<UserProfile>(&key)? else {
            return Ok(None);
        };
        if profile.id != id {
            return Err(RepoError::InvalidData(format!(
                "profile under `{key}` carries id {}",
                profile.id
            )));
        }
        profile.validate()?;
        Ok(Some(profile))
    }

    fn save_profile(&self, profile: &UserProfile) -> RepoResult<()> {
        profile.validate()?;
        self.write_json(&profile_key(profile.id), profile)
    }

    fn remove_profile(&self, id: UserId) -> RepoResult<()> {
        self.store.remove(&profile_key(id))?;
        Ok(())
    }

    fn list_profile_ids(&self) -> RepoResult<Vec<UserId>> {
        let prefix = format!("{STORAGE_PREFIX}profile_");
        self.store
            .keys_with_prefix(&prefix)?
            .into_iter()
            .map(|key| {
                let suffix = &key[prefix.len()..];
                Uuid::parse_str(suffix)
                    .map_err(|_| RepoError::InvalidData(format!("invalid profile key `{key}`")))
            })
            .collect()
    }

    fn load_history(&self, id: UserId) -> RepoResult<Vec<VisitRecord>> {
        let history = self
            .read_json::<Vec<VisitRecord>>(&history_key(id))?
            .unwrap_or_default();
        for record in &history {
            record.validate()?;
        }
        Ok(history)
    }

    fn save_history(&self, id: UserId, history: &[VisitRecord]) -> RepoResult<()> {
        for record in history {
            record.validate()?;
        }
        self.write_json(&history_key(id), history)
    }

    fn remove_history(&self, id: UserId) -> RepoResult<()> {
        self.store.remove(&history_key(id))?;
        Ok(())
    }
}
