//! CRUD operations over the persisted audience collection.

use std::collections::HashSet;
use std::io;

use audiencelab_core::{Audience, AudienceFields, DiscoveredAudience, OWNER_PLACEHOLDER};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::blob::BlobStore;
use crate::error::StoreError;

/// Blob key holding the serialized audience collection.
pub const STORAGE_KEY: &str = "audiences";

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Audience repository backed by a single blob.
pub struct AudienceStore<B> {
    blob: B,
    clock: Clock,
}

impl<B: BlobStore> AudienceStore<B> {
    #[must_use]
    pub fn new(blob: B) -> Self {
        Self::with_clock(blob, Utc::now)
    }

    /// Creates a store whose timestamps come from `clock` instead of the system time.
    #[must_use]
    pub fn with_clock<C>(blob: B, clock: C) -> Self
    where
        C: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            blob,
            clock: Box::new(clock),
        }
    }

    #[must_use]
    pub fn blob(&self) -> &B {
        &self.blob
    }

    /// Returns all audiences, newest first.
    ///
    /// Never fails: missing or unreadable storage yields an empty list, and a
    /// blob that does not parse is discarded so later reads start clean.
    #[must_use]
    pub fn list(&self) -> Vec<Audience> {
        let mut audiences = self.load();
        // Stable sort: records sharing a timestamp keep their stored order.
        audiences.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        audiences
    }

    /// Looks up one audience by id. `None` when absent.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Audience> {
        self.list().into_iter().find(|a| a.id == id)
    }

    /// Case-insensitive substring match on name, newest first.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<Audience> {
        let needle = term.trim().to_lowercase();
        self.list()
            .into_iter()
            .filter(|a| a.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Validates `fields`, then stores a new audience at the head of the collection.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] if the fields are incomplete; storage is not touched.
    /// - [`StoreError::Write`] if the storage medium rejects the write.
    pub fn create(&self, fields: AudienceFields) -> Result<Audience, StoreError> {
        fields.validate()?;

        let audiences = self.list();
        let now = (self.clock)();
        let audience = Audience {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            demographics: fields.demographics,
            interests: fields.interests,
            behaviors: fields.behaviors,
            created_at: now,
            updated_at: now,
            owner: OWNER_PLACEHOLDER.to_string(),
        };

        let mut updated = Vec::with_capacity(audiences.len() + 1);
        updated.push(audience.clone());
        updated.extend(audiences);
        self.persist(&updated)?;

        tracing::debug!(id = %audience.id, name = %audience.name, "audience created");
        Ok(audience)
    }

    /// Replaces the editable fields of an existing audience.
    ///
    /// `id`, `created_at` and `owner` are preserved; `updated_at` is refreshed.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] if the fields are incomplete.
    /// - [`StoreError::NotFound`] if no audience has this id.
    /// - [`StoreError::Write`] if the storage medium rejects the write.
    pub fn update(&self, id: &str, fields: AudienceFields) -> Result<Audience, StoreError> {
        fields.validate()?;

        let mut audiences = self.list();
        let now = (self.clock)();
        let target = audiences
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        target.name = fields.name;
        target.demographics = fields.demographics;
        target.interests = fields.interests;
        target.behaviors = fields.behaviors;
        target.updated_at = now;
        let updated = target.clone();

        self.persist(&audiences)?;

        tracing::debug!(id, "audience updated");
        Ok(updated)
    }

    /// Removes the audience with this id. Deleting an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the remaining collection cannot be saved.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let audiences = self.list();
        let before = audiences.len();
        let remaining: Vec<Audience> = audiences.into_iter().filter(|a| a.id != id).collect();
        if remaining.len() == before {
            tracing::debug!(id, "no audience to delete");
            return Ok(());
        }
        self.persist(&remaining)?;

        tracing::debug!(id, "audience deleted");
        Ok(())
    }

    /// Saves a discovered segment as a regular audience.
    ///
    /// # Errors
    ///
    /// Same as [`AudienceStore::create`].
    pub fn promote(&self, discovered: &DiscoveredAudience) -> Result<Audience, StoreError> {
        self.create(AudienceFields::from(discovered))
    }

    /// Creates every entry whose name is not already stored (case-insensitive).
    ///
    /// Returns the number of audiences created. Stops at the first failure;
    /// entries created before it stay persisted.
    ///
    /// # Errors
    ///
    /// Same as [`AudienceStore::create`].
    pub fn seed(&self, entries: &[AudienceFields]) -> Result<usize, StoreError> {
        let mut existing: HashSet<String> = self
            .list()
            .iter()
            .map(|a| a.name.trim().to_lowercase())
            .collect();

        let mut created = 0usize;
        for entry in entries {
            let key = entry.name.trim().to_lowercase();
            if existing.contains(&key) {
                tracing::debug!(name = %entry.name, "audience already present, skipping seed");
                continue;
            }
            self.create(entry.clone())?;
            existing.insert(key);
            created += 1;
        }
        Ok(created)
    }

    fn load(&self) -> Vec<Audience> {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            // Bytes that are not UTF-8 are corrupted data, not an unreadable medium.
            Err(StoreError::Read { source, .. }) if source.kind() == io::ErrorKind::InvalidData => {
                self.discard_corrupted(&source);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "audience storage unreadable; treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Audience>>(&raw) {
            Ok(audiences) => audiences,
            Err(e) => {
                self.discard_corrupted(&e);
                Vec::new()
            }
        }
    }

    fn discard_corrupted(&self, cause: &dyn std::error::Error) {
        tracing::warn!(error = %cause, "corrupted audience data; clearing storage");
        if let Err(remove_err) = self.blob.remove(STORAGE_KEY) {
            tracing::warn!(error = %remove_err, "failed to clear corrupted audience data");
        }
    }

    fn read_raw(&self) -> Result<Option<String>, StoreError> {
        self.blob.get(STORAGE_KEY).map_err(|e| StoreError::Read {
            key: STORAGE_KEY.to_string(),
            source: e,
        })
    }

    fn persist(&self, audiences: &[Audience]) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(audiences)?;
        self.blob
            .set(STORAGE_KEY, &serialized)
            .map_err(|e| StoreError::Write {
                key: STORAGE_KEY.to_string(),
                source: e,
            })
    }
}

#[cfg(test)]
#[path = "audiences_test.rs"]
mod tests;
