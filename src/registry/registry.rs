/// Process-lifetime record registry
///
/// Readers load an `ArcSwap` snapshot of the ordered record map and never block.
/// Writers take the registry's single mutex, apply their change to a copy of the
/// snapshot, persist it when storage is configured, and only then publish the
/// new snapshot. Concurrent mutations are therefore serialised and a failed
/// write leaves the published state untouched.

use crate::registry::{
    storage::{Persisted, RegistryStorage},
    types::{Component, ComponentPatch, Stored, Workflow},
};
use anyhow::Result;
use arc_swap::ArcSwap;
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error;
use tokio::sync::Mutex;

pub type ComponentRegistry = Registry<Component>;
pub type WorkflowRegistry = Registry<Workflow>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{kind} not found at position {position}")]
    NotFound { kind: &'static str, position: usize },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Ordered registry of records keyed by stable ids
///
/// Ids are handed out in increasing order and never reused, so iterating the
/// `BTreeMap` yields insertion order and a record's position is its rank in
/// that order.
#[derive(Debug)]
pub struct Registry<T> {
    records: ArcSwap<BTreeMap<u64, T>>,
    /// Next id to hand out; holding this lock is what makes a writer exclusive
    next_id: Mutex<u64>,
    storage: Option<RegistryStorage>,
}

impl<T: Persisted> Registry<T> {
    /// Memory-only registry
    pub fn new() -> Self {
        Self::with_storage(None)
    }

    /// Registry that writes every mutation through to `storage` when present
    pub fn with_storage(storage: Option<RegistryStorage>) -> Self {
        Self {
            records: ArcSwap::new(Arc::new(BTreeMap::new())),
            next_id: Mutex::new(1),
            storage,
        }
    }

    /// Replace the in-memory state with everything in storage
    ///
    /// The id counter resumes after the largest stored id. A no-op for
    /// memory-only registries.
    pub async fn init_from_storage(&self) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };

        let mut next_id = self.next_id.lock().await;
        let loaded: BTreeMap<u64, T> = T::load_all(storage).await?.into_iter().collect();

        *next_id = loaded.keys().next_back().map_or(1, |last| last + 1);
        let count = loaded.len();
        self.records.store(Arc::new(loaded));

        tracing::info!("Loaded {} {} records from storage", count, T::KIND);
        Ok(())
    }

    /// Append a record and return its stable id
    pub async fn insert(&self, record: T) -> Result<u64, RegistryError> {
        let mut next_id = self.next_id.lock().await;
        let id = *next_id;

        if let Some(storage) = &self.storage {
            T::save(storage, id, &record).await?;
        }

        let mut updated = (**self.records.load()).clone();
        updated.insert(id, record);
        self.records.store(Arc::new(updated));
        *next_id += 1;

        tracing::debug!("Inserted {} {}", T::KIND, id);
        Ok(id)
    }

    /// Every record in insertion order
    pub fn list(&self) -> Vec<Stored<T>> {
        self.records
            .load()
            .iter()
            .map(|(id, record)| Stored { id: *id, record: record.clone() })
            .collect()
    }

    /// Record currently at `position`, if any
    pub fn get(&self, position: usize) -> Option<Stored<T>> {
        self.records
            .load()
            .iter()
            .nth(position)
            .map(|(id, record)| Stored { id: *id, record: record.clone() })
    }

    pub fn len(&self) -> usize {
        self.records.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.load().is_empty()
    }

    /// Modify the record at `position` in place and return its stable id
    pub async fn update_at<F>(&self, position: usize, apply: F) -> Result<u64, RegistryError>
    where
        F: FnOnce(&mut T),
    {
        let _writer = self.next_id.lock().await;

        let mut updated = (**self.records.load()).clone();
        let (id, record) = updated
            .iter_mut()
            .nth(position)
            .ok_or(RegistryError::NotFound { kind: T::KIND, position })?;
        let id = *id;
        apply(record);

        if let Some(storage) = &self.storage {
            T::save(storage, id, record).await?;
        }

        self.records.store(Arc::new(updated));

        tracing::debug!("Updated {} {} at position {}", T::KIND, id, position);
        Ok(id)
    }

    /// Remove the record at `position`; later records move up one position
    pub async fn remove_at(&self, position: usize) -> Result<Stored<T>, RegistryError> {
        let _writer = self.next_id.lock().await;

        let mut updated = (**self.records.load()).clone();
        let id = updated
            .keys()
            .nth(position)
            .copied()
            .ok_or(RegistryError::NotFound { kind: T::KIND, position })?;

        if let Some(storage) = &self.storage {
            if !T::delete(storage, id).await? {
                tracing::warn!("{} {} was missing from storage during delete", T::KIND, id);
            }
        }

        let record = updated
            .remove(&id)
            .ok_or(RegistryError::NotFound { kind: T::KIND, position })?;
        self.records.store(Arc::new(updated));

        tracing::debug!("Removed {} {} from position {}", T::KIND, id, position);
        Ok(Stored { id, record })
    }

    /// Drop all in-memory records; storage is left as is
    pub async fn clear(&self) {
        let _writer = self.next_id.lock().await;
        self.records.store(Arc::new(BTreeMap::new()));
    }
}

impl<T: Persisted> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry<Component> {
    /// Merge `patch` into the configuration of the component at `position`
    pub async fn configure(&self, position: usize, patch: ComponentPatch) -> Result<u64, RegistryError> {
        self.update_at(position, |component| component.apply_patch(patch)).await
    }
}
