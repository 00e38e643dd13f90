//! In-memory repository implementation for testing and development

use crate::core::entity::Entity;
use crate::core::error::{SiftError, SiftResult, StorageError};
use crate::core::repository::Repository;
use crate::core::schema::Queryable;
use crate::core::store::EntitySource;
use crate::query::lazy::Query;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use uuid::Uuid;

/// In-memory repository backed by an insertion-ordered map.
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// enumeration order is insertion order, so unsorted queries are
/// deterministic. Cloning shares the underlying store.
pub struct InMemoryRepository<T> {
    rows: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T> InMemoryRepository<T> {
    /// Create a new, empty in-memory repository
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    fn read_guard(
        &self,
        operation: &'static str,
    ) -> Result<RwLockReadGuard<'_, IndexMap<Uuid, T>>, SiftError> {
        self.rows
            .read()
            .map_err(|_| StorageError::LockPoisoned { operation }.into())
    }

    fn write_guard(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, IndexMap<Uuid, T>>, SiftError> {
        self.rows
            .write()
            .map_err(|_| StorageError::LockPoisoned { operation }.into())
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity + Queryable> EntitySource<T> for InMemoryRepository<T> {
    fn fetch_all(&self) -> Vec<T> {
        // The enumeration path has no error channel; a poisoned lock still
        // holds consistent data, so recover the inner value.
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        rows.values().cloned().collect()
    }
}

#[async_trait]
impl<T: Entity + Queryable> Repository<T> for InMemoryRepository<T> {
    async fn save(&self, entity: T) -> SiftResult<T> {
        let mut rows = self.write_guard("save")?;
        debug!(entity_type = entity.entity_type(), id = %entity.id(), "saving entity");
        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn remove(&self, id: &Uuid) -> SiftResult<()> {
        let mut rows = self.write_guard("remove")?;
        if rows.shift_remove(id).is_none() {
            return Err(StorageError::NotFound {
                entity_type: T::resource_name_singular().to_string(),
                id: *id,
            }
            .into());
        }
        debug!(id = %id, "removed entity");
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> SiftResult<Option<T>> {
        Ok(self.read_guard("find_by_id")?.get(id).cloned())
    }

    async fn query(&self) -> SiftResult<Query<T>> {
        Ok(Query::over(Arc::new(self.clone())))
    }

    async fn count(&self) -> SiftResult<usize> {
        Ok(self.read_guard("count")?.len())
    }
}
