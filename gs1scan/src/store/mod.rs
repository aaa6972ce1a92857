//! Key-value record stores behind the partner and product registries
//!
//! The registries only see this CRUD contract. Each store decides ordering:
//! partners come back by role then name, products newest first.

pub mod memory;

pub use memory::MemoryStore;

use std::fmt::Debug;
use std::hash::Hash;

use async_trait::async_trait;

use crate::Result;

/// Records that are addressed by a key once stored
pub trait Keyed {
    type Key: Clone + Eq + Hash + Debug + Send + Sync;

    /// Key of a stored record, `None` before the store assigned one
    fn key(&self) -> Option<Self::Key>;
}

/// Persistence contract for partner and product records
#[async_trait]
pub trait RecordStore<R>: Send + Sync
where
    R: Keyed + Send + Sync + 'static,
{
    /// All records in store order
    async fn list(&self) -> Result<Vec<R>>;

    /// Insert a record or replace the one it conflicts with
    async fn upsert(&self, record: R) -> Result<()>;

    /// Remove a record; `false` when nothing was stored under the key
    async fn delete(&self, key: &R::Key) -> Result<bool>;

    /// Fetch one record by key
    async fn get_by_key(&self, key: &R::Key) -> Result<Option<R>>;
}

#[async_trait]
impl<R, S> RecordStore<R> for std::sync::Arc<S>
where
    R: Keyed + Send + Sync + 'static,
    S: RecordStore<R> + ?Sized,
{
    async fn list(&self) -> Result<Vec<R>> {
        (**self).list().await
    }

    async fn upsert(&self, record: R) -> Result<()> {
        (**self).upsert(record).await
    }

    async fn delete(&self, key: &R::Key) -> Result<bool> {
        (**self).delete(key).await
    }

    async fn get_by_key(&self, key: &R::Key) -> Result<Option<R>> {
        (**self).get_by_key(key).await
    }
}
