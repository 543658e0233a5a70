use async_trait::async_trait;

use crate::repository::{RepositoryClient, RepositoryError, StoreRecord};

/// Trait for typed repositories to inherit the standard collection surface.
///
/// This trait reduces boilerplate by forwarding the common operations to the
/// generic [`RepositoryClient`]; each repository only spells out the
/// operations specific to its collection.
#[async_trait]
pub trait RepositoryHandle<T: StoreRecord>: Send + Sync {
    /// Access the inner generic client.
    fn inner(&self) -> &RepositoryClient<T>;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RepositoryError> {
        self.inner().find_by_id(id).await
    }

    /// Fetch the whole collection.
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        self.inner().find_all().await
    }

    /// Append a record. Uniqueness is the caller's concern.
    #[tracing::instrument(skip(self, record))]
    async fn insert(&self, record: T) -> Result<T, RepositoryError> {
        self.inner().insert(record).await
    }

    /// Upsert: remove any record with the same id, then re-add.
    #[tracing::instrument(skip(self, record))]
    async fn update(&self, record: T) -> Result<T, RepositoryError> {
        self.inner().update(record).await
    }

    /// Whether a record with `id` exists.
    #[tracing::instrument(skip(self))]
    async fn exists_by_id(&self, id: T::Id) -> Result<bool, RepositoryError> {
        self.inner().exists_by_id(id).await
    }

    /// Delete by id. Returns whether a record was removed.
    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: T::Id) -> Result<bool, RepositoryError> {
        self.inner().delete_by_id(id).await
    }
}
