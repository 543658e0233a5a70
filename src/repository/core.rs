//! # Core repository machinery
//!
//! This module defines the generic building blocks shared by every
//! repository.
//!
//! ## Key Types
//!
//! - [`StoreRecord`]: the trait all persisted record types implement.
//! - [`RepositoryActor`]: the generic task that owns one slot.
//! - [`RepositoryClient`]: the generic handle for talking to it.
//! - [`RepositoryError`]: channel and storage failures.

use std::fmt::{Debug, Display};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::store::{FileStore, StoreError};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait a record type must implement to be managed by a [`RepositoryActor`].
///
/// # Architecture Note
/// By defining one contract that every persisted type (User, Product, Order)
/// satisfies, the load-mutate-save plumbing is written *once* and reused
/// everywhere. A record only contributes the pieces that differ: which slot
/// its collection lives in, how to read its id, and the canonical order the
/// collection is kept in.
pub trait StoreRecord:
    Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The unique identifier for this record (e.g. String, a u32 newtype).
    type Id: Eq + Clone + Send + Sync + Display + Debug;

    /// File name of the slot holding this record type's collection.
    const SLOT: &'static str;

    /// The record's identifier.
    fn id(&self) -> Self::Id;

    /// Restores the collection's canonical order after a mutation.
    /// The default keeps append order.
    fn sort(_records: &mut Vec<Self>) {}
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors raised by the repository layer itself.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The repository task is gone and the request channel is closed.
    #[error("Repository closed")]
    Closed,

    /// The repository dropped the response channel mid-request.
    #[error("Repository dropped response channel")]
    Dropped,

    /// Persisting the collection failed. The slot may not reflect the
    /// requested mutation; callers must not assume it happened.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Type alias for the one-shot response channel used by repositories.
pub type Response<T> = oneshot::Sender<Result<T, RepositoryError>>;

/// Internal message type sent to a repository to request operations.
///
/// # Full-collection semantics
/// Every variant is handled as one full load → mutate → save cycle against
/// the slot. There is no partial update at the store level; that is the
/// dominant characteristic shaping failure semantics everywhere above.
#[derive(Debug)]
pub enum RepoRequest<T: StoreRecord> {
    FindById {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    FindAll {
        respond_to: Response<Vec<T>>,
    },
    /// Appends a record. Uniqueness is the caller's concern.
    Insert {
        record: T,
        respond_to: Response<T>,
    },
    /// Removes any record with the same id, then re-adds: an upsert.
    Update {
        record: T,
        respond_to: Response<T>,
    },
    ExistsById {
        id: T::Id,
        respond_to: Response<bool>,
    },
    DeleteById {
        id: T::Id,
        respond_to: Response<bool>,
    },
    /// Replaces the whole collection. Used for catalog seeding.
    ReplaceAll {
        records: Vec<T>,
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC REPOSITORY TASK
// =============================================================================

/// The task half of a repository: owns the slot and its store handle.
///
/// **Concurrency Model**:
/// Requests are processed strictly in arrival order, so every
/// load-mutate-save cycle on the slot is serialized through this one task.
/// That is the single-writer guarantee the flat-file layout needs — without
/// it, two concurrent full-collection saves would silently drop one
/// writer's update.
pub struct RepositoryActor<T: StoreRecord> {
    receiver: mpsc::Receiver<RepoRequest<T>>,
    store: FileStore,
}

impl<T: StoreRecord> RepositoryActor<T> {
    pub fn new(store: FileStore, buffer_size: usize) -> (Self, RepositoryClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, store };
        let client = RepositoryClient::new(sender);
        (actor, client)
    }

    /// Runs the request loop, processing messages until every client is
    /// dropped and the channel closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g. "User" instead of "mini_shop::model::user::User")
        let record_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(record_type, slot = T::SLOT, "Repository started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RepoRequest::FindById { id, respond_to } => {
                    let records: Vec<T> = self.store.load(T::SLOT);
                    let found = records.into_iter().find(|r| r.id() == id);
                    debug!(record_type, %id, found = found.is_some(), "FindById");
                    let _ = respond_to.send(Ok(found));
                }
                RepoRequest::FindAll { respond_to } => {
                    let records: Vec<T> = self.store.load(T::SLOT);
                    debug!(record_type, count = records.len(), "FindAll");
                    let _ = respond_to.send(Ok(records));
                }
                RepoRequest::Insert { record, respond_to } => {
                    debug!(record_type, id = %record.id(), "Insert");
                    let mut records: Vec<T> = self.store.load(T::SLOT);
                    records.push(record.clone());
                    T::sort(&mut records);
                    match self.store.save(T::SLOT, &records) {
                        Ok(()) => {
                            info!(record_type, id = %record.id(), size = records.len(), "Inserted");
                            let _ = respond_to.send(Ok(record));
                        }
                        Err(e) => {
                            warn!(record_type, id = %record.id(), error = %e, "Insert failed");
                            let _ = respond_to.send(Err(e.into()));
                        }
                    }
                }
                RepoRequest::Update { record, respond_to } => {
                    let id = record.id();
                    debug!(record_type, %id, "Update");
                    let mut records: Vec<T> = self.store.load(T::SLOT);
                    records.retain(|r| r.id() != id);
                    records.push(record.clone());
                    T::sort(&mut records);
                    match self.store.save(T::SLOT, &records) {
                        Ok(()) => {
                            info!(record_type, %id, "Updated");
                            let _ = respond_to.send(Ok(record));
                        }
                        Err(e) => {
                            warn!(record_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(e.into()));
                        }
                    }
                }
                RepoRequest::ExistsById { id, respond_to } => {
                    let records: Vec<T> = self.store.load(T::SLOT);
                    let exists = records.iter().any(|r| r.id() == id);
                    debug!(record_type, %id, exists, "ExistsById");
                    let _ = respond_to.send(Ok(exists));
                }
                RepoRequest::DeleteById { id, respond_to } => {
                    debug!(record_type, %id, "DeleteById");
                    let mut records: Vec<T> = self.store.load(T::SLOT);
                    let before = records.len();
                    records.retain(|r| r.id() != id);
                    if records.len() == before {
                        debug!(record_type, %id, "Nothing to delete");
                        let _ = respond_to.send(Ok(false));
                        continue;
                    }
                    match self.store.save(T::SLOT, &records) {
                        Ok(()) => {
                            info!(record_type, %id, size = records.len(), "Deleted");
                            let _ = respond_to.send(Ok(true));
                        }
                        Err(e) => {
                            warn!(record_type, %id, error = %e, "Delete failed");
                            let _ = respond_to.send(Err(e.into()));
                        }
                    }
                }
                RepoRequest::ReplaceAll {
                    mut records,
                    respond_to,
                } => {
                    T::sort(&mut records);
                    let count = records.len();
                    match self.store.save(T::SLOT, &records) {
                        Ok(()) => {
                            info!(record_type, count, "Collection replaced");
                            let _ = respond_to.send(Ok(count));
                        }
                        Err(e) => {
                            warn!(record_type, error = %e, "ReplaceAll failed");
                            let _ = respond_to.send(Err(e.into()));
                        }
                    }
                }
            }
        }

        info!(record_type, "Repository shut down");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe, cloneable handle for sending requests to a [`RepositoryActor`].
#[derive(Clone)]
pub struct RepositoryClient<T: StoreRecord> {
    sender: mpsc::Sender<RepoRequest<T>>,
}

impl<T: StoreRecord> RepositoryClient<T> {
    pub fn new(sender: mpsc::Sender<RepoRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RepositoryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepoRequest::FindById { id, respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    pub async fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepoRequest::FindAll { respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    pub async fn insert(&self, record: T) -> Result<T, RepositoryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepoRequest::Insert { record, respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    pub async fn update(&self, record: T) -> Result<T, RepositoryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepoRequest::Update { record, respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    pub async fn exists_by_id(&self, id: T::Id) -> Result<bool, RepositoryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepoRequest::ExistsById { id, respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    pub async fn delete_by_id(&self, id: T::Id) -> Result<bool, RepositoryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepoRequest::DeleteById { id, respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    pub async fn replace_all(&self, records: Vec<T>) -> Result<usize, RepositoryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepoRequest::ReplaceAll {
                records,
                respond_to,
            })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Bookmark {
        id: u32,
        url: String,
    }

    impl StoreRecord for Bookmark {
        type Id = u32;

        const SLOT: &'static str = "bookmarks.json";

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn bookmark(id: u32, url: &str) -> Bookmark {
        Bookmark {
            id,
            url: url.to_string(),
        }
    }

    fn spawn_repo(dir: &std::path::Path) -> RepositoryClient<Bookmark> {
        let (actor, client) = RepositoryActor::<Bookmark>::new(FileStore::new(dir), 10);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn insert_then_find() {
        let dir = tempfile::tempdir().unwrap();
        let repo = spawn_repo(dir.path());

        assert!(repo.find_all().await.unwrap().is_empty());

        repo.insert(bookmark(1, "https://example.com")).await.unwrap();
        repo.insert(bookmark(2, "https://example.org")).await.unwrap();

        let found = repo.find_by_id(2).await.unwrap();
        assert_eq!(found.unwrap().url, "https://example.org");
        assert!(repo.find_by_id(99).await.unwrap().is_none());
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_replaces_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = spawn_repo(dir.path());

        repo.insert(bookmark(1, "https://old.example")).await.unwrap();
        repo.update(bookmark(1, "https://new.example")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].url, "https://new.example");
    }

    #[tokio::test]
    async fn exists_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let repo = spawn_repo(dir.path());

        repo.insert(bookmark(7, "https://example.com")).await.unwrap();
        assert!(repo.exists_by_id(7).await.unwrap());

        assert!(repo.delete_by_id(7).await.unwrap());
        assert!(!repo.exists_by_id(7).await.unwrap());
        assert!(!repo.delete_by_id(7).await.unwrap());
    }

    #[tokio::test]
    async fn replace_all_overwrites_the_collection() {
        let dir = tempfile::tempdir().unwrap();
        let repo = spawn_repo(dir.path());

        repo.insert(bookmark(1, "https://example.com")).await.unwrap();
        let count = repo
            .replace_all(vec![bookmark(10, "https://a.example"), bookmark(11, "https://b.example")])
            .await
            .unwrap();
        assert_eq!(count, 2);

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(repo.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn collection_survives_a_new_task_over_the_same_slot() {
        let dir = tempfile::tempdir().unwrap();

        let repo = spawn_repo(dir.path());
        repo.insert(bookmark(1, "https://example.com")).await.unwrap();
        drop(repo);

        let repo = spawn_repo(dir.path());
        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![bookmark(1, "https://example.com")]);
    }
}
