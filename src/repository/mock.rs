//! # Mock repositories
//!
//! Utilities for testing services in isolation.
//!
//! ## Testing Strategy
//! A service test usually does not want a real slot on disk: spinning up a
//! [`RepositoryActor`](crate::repository::RepositoryActor) drags file I/O
//! into what is really a business-rule check. Instead, [`mock_client`]
//! returns a client whose receiver half the test keeps. The test inspects
//! the requests arriving on that channel with the `expect_*` helpers and
//! answers them deterministically — success, absence, or a storage failure.

use tokio::sync::mpsc;

use crate::repository::{RepoRequest, RepositoryClient, Response, StoreRecord};

/// Creates a mock client and the receiver for asserting requests.
pub fn mock_client<T: StoreRecord>(
    buffer_size: usize,
) -> (RepositoryClient<T>, mpsc::Receiver<RepoRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RepositoryClient::new(sender), receiver)
}

/// Verifies that the next request is a FindById and hands back its responder.
pub async fn expect_find_by_id<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<RepoRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(RepoRequest::FindById { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Verifies that the next request is an ExistsById.
pub async fn expect_exists_by_id<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<RepoRequest<T>>,
) -> Option<(T::Id, Response<bool>)> {
    match receiver.recv().await {
        Some(RepoRequest::ExistsById { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Verifies that the next request is an Insert.
pub async fn expect_insert<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<RepoRequest<T>>,
) -> Option<(T, Response<T>)> {
    match receiver.recv().await {
        Some(RepoRequest::Insert { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

/// Verifies that the next request is an Update.
pub async fn expect_update<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<RepoRequest<T>>,
) -> Option<(T, Response<T>)> {
    match receiver.recv().await {
        Some(RepoRequest::Update { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[tokio::test]
    async fn scripted_insert_round_trip() {
        let (client, mut receiver) = mock_client::<User>(10);

        let insert_task = tokio::spawn(async move {
            client.insert(User::new("alice1", "secret", "Alice")).await
        });

        let (record, responder) = expect_insert(&mut receiver)
            .await
            .expect("expected an Insert request");
        assert_eq!(record.id, "alice1");
        responder.send(Ok(record.clone())).unwrap();

        let inserted = insert_task.await.unwrap().unwrap();
        assert_eq!(inserted.name, "Alice");
    }
}
