use tracing::instrument;

use crate::model::{Order, OrderId};
use crate::repository::{RepositoryClient, RepositoryError, RepositoryHandle};

/// Repository for the append-only order collection.
#[derive(Clone)]
pub struct OrderRepository {
    inner: RepositoryClient<Order>,
}

impl OrderRepository {
    pub fn new(inner: RepositoryClient<Order>) -> Self {
        Self { inner }
    }

    /// The next order identifier: persisted maximum + 1, or 1 for an empty
    /// collection.
    ///
    /// Recomputed from the slot on every call — an in-process counter would
    /// reissue ids after a restart.
    #[instrument(skip(self))]
    pub async fn next_order_id(&self) -> Result<OrderId, RepositoryError> {
        let orders = self.inner.find_all().await?;
        let max = orders.iter().map(|o| o.id.0).max().unwrap_or(0);
        Ok(OrderId(max + 1))
    }

    /// Every order placed by `user_id`, in issuance order.
    #[instrument(skip(self))]
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Order>, RepositoryError> {
        let orders = self.inner.find_all().await?;
        Ok(orders.into_iter().filter(|o| o.user_id == user_id).collect())
    }
}

impl RepositoryHandle<Order> for OrderRepository {
    fn inner(&self) -> &RepositoryClient<Order> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;
    use crate::repository::RepositoryActor;
    use crate::store::FileStore;

    fn spawn_repo(dir: &std::path::Path) -> OrderRepository {
        let (actor, client) = RepositoryActor::<Order>::new(FileStore::new(dir), 10);
        tokio::spawn(actor.run());
        OrderRepository::new(client)
    }

    fn order(id: u32, user_id: &str) -> Order {
        Order::new(OrderId(id), user_id, ProductId(1), 1, 1_500_000.0)
    }

    #[tokio::test]
    async fn next_id_starts_at_one() {
        let dir = tempfile::tempdir().unwrap();
        let repo = spawn_repo(dir.path());

        assert_eq!(repo.next_order_id().await.unwrap(), OrderId(1));
    }

    #[tokio::test]
    async fn next_id_follows_the_persisted_maximum() {
        let dir = tempfile::tempdir().unwrap();
        let repo = spawn_repo(dir.path());

        repo.insert(order(1, "alice1")).await.unwrap();
        repo.insert(order(7, "bob22")).await.unwrap();

        assert_eq!(repo.next_order_id().await.unwrap(), OrderId(8));

        // A fresh repository over the same slot derives the same answer.
        drop(repo);
        let repo = spawn_repo(dir.path());
        assert_eq!(repo.next_order_id().await.unwrap(), OrderId(8));
    }

    #[tokio::test]
    async fn find_by_user_filters_other_users_out() {
        let dir = tempfile::tempdir().unwrap();
        let repo = spawn_repo(dir.path());

        repo.insert(order(1, "alice1")).await.unwrap();
        repo.insert(order(2, "bob22")).await.unwrap();
        repo.insert(order(3, "alice1")).await.unwrap();

        let mine = repo.find_by_user("alice1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|o| o.user_id == "alice1"));
        assert!(repo.find_by_user("nobody").await.unwrap().is_empty());
    }
}
