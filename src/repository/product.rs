use tracing::{info, instrument};

use crate::model::{Product, ProductId};
use crate::repository::{RepositoryClient, RepositoryError, RepositoryHandle};

/// Repository for the product catalog.
///
/// The catalog is never observed empty: the demo products are written the
/// first time the collection is read while the slot has no records.
#[derive(Clone)]
pub struct ProductRepository {
    inner: RepositoryClient<Product>,
}

impl ProductRepository {
    pub fn new(inner: RepositoryClient<Product>) -> Self {
        Self { inner }
    }

    /// The demo catalog written when the collection is first seen empty.
    fn seed_catalog() -> Vec<Product> {
        vec![
            Product::new(ProductId(1), "Laptop", 1_500_000.0, 10),
            Product::new(ProductId(2), "Mouse", 30_000.0, 50),
            Product::new(ProductId(3), "Keyboard", 80_000.0, 30),
            Product::new(ProductId(4), "Monitor", 400_000.0, 20),
            Product::new(ProductId(5), "Earphones", 50_000.0, 100),
            Product::new(ProductId(6), "Webcam", 120_000.0, 15),
            Product::new(ProductId(7), "USB Drive", 25_000.0, 80),
            Product::new(ProductId(8), "External HDD", 150_000.0, 25),
        ]
    }

    /// Loads every product, seeding the demo catalog if the slot is empty.
    ///
    /// Shadows the generic `find_all` on purpose: every read path goes
    /// through the seeding check, so callers never see an empty catalog.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = self.inner.find_all().await?;
        if !products.is_empty() {
            return Ok(products);
        }

        info!("Product catalog empty, seeding demo products");
        self.inner.replace_all(Self::seed_catalog()).await?;
        self.inner.find_all().await
    }

    /// Fetch one product, seeding the catalog first if needed.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.find_all().await?.into_iter().find(|p| p.id == id))
    }
}

impl RepositoryHandle<Product> for ProductRepository {
    fn inner(&self) -> &RepositoryClient<Product> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryActor;
    use crate::store::FileStore;

    fn spawn_repo(dir: &std::path::Path) -> ProductRepository {
        let (actor, client) = RepositoryActor::<Product>::new(FileStore::new(dir), 10);
        tokio::spawn(actor.run());
        ProductRepository::new(client)
    }

    #[tokio::test]
    async fn find_all_seeds_the_demo_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let repo = spawn_repo(dir.path());

        let products = repo.find_all().await.unwrap();
        assert_eq!(products.len(), 8);

        let laptop = &products[0];
        assert_eq!(laptop.id, ProductId(1));
        assert_eq!(laptop.price, 1_500_000.0);
        assert_eq!(laptop.stock, 10);
    }

    #[tokio::test]
    async fn find_by_id_works_on_a_cold_slot() {
        let dir = tempfile::tempdir().unwrap();
        let repo = spawn_repo(dir.path());

        let earphones = repo.find_by_id(ProductId(5)).await.unwrap().unwrap();
        assert_eq!(earphones.price, 50_000.0);
        assert_eq!(earphones.stock, 100);

        assert!(repo.find_by_id(ProductId(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_keeps_the_catalog_ordered_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = spawn_repo(dir.path());

        let mut webcam = repo.find_by_id(ProductId(6)).await.unwrap().unwrap();
        webcam.stock = 3;
        repo.update(webcam).await.unwrap();

        let ids: Vec<u32> = repo.find_all().await.unwrap().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[tokio::test]
    async fn seeding_happens_once() {
        let dir = tempfile::tempdir().unwrap();
        let repo = spawn_repo(dir.path());

        let mut laptop = repo.find_by_id(ProductId(1)).await.unwrap().unwrap();
        laptop.stock = 0;
        repo.update(laptop).await.unwrap();

        // A depleted catalog entry must not be re-seeded back to stock 10.
        let laptop = repo.find_by_id(ProductId(1)).await.unwrap().unwrap();
        assert_eq!(laptop.stock, 0);
    }
}
