//! Catalog queries and stock management.

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::model::{Product, ProductId};
use crate::repository::{ProductRepository, RepositoryError, RepositoryHandle};

/// Errors that can occur during product operations.
#[derive(Debug, Error)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// A stock quantity must be at least 1.
    #[error("Quantity must be positive: {0}")]
    InvalidQuantity(u32),

    /// There is not enough stock to cover the request.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// A search keyword must not be empty.
    #[error("Search keyword must not be empty")]
    InvalidKeyword,

    /// A price range must be non-negative and not inverted.
    #[error("Invalid price range: {min} to {max}")]
    InvalidPriceRange { min: f64, max: f64 },

    /// The product data provided is invalid.
    #[error("Invalid product: {0}")]
    InvalidProduct(&'static str),

    /// An underlying repository error occurred.
    #[error("Product repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Business rules for the catalog.
#[derive(Clone)]
pub struct ProductService {
    products: ProductRepository,
}

impl ProductService {
    pub fn new(products: ProductRepository) -> Self {
        Self { products }
    }

    /// The full catalog (seeded on first read).
    pub async fn all_products(&self) -> Result<Vec<Product>, ProductError> {
        Ok(self.products.find_all().await?)
    }

    /// Catalog entries with at least one unit in stock.
    pub async fn available_products(&self) -> Result<Vec<Product>, ProductError> {
        let products = self.products.find_all().await?;
        Ok(products.into_iter().filter(Product::in_stock).collect())
    }

    /// One product by id. The zero id is never valid.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        if id.0 == 0 {
            return Err(ProductError::NotFound(id));
        }
        self.products
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// The unit price of a product.
    pub async fn price_of(&self, id: ProductId) -> Result<f64, ProductError> {
        Ok(self.get_product(id).await?.price)
    }

    /// Purchase-feasibility check. Never fails: a zero quantity, an unknown
    /// id or a repository error all read as "not available".
    pub async fn check_stock(&self, id: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            warn!(%id, quantity, "Rejected zero-quantity stock check");
            return false;
        }

        match self.products.find_by_id(id).await {
            Ok(Some(product)) => {
                let available = product.stock >= quantity;
                debug!(%id, stock = product.stock, quantity, available, "Stock check");
                available
            }
            Ok(None) => {
                debug!(%id, "Stock check against unknown product");
                false
            }
            Err(e) => {
                warn!(%id, error = %e, "Stock check failed");
                false
            }
        }
    }

    /// Decrements stock by `quantity` and persists the product.
    #[instrument(skip(self))]
    pub async fn update_stock(&self, id: ProductId, quantity: u32) -> Result<(), ProductError> {
        if quantity == 0 {
            return Err(ProductError::InvalidQuantity(quantity));
        }

        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if product.stock < quantity {
            return Err(ProductError::InsufficientStock {
                requested: quantity,
                available: product.stock,
            });
        }

        let old_stock = product.stock;
        product.stock -= quantity;
        let new_stock = product.stock;
        self.products.update(product).await?;

        info!(%id, old_stock, new_stock, "Stock decremented");
        Ok(())
    }

    /// Increments stock by `quantity` and persists the product.
    #[instrument(skip(self))]
    pub async fn add_stock(&self, id: ProductId, quantity: u32) -> Result<(), ProductError> {
        if quantity == 0 {
            return Err(ProductError::InvalidQuantity(quantity));
        }

        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let old_stock = product.stock;
        product.stock += quantity;
        let new_stock = product.stock;
        self.products.update(product).await?;

        info!(%id, old_stock, new_stock, "Stock added");
        Ok(())
    }

    /// Case-insensitive substring search over product names.
    pub async fn search_by_name(&self, keyword: &str) -> Result<Vec<Product>, ProductError> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(ProductError::InvalidKeyword);
        }

        let products = self.products.find_all().await?;
        let matches: Vec<Product> = products
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&keyword))
            .collect();

        debug!(%keyword, count = matches.len(), "Name search");
        Ok(matches)
    }

    /// Products priced within `[min, max]`.
    pub async fn by_price_range(&self, min: f64, max: f64) -> Result<Vec<Product>, ProductError> {
        if min < 0.0 || max < 0.0 || min > max {
            return Err(ProductError::InvalidPriceRange { min, max });
        }

        let products = self.products.find_all().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.price >= min && p.price <= max)
            .collect())
    }

    /// Products whose stock is at or below `threshold`.
    pub async fn low_stock(&self, threshold: u32) -> Result<Vec<Product>, ProductError> {
        let products = self.products.find_all().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.stock <= threshold)
            .collect())
    }

    /// Admin add: assigns the next free id and appends to the catalog.
    #[instrument(skip(self, name))]
    pub async fn add_product(
        &self,
        name: &str,
        price: f64,
        stock: u32,
    ) -> Result<Product, ProductError> {
        if name.trim().is_empty() {
            return Err(ProductError::InvalidProduct("name must not be empty"));
        }
        if price <= 0.0 {
            return Err(ProductError::InvalidProduct("price must be positive"));
        }

        let next_id = self
            .products
            .find_all()
            .await?
            .iter()
            .map(|p| p.id.0)
            .max()
            .unwrap_or(0)
            + 1;

        let product = self
            .products
            .insert(Product::new(ProductId(next_id), name.trim(), price, stock))
            .await?;

        info!(id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryActor;
    use crate::store::FileStore;

    fn file_backed(dir: &std::path::Path) -> ProductService {
        let (actor, client) = RepositoryActor::<Product>::new(FileStore::new(dir), 10);
        tokio::spawn(actor.run());
        ProductService::new(ProductRepository::new(client))
    }

    #[tokio::test]
    async fn zero_and_unknown_ids_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let products = file_backed(dir.path());

        assert!(matches!(
            products.get_product(ProductId(0)).await,
            Err(ProductError::NotFound(_))
        ));
        assert!(matches!(
            products.get_product(ProductId(42)).await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn check_stock_never_fails() {
        let dir = tempfile::tempdir().unwrap();
        let products = file_backed(dir.path());

        assert!(products.check_stock(ProductId(1), 10).await);
        assert!(!products.check_stock(ProductId(1), 11).await);
        assert!(!products.check_stock(ProductId(1), 0).await);
        assert!(!products.check_stock(ProductId(42), 1).await);
    }

    #[tokio::test]
    async fn stock_decrement_and_increment() {
        let dir = tempfile::tempdir().unwrap();
        let products = file_backed(dir.path());

        products.update_stock(ProductId(1), 4).await.unwrap();
        assert_eq!(products.get_product(ProductId(1)).await.unwrap().stock, 6);

        products.add_stock(ProductId(1), 10).await.unwrap();
        assert_eq!(products.get_product(ProductId(1)).await.unwrap().stock, 16);
    }

    #[tokio::test]
    async fn stock_decrement_guards() {
        let dir = tempfile::tempdir().unwrap();
        let products = file_backed(dir.path());

        assert!(matches!(
            products.update_stock(ProductId(1), 0).await,
            Err(ProductError::InvalidQuantity(0))
        ));
        assert!(matches!(
            products.update_stock(ProductId(42), 1).await,
            Err(ProductError::NotFound(_))
        ));
        assert!(matches!(
            products.update_stock(ProductId(1), 11).await,
            Err(ProductError::InsufficientStock {
                requested: 11,
                available: 10
            })
        ));

        // A failed decrement leaves the stock untouched.
        assert_eq!(products.get_product(ProductId(1)).await.unwrap().stock, 10);
    }

    #[tokio::test]
    async fn price_lookup_follows_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let products = file_backed(dir.path());

        assert_eq!(products.price_of(ProductId(2)).await.unwrap(), 30_000.0);
        assert!(matches!(
            products.price_of(ProductId(0)).await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn name_search_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let products = file_backed(dir.path());

        let hits = products.search_by_name("LAP").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Laptop");

        assert!(products.search_by_name("zzz").await.unwrap().is_empty());
        assert!(matches!(
            products.search_by_name("   ").await,
            Err(ProductError::InvalidKeyword)
        ));
    }

    #[tokio::test]
    async fn price_range_validates_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let products = file_backed(dir.path());

        assert!(matches!(
            products.by_price_range(-1.0, 100.0).await,
            Err(ProductError::InvalidPriceRange { .. })
        ));
        assert!(matches!(
            products.by_price_range(100.0, 50.0).await,
            Err(ProductError::InvalidPriceRange { .. })
        ));

        // Mouse (30k), USB Drive (25k) and Earphones (50k) fall in range.
        let hits = products.by_price_range(25_000.0, 50_000.0).await.unwrap();
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mouse", "Earphones", "USB Drive"]);
    }

    #[tokio::test]
    async fn low_stock_listing() {
        let dir = tempfile::tempdir().unwrap();
        let products = file_backed(dir.path());

        let low = products.low_stock(15).await.unwrap();
        let ids: Vec<u32> = low.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 6]); // Laptop (10) and Webcam (15)
    }

    #[tokio::test]
    async fn add_product_assigns_the_next_free_id() {
        let dir = tempfile::tempdir().unwrap();
        let products = file_backed(dir.path());

        let added = products.add_product("Headset", 90_000.0, 40).await.unwrap();
        assert_eq!(added.id, ProductId(9));
        assert_eq!(products.all_products().await.unwrap().len(), 9);

        assert!(matches!(
            products.add_product("  ", 90_000.0, 40).await,
            Err(ProductError::InvalidProduct(_))
        ));
        assert!(matches!(
            products.add_product("Headset", 0.0, 40).await,
            Err(ProductError::InvalidProduct(_))
        ));
    }

    #[tokio::test]
    async fn available_products_excludes_sold_out_entries() {
        let dir = tempfile::tempdir().unwrap();
        let products = file_backed(dir.path());

        products.update_stock(ProductId(6), 15).await.unwrap();

        let available = products.available_products().await.unwrap();
        assert_eq!(available.len(), 7);
        assert!(available.iter().all(|p| p.id != ProductId(6)));
    }
}
