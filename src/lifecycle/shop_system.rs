use std::path::PathBuf;

use tracing::{error, info};

use crate::model::{Order, Product, User};
use crate::repository::{
    OrderRepository, ProductRepository, RepositoryActor, UserRepository,
};
use crate::service::{OrderService, ProductService, UserService};
use crate::store::FileStore;

/// Queue depth for the repository request channels.
const CHANNEL_BUFFER: usize = 32;

/// The main runtime orchestrator for the shop.
///
/// `ShopSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the repository tasks
/// - **Dependency Wiring**: one repository task per persisted collection,
///   three services on top, with `OrderService` composed from the other two
///
/// # Example
///
/// ```ignore
/// let system = ShopSystem::new("data");
///
/// let user = system.users.register("alice1", "secret", "Alice").await?;
/// let order = system.orders.create_order(&user.id, ProductId(5), 2).await?;
///
/// system.shutdown().await?;
/// ```
pub struct ShopSystem {
    /// Account registration, login and balances.
    pub users: UserService,

    /// Catalog queries and stock management.
    pub products: ProductService,

    /// Order placement and history.
    pub orders: OrderService,

    /// Task handles for the repository tasks (used for graceful shutdown).
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Builds the stores, spawns one repository task per collection and
    /// wires the services together.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();

        let (user_actor, user_client) =
            RepositoryActor::<User>::new(FileStore::new(&data_dir), CHANNEL_BUFFER);
        let (product_actor, product_client) =
            RepositoryActor::<Product>::new(FileStore::new(&data_dir), CHANNEL_BUFFER);
        let (order_actor, order_client) =
            RepositoryActor::<Order>::new(FileStore::new(&data_dir), CHANNEL_BUFFER);

        let handles = vec![
            tokio::spawn(user_actor.run()),
            tokio::spawn(product_actor.run()),
            tokio::spawn(order_actor.run()),
        ];

        let users = UserService::new(UserRepository::new(user_client));
        let products = ProductService::new(ProductRepository::new(product_client));
        let orders = OrderService::new(
            OrderRepository::new(order_client),
            products.clone(),
            users.clone(),
        );

        Self {
            users,
            products,
            orders,
            handles,
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the services closes every request channel; each repository
    /// task drains its queue, sees the closed channel and exits. Returns an
    /// error if any task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.orders);
        drop(self.users);
        drop(self.products);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Repository task failed: {e:?}");
                return Err(format!("Repository task failed: {e:?}"));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
