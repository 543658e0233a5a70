//! Order placement: the one multi-entity commit in the system.

use thiserror::Error;
use tracing::{info, instrument};

use crate::model::{Order, ProductId};
use crate::repository::{OrderRepository, RepositoryError, RepositoryHandle};
use crate::service::{ProductError, ProductService, UserError, UserService};

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// An order must be for at least one unit.
    #[error("Order quantity must be at least 1")]
    InvalidQuantity(u32),

    /// There is not enough stock to cover the order.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The buyer's balance does not cover the total price.
    #[error("Insufficient funds: required {required}, balance {balance}")]
    InsufficientFunds { required: f64, balance: f64 },

    /// A product lookup or mutation failed.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// A user lookup or mutation failed.
    #[error(transparent)]
    User(#[from] UserError),

    /// An underlying repository error occurred.
    #[error("Order repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Coordinates products, users and orders for the multi-entity commit.
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    products: ProductService,
    users: UserService,
}

impl OrderService {
    pub fn new(orders: OrderRepository, products: ProductService, users: UserService) -> Self {
        Self {
            orders,
            products,
            users,
        }
    }

    /// Places one order.
    ///
    /// The first half only validates — nothing is persisted before the stock
    /// decrement, so a failure there leaves every collection unchanged. From
    /// the stock decrement on, the three saves (stock, balance, order) are
    /// independent and there is NO rollback: a failure mid-sequence leaves
    /// the collections inconsistent. Every save failure propagates, so the
    /// caller at least observes that the commit may be partial.
    #[instrument(skip(self))]
    pub async fn create_order(
        &self,
        user_id: &str,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Order, OrderError> {
        // Validation: product, quantity, stock, funds.
        let product = self.products.get_product(product_id).await?;

        if quantity == 0 {
            return Err(OrderError::InvalidQuantity(quantity));
        }

        if !self.products.check_stock(product_id, quantity).await {
            return Err(OrderError::InsufficientStock {
                requested: quantity,
                available: product.stock,
            });
        }

        // The total is frozen here; later price changes never touch it.
        let total_price = product.price * f64::from(quantity);

        let balance = self.users.balance_of(user_id).await?;
        if balance < total_price {
            return Err(OrderError::InsufficientFunds {
                required: total_price,
                balance,
            });
        }

        let order_id = self.orders.next_order_id().await?;
        let order = Order::new(order_id, user_id, product_id, quantity, total_price);

        // Commit: three independent full-collection saves, in this order.
        self.products.update_stock(product_id, quantity).await?;
        self.users.update_balance(user_id, balance - total_price).await?;
        let order = self.orders.insert(order).await?;

        info!(order_id = %order.id, user_id, %product_id, quantity, total_price, "Order placed");
        Ok(order)
    }

    /// Order history for one user.
    pub async fn user_orders(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.find_by_user(user_id).await?)
    }
}
