//! # Repository layer
//!
//! File-backed repositories in a single-writer style.
//!
//! The generic machinery lives in [`core`]: a [`RepositoryActor`] owns one
//! slot of the [`FileStore`](crate::store::FileStore) and processes requests
//! sequentially, so every load-mutate-save cycle on a collection goes
//! through exactly one task. The typed wrappers ([`UserRepository`],
//! [`ProductRepository`], [`OrderRepository`]) hide the message passing and
//! add the operations specific to their collection.

pub mod core;
pub mod handle;
pub mod mock;
mod order;
mod product;
mod user;

pub use self::core::{
    RepoRequest, RepositoryActor, RepositoryClient, RepositoryError, Response, StoreRecord,
};
pub use handle::RepositoryHandle;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use user::UserRepository;
