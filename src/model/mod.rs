//! Persisted domain records: [`User`], [`Product`] and [`Order`].

pub mod order;
pub mod product;
pub mod user;

pub use order::*;
pub use product::*;
pub use user::*;
