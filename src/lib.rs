//! # Mini Shop
//!
//! > **A console shopping system over flat-file snapshots.**
//!
//! This crate is a teaching-oriented shop — users, products, orders — whose
//! every collection is persisted as one whole-file snapshot. The interesting
//! part is the order-placement workflow: one operation that checks stock and
//! balance, mutates two independent collections and appends to a third,
//! against a storage layer whose only primitive is "replace the whole file".
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Single writer per collection
//! The store has no partial-write semantics: every mutation is a full
//! load → mutate → save cycle. Two concurrent cycles on the same slot would
//! silently drop one writer's update, so each collection is owned by exactly
//! one repository task and all access is serialized through its channel.
//!
//! ### Generics: The Power of `T`
//! The load-mutate-save plumbing is written **once** in
//! [`repository::RepositoryActor`], generic over anything implementing
//! [`repository::StoreRecord`]. Users, products and orders each contribute
//! only their slot name, id projection and canonical ordering.
//!
//! ### An honest commit
//! Placing an order performs three independent saves (stock, balance, order
//! append) with no rollback — that weakness is inherited from the flat-file
//! layout and kept visible rather than papered over. What the code does
//! guarantee: nothing is persisted before validation passes, and every save
//! failure propagates so a partial commit is observable.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Primitive ([`store`])
//! [`store::FileStore`] loads and saves whole collections. A missing or
//! damaged slot loads as empty; a failed save is an error the caller sees.
//!
//! ### 2. The Engine ([`repository`])
//! The generic repository task and client, plus the typed wrappers
//! ([`repository::UserRepository`], [`repository::ProductRepository`],
//! [`repository::OrderRepository`]) and mock helpers for tests.
//!
//! ### 3. The Rules ([`service`])
//! [`service::UserService`], [`service::ProductService`] and
//! [`service::OrderService`] enforce the invariants: balances and stock
//! never go negative, order totals are frozen at commit, order ids are
//! derived from persisted state.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`lifecycle::ShopSystem`] spawns the repository tasks, wires the
//! services and shuts everything down cleanly.
//!
//! ### 5. The Interface ([`cli`], [`session`])
//! Numbered text menus over an explicit [`session::Session`] value.
//!
//! ## 🚀 Running
//!
//! ```bash
//! # Run with info logs; data lands in ./data
//! RUST_LOG=info cargo run
//!
//! # Use a different data directory
//! MINI_SHOP_DATA_DIR=/tmp/shop cargo run
//! ```

pub mod cli;
pub mod lifecycle;
pub mod model;
pub mod repository;
pub mod service;
pub mod session;
pub mod store;
