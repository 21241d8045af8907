//! Database layer - connection pool, repositories and the store seam
//!
//! # Design Principles
//!
//! - Connection pool (default 10 connections) - no Arc<Mutex<Connection>>
//! - Exactly one statement per operation
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Handlers talk to [`SchoolStore`], never to the pool directly

pub mod pool;
pub mod repos;
pub mod store;
pub mod memory;

pub use pool::{create_pool, create_pool_with_options, PoolConfig};
pub use repos::*;
pub use store::{MySqlStore, SchoolStore};
pub use memory::{default_disciplinas, MemoryStore, DEFAULT_DISCIPLINAS};
