//! Durable state for the blind box plugin.
//!
//! JSON document persistence with warn-and-default read recovery, plus the
//! three stateful stores built on it: the read-only prize catalog, the
//! per-category draw pools, and the per-identity session selections.

pub mod catalog;
pub mod document;
pub mod pool;
pub mod session;

pub use catalog::CatalogStore;
pub use pool::{DrawOutcome, PoolManager};
pub use session::{session_key, SessionManager};
