//! In-memory storage backend for testing.
//!
//! Both stores keep their data in HashMaps wrapped in `Arc<RwLock<_>>` and
//! follow the same rules as the AWS backends, including the conditional
//! update check. Nothing is persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use customers::storage::inmemory::InMemoryCustomerRepository;
//!
//! let repo = InMemoryCustomerRepository::new();
//! // Use repo for testing...
//! ```

mod images;
mod repository;

pub use images::InMemoryImageStore;
pub use repository::InMemoryCustomerRepository;
