//! Core for the customers service.
//!
//! Holds the `Customer` record, the image payload types, the storage ports
//! (repository and image store traits) and their error types. Nothing in this
//! crate performs I/O; backends live in the `customers` crate.

pub mod customer;
pub mod storage;
pub mod timestamp;
