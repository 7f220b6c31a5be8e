//! Typed record storage.
//!
//! Tools talk to [`Repository`] trait objects so tests can swap the
//! backend for an in-memory store.

mod backend_repository;
mod traits;

pub use backend_repository::BackendRepository;
pub use traits::Repository;
