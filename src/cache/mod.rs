//! Caching utilities.
//!
//! The inventory tools keep a short-lived snapshot of the parts table so
//! that repeated fuzzy searches do not re-page the whole collection.

pub mod timed_cache;

pub use timed_cache::TimedCache;
