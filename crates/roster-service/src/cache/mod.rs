//! Caching infrastructure for the service layer.
//!
//! [`CacheInterface`] abstracts the key-value store (Redis or in-memory).
//! [`ReadThroughCache`] sits in front of it and applies the degrade-to-miss
//! policy: cache errors are logged and never reach the use cases.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod read_through;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::InMemoryCache;
pub use read_through::{CacheWrite, ReadThroughCache};
pub use redis_cache::{RedisCacheService, DEFAULT_TTL};
