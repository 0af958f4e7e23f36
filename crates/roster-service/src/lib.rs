//! # Roster Service
//!
//! Use cases for the user entity and the cache layer that fronts the
//! relational store.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
