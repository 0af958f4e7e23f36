//! # Roster Core
//!
//! Core types, error definitions, and the `User` entity shared by every
//! layer of the Roster service.

pub mod error;
pub mod id;
pub mod result;
pub mod timeout;
pub mod user;
pub mod validation;

pub use error::*;
pub use id::*;
pub use result::*;
pub use timeout::*;
pub use user::*;
pub use validation::*;
