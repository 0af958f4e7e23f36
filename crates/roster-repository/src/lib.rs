//! # Roster Repository
//!
//! Persistence layer for the `users` table.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>
//! PgUserRepository
//!   ↓  UnitOfWork (one transaction per call)
//! DatabasePool (sqlx PgPool)
//!   ↓
//! PostgreSQL
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;
pub mod unit_of_work;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
pub use unit_of_work::UnitOfWork;
