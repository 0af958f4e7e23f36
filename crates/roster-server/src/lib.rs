//! # Roster Server Library
//!
//! Wiring and lifecycle for the Roster HTTP server: logging setup,
//! component construction and graceful shutdown.

pub mod app;
pub mod logging;
pub mod startup;

pub use app::{shutdown_signal, App, AppBuilder};
