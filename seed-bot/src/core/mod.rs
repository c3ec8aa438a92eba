//! Core: error taxonomy and logging setup.

pub mod error;
pub mod logger;

pub use error::{Result, SeedError};
pub use logger::init_tracing;
