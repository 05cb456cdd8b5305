//! Common types shared across dimension-search components.

pub mod error;

pub use error::{Error, Result};
