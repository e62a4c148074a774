//! Common utilities module
//!
//! This module contains the error type shared by every mapping stage.

pub mod error;

pub use error::{MappingError, Result};
