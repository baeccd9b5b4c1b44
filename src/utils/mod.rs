//! Utilities
//!
//! Error type and filesystem locations shared by the application layer.

pub mod error;
pub mod paths;

pub use error::*;
pub use paths::*;
