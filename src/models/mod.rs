//! Data Models
//!
//! Contains the data structures used by the application layer.

pub mod chat;
pub mod response;
pub mod settings;

pub use chat::*;
pub use response::*;
pub use settings::*;
