//! Storage Layer
//!
//! JSON config persistence. Session history lives in memory only.

pub mod config;

pub use config::*;
