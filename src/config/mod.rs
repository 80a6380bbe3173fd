//! Configuration module for the hexel CLI
//!
//! Provides types, discovery and loading for `hexel.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
