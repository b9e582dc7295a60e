//! HTTP handlers for the table explorer.

pub mod explorer;
pub use explorer::*;
