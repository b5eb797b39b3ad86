//! Utility Modules
//!
//! - `assertions`: account validation and checked arithmetic

pub mod assertions;

pub use assertions::*;
