//! # biblio-core
//!
//! Core crate for Biblio. Contains configuration schemas, typed
//! identifiers, pagination types, the injectable clock, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Biblio crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
