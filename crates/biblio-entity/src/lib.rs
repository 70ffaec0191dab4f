//! # biblio-entity
//!
//! Domain entity models for Biblio. Every struct in this crate represents
//! a stored row or a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`.

pub mod audit;
pub mod book;
pub mod loan;
pub mod user;
