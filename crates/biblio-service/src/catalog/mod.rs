//! Catalog operations — book records and copy counters.

pub mod service;

pub use service::CatalogService;
