//! Membership operations — user records and loan accounting.

pub mod service;

pub use service::MembershipService;
