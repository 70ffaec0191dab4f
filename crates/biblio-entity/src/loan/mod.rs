//! Loan domain entities.

pub mod model;

pub use model::{Loan, LoanStatus};
