//! Read-only composite views over the circulation state.

pub mod service;
pub mod views;

pub use service::QueryService;
pub use views::{
    ActiveLoanPreview, BookDetail, BookSummary, LoanDetail, LoanStats, OverdueLoan, UserDetail,
    UserSummary,
};
