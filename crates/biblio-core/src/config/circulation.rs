//! Loan policy configuration.

use serde::{Deserialize, Serialize};

/// Circulation policy: loan period, borrower cap, and fine accrual.
///
/// Fines accrue at a flat daily rate up to a cap; there is no prorating and
/// no grace period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CirculationConfig {
    /// Loan period in days; the due date is `loan_date + loan_period_days`.
    #[serde(default = "default_loan_period_days")]
    pub loan_period_days: i64,
    /// Maximum number of active loans a single borrower may hold.
    #[serde(default = "default_max_active_loans")]
    pub max_active_loans: usize,
    /// Fine accrued per whole day overdue.
    #[serde(default = "default_fine_per_day")]
    pub fine_per_day: f64,
    /// Upper bound on the fine for a single loan.
    #[serde(default = "default_fine_cap")]
    pub fine_cap: f64,
}

impl Default for CirculationConfig {
    fn default() -> Self {
        Self {
            loan_period_days: default_loan_period_days(),
            max_active_loans: default_max_active_loans(),
            fine_per_day: default_fine_per_day(),
            fine_cap: default_fine_cap(),
        }
    }
}

fn default_loan_period_days() -> i64 {
    14
}

fn default_max_active_loans() -> usize {
    5
}

fn default_fine_per_day() -> f64 {
    0.50
}

fn default_fine_cap() -> f64 {
    25.00
}
