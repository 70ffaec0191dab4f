//! Overdue fine computation.
//!
//! Pure functions shared by loan finalization and the read-side previews;
//! they never touch stored state, so read paths may call them at any
//! frequency.

use chrono::{DateTime, Utc};

use biblio_core::config::circulation::CirculationConfig;

/// Whole days between the due date and the reference time.
///
/// Zero unless `at` is strictly past `due`. Partial days truncate: a loan
/// 4.9 days late counts 4 days.
pub fn days_overdue(due: DateTime<Utc>, at: DateTime<Utc>) -> i64 {
    if at <= due {
        0
    } else {
        (at - due).num_days()
    }
}

/// Fine accrued at `at` for a loan due at `due`.
///
/// Flat daily rate capped at `fine_cap`; 0 when not overdue. The reference
/// time is the return date when finalizing, or "now" when previewing an
/// active loan.
pub fn accrued_fine(policy: &CirculationConfig, due: DateTime<Utc>, at: DateTime<Utc>) -> f64 {
    let days = days_overdue(due, at);
    if days <= 0 {
        0.0
    } else {
        (days as f64 * policy.fine_per_day).min(policy.fine_cap)
    }
}
