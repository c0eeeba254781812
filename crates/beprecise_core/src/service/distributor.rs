//! Time distribution of a task's total effort.
//!
//! # Responsibility
//! - Turn `(cadence, total, deadline, today)` into a per-period target.
//!
//! # Invariants
//! - Results round up; a task is never under-allocated over its full span.
//! - Period divisors are clamped to at least 1, so deadlines in the past make
//!   the whole total due in the current period instead of dividing by zero.

use crate::model::task::Cadence;
use chrono::{Datelike, NaiveDate};

const DAYS_PER_WEEK: i64 = 7;

/// Computes the cached `daily_minutes` target for a task.
///
/// - `Daily`: the full total, every day.
/// - `Weekly`: total spread over the weeks left, see [`weeks_left`].
/// - `Monthly`: total spread over the months left, see [`months_left`].
pub fn distribute(
    cadence: Cadence,
    total_minutes: i64,
    deadline: NaiveDate,
    today: NaiveDate,
) -> i64 {
    match cadence {
        Cadence::Daily => total_minutes,
        Cadence::Weekly => ceil_div(total_minutes, weeks_left(deadline, today)),
        Cadence::Monthly => ceil_div(total_minutes, months_left(deadline, today)),
    }
}

/// Started weeks between today and the deadline, both days inclusive.
///
/// Returns 1 when the deadline is this week or already passed.
pub fn weeks_left(deadline: NaiveDate, today: NaiveDate) -> i64 {
    let days_left = (deadline - today).num_days() + 1;
    if days_left <= 0 {
        return 1;
    }
    (days_left + DAYS_PER_WEEK - 1) / DAYS_PER_WEEK
}

/// Calendar months between today and the deadline, counting the deadline's
/// partial month when its day-of-month is later than today's.
///
/// Floored at 1.
pub fn months_left(deadline: NaiveDate, today: NaiveDate) -> i64 {
    let years = i64::from(deadline.year()) - i64::from(today.year());
    let months = i64::from(deadline.month()) - i64::from(today.month());
    let mut total = years * 12 + months;
    if deadline.day() > today.day() {
        total += 1;
    }
    total.max(1)
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    let divisor = divisor.max(1);
    let quotient = value / divisor;
    if value % divisor > 0 {
        quotient + 1
    } else {
        quotient
    }
}
