//! Submission validation pipeline.
//!
//! The checks run in a fixed order and short-circuit on the first failure;
//! later checks assume the invariants established by earlier ones (the
//! overlap query, for instance, relies on the range already being valid).
//! Lookups are read-only, so the rules stay unit-testable without a live
//! store.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::Rejection;
use crate::model::LeaveStatus;
use crate::store::{EmployeeDirectory, LeaveLedger};

/// Statuses that block a new request from occupying the same days.
pub const ACTIVE_STATUSES: [LeaveStatus; 2] = [LeaveStatus::Pending, LeaveStatus::Approved];

pub const MAX_REASON_LEN: usize = 300;

/// Successful validation carries the computed duration so the caller does
/// not recompute it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    pub duration_days: i64,
}

/// Inclusive day count of `[start, end]`. At least 1 for any valid range.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Closed intervals `[a, b]` and `[c, d]` share at least one day iff
/// `a <= d && c <= b`. The single inequality pair subsumes the four
/// contains/overlaps/contained-by cases.
pub fn intervals_overlap(a: NaiveDate, b: NaiveDate, c: NaiveDate, d: NaiveDate) -> bool {
    a <= d && c <= b
}

/// Decide whether a new leave request may be created. `today` is the
/// current date with the time-of-day already discarded.
pub async fn validate_submission(
    directory: &dyn EmployeeDirectory,
    ledger: &dyn LeaveLedger,
    today: NaiveDate,
    employee_id: Option<Uuid>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    reason: Option<&str>,
) -> Result<Accepted, Rejection> {
    // 1. presence
    let employee_id = employee_id.ok_or(Rejection::MissingField("employee_id"))?;
    let start_date = start_date.ok_or(Rejection::MissingField("start_date"))?;
    let end_date = end_date.ok_or(Rejection::MissingField("end_date"))?;
    let reason = reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or(Rejection::MissingField("reason"))?;
    if reason.chars().count() > MAX_REASON_LEN {
        return Err(Rejection::InvalidField {
            field: "reason",
            message: format!("must be at most {MAX_REASON_LEN} characters"),
        });
    }

    // 2. date ordering
    if start_date > end_date {
        return Err(Rejection::InvalidRange);
    }

    // 3. not in the past
    if start_date < today {
        return Err(Rejection::PastDate);
    }

    // 4. employee existence
    let employee = directory
        .find_by_id(employee_id)
        .await?
        .ok_or(Rejection::EmployeeNotFound)?;

    // 5. employment window
    if start_date < employee.joining_date {
        return Err(Rejection::BeforeJoining);
    }

    // 6. overlap against the employee's active requests
    if ledger
        .find_overlap(employee_id, start_date, end_date, &ACTIVE_STATUSES)
        .await?
        .is_some()
    {
        return Err(Rejection::OverlapConflict);
    }

    // 7. balance sufficiency
    let duration = duration_days(start_date, end_date);
    if employee.leave_availability < duration {
        return Err(Rejection::InsufficientBalance);
    }

    Ok(Accepted {
        duration_days: duration,
    })
}
