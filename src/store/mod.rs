pub mod memory;
pub mod mysql;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::{Employee, LeaveRequest, LeaveStatus};

/// Filter applied by [`LeaveLedger::query`] and [`LeaveLedger::count`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveFilter {
    pub employee_id: Option<Uuid>,
    pub status: Option<LeaveStatus>,
}

/// Owns employee records. Storage and lookup only; all business rules
/// live in the validator and lifecycle engine.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>>;

    /// Lookup by email, case-insensitive.
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>>;

    async fn insert(&self, employee: Employee) -> Result<Employee>;

    /// Persist changes to an existing employee (balance deduction).
    async fn save(&self, employee: &Employee) -> Result<()>;
}

/// Owns leave-request records and their status.
#[async_trait]
pub trait LeaveLedger: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>>;

    /// First request of `employee_id` in one of `statuses` whose inclusive
    /// interval intersects `[start, end]`, if any.
    async fn find_overlap(
        &self,
        employee_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        statuses: &[LeaveStatus],
    ) -> Result<Option<LeaveRequest>>;

    async fn insert(&self, request: LeaveRequest) -> Result<LeaveRequest>;

    /// Persist changes to an existing request (status flip).
    async fn save(&self, request: &LeaveRequest) -> Result<()>;

    /// Persist an approval's write pair as one atomic unit: the deducted
    /// employee balance and the request's status flip land together or
    /// not at all.
    async fn commit_approval(&self, request: &LeaveRequest, employee: &Employee) -> Result<()>;

    /// Page of matching requests ordered by creation time, descending.
    async fn query(&self, filter: &LeaveFilter, skip: u64, limit: u64)
    -> Result<Vec<LeaveRequest>>;

    async fn count(&self, filter: &LeaveFilter) -> Result<i64>;
}

fn matches_filter(request: &LeaveRequest, filter: &LeaveFilter) -> bool {
    if let Some(employee_id) = filter.employee_id {
        if request.employee_id != employee_id {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if request.status != status {
            return false;
        }
    }
    true
}
