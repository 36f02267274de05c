//! Leave lifecycle engine: the one place that mutates ledger rows and
//! employee balances.
//!
//! Both state-changing operations run under a per-employee async mutex so
//! that the overlap check of `submit` and the balance read-check-deduct of
//! `transition` are serialized per employee. Without it, two concurrent
//! approvals could both pass the balance check against a stale read and
//! jointly overdraw the balance.

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use super::validator::{self, duration_days};
use crate::error::Rejection;
use crate::model::{LeaveRequest, LeaveStatus};
use crate::store::{EmployeeDirectory, LeaveLedger};

/// Candidate submission as it arrives from the boundary. Fields are
/// optional so the validator can report which one is missing.
#[derive(Debug, Clone, Default)]
pub struct SubmitLeave {
    pub employee_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

pub struct LeaveEngine {
    directory: Arc<dyn EmployeeDirectory>,
    ledger: Arc<dyn LeaveLedger>,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl LeaveEngine {
    pub fn new(directory: Arc<dyn EmployeeDirectory>, ledger: Arc<dyn LeaveLedger>) -> Self {
        Self {
            directory,
            ledger,
            locks: DashMap::new(),
        }
    }

    fn employee_lock(&self, employee_id: Uuid) -> Arc<Mutex<()>> {
        self.locks.entry(employee_id).or_default().clone()
    }

    /// Validate and persist a new request. No balance is deducted here;
    /// balance is only affected at approval.
    pub async fn submit(&self, candidate: SubmitLeave) -> Result<LeaveRequest, Rejection> {
        // Presence failures never reach the store, so skip the lock when
        // there is no employee id to key it on.
        let lock = candidate.employee_id.map(|id| self.employee_lock(id));
        let _guard = match &lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let today = Utc::now().date_naive();
        let accepted = validator::validate_submission(
            self.directory.as_ref(),
            self.ledger.as_ref(),
            today,
            candidate.employee_id,
            candidate.start_date,
            candidate.end_date,
            candidate.reason.as_deref(),
        )
        .await?;

        let now = Utc::now();
        let request = LeaveRequest {
            id: Uuid::new_v4(),
            // presence was just validated
            employee_id: candidate.employee_id.ok_or(Rejection::MissingField("employee_id"))?,
            start_date: candidate.start_date.ok_or(Rejection::MissingField("start_date"))?,
            end_date: candidate.end_date.ok_or(Rejection::MissingField("end_date"))?,
            reason: candidate.reason.unwrap_or_default().trim().to_string(),
            status: LeaveStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let request = self.ledger.insert(request).await?;
        info!(
            leave_id = %request.id,
            employee_id = %request.employee_id,
            duration = accepted.duration_days,
            "leave request submitted"
        );
        Ok(request)
    }

    /// Move a pending request into a terminal state. Approval re-verifies
    /// the balance against the current employee record and deducts it;
    /// rejection never touches the balance.
    pub async fn transition(
        &self,
        leave_id: Uuid,
        new_status: LeaveStatus,
    ) -> Result<LeaveRequest, Rejection> {
        if !new_status.is_terminal() {
            return Err(Rejection::InvalidStatus);
        }

        let request = self
            .ledger
            .find_by_id(leave_id)
            .await?
            .ok_or(Rejection::LeaveNotFound)?;

        let lock = self.employee_lock(request.employee_id);
        let _guard = lock.lock().await;

        // Re-read under the lock; a concurrent transition may have won.
        let mut request = self
            .ledger
            .find_by_id(leave_id)
            .await?
            .ok_or(Rejection::LeaveNotFound)?;
        if request.status.is_terminal() {
            return Err(Rejection::AlreadyProcessed);
        }

        request.status = new_status;
        request.updated_at = Utc::now();

        if new_status == LeaveStatus::Approved {
            // Balance may have been consumed since submission, and the
            // employee may be gone entirely; re-check both.
            let mut employee = self
                .directory
                .find_by_id(request.employee_id)
                .await?
                .ok_or(Rejection::EmployeeNotFound)?;

            let duration = duration_days(request.start_date, request.end_date);
            if employee.leave_availability < duration {
                return Err(Rejection::InsufficientBalance);
            }

            employee.leave_availability -= duration;
            // deduction and status flip land as one atomic unit
            self.ledger.commit_approval(&request, &employee).await?;
            info!(
                leave_id = %request.id,
                employee_id = %employee.id,
                duration,
                balance = employee.leave_availability,
                "leave approved, balance deducted"
            );
        } else {
            self.ledger.save(&request).await?;
            info!(leave_id = %request.id, "leave rejected");
        }

        Ok(request)
    }
}
