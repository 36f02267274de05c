//! In-memory store, used when no DATABASE_URL is configured and as the
//! test double for the engine and validator suites. One struct backs both
//! repository traits so an approval can update the employee and the
//! request in a single write section.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EmployeeDirectory, LeaveFilter, LeaveLedger, matches_filter};
use crate::model::{Employee, LeaveRequest, LeaveStatus};

/// Requests are kept in insertion order; `query` walks the vector in
/// reverse, which matches created_at-descending without a sort.
#[derive(Default)]
pub struct InMemoryStore {
    employees: RwLock<HashMap<Uuid, Employee>>,
    requests: RwLock<Vec<LeaveRequest>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test hook: drop an employee out from under pending requests.
    pub async fn remove_employee(&self, id: Uuid) -> Option<Employee> {
        self.employees.write().await.remove(&id)
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        Ok(self.employees.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>> {
        Ok(self
            .employees
            .read()
            .await
            .values()
            .find(|e| e.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert(&self, employee: Employee) -> Result<Employee> {
        self.employees
            .write()
            .await
            .insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn save(&self, employee: &Employee) -> Result<()> {
        let mut employees = self.employees.write().await;
        match employees.get_mut(&employee.id) {
            Some(slot) => {
                *slot = employee.clone();
                Ok(())
            }
            None => Err(anyhow!("employee {} not present", employee.id)),
        }
    }
}

#[async_trait]
impl LeaveLedger for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_overlap(
        &self,
        employee_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        statuses: &[LeaveStatus],
    ) -> Result<Option<LeaveRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .find(|r| {
                r.employee_id == employee_id
                    && statuses.contains(&r.status)
                    // closed intervals [a,b] and [c,d] intersect iff a <= d && c <= b
                    && r.start_date <= end
                    && start <= r.end_date
            })
            .cloned())
    }

    async fn insert(&self, request: LeaveRequest) -> Result<LeaveRequest> {
        self.requests.write().await.push(request.clone());
        Ok(request)
    }

    async fn save(&self, request: &LeaveRequest) -> Result<()> {
        let mut requests = self.requests.write().await;
        match requests.iter_mut().find(|r| r.id == request.id) {
            Some(slot) => {
                *slot = request.clone();
                Ok(())
            }
            None => Err(anyhow!("leave request {} not present", request.id)),
        }
    }

    async fn commit_approval(&self, request: &LeaveRequest, employee: &Employee) -> Result<()> {
        // Both write guards held at once; both slots are located before
        // either is touched, so a failure leaves no partial state.
        let mut employees = self.employees.write().await;
        let mut requests = self.requests.write().await;

        let employee_slot = employees
            .get_mut(&employee.id)
            .ok_or_else(|| anyhow!("employee {} not present", employee.id))?;
        let request_slot = requests
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or_else(|| anyhow!("leave request {} not present", request.id))?;

        *employee_slot = employee.clone();
        *request_slot = request.clone();
        Ok(())
    }

    async fn query(
        &self,
        filter: &LeaveFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<LeaveRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| matches_filter(r, filter))
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &LeaveFilter) -> Result<i64> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .filter(|r| matches_filter(r, filter))
            .count() as i64)
    }
}
