//! Employee registration: field validation plus the directory insert.
//! Balance mutation is deliberately out of reach here; only the lifecycle
//! engine touches `leave_availability` after creation.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::Rejection;
use crate::model::{DEFAULT_LEAVE_ALLOWANCE, Department, Employee};
use crate::store::EmployeeDirectory;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 30;
pub const EMAIL_MIN_LEN: usize = 5;
pub const EMAIL_MAX_LEN: usize = 254;
pub const MAX_LEAVE_ALLOWANCE: i64 = 365;

/// Registration input as it arrives from the boundary.
#[derive(Debug, Clone, Default)]
pub struct RegisterEmployee {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub leave_allowance: Option<i64>,
}

pub struct EmployeeRegistry {
    directory: Arc<dyn EmployeeDirectory>,
}

impl EmployeeRegistry {
    pub fn new(directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { directory }
    }

    pub async fn register(&self, candidate: RegisterEmployee) -> Result<Employee, Rejection> {
        let full_name = candidate
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(Rejection::MissingField("full_name"))?;
        check_full_name(full_name)?;

        let email = candidate
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(Rejection::MissingField("email"))?;
        check_email(email)?;
        let email = email.to_lowercase();

        let department = candidate
            .department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(Rejection::MissingField("department"))?
            .parse::<Department>()
            .map_err(|_| Rejection::InvalidDepartment)?;

        let joining_date = candidate
            .joining_date
            .ok_or(Rejection::MissingField("joining_date"))?;

        let leave_availability = candidate.leave_allowance.unwrap_or(DEFAULT_LEAVE_ALLOWANCE);
        if !(0..=MAX_LEAVE_ALLOWANCE).contains(&leave_availability) {
            return Err(Rejection::InvalidLeaveAllowance);
        }

        if self.directory.find_by_email(&email).await?.is_some() {
            return Err(Rejection::DuplicateEmail);
        }

        let employee = self
            .directory
            .insert(Employee {
                id: Uuid::new_v4(),
                full_name: full_name.to_string(),
                email,
                department,
                joining_date,
                leave_availability,
            })
            .await?;

        info!(employee_id = %employee.id, department = %employee.department, "employee registered");
        Ok(employee)
    }
}

fn check_full_name(name: &str) -> Result<(), Rejection> {
    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(Rejection::InvalidField {
            field: "full_name",
            message: format!("must be {NAME_MIN_LEN}-{NAME_MAX_LEN} characters"),
        });
    }
    if !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Err(Rejection::InvalidField {
            field: "full_name",
            message: "may contain letters and whitespace only".into(),
        });
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), Rejection> {
    let invalid = |message: &str| Rejection::InvalidField {
        field: "email",
        message: message.into(),
    };

    let len = email.chars().count();
    if !(EMAIL_MIN_LEN..=EMAIL_MAX_LEN).contains(&len) {
        return Err(invalid(&format!(
            "must be {EMAIL_MIN_LEN}-{EMAIL_MAX_LEN} characters"
        )));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid("must contain '@'"));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid("malformed address"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("malformed domain"));
    }
    Ok(())
}
