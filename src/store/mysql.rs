//! MySQL-backed store. Selected at startup when DATABASE_URL is set.
//!
//! Expected schema:
//!   employees(id CHAR(36) PK, full_name VARCHAR(30), email VARCHAR(254),
//!             department VARCHAR(32), joining_date DATE,
//!             leave_availability BIGINT)
//!   leave_requests(id CHAR(36) PK, employee_id CHAR(36), start_date DATE,
//!                  end_date DATE, reason VARCHAR(300), status VARCHAR(16),
//!                  created_at TIMESTAMP, updated_at TIMESTAMP)

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::MySqlPool;
use sqlx::prelude::FromRow;
use uuid::Uuid;

use super::{EmployeeDirectory, LeaveFilter, LeaveLedger};
use crate::model::{Department, Employee, LeaveRequest, LeaveStatus};

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .context("failed to connect to database")?;
        Ok(Self { pool })
    }
}

#[derive(FromRow)]
struct EmployeeRow {
    id: String,
    full_name: String,
    email: String,
    department: String,
    joining_date: NaiveDate,
    leave_availability: i64,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = anyhow::Error;

    fn try_from(row: EmployeeRow) -> Result<Self> {
        Ok(Employee {
            id: Uuid::parse_str(&row.id).context("malformed employee id")?,
            department: row
                .department
                .parse::<Department>()
                .map_err(|_| anyhow!("malformed department '{}'", row.department))?,
            full_name: row.full_name,
            email: row.email,
            joining_date: row.joining_date,
            leave_availability: row.leave_availability,
        })
    }
}

#[derive(FromRow)]
struct LeaveRow {
    id: String,
    employee_id: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LeaveRow> for LeaveRequest {
    type Error = anyhow::Error;

    fn try_from(row: LeaveRow) -> Result<Self> {
        Ok(LeaveRequest {
            id: Uuid::parse_str(&row.id).context("malformed leave id")?,
            employee_id: Uuid::parse_str(&row.employee_id).context("malformed employee id")?,
            status: row
                .status
                .parse::<LeaveStatus>()
                .map_err(|_| anyhow!("malformed status '{}'", row.status))?,
            start_date: row.start_date,
            end_date: row.end_date,
            reason: row.reason,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const EMPLOYEE_COLUMNS: &str =
    "id, full_name, email, department, joining_date, leave_availability";
const LEAVE_COLUMNS: &str =
    "id, employee_id, start_date, end_date, reason, status, created_at, updated_at";

#[async_trait]
impl EmployeeDirectory for MySqlStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?");
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("failed to fetch employee")?;
        row.map(Employee::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE LOWER(email) = ?");
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool)
            .await
            .context("failed to fetch employee by email")?;
        row.map(Employee::try_from).transpose()
    }

    async fn insert(&self, employee: Employee) -> Result<Employee> {
        sqlx::query(
            r#"
            INSERT INTO employees
                (id, full_name, email, department, joining_date, leave_availability)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(employee.id.to_string())
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(employee.department.to_string())
        .bind(employee.joining_date)
        .bind(employee.leave_availability)
        .execute(&self.pool)
        .await
        .context("failed to insert employee")?;
        Ok(employee)
    }

    async fn save(&self, employee: &Employee) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET full_name = ?, email = ?, department = ?, joining_date = ?,
                leave_availability = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(employee.department.to_string())
        .bind(employee.joining_date)
        .bind(employee.leave_availability)
        .bind(employee.id.to_string())
        .execute(&self.pool)
        .await
        .context("failed to update employee")?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("employee {} not present", employee.id));
        }
        Ok(())
    }
}

#[async_trait]
impl LeaveLedger for MySqlStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>> {
        let sql = format!("SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = ?");
        let row = sqlx::query_as::<_, LeaveRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("failed to fetch leave request")?;
        row.map(LeaveRequest::try_from).transpose()
    }

    async fn find_overlap(
        &self,
        employee_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        statuses: &[LeaveStatus],
    ) -> Result<Option<LeaveRequest>> {
        if statuses.is_empty() {
            return Ok(None);
        }
        let placeholders = vec!["?"; statuses.len()].join(", ");
        let sql = format!(
            r#"
            SELECT {LEAVE_COLUMNS}
            FROM leave_requests
            WHERE employee_id = ?
              AND status IN ({placeholders})
              AND start_date <= ?
              AND end_date >= ?
            LIMIT 1
            "#,
        );

        let mut query = sqlx::query_as::<_, LeaveRow>(&sql).bind(employee_id.to_string());
        for status in statuses {
            query = query.bind(status.to_string());
        }
        let row = query
            .bind(end)
            .bind(start)
            .fetch_optional(&self.pool)
            .await
            .context("failed to run overlap query")?;
        row.map(LeaveRequest::try_from).transpose()
    }

    async fn insert(&self, request: LeaveRequest) -> Result<LeaveRequest> {
        sqlx::query(
            r#"
            INSERT INTO leave_requests
                (id, employee_id, start_date, end_date, reason, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.id.to_string())
        .bind(request.employee_id.to_string())
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.reason)
        .bind(request.status.to_string())
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .context("failed to insert leave request")?;
        Ok(request)
    }

    async fn save(&self, request: &LeaveRequest) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE leave_requests
            SET status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(request.status.to_string())
        .bind(request.updated_at)
        .bind(request.id.to_string())
        .execute(&self.pool)
        .await
        .context("failed to update leave request")?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("leave request {} not present", request.id));
        }
        Ok(())
    }

    async fn commit_approval(&self, request: &LeaveRequest, employee: &Employee) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to open approval transaction")?;

        let result = sqlx::query(
            r#"
            UPDATE employees
            SET leave_availability = ?
            WHERE id = ?
            "#,
        )
        .bind(employee.leave_availability)
        .bind(employee.id.to_string())
        .execute(&mut *tx)
        .await
        .context("failed to update employee balance")?;
        if result.rows_affected() == 0 {
            // dropping the transaction rolls it back
            return Err(anyhow!("employee {} not present", employee.id));
        }

        let result = sqlx::query(
            r#"
            UPDATE leave_requests
            SET status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(request.status.to_string())
        .bind(request.updated_at)
        .bind(request.id.to_string())
        .execute(&mut *tx)
        .await
        .context("failed to update leave request")?;
        if result.rows_affected() == 0 {
            return Err(anyhow!("leave request {} not present", request.id));
        }

        tx.commit().await.context("failed to commit approval")?;
        Ok(())
    }

    async fn query(
        &self,
        filter: &LeaveFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<LeaveRequest>> {
        let (where_sql, binds) = build_where(filter);
        let sql = format!(
            r#"
            SELECT {LEAVE_COLUMNS}
            FROM leave_requests
            {where_sql}
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        );

        let mut query = sqlx::query_as::<_, LeaveRow>(&sql);
        for bind in &binds {
            query = query.bind(bind.as_str());
        }
        let rows = query
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch leave list")?;
        rows.into_iter().map(LeaveRequest::try_from).collect()
    }

    async fn count(&self, filter: &LeaveFilter) -> Result<i64> {
        let (where_sql, binds) = build_where(filter);
        let sql = format!("SELECT COUNT(*) FROM leave_requests {where_sql}");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for bind in &binds {
            query = query.bind(bind.as_str());
        }
        query
            .fetch_one(&self.pool)
            .await
            .context("failed to count leave requests")
    }
}

fn build_where(filter: &LeaveFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut binds = Vec::new();

    if let Some(employee_id) = filter.employee_id {
        conditions.push("employee_id = ?");
        binds.push(employee_id.to_string());
    }
    if let Some(status) = filter.status {
        conditions.push("status = ?");
        binds.push(status.to_string());
    }

    let where_sql = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_sql, binds)
}
