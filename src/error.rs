use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;

/// Caller-correctable rejections surfaced verbatim to the HTTP boundary,
/// plus `Internal` for store faults. None of these are retried: each
/// variant except `Internal` is a semantic rejection, not a transient
/// failure.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("start_date cannot be after end_date")]
    InvalidRange,

    #[error("start_date cannot be in the past")]
    PastDate,

    #[error("employee not found")]
    EmployeeNotFound,

    #[error("leave cannot start before the employee's joining date")]
    BeforeJoining,

    #[error("an overlapping leave request already exists for this employee")]
    OverlapConflict,

    #[error("insufficient leave balance for the requested duration")]
    InsufficientBalance,

    #[error("status must be 'approved' or 'rejected'")]
    InvalidStatus,

    #[error("leave request not found")]
    LeaveNotFound,

    #[error("leave request has already been processed")]
    AlreadyProcessed,

    #[error("an employee with this email already exists")]
    DuplicateEmail,

    #[error("unknown department")]
    InvalidDepartment,

    #[error("leave allowance is out of range")]
    InvalidLeaveAllowance,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl Rejection {
    /// Stable machine-readable code carried in the error body.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::MissingField(_) => "MISSING_FIELD",
            Rejection::InvalidField { .. } => "INVALID_FIELD",
            Rejection::InvalidRange => "INVALID_RANGE",
            Rejection::PastDate => "PAST_DATE",
            Rejection::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            Rejection::BeforeJoining => "BEFORE_JOINING",
            Rejection::OverlapConflict => "OVERLAP_CONFLICT",
            Rejection::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Rejection::InvalidStatus => "INVALID_STATUS",
            Rejection::LeaveNotFound => "LEAVE_NOT_FOUND",
            Rejection::AlreadyProcessed => "ALREADY_PROCESSED",
            Rejection::DuplicateEmail => "DUPLICATE_EMAIL",
            Rejection::InvalidDepartment => "INVALID_DEPARTMENT",
            Rejection::InvalidLeaveAllowance => "INVALID_LEAVE_ALLOWANCE",
            Rejection::Internal(_) => "INTERNAL",
        }
    }
}

impl ResponseError for Rejection {
    fn status_code(&self) -> StatusCode {
        match self {
            Rejection::MissingField(_)
            | Rejection::InvalidField { .. }
            | Rejection::InvalidRange
            | Rejection::PastDate
            | Rejection::BeforeJoining
            | Rejection::InsufficientBalance
            | Rejection::InvalidStatus
            | Rejection::AlreadyProcessed
            | Rejection::InvalidDepartment
            | Rejection::InvalidLeaveAllowance => StatusCode::BAD_REQUEST,

            Rejection::EmployeeNotFound | Rejection::LeaveNotFound => StatusCode::NOT_FOUND,

            Rejection::OverlapConflict | Rejection::DuplicateEmail => StatusCode::CONFLICT,

            Rejection::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Store faults are logged with full detail but never leak to the body.
        let message = match self {
            Rejection::Internal(e) => {
                error!(error = %e, "store operation failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "code": self.code(),
            "message": message,
        }))
    }
}
