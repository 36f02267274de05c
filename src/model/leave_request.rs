use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Status of a leave request. `Pending` is the only non-terminal state;
/// a request moves to `Approved` or `Rejected` exactly once and never again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, LeaveStatus::Approved | LeaveStatus::Rejected)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "e3d1a9b2-4c5f-46a7-9b8c-1d2e3f4a5b6c",
        "employee_id": "7b0c4d56-9f0e-4f6a-8d2b-0c1d2e3f4a5b",
        "start_date": "2025-08-16",
        "end_date": "2025-08-29",
        "reason": "Family vacation",
        "status": "pending",
        "created_at": "2025-08-01T00:00:00Z",
        "updated_at": "2025-08-01T00:00:00Z"
    })
)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,

    /// Inclusive bounds; `start_date <= end_date` holds for every stored row.
    #[schema(example = "2025-08-16", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2025-08-29", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    #[schema(example = "Family vacation")]
    pub reason: String,

    #[schema(example = "pending")]
    pub status: LeaveStatus,

    #[schema(example = "2025-08-01T00:00:00Z", value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(example = "2025-08-01T00:00:00Z", value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}
