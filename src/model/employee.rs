use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Closed set of departments an employee can belong to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Department {
    Engineering,
    HumanResources,
    Finance,
    Marketing,
    Sales,
    Operations,
}

/// Leave days granted to a new employee unless the request says otherwise.
pub const DEFAULT_LEAVE_ALLOWANCE: i64 = 40;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "7b0c4d56-9f0e-4f6a-8d2b-0c1d2e3f4a5b",
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "department": "engineering",
        "joining_date": "2024-01-01",
        "leave_availability": 40
    })
)]
pub struct Employee {
    pub id: Uuid,

    #[schema(example = "John Doe")]
    pub full_name: String,

    /// Stored lowercased; uniqueness is case-insensitive.
    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "engineering")]
    pub department: Department,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub joining_date: NaiveDate,

    /// Remaining approvable leave days. Only the lifecycle engine
    /// decrements this, and only when approving a request.
    #[schema(example = 40)]
    pub leave_availability: i64,
}
