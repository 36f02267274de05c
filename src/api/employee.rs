use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::AppState;
use crate::employees::RegisterEmployee;
use crate::error::Rejection;
use crate::model::Employee;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployeeRequest {
    #[schema(example = "John Doe")]
    pub full_name: Option<String>,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: Option<String>,
    #[schema(example = "engineering")]
    pub department: Option<String>,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub joining_date: Option<NaiveDate>,
    /// Defaults to 40 when omitted.
    #[schema(example = 40)]
    pub leave_allowance: Option<i64>,
}

/// Register a new employee.
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation rejection"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    state: web::Data<AppState>,
    payload: web::Json<CreateEmployeeRequest>,
) -> Result<HttpResponse, Rejection> {
    let payload = payload.into_inner();
    let employee = state
        .registry
        .register(RegisterEmployee {
            full_name: payload.full_name,
            email: payload.email,
            department: payload.department,
            joining_date: payload.joining_date,
            leave_allowance: payload.leave_allowance,
        })
        .await?;

    Ok(HttpResponse::Created().json(employee))
}
