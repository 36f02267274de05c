use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::AppState;
use crate::error::Rejection;
use crate::leave::SubmitLeave;
use crate::model::{LeaveRequest, LeaveStatus};

#[derive(Deserialize, ToSchema)]
pub struct SubmitLeaveRequest {
    #[schema(example = "7b0c4d56-9f0e-4f6a-8d2b-0c1d2e3f4a5b")]
    pub employee_id: Option<Uuid>,
    #[schema(example = "2025-08-16", format = "date", value_type = String)]
    pub start_date: Option<NaiveDate>,
    #[schema(example = "2025-08-29", format = "date", value_type = String)]
    pub end_date: Option<NaiveDate>,
    #[schema(example = "Family vacation")]
    pub reason: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct LeaveListQuery {
    /// Pagination page number, 1-based; defaults to 1.
    pub page: Option<u64>,
    /// Items per page; defaults to 9.
    pub limit: Option<u64>,
    /// Filter by status; unknown values are ignored.
    pub status: Option<String>,
    /// Filter by employee.
    pub employee_id: Option<Uuid>,
}

#[derive(Deserialize, ToSchema)]
pub struct TransitionRequest {
    /// Target status: "approved" or "rejected".
    #[schema(example = "approved")]
    pub status: Option<String>,
}

/// Submit a leave request. Balance is untouched until approval.
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body = SubmitLeaveRequest,
    responses(
        (status = 201, description = "Leave request submitted", body = LeaveRequest),
        (status = 400, description = "Validation rejection"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Overlaps an existing request")
    ),
    tag = "Leave"
)]
pub async fn submit_leave(
    state: web::Data<AppState>,
    payload: web::Json<SubmitLeaveRequest>,
) -> Result<HttpResponse, Rejection> {
    let payload = payload.into_inner();
    let request = state
        .engine
        .submit(SubmitLeave {
            employee_id: payload.employee_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: payload.reason,
        })
        .await?;

    Ok(HttpResponse::Created().json(request))
}

/// Paginated leave list, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveListQuery),
    responses(
        (status = 200, description = "Paginated leave list", body = crate::leave::LeavePage)
    ),
    tag = "Leave"
)]
pub async fn list_leaves(
    state: web::Data<AppState>,
    query: web::Query<LeaveListQuery>,
) -> Result<HttpResponse, Rejection> {
    let page = state
        .queries
        .list(
            query.page,
            query.limit,
            query.status.as_deref(),
            query.employee_id,
        )
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Requests still awaiting a decision.
#[utoipa::path(
    get,
    path = "/api/v1/leave/pending",
    params(
        ("page" = Option<u64>, Query, description = "Pagination page number"),
        ("limit" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Pending leave requests", body = crate::leave::LeavePage)
    ),
    tag = "Leave"
)]
pub async fn pending_leaves(
    state: web::Data<AppState>,
    query: web::Query<LeaveListQuery>,
) -> Result<HttpResponse, Rejection> {
    let page = state.queries.pending(query.page, query.limit).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Approve or reject a pending request.
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/status",
    params(
        ("leave_id" = Uuid, Path, description = "Leave request to transition")
    ),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Request transitioned", body = LeaveRequest),
        (status = 400, description = "Invalid target status, already processed, or balance exhausted"),
        (status = 404, description = "Leave request or employee not found")
    ),
    tag = "Leave"
)]
pub async fn transition_leave(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<TransitionRequest>,
) -> Result<HttpResponse, Rejection> {
    let leave_id = path.into_inner();
    let status = payload
        .status
        .as_deref()
        .ok_or(Rejection::MissingField("status"))?
        .parse::<LeaveStatus>()
        .map_err(|_| Rejection::InvalidStatus)?;

    let request = state.engine.transition(leave_id, status).await?;
    Ok(HttpResponse::Ok().json(request))
}
