use utoipa::OpenApi;

use crate::api::employee::CreateEmployeeRequest;
use crate::api::leave::{SubmitLeaveRequest, TransitionRequest};
use crate::leave::LeavePage;
use crate::model::{Department, Employee, LeaveRequest, LeaveStatus};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LeaveHub API",
        version = "1.0.0",
        description = r#"
## Leave Management Service

Tracks employees and their time-off requests. No employee can hold two
overlapping active leave reservations, and cumulative approved leave never
exceeds the allotted balance.

### Key Features
- **Employee Registration** — create employee profiles with a leave allowance
- **Leave Lifecycle** — submit requests, approve or reject them exactly once
- **Leave History** — paginated, filterable listings

### Response Format
JSON responses throughout; validation rejections carry a stable error code.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::leave::submit_leave,
        crate::api::leave::list_leaves,
        crate::api::leave::pending_leaves,
        crate::api::leave::transition_leave,
    ),
    components(
        schemas(
            CreateEmployeeRequest,
            SubmitLeaveRequest,
            TransitionRequest,
            Employee,
            Department,
            LeaveRequest,
            LeaveStatus,
            LeavePage,
        )
    ),
    tags(
        (name = "Employee", description = "Employee registration APIs"),
        (name = "Leave", description = "Leave lifecycle APIs"),
    )
)]
pub struct ApiDoc;
