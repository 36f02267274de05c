pub mod employee;
pub mod leave_request;

pub use employee::{DEFAULT_LEAVE_ALLOWANCE, Department, Employee};
pub use leave_request::{LeaveRequest, LeaveStatus};
