pub mod engine;
pub mod query;
pub mod validator;

pub use engine::{LeaveEngine, SubmitLeave};
pub use query::{LeavePage, LeaveQueries};
