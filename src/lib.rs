pub mod api;
pub mod config;
pub mod docs;
pub mod employees;
pub mod error;
pub mod leave;
pub mod model;
pub mod routes;
pub mod store;

use std::sync::Arc;

use employees::EmployeeRegistry;
use leave::{LeaveEngine, LeaveQueries};
use store::{EmployeeDirectory, LeaveLedger};

/// Shared handler state: the lifecycle engine plus the read-only services
/// around it, all over the same store pair.
pub struct AppState {
    pub engine: LeaveEngine,
    pub registry: EmployeeRegistry,
    pub queries: LeaveQueries,
}

impl AppState {
    pub fn new(directory: Arc<dyn EmployeeDirectory>, ledger: Arc<dyn LeaveLedger>) -> Self {
        Self {
            engine: LeaveEngine::new(directory.clone(), ledger.clone()),
            registry: EmployeeRegistry::new(directory),
            queries: LeaveQueries::new(ledger),
        }
    }

    /// Fresh state over the in-memory store; used by the HTTP tests.
    pub fn in_memory() -> Self {
        let store = Arc::new(store::memory::InMemoryStore::new());
        Self::new(store.clone(), store)
    }
}
