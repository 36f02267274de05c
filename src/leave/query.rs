//! Read-only listing over the leave ledger. No invariants live here; it
//! only normalizes paging input and shapes the page envelope.

use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::Rejection;
use crate::model::{LeaveRequest, LeaveStatus};
use crate::store::{LeaveFilter, LeaveLedger};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 9;

#[derive(Debug, Serialize, ToSchema)]
pub struct LeavePage {
    pub items: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 9)]
    pub limit: u64,
    #[schema(example = 1)]
    pub total: i64,
    #[schema(example = 1)]
    pub total_pages: u64,
}

pub struct LeaveQueries {
    ledger: Arc<dyn LeaveLedger>,
}

impl LeaveQueries {
    pub fn new(ledger: Arc<dyn LeaveLedger>) -> Self {
        Self { ledger }
    }

    /// List requests ordered by creation time, newest first. Invalid or
    /// missing paging values fall back to page 1 / limit 9; an
    /// unrecognized status filter is ignored rather than rejected.
    pub async fn list(
        &self,
        page: Option<u64>,
        limit: Option<u64>,
        status: Option<&str>,
        employee_id: Option<Uuid>,
    ) -> Result<LeavePage, Rejection> {
        let page = page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE);
        let limit = limit.filter(|l| *l >= 1).unwrap_or(DEFAULT_LIMIT);

        let filter = LeaveFilter {
            employee_id,
            status: status.and_then(|s| s.parse::<LeaveStatus>().ok()),
        };

        let total = self.ledger.count(&filter).await?;
        // a page number near u64::MAX must not overflow the offset; it
        // just lands far past the end and yields an empty page
        let skip = (page - 1).saturating_mul(limit);
        let items = self.ledger.query(&filter, skip, limit).await?;

        Ok(LeavePage {
            items,
            page,
            limit,
            total,
            total_pages: (total as u64).div_ceil(limit),
        })
    }

    /// The decision queue: everything still awaiting a transition.
    pub async fn pending(
        &self,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<LeavePage, Rejection> {
        self.list(page, limit, Some("pending"), None).await
    }
}
