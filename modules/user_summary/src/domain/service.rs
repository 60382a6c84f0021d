use std::sync::Arc;

use tracing::{debug, instrument};

use crate::contract::error::SummaryError;
use crate::contract::model::{SummaryResult, UserRecord};
use crate::domain::ports::UserSource;
use crate::domain::summary::generate_user_summary;

/// Domain service tying the user source to the aggregation core.
/// Depends only on the source port, not on infra types.
#[derive(Clone)]
pub struct SummaryService {
    source: Arc<dyn UserSource>,
}

impl SummaryService {
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        Self { source }
    }

    /// Fetch the current user set and aggregate it by department.
    ///
    /// Aggregation itself cannot fail; the only error path is the fetch.
    #[instrument(name = "user_summary.service.department_summary", skip(self))]
    pub async fn department_summary(&self) -> Result<SummaryResult, SummaryError> {
        let users = self.source.fetch_users().await?;
        debug!("Fetched {} users from source", users.len());

        let summary = generate_user_summary(&users);
        debug!("Aggregated {} departments", summary.len());
        Ok(summary)
    }

    /// Fetch the current user set without aggregating.
    #[instrument(name = "user_summary.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, SummaryError> {
        let users = self.source.fetch_users().await?;
        debug!("Fetched {} users from source", users.len());
        Ok(users)
    }
}
