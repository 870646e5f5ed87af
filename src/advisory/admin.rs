//! Expert Approval
//!
//! The admin-side approval action. Online it issues the approval and
//! re-fetches the authoritative pending list; offline it only removes
//! the entry from the list the admin page is holding, with no network
//! traffic and no persistence.

use crate::api::PendingExpert;

use super::{AdvisoryClient, AdvisoryError, Fetched};

impl AdvisoryClient {
    /// Approve a pending expert and return the list the page should now
    /// render. `current` is the list as currently displayed; it is the
    /// only thing mutated when the client is offline.
    pub async fn approve_expert(
        &self,
        id: u64,
        current: Vec<PendingExpert>,
    ) -> Result<Fetched<Vec<PendingExpert>>, AdvisoryError> {
        if self.is_mock().await {
            let remaining = current.into_iter().filter(|e| e.id != id).collect();
            return Ok(Fetched::mock(remaining));
        }

        self.api().approve_expert(id).await?;
        Ok(self.pending_experts().await)
    }
}
