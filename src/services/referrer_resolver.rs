//! Referrer resolution - runs both lookups for a page view and settles the flow.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use common::AppError;
use domain::{PrimaryFailure, ReferrerFlow, ThreeKOutcome};

use super::{AccountService, ThreeKService};

/// Resolves a referrer id against the account store and the 3K directory.
///
/// Both lookups start together and the flow settles only after both have
/// finished or hit `lookup_timeout`. A timed out lookup counts as unavailable.
pub struct ReferrerResolver {
    accounts: Arc<dyn AccountService>,
    three_k: Arc<dyn ThreeKService>,
    lookup_timeout: Duration,
}

impl ReferrerResolver {
    pub fn new(
        accounts: Arc<dyn AccountService>,
        three_k: Arc<dyn ThreeKService>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            accounts,
            three_k,
            lookup_timeout,
        }
    }

    /// Run one page view's flow. A blank id leaves the flow `Idle`.
    pub async fn resolve(&self, referrer_id: &str) -> ReferrerFlow {
        let mut flow = ReferrerFlow::new();
        if !flow.begin(referrer_id) {
            return flow;
        }
        let referrer_id = referrer_id.trim();

        let (primary, three_k) = tokio::join!(
            timeout(self.lookup_timeout, self.accounts.find_referrer(referrer_id)),
            timeout(self.lookup_timeout, self.three_k.lookup(referrer_id)),
        );

        let primary = match primary {
            Ok(Ok(account)) => Ok(account),
            Ok(Err(err)) => {
                tracing::debug!("Referrer lookup for {} failed: {}", referrer_id, err);
                Err(primary_failure(&err))
            }
            Err(_) => {
                tracing::warn!("Referrer lookup for {} timed out", referrer_id);
                Err(primary_failure(&AppError::backend_unavailable(
                    "referrer lookup timed out",
                )))
            }
        };

        let three_k = match three_k {
            Ok(Ok(Some(user))) => ThreeKOutcome::Found(user),
            Ok(Ok(None)) => ThreeKOutcome::Missing,
            Ok(Err(err)) => {
                tracing::warn!("3K lookup for {} failed: {}", referrer_id, err);
                ThreeKOutcome::Unavailable
            }
            Err(_) => {
                tracing::warn!("3K lookup for {} timed out", referrer_id);
                ThreeKOutcome::Unavailable
            }
        };

        flow.settle(primary, three_k);
        flow
    }
}

/// Map an account lookup error onto the flow's failure classes.
fn primary_failure(err: &AppError) -> PrimaryFailure {
    match err {
        AppError::NotFound(_) => PrimaryFailure::NotFound,
        AppError::Internal(_) => PrimaryFailure::Unclassified,
        other => PrimaryFailure::Status(other.status().as_u16()),
    }
}
