//! IdentityResolver - Maps a verified email claim to a persisted account id

use crate::repositories::AccountStore;
use std::sync::Arc;
use tracing::{error, instrument, warn};

#[derive(Clone)]
pub struct IdentityResolver {
    accounts: Arc<dyn AccountStore>,
}

impl IdentityResolver {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Returns the id of the account with exactly this email.
    ///
    /// Absence is a normal outcome. Store failures are logged here and also
    /// reported as `None`: the only thing a caller can do is reject.
    #[instrument(skip(self))]
    pub async fn resolve_account_id(&self, email: &str) -> Option<i32> {
        match self.accounts.find_by_email(email).await {
            Ok(Some(account)) => Some(account.id),
            Ok(None) => {
                warn!("No account for token email");
                None
            }
            Err(e) => {
                error!("Failed to resolve account id: {:?}", e);
                None
            }
        }
    }
}
