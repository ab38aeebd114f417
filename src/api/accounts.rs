//! Accounts service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::Account;
use crate::Result;

/// Service for the accounts the current user represents.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: yandex_audience::AudienceClient) -> yandex_audience::Result<()> {
/// for account in client.accounts().list().await? {
///     println!("{} ({:?})", account.user_login, account.perm);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the accounts the current user is a representative of.
    pub async fn list(&self) -> Result<Vec<Account>> {
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            accounts: Vec<Account>,
        }
        let response: Response = self.inner.get("accounts").await?;
        Ok(response.accounts)
    }
}
