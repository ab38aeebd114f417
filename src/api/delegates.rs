//! Delegates service.

use std::sync::Arc;

use crate::client::{ClientInner, SuccessResponse};
use crate::models::Delegate;
use crate::{Error, Result};

/// Service for representatives of the current account.
///
/// # Example
///
/// ```no_run
/// use yandex_audience::models::{Delegate, Permission};
///
/// # async fn example(client: yandex_audience::AudienceClient) -> yandex_audience::Result<()> {
/// let delegate = client
///     .delegates()
///     .create(&Delegate::new("analyst", Permission::View).with_comment("reports"))
///     .await?;
/// println!("added {} at {:?}", delegate.user_login, delegate.created_at);
///
/// client.delegates().remove("analyst").await?;
/// # Ok(())
/// # }
/// ```
pub struct DelegatesService {
    inner: Arc<ClientInner>,
}

impl DelegatesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List users who have access to the current account.
    pub async fn list(&self) -> Result<Vec<Delegate>> {
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            delegates: Vec<Delegate>,
        }
        let response: Response = self.inner.get("delegates").await?;
        Ok(response.delegates)
    }

    /// Add a user to the representatives of the current account.
    ///
    /// Returns the server copy, including its creation time, or `delegate`
    /// itself when the response carries no payload.
    pub async fn create(&self, delegate: &Delegate) -> Result<Delegate> {
        #[derive(serde::Serialize)]
        struct Request<'a> {
            delegate: &'a Delegate,
        }
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            delegate: Option<Delegate>,
        }

        let response: Response = self.inner.put("delegate", &Request { delegate }).await?;
        Ok(response.delegate.unwrap_or_else(|| delegate.clone()))
    }

    /// Remove a user from the representatives of the current account.
    ///
    /// Fails with [`Error::NotDeleted`] if the server does not confirm.
    pub async fn remove(&self, user_login: &str) -> Result<()> {
        if user_login.is_empty() {
            return Err(Error::InvalidInput("user_login must not be empty".into()));
        }
        let response: SuccessResponse = self
            .inner
            .delete_with_query("delegate", &[("user_login", user_login)])
            .await?;
        response.or(Error::NotDeleted)
    }
}
