//! Segment grants service.

use std::sync::Arc;

use reqwest::Method;

use crate::client::{ClientInner, SuccessResponse};
use crate::models::{Grant, SegmentId};
use crate::{Error, Result};

/// Service for per-segment management permissions.
pub struct GrantsService {
    inner: Arc<ClientInner>,
}

impl GrantsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List users allowed to manage a segment.
    pub async fn list(&self, segment_id: SegmentId) -> Result<Vec<Grant>> {
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            grants: Vec<Grant>,
        }
        let response: Response = self
            .inner
            .get(&format!("segment/{}/grants", segment_id))
            .await?;
        Ok(response.grants)
    }

    /// Allow a user to manage a segment.
    ///
    /// Returns the server copy, or `grant` itself when the response carries
    /// no payload.
    pub async fn create(&self, segment_id: SegmentId, grant: &Grant) -> Result<Grant> {
        #[derive(serde::Serialize)]
        struct Request<'a> {
            grant: &'a Grant,
        }
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            grant: Option<Grant>,
        }

        let response: Response = self
            .inner
            .put(&format!("segment/{}/grant", segment_id), &Request { grant })
            .await?;
        Ok(response.grant.unwrap_or_else(|| grant.clone()))
    }

    /// Revoke a user's permission to manage a segment.
    ///
    /// The login is percent-encoded into the path. Fails with
    /// [`Error::NotDeleted`] if the server does not confirm.
    pub async fn remove(&self, segment_id: SegmentId, user_login: &str) -> Result<()> {
        if user_login.is_empty() {
            return Err(Error::InvalidInput("user_login must not be empty".into()));
        }
        let segment_id = segment_id.to_string();
        let url = self
            .inner
            .segment_url(&["segment", &segment_id, "grant", user_login])?;
        let response: SuccessResponse = self
            .inner
            .send(self.inner.request_url(Method::DELETE, url)?)
            .await?;
        response.or(Error::NotDeleted)
    }
}
