//! HTTP client implementation for the Yandex.Audience management API.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::api::{
    AccountsService, DelegatesService, GrantsService, PixelsService, SegmentsService,
};
use crate::error::ApiError;
use crate::{Error, Result};

use super::config::ClientConfig;

/// The main client for interacting with the Yandex.Audience API.
///
/// The client is a cheap handle: clones share the same transport, and
/// [`close`](Self::close) on any clone shuts all of them down.
///
/// # Example
///
/// ```no_run
/// use yandex_audience::{AudienceClient, ClientConfig, Token};
///
/// # async fn example() -> yandex_audience::Result<()> {
/// let client = AudienceClient::new(ClientConfig::new(Token::new("oauth-token")?))?;
///
/// for pixel in client.pixels().list().await? {
///     println!("{} {}", pixel.id, pixel.name);
/// }
///
/// let segments = client.segments().list().await?;
/// println!("{} segments", segments.len());
/// # Ok(())
/// # }
/// ```
pub struct AudienceClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    http: RwLock<Option<reqwest::Client>>,
    pub(crate) config: ClientConfig,
}

impl AudienceClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http: RwLock::new(Some(http)),
                config,
            }),
        })
    }

    /// Create a client with the token taken from `YANDEX_AUDIENCE_TOKEN`,
    /// or from `fallback` when the variable is unset or empty.
    ///
    /// Intended for program entry points; library code should build a
    /// [`ClientConfig`] and call [`new`](Self::new).
    pub fn from_env(fallback: Option<&str>) -> Result<Self> {
        Self::new(ClientConfig::from_env(fallback)?)
    }

    /// Get the accounts service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the delegates service.
    pub fn delegates(&self) -> DelegatesService {
        DelegatesService::new(self.inner.clone())
    }

    /// Get the segment grants service.
    pub fn grants(&self) -> GrantsService {
        GrantsService::new(self.inner.clone())
    }

    /// Get the pixels service.
    pub fn pixels(&self) -> PixelsService {
        PixelsService::new(self.inner.clone())
    }

    /// Get the segments service.
    pub fn segments(&self) -> SegmentsService {
        SegmentsService::new(self.inner.clone())
    }

    /// Build an authorized request for a management resource.
    ///
    /// `path` is relative to `<base>/<version>/management/`. The returned
    /// builder already carries the `Authorization` header; add a body or
    /// query as needed and send it.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        self.inner.request(method, path)
    }

    /// Send a bodiless authorized request and return the raw response.
    pub async fn execute(&self, method: Method, path: &str) -> Result<reqwest::Response> {
        self.inner.send_raw(self.inner.request(method, path)?).await
    }

    /// Drop the underlying transport.
    ///
    /// Every later request through this client or any of its clones fails
    /// with [`Error::ClientClosed`].
    pub fn close(&self) {
        let mut http = self.inner.http.write().unwrap_or_else(PoisonError::into_inner);
        if http.take().is_some() {
            tracing::debug!("audience client closed");
        }
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.inner
            .http
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    fn transport(&self) -> Result<reqwest::Client> {
        self.http
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::ClientClosed)
    }

    /// Build a request with the management URL and `Authorization` header.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = Url::parse(&self.config.management_url(path))?;
        self.request_url(method, url)
    }

    /// Management URL built from raw path segments, each percent-encoded.
    pub(crate) fn segment_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.management_url(""))?;
        url.path_segments_mut()
            .map_err(|_| {
                Error::InvalidInput(format!("base url {} cannot carry a path", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build an authorized request for an already resolved URL.
    pub(crate) fn request_url(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let http = self.transport()?;

        tracing::debug!(%method, path = url.path(), "audience request");

        Ok(http
            .request(method, url)
            .header(AUTHORIZATION, self.config.token.authorization()))
    }

    /// Send a prepared request without decoding the response.
    pub(crate) async fn send_raw(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        tracing::debug!(status = response.status().as_u16(), "audience response");
        Ok(response)
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send_raw(request).await?;
        self.handle_response(response).await
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path)?).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        self.send(self.request(Method::GET, path)?.query(query)).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    /// Make a POST request without a body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::POST, path)?).await
    }

    /// Make a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(self.request(Method::PUT, path)?.json(body)).await
    }

    /// Make a PUT request without a body.
    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::PUT, path)?).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::DELETE, path)?).await
    }

    /// Make a DELETE request with query parameters.
    pub(crate) async fn delete_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        self.send(self.request(Method::DELETE, path)?.query(query)).await
    }

    /// Read the body and decode it as an envelope.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;
        decode_envelope(status, &body)
    }
}

/// Decode a response envelope.
///
/// The embedded error block is checked before anything else: a non-empty
/// error list wins over the status code and over any payload in the same
/// body. A JSON envelope is then decoded whatever the status, so flags such
/// as `success: false` on a 4xx still reach the caller; only a non-2xx body
/// that does not decode becomes [`Error::UnexpectedStatus`].
pub(crate) fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    if let Ok(api_error) = serde_json::from_slice::<ApiError>(body) {
        if api_error.is_error() {
            tracing::warn!(
                status = status.as_u16(),
                code = api_error.code,
                message = %api_error.message,
                "audience API returned errors"
            );
            return Err(Error::Api(api_error));
        }
    }

    match serde_json::from_slice(body) {
        Ok(payload) => {
            if !status.is_success() {
                tracing::debug!(status = status.as_u16(), "decoded envelope from non-2xx response");
            }
            Ok(payload)
        }
        Err(_) if !status.is_success() => Err(unexpected_status(status, body)),
        Err(err) => Err(err.into()),
    }
}

fn unexpected_status(status: StatusCode, body: &[u8]) -> Error {
    let body = String::from_utf8_lossy(body).into_owned();
    tracing::warn!(status = status.as_u16(), %body, "unexpected audience response status");
    Error::UnexpectedStatus {
        status: status.as_u16(),
        body,
    }
}

/// Envelope of delete / undelete / reprocess calls.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}

impl SuccessResponse {
    /// Map `success: false` to the given sentinel error.
    pub(crate) fn or(self, sentinel: Error) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(sentinel)
        }
    }
}

impl Clone for AudienceClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for AudienceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudienceClient")
            .field("config", &self.inner.config)
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token;

    #[derive(Debug, serde::Deserialize)]
    struct Accounts {
        #[serde(default)]
        accounts: Vec<serde_json::Value>,
    }

    #[test]
    fn test_errors_take_precedence_over_payload() {
        let body = br#"{"success": true, "accounts": [], "errors": [{"error_type": "backend_error", "message": "boom", "location": ""}], "code": 400, "message": "boom"}"#;
        let err = decode_envelope::<Accounts>(StatusCode::OK, body).unwrap_err();
        assert_eq!(err.api_error().map(|e| e.code), Some(400));
    }

    #[test]
    fn test_empty_error_list_is_not_an_error() {
        let body = br#"{"accounts": [], "errors": []}"#;
        let decoded = decode_envelope::<Accounts>(StatusCode::OK, body).unwrap();
        assert!(decoded.accounts.is_empty());
    }

    #[test]
    fn test_non_success_status_without_errors() {
        let err = decode_envelope::<Accounts>(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>")
            .unwrap_err();
        match err {
            Error::UnexpectedStatus { status, body } => {
                assert_eq!(status, 502);
                assert!(body.contains("bad gateway"));
            }
            other => panic!("Expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_decoded_on_non_success_status() {
        let body = br#"{"success": false}"#;
        let decoded = decode_envelope::<SuccessResponse>(StatusCode::NOT_FOUND, body).unwrap();
        assert!(matches!(decoded.or(Error::NotDeleted), Err(Error::NotDeleted)));
    }

    #[test]
    fn test_malformed_json_on_success() {
        let err = decode_envelope::<Accounts>(StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_success_response() {
        let ok: SuccessResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.or(Error::NotDeleted).is_ok());

        let missing: SuccessResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(missing.or(Error::NotRestored), Err(Error::NotRestored)));
    }

    #[test]
    fn test_close_is_terminal() {
        let client = AudienceClient::new(ClientConfig::new(Token::new("blah").unwrap())).unwrap();
        let clone = client.clone();
        assert!(!client.is_closed());
        assert!(client.request(Method::GET, "accounts").is_ok());

        client.close();
        assert!(clone.is_closed());
        assert!(matches!(
            clone.request(Method::GET, "accounts"),
            Err(Error::ClientClosed)
        ));
    }

    #[test]
    fn test_segment_url_encodes_each_segment() {
        let config = ClientConfig::new(Token::new("blah").unwrap())
            .with_base_url("http://127.0.0.1:8080/");
        let client = AudienceClient::new(config).unwrap();

        let url = client
            .inner
            .segment_url(&["segment", "142", "grant", "a/b?c#d"])
            .unwrap();
        assert_eq!(url.path(), "/v1/management/segment/142/grant/a%2Fb%3Fc%23d");

        let url = client
            .inner
            .segment_url(&["segment", "142", "grant", "a%2Fb"])
            .unwrap();
        assert_eq!(url.path(), "/v1/management/segment/142/grant/a%252Fb");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::new(Token::new("blah").unwrap()).with_base_url("not a url");
        assert!(matches!(AudienceClient::new(config), Err(Error::UrlParse(_))));
    }
}
