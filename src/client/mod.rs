//! HTTP client for the Yandex.Audience API.
//!
//! This module provides the main entry point [`AudienceClient`].
//!
//! # Example
//!
//! ```no_run
//! use yandex_audience::AudienceClient;
//!
//! # async fn example() -> yandex_audience::Result<()> {
//! // Token from YANDEX_AUDIENCE_TOKEN
//! let client = AudienceClient::from_env(None)?;
//!
//! let accounts = client.accounts().list().await?;
//!
//! // Later requests fail with Error::ClientClosed
//! client.close();
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::{ClientConfig, API_VERSION, DEFAULT_BASE_URL};
pub use http::AudienceClient;
pub(crate) use http::{ClientInner, SuccessResponse};
