//! # yandex-audience
//!
//! A typed async client for the Yandex.Audience management API.
//!
//! The crate covers the management surface of the API: the accounts the
//! user represents, delegates, per-segment grants, tracking pixels and
//! segments of every kind, including segments uploaded from data files.
//!
//! ## Features
//!
//! - **Accounts and delegates**: list represented accounts, add and remove
//!   representatives
//! - **Grants**: manage who may edit a segment
//! - **Pixels**: create, rename, delete and restore tracking pixels
//! - **Segments**: typed creation for pixel, lookalike, Metrica, AppMetrica
//!   and geo segments; streaming file uploads; confirm, update, reprocess
//!   and delete
//! - **Structured errors**: the API's embedded error block surfaces as
//!   [`Error::Api`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yandex_audience::{AudienceClient, ClientConfig, Token};
//!
//! #[tokio::main]
//! async fn main() -> yandex_audience::Result<()> {
//!     let token = Token::from_env(None)?;
//!     let client = AudienceClient::new(ClientConfig::new(token))?;
//!
//!     let accounts = client.accounts().list().await?;
//!     println!("Represents {} accounts", accounts.len());
//!
//!     for pixel in client.pixels().list().await? {
//!         println!("pixel {}: {} users in 30 days", pixel.id, pixel.user_quantity_30);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Uploading a Segment
//!
//! ```rust,no_run
//! use yandex_audience::AudienceClient;
//! use yandex_audience::models::{UploadContentType, UploadingSegment};
//!
//! #[tokio::main]
//! async fn main() -> yandex_audience::Result<()> {
//!     let client = AudienceClient::from_env(None)?;
//!
//!     let uploaded = client.segments().upload_csv_file("emails.csv").await?;
//!     let segment = UploadingSegment::confirmed(
//!         uploaded.base.id,
//!         "newsletter",
//!         UploadContentType::Crm,
//!         false,
//!     );
//!     let saved = client.segments().confirm(&segment).await?;
//!     println!("segment {} is {}", saved.base.id, saved.base.status);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::Token;
pub use client::{AudienceClient, ClientConfig};
pub use error::{ApiError, ApiErrorDetail, Error, Result};
pub use models::{PixelId, SegmentId};

/// Prelude module for convenient imports.
///
/// ```rust
/// use yandex_audience::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::Token;
    pub use crate::client::{AudienceClient, ClientConfig};
    pub use crate::error::{ApiError, Error, Result};
    pub use crate::models::{
        // Primitives
        PixelId, SegmentId,
        // Enums
        MetrikaSegmentType, Permission, UploadContentType, UploadFormat,
        // Accounts
        Account, Delegate, Grant,
        // Pixels
        Pixel,
        // Segments
        AppMetricaSegment, BaseSegment, CircleGeoSegment, LookalikeSegment, MetrikaSegment,
        PixelSegment, Point, Polygon, PolygonGeoSegment, RawSegment, Segment, SegmentKind,
        TypedSegment, UploadingSegment,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_id_creation() {
        let id = SegmentId::new(142);
        assert_eq!(id.get(), 142);
        assert_eq!(id.to_string(), "142");
    }

    #[test]
    fn test_default_endpoint() {
        let config = ClientConfig::new(Token::new("blah").unwrap());
        assert_eq!(
            config.management_url("pixels"),
            "https://api-audience.yandex.ru/v1/management/pixels"
        );
    }
}
