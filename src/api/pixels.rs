//! Pixels service.

use std::sync::Arc;

use crate::client::{ClientInner, SuccessResponse};
use crate::models::{Pixel, PixelId};
use crate::{Error, Result};

#[derive(serde::Serialize)]
struct PixelRequest<'a> {
    pixel: &'a Pixel,
}

#[derive(serde::Deserialize)]
struct PixelResponse {
    #[serde(default)]
    pixel: Option<Pixel>,
}

/// Service for tracking pixels.
///
/// # Example
///
/// ```no_run
/// use yandex_audience::models::Pixel;
///
/// # async fn example(client: yandex_audience::AudienceClient) -> yandex_audience::Result<()> {
/// let mut pixel = client.pixels().create(&Pixel::new("landing")).await?;
///
/// pixel.name = "landing page".into();
/// let pixel = client.pixels().update(&pixel).await?;
///
/// client.pixels().remove(pixel.id).await?;
/// client.pixels().undelete(pixel.id).await?;
/// # Ok(())
/// # }
/// ```
pub struct PixelsService {
    inner: Arc<ClientInner>,
}

impl PixelsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the user's pixels.
    pub async fn list(&self) -> Result<Vec<Pixel>> {
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            pixels: Vec<Pixel>,
        }
        let response: Response = self.inner.get("pixels").await?;
        Ok(response.pixels)
    }

    /// Create a pixel and return the server copy with its id.
    ///
    /// A response without a `pixel` payload yields `pixel` itself.
    pub async fn create(&self, pixel: &Pixel) -> Result<Pixel> {
        let response: PixelResponse = self.inner.post("pixels", &PixelRequest { pixel }).await?;
        Ok(response.pixel.unwrap_or_else(|| pixel.clone()))
    }

    /// Rename a pixel.
    ///
    /// The argument is left untouched; the returned value is the server
    /// copy, or a clone of the argument when no payload came back.
    pub async fn update(&self, pixel: &Pixel) -> Result<Pixel> {
        if pixel.id.is_unassigned() {
            return Err(Error::InvalidInput("pixel has no id".into()));
        }
        let response: PixelResponse = self
            .inner
            .put(&format!("pixel/{}", pixel.id), &PixelRequest { pixel })
            .await?;
        Ok(response.pixel.unwrap_or_else(|| pixel.clone()))
    }

    /// Delete a pixel. Deleted pixels can be restored with
    /// [`undelete`](Self::undelete).
    pub async fn remove(&self, id: PixelId) -> Result<()> {
        let response: SuccessResponse = self.inner.delete(&format!("pixel/{}", id)).await?;
        response.or(Error::NotDeleted)
    }

    /// Restore a deleted pixel.
    pub async fn undelete(&self, id: PixelId) -> Result<()> {
        let response: SuccessResponse = self
            .inner
            .post_empty(&format!("pixel/{}/undelete", id))
            .await?;
        response.or(Error::NotRestored)
    }
}
