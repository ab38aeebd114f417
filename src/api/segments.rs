//! Segments service.

use std::path::Path;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use super::upload::MultipartUpload;
use crate::client::{ClientInner, SuccessResponse};
use crate::models::{
    AppMetricaSegment, CircleGeoSegment, LookalikeSegment, MetrikaSegment, PixelId,
    PixelSegment, PolygonGeoSegment, RawSegment, SegmentId, TypedSegment, UploadFormat,
    UploadingSegment,
};
use crate::{Error, Result};

#[derive(serde::Serialize)]
struct SegmentRequest<'a, S> {
    segment: &'a S,
}

#[derive(serde::Deserialize)]
#[serde(bound(deserialize = "S: serde::de::DeserializeOwned"))]
struct SegmentResponse<S> {
    #[serde(default = "Option::default")]
    segment: Option<S>,
}

impl<S: Clone> SegmentResponse<S> {
    /// Server copy, or the request value when no payload came back.
    fn or_request(self, request: &S) -> S {
        self.segment.unwrap_or_else(|| request.clone())
    }
}

#[derive(serde::Deserialize)]
struct ListResponse {
    #[serde(default)]
    segments: Vec<RawSegment>,
}

/// Service for audience segments.
///
/// # Example
///
/// ```no_run
/// use yandex_audience::models::{PixelId, PixelSegment, UploadContentType, UploadFormat, UploadingSegment};
///
/// # async fn example(client: yandex_audience::AudienceClient) -> yandex_audience::Result<()> {
/// // Typed creation
/// let segment = client
///     .segments()
///     .create_pixel(&PixelSegment::new("visitors", PixelId::new(4), 30))
///     .await?;
///
/// // Upload a file, then confirm it
/// let uploaded = client.segments().upload_file("macs.csv", UploadFormat::Csv).await?;
/// let confirmed = UploadingSegment::confirmed(uploaded.base.id, "macs", UploadContentType::Mac, false);
/// client.segments().confirm(&confirmed).await?;
///
/// // Untyped listing
/// for raw in client.segments().list().await? {
///     println!("{:?}", raw.get("name"));
/// }
/// # Ok(())
/// # }
/// ```
pub struct SegmentsService {
    inner: Arc<ClientInner>,
}

impl SegmentsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List all segments available to the user.
    ///
    /// Segments of different kinds come back in one array, so each entry is
    /// returned as an undecoded map. Use
    /// [`Segment::decode`](crate::models::Segment::decode) when the kind is
    /// known.
    pub async fn list(&self) -> Result<Vec<RawSegment>> {
        let response: ListResponse = self.inner.get("segments").await?;
        Ok(response.segments)
    }

    /// List the segments built from a given pixel.
    pub async fn list_for_pixel(&self, pixel_id: PixelId) -> Result<Vec<RawSegment>> {
        let response: ListResponse = self
            .inner
            .get_with_query("segments", &[("pixel", pixel_id.get())])
            .await?;
        Ok(response.segments)
    }

    /// Create a segment of any kind that has a create endpoint.
    ///
    /// Returns the server copy with its id and status filled in. A response
    /// without a `segment` payload yields the request value.
    pub async fn create<S: TypedSegment>(&self, segment: &S) -> Result<S> {
        let path = S::KIND.create_path().ok_or_else(|| {
            Error::InvalidInput(format!("{:?} segments are created by uploading a file", S::KIND))
        })?;
        let response: SegmentResponse<S> = self.inner.post(path, &SegmentRequest { segment }).await?;
        Ok(response.or_request(segment))
    }

    /// Create a segment of users who triggered a pixel.
    pub async fn create_pixel(&self, segment: &PixelSegment) -> Result<PixelSegment> {
        self.create(segment).await
    }

    /// Create a lookalike segment.
    pub async fn create_lookalike(&self, segment: &LookalikeSegment) -> Result<LookalikeSegment> {
        self.create(segment).await
    }

    /// Create a segment from a Yandex.Metrica object.
    pub async fn create_metrika(&self, segment: &MetrikaSegment) -> Result<MetrikaSegment> {
        self.create(segment).await
    }

    /// Create a segment from an AppMetrica object.
    pub async fn create_appmetrica(&self, segment: &AppMetricaSegment) -> Result<AppMetricaSegment> {
        self.create(segment).await
    }

    /// Create a geo segment of the "circle" type.
    pub async fn create_circle_geo(&self, segment: &CircleGeoSegment) -> Result<CircleGeoSegment> {
        self.create(segment).await
    }

    /// Create a geo segment of the "polygons" type.
    pub async fn create_polygon_geo(
        &self,
        segment: &PolygonGeoSegment,
    ) -> Result<PolygonGeoSegment> {
        self.create(segment).await
    }

    /// Upload a data file as a new segment.
    ///
    /// The API requires at least 1000 entries; this is checked by the
    /// server. The uploaded segment must be confirmed with
    /// [`confirm`](Self::confirm) before it is processed.
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        format: UploadFormat,
    ) -> Result<UploadingSegment> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data".to_string());
        self.upload_reader(&file_name, file, format).await
    }

    /// Upload a CSV file as a new segment.
    pub async fn upload_csv_file(&self, path: impl AsRef<Path>) -> Result<UploadingSegment> {
        self.upload_file(path, UploadFormat::Csv).await
    }

    /// Upload the contents of a byte stream as a new segment.
    ///
    /// The stream is sent as the `file` part of a multipart body named
    /// `file_name`, encoded on a background task while the request is in
    /// flight.
    pub async fn upload_reader<R>(
        &self,
        file_name: &str,
        source: R,
        format: UploadFormat,
    ) -> Result<UploadingSegment>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let request = self.inner.request(Method::POST, format.path())?;

        let upload = MultipartUpload::new(file_name);
        let content_type = upload.content_type();
        let (body, outcome) = upload.spawn(source);

        let request = request
            .header(CONTENT_TYPE, content_type)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(body)));
        let response = self.inner.send_raw(request).await?;

        match outcome.await {
            Ok(Ok(_)) => {}
            Ok(Err(err)) => return Err(Error::Upload(err.to_string())),
            Err(_) => return Err(Error::Upload("upload task ended without a result".into())),
        }

        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            segment: UploadingSegment,
        }
        let response: Response = self.inner.handle_response(response).await?;
        if response.segment.base.id.is_unassigned() {
            return Err(Error::NotCreated);
        }
        Ok(response.segment)
    }

    /// Save a segment created from a data file.
    ///
    /// `segment` must carry the id returned by the upload, a name and a
    /// content type.
    pub async fn confirm(&self, segment: &UploadingSegment) -> Result<UploadingSegment> {
        if segment.base.id.is_unassigned() {
            return Err(Error::InvalidInput("segment has no id".into()));
        }
        let response: SegmentResponse<UploadingSegment> = self
            .inner
            .post(
                &format!("segment/{}/confirm", segment.base.id),
                &SegmentRequest { segment },
            )
            .await?;
        Ok(response.or_request(segment))
    }

    /// Change a segment and return the server copy, or the request value
    /// when the response carries no payload.
    pub async fn update<S: TypedSegment>(&self, id: SegmentId, segment: &S) -> Result<S> {
        let response: SegmentResponse<S> = self
            .inner
            .put(&format!("segment/{}", id), &SegmentRequest { segment })
            .await?;
        Ok(response.or_request(segment))
    }

    /// Delete a segment.
    pub async fn remove(&self, id: SegmentId) -> Result<()> {
        let response: SuccessResponse = self.inner.delete(&format!("segment/{}", id)).await?;
        response.or(Error::NotDeleted)
    }

    /// Force a recount of a segment.
    ///
    /// The API allows 2 calls per segment and 20 per user in 24 hours.
    pub async fn reprocess(&self, id: SegmentId) -> Result<()> {
        let response: SuccessResponse = self
            .inner
            .put_empty(&format!("segment/{}/reprocess", id))
            .await?;
        response.or(Error::NotReprocessed)
    }
}
