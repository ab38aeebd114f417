//! Segment models.
//!
//! Every segment shares the [`BaseSegment`] fields and extends them with
//! the parameters of the strategy it was built with. The list endpoint
//! mixes all kinds in one array without a usable discriminator, so it is
//! surfaced as [`RawSegment`] maps; a caller who knows the kind can turn a
//! map into a typed value with [`Segment::decode`].

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{MetrikaSegmentType, UploadContentType};
use super::primitives::{PixelId, SegmentId};
use crate::Result;

/// An undecoded segment as returned by the list endpoint.
pub type RawSegment = Map<String, Value>;

/// Fields present in every segment kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseSegment {
    /// Server-assigned id, `0` until created
    #[serde(skip_serializing_if = "SegmentId::is_unassigned")]
    pub id: SegmentId,
    /// Display name
    pub name: String,
    /// Processing status, e.g. `uploaded`, `is_processed`, `processed`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Set by the server
    #[serde(
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<DateTime<Utc>>,
    /// Login of the owner
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,
}

impl BaseSegment {
    /// Base fields for a segment that does not exist yet.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Users who triggered a pixel.
///
/// When several conditions are set (e.g. multiple UTM tags), a user must
/// satisfy all of them to enter the segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixelSegment {
    /// Common fields
    #[serde(flatten)]
    pub base: BaseSegment,
    /// Source pixel
    pub pixel_id: PixelId,
    /// Look-back window in days
    pub period_length: i32,
    /// Number of pixel hits compared with `times_quantity_operation`
    pub times_quantity: i32,
    /// Comparison operator: `lt`, `eq`, `gt`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub times_quantity_operation: String,
    /// `utm_source` filter
    #[serde(skip_serializing_if = "String::is_empty")]
    pub utm_source: String,
    /// `utm_content` filter
    #[serde(skip_serializing_if = "String::is_empty")]
    pub utm_content: String,
    /// `utm_campaign` filter
    #[serde(skip_serializing_if = "String::is_empty")]
    pub utm_campaign: String,
    /// `utm_term` filter
    #[serde(skip_serializing_if = "String::is_empty")]
    pub utm_term: String,
    /// `utm_medium` filter
    #[serde(skip_serializing_if = "String::is_empty")]
    pub utm_medium: String,
}

impl PixelSegment {
    /// Create a pixel segment definition.
    pub fn new(name: impl Into<String>, pixel_id: PixelId, period_length: i32) -> Self {
        Self {
            base: BaseSegment::named(name),
            pixel_id,
            period_length,
            ..Default::default()
        }
    }
}

/// A geographic point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Free-text label
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Point {
    /// Create a point without a description.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            description: String::new(),
        }
    }
}

/// One closed polygon of a [`PolygonGeoSegment`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Polygon {
    /// Vertices in order
    pub points: Vec<Point>,
}

/// Users seen inside one or more polygons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonGeoSegment {
    /// Common fields
    #[serde(flatten)]
    pub base: BaseSegment,
    /// `last`, `regular`, `home`, `work` or `condition`
    pub geo_segment_type: String,
    /// Visits needed within `period_length` (condition segments)
    pub times_quantity: i32,
    /// Look-back window in days (condition segments)
    pub period_length: i32,
    /// Areas
    pub polygons: Vec<Polygon>,
}

impl PolygonGeoSegment {
    /// Create a polygon geo segment definition.
    pub fn new(
        name: impl Into<String>,
        geo_segment_type: impl Into<String>,
        polygons: Vec<Polygon>,
    ) -> Self {
        Self {
            base: BaseSegment::named(name),
            geo_segment_type: geo_segment_type.into(),
            polygons,
            ..Default::default()
        }
    }
}

/// Users seen within a radius of one or more points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleGeoSegment {
    /// Common fields
    #[serde(flatten)]
    pub base: BaseSegment,
    /// `last`, `regular`, `home`, `work` or `condition`
    pub geo_segment_type: String,
    /// Visits needed within `period_length` (condition segments)
    pub times_quantity: i32,
    /// Look-back window in days (condition segments)
    pub period_length: i32,
    /// Radius in meters
    pub radius: i32,
    /// Circle centers
    pub points: Vec<Point>,
}

impl CircleGeoSegment {
    /// Create a circle geo segment definition.
    pub fn new(
        name: impl Into<String>,
        geo_segment_type: impl Into<String>,
        radius: i32,
        points: Vec<Point>,
    ) -> Self {
        Self {
            base: BaseSegment::named(name),
            geo_segment_type: geo_segment_type.into(),
            radius,
            points,
            ..Default::default()
        }
    }
}

/// A segment imported from AppMetrica.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetricaSegment {
    /// Common fields
    #[serde(flatten)]
    pub base: BaseSegment,
    /// `api_key` or `segment_id`
    pub app_metrica_segment_type: String,
    /// Id of the AppMetrica object
    pub app_metrica_segment_id: i64,
}

impl AppMetricaSegment {
    /// Create an AppMetrica segment definition.
    pub fn new(
        name: impl Into<String>,
        app_metrica_segment_type: impl Into<String>,
        app_metrica_segment_id: i64,
    ) -> Self {
        Self {
            base: BaseSegment::named(name),
            app_metrica_segment_type: app_metrica_segment_type.into(),
            app_metrica_segment_id,
        }
    }
}

/// A segment built from an uploaded data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadingSegment {
    /// Common fields
    #[serde(flatten)]
    pub base: BaseSegment,
    /// Whether identifiers in the file are MD5-hashed
    pub hashed: bool,
    /// Kind of identifiers in the file; required when confirming
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<UploadContentType>,
}

impl UploadingSegment {
    /// Prepare an uploaded segment for confirmation.
    pub fn confirmed(
        id: SegmentId,
        name: impl Into<String>,
        content_type: UploadContentType,
        hashed: bool,
    ) -> Self {
        Self {
            base: BaseSegment {
                id,
                ..BaseSegment::named(name)
            },
            hashed,
            content_type: Some(content_type),
        }
    }
}

/// Users "similar" to those of another segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookalikeSegment {
    /// Common fields
    #[serde(flatten)]
    pub base: BaseSegment,
    /// Source segment
    pub lookalike_link: SegmentId,
    /// Accuracy from 1 (widest) to 5 (most similar)
    pub lookalike_value: i64,
    /// Keep the device type distribution of the source
    pub maintain_device_distribution: bool,
    /// Keep the regional distribution of the source
    pub maintain_geo_distribution: bool,
}

impl LookalikeSegment {
    /// Create a lookalike segment definition.
    pub fn new(name: impl Into<String>, lookalike_link: SegmentId, lookalike_value: i64) -> Self {
        Self {
            base: BaseSegment::named(name),
            lookalike_link,
            lookalike_value,
            ..Default::default()
        }
    }
}

/// A segment imported from Yandex.Metrica.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetrikaSegment {
    /// Common fields
    #[serde(flatten)]
    pub base: BaseSegment,
    /// Source object type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrika_segment_type: Option<MetrikaSegmentType>,
    /// Id of the Metrica counter, goal or segment
    pub metrika_segment_id: i64,
}

impl MetrikaSegment {
    /// Create a Metrica segment definition.
    pub fn new(
        name: impl Into<String>,
        metrika_segment_type: MetrikaSegmentType,
        metrika_segment_id: i64,
    ) -> Self {
        Self {
            base: BaseSegment::named(name),
            metrika_segment_type: Some(metrika_segment_type),
            metrika_segment_id,
        }
    }
}

/// The seven segment strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// [`PixelSegment`]
    Pixel,
    /// [`PolygonGeoSegment`]
    PolygonGeo,
    /// [`CircleGeoSegment`]
    CircleGeo,
    /// [`AppMetricaSegment`]
    AppMetrica,
    /// [`UploadingSegment`]
    Uploading,
    /// [`LookalikeSegment`]
    Lookalike,
    /// [`MetrikaSegment`]
    Metrika,
}

impl SegmentKind {
    /// Resource path of the create endpoint.
    ///
    /// Uploaded segments are created through the file endpoints instead,
    /// see [`UploadFormat`](super::UploadFormat).
    pub fn create_path(&self) -> Option<&'static str> {
        match self {
            SegmentKind::Pixel => Some("segments/create_pixel"),
            SegmentKind::PolygonGeo => Some("segments/create_geo_polygon"),
            SegmentKind::CircleGeo => Some("segments/create_geo"),
            SegmentKind::AppMetrica => Some("segments/create_appmetrica"),
            SegmentKind::Lookalike => Some("segments/create_lookalike"),
            SegmentKind::Metrika => Some("segments/create_metrika"),
            SegmentKind::Uploading => None,
        }
    }
}

/// A concrete segment type whose kind is known at compile time.
pub trait TypedSegment: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Strategy this type describes.
    const KIND: SegmentKind;

    /// Shared fields.
    fn base(&self) -> &BaseSegment;

    /// Wrap into the [`Segment`] union.
    fn into_segment(self) -> Segment;
}

macro_rules! typed_segment {
    ($ty:ty, $kind:ident) => {
        impl TypedSegment for $ty {
            const KIND: SegmentKind = SegmentKind::$kind;

            fn base(&self) -> &BaseSegment {
                &self.base
            }

            fn into_segment(self) -> Segment {
                Segment::$kind(self)
            }
        }
    };
}

typed_segment!(PixelSegment, Pixel);
typed_segment!(PolygonGeoSegment, PolygonGeo);
typed_segment!(CircleGeoSegment, CircleGeo);
typed_segment!(AppMetricaSegment, AppMetrica);
typed_segment!(UploadingSegment, Uploading);
typed_segment!(LookalikeSegment, Lookalike);
typed_segment!(MetrikaSegment, Metrika);

/// Any segment, typed when the kind is known.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Pixel-based
    Pixel(PixelSegment),
    /// Polygon geofence
    PolygonGeo(PolygonGeoSegment),
    /// Circle geofence
    CircleGeo(CircleGeoSegment),
    /// AppMetrica import
    AppMetrica(AppMetricaSegment),
    /// File upload
    Uploading(UploadingSegment),
    /// Lookalike
    Lookalike(LookalikeSegment),
    /// Metrica import
    Metrika(MetrikaSegment),
    /// Kind not resolved
    Unknown(RawSegment),
}

impl Segment {
    /// Decode a raw map as the given kind.
    pub fn decode(kind: SegmentKind, raw: RawSegment) -> Result<Self> {
        fn typed<T: TypedSegment>(raw: RawSegment) -> Result<Segment> {
            Ok(serde_json::from_value::<T>(Value::Object(raw))?.into_segment())
        }

        match kind {
            SegmentKind::Pixel => typed::<PixelSegment>(raw),
            SegmentKind::PolygonGeo => typed::<PolygonGeoSegment>(raw),
            SegmentKind::CircleGeo => typed::<CircleGeoSegment>(raw),
            SegmentKind::AppMetrica => typed::<AppMetricaSegment>(raw),
            SegmentKind::Uploading => typed::<UploadingSegment>(raw),
            SegmentKind::Lookalike => typed::<LookalikeSegment>(raw),
            SegmentKind::Metrika => typed::<MetrikaSegment>(raw),
        }
    }

    /// Kind of a typed segment; `None` for [`Segment::Unknown`].
    pub fn kind(&self) -> Option<SegmentKind> {
        match self {
            Segment::Pixel(_) => Some(SegmentKind::Pixel),
            Segment::PolygonGeo(_) => Some(SegmentKind::PolygonGeo),
            Segment::CircleGeo(_) => Some(SegmentKind::CircleGeo),
            Segment::AppMetrica(_) => Some(SegmentKind::AppMetrica),
            Segment::Uploading(_) => Some(SegmentKind::Uploading),
            Segment::Lookalike(_) => Some(SegmentKind::Lookalike),
            Segment::Metrika(_) => Some(SegmentKind::Metrika),
            Segment::Unknown(_) => None,
        }
    }

    /// Shared fields of a typed segment.
    pub fn base(&self) -> Option<&BaseSegment> {
        match self {
            Segment::Pixel(s) => Some(&s.base),
            Segment::PolygonGeo(s) => Some(&s.base),
            Segment::CircleGeo(s) => Some(&s.base),
            Segment::AppMetrica(s) => Some(&s.base),
            Segment::Uploading(s) => Some(&s.base),
            Segment::Lookalike(s) => Some(&s.base),
            Segment::Metrika(s) => Some(&s.base),
            Segment::Unknown(_) => None,
        }
    }

    /// Segment id; read straight from the map for unknown kinds.
    pub fn id(&self) -> SegmentId {
        match self {
            Segment::Unknown(raw) => raw
                .get("id")
                .and_then(Value::as_i64)
                .map(SegmentId::new)
                .unwrap_or_default(),
            typed => typed.base().map(|b| b.id).unwrap_or_default(),
        }
    }
}

impl From<RawSegment> for Segment {
    fn from(raw: RawSegment) -> Self {
        Segment::Unknown(raw)
    }
}
