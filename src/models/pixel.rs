//! Pixel models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::primitives::PixelId;

/// A tracking pixel.
///
/// The user counters are computed by the server and are not sent back when
/// they are zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pixel {
    /// Server-assigned id
    #[serde(skip_serializing_if = "PixelId::is_unassigned")]
    pub id: PixelId,
    /// Display name
    pub name: String,
    /// Users seen in the last 7 days
    #[serde(skip_serializing_if = "super::is_zero")]
    pub user_quantity_7: i64,
    /// Users seen in the last 30 days
    #[serde(skip_serializing_if = "super::is_zero")]
    pub user_quantity_30: i64,
    /// Users seen in the last 90 days
    #[serde(skip_serializing_if = "super::is_zero")]
    pub user_quantity_90: i64,
    /// Set by the server
    #[serde(
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<DateTime<Utc>>,
}

impl Pixel {
    /// Create a pixel to send to the server.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pixel_body() {
        let json = serde_json::to_value(Pixel::new("pixelname")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "pixelname"}));
    }

    #[test]
    fn test_deserialize_pixel() {
        let json = r#"{
            "id": 4,
            "name": "name4",
            "user_quantity_7": 14,
            "user_quantity_30": 60,
            "user_quantity_90": 180,
            "create_time": "2007-01-02T15:04:05Z"
        }"#;
        let pixel: Pixel = serde_json::from_str(json).unwrap();
        assert_eq!(pixel.id, PixelId::new(4));
        assert_eq!(pixel.user_quantity_90, 180);
        assert!(pixel.create_time.is_some());
    }
}
