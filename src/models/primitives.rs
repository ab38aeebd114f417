//! Identifier newtypes.
//!
//! Segment and pixel ids are both plain integers on the wire; wrapping them
//! keeps a pixel id from being passed where a segment id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A segment identifier.
///
/// The value is `0` until the server assigns one.
///
/// # Example
///
/// ```
/// use yandex_audience::SegmentId;
///
/// let id = SegmentId::new(142);
/// assert_eq!(id.to_string(), "142");
/// assert!(SegmentId::default().is_unassigned());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(i64);

impl SegmentId {
    /// Create a new segment id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Returns `true` if the server has not assigned an id yet.
    pub fn is_unassigned(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SegmentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A pixel identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelId(i64);

impl PixelId {
    /// Create a new pixel id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Returns `true` if the server has not assigned an id yet.
    pub fn is_unassigned(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PixelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PixelId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_transparent() {
        assert_eq!(serde_json::to_string(&SegmentId::new(12)).unwrap(), "12");
        let pixel: PixelId = serde_json::from_str("4").unwrap();
        assert_eq!(pixel.get(), 4);
        assert!(!pixel.is_unassigned());
    }
}
