//! Data models for the Yandex.Audience API.
//!
//! - [`primitives`] - Id newtypes (`SegmentId`, `PixelId`)
//! - [`enums`] - Permissions, upload content types, endpoint selectors
//! - [`account`] - Accounts, delegates and segment grants
//! - [`pixel`] - Tracking pixels
//! - [`segment`] - The segment kinds and the raw list representation

pub mod primitives;
pub mod enums;
pub mod account;
pub mod pixel;
pub mod segment;
pub(crate) mod timestamp;

pub use primitives::*;
pub use enums::*;
pub use account::*;
pub use pixel::*;
pub use segment::*;

pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}
