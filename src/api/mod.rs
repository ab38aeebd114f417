//! API service modules for the Yandex.Audience management endpoints.
//!
//! Each service provides methods for one resource group and is obtained
//! from [`AudienceClient`](crate::AudienceClient).

mod accounts;
mod delegates;
mod grants;
mod pixels;
mod segments;
mod upload;

pub use accounts::AccountsService;
pub use delegates::DelegatesService;
pub use grants::GrantsService;
pub use pixels::PixelsService;
pub use segments::SegmentsService;
