//! Enumeration types for the Yandex.Audience API.

use serde::{Deserialize, Serialize};

/// Access level of an account or delegate.
///
/// A missing `perm` field decodes as [`Permission::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Read-only access
    View,
    /// Full management access
    Edit,
    /// Absent or not known to this crate
    #[default]
    #[serde(other)]
    Unknown,
}

impl Permission {
    /// Returns `true` if the holder may modify resources.
    pub fn can_edit(&self) -> bool {
        matches!(self, Permission::Edit)
    }
}

/// Kind of identifiers contained in an uploaded data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadContentType {
    /// Mobile advertising ids (IDFA / GAID)
    IdfaGaid,
    /// Metrica client ids
    ClientId,
    /// MAC addresses
    Mac,
    /// CRM export (emails, phones)
    Crm,
    /// Value not known to this crate
    #[serde(other)]
    Unknown,
}

/// Source object of a Metrica segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetrikaSegmentType {
    /// Visitors of a counter
    CounterId,
    /// Visitors who reached a goal
    GoalId,
    /// An existing Metrica segment
    SegmentId,
    /// Value not known to this crate
    #[serde(other)]
    Unknown,
}

/// Endpoint selector for file uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UploadFormat {
    /// `segments/upload_file`: one identifier per line
    #[default]
    Generic,
    /// `segments/upload_csv_file`: CSV with a header row
    Csv,
}

impl UploadFormat {
    /// Resource path of the upload endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            UploadFormat::Generic => "segments/upload_file",
            UploadFormat::Csv => "segments/upload_csv_file",
        }
    }
}
