use serde::{Deserialize, Serialize};

use super::{Annotation, Timeline};

/// One file of a dataset protocol, as handed to preprocessors
///
/// The protocol layer describes each recording with a string-keyed record.
/// The keys this crate understands are explicit fields here, so
/// required-versus-optional is visible in the type: `uri` is the only
/// required key, everything else may be absent. Keys the crate does not
/// recognize never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique recording identifier within its database
    pub uri: String,
    /// Name of the database the recording belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Audio channel number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<i64>,
    /// Total audio duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Part of the recording that was manually reviewed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotated: Option<Timeline>,
    /// Reference "who spoke when" for the recording
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
}

impl FileRecord {
    /// Record with only the required uri set
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: None,
            channel: None,
            duration: None,
            annotated: None,
            annotation: None,
        }
    }
}
