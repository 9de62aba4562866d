use serde::{Deserialize, Serialize};

/// Body of `POST .../check-conflicts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConflictRequest {
    pub schedule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<i64>,
}

/// `success: false` means the schedule overlaps another class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConflictResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub has_conflict: bool,
    pub message: String,
}

impl ConflictReport {
    /// Nothing to report; used for empty schedules.
    pub fn clear() -> Self {
        Self::default()
    }

    /// The check could not run. Treated as no conflict so the user can still submit.
    pub fn fail_open(message: impl Into<String>) -> Self {
        Self {
            has_conflict: false,
            message: message.into(),
        }
    }
}

impl From<CheckConflictResponse> for ConflictReport {
    fn from(response: CheckConflictResponse) -> Self {
        Self {
            has_conflict: !response.success,
            message: response.message,
        }
    }
}
