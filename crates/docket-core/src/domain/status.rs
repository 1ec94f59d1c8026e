//! Task status value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DocketError;

/// Lifecycle state of a task.
///
/// The set is closed: anything outside it is rejected when parsed and is
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet.
    #[default]
    Pending,
    /// Being worked on.
    InProgress,
    /// Done.
    Completed,
    /// Abandoned.
    Cancelled,
}

impl TaskStatus {
    /// Returns the wire and storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// All possible statuses.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Pending, Self::InProgress, Self::Completed, Self::Cancelled]
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DocketError::validation(format!(
                    "invalid status '{s}': expected one of pending, in_progress, completed, cancelled"
                ))
            })
    }
}
