//! Task entity.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::TaskStatus;
use crate::TaskId;

/// A unit of work tracked by Docket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Task {
    /// Unique identifier, assigned at creation and never changed.
    pub id: TaskId,

    /// Short summary; never empty.
    pub title: String,

    /// Free text, empty when the caller gave none.
    pub description: String,

    /// Current lifecycle state.
    pub status: TaskStatus,

    /// Opaque assignee reference.
    pub assignee: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a fresh id and both timestamps set to now.
    #[must_use]
    pub fn new(
        title: String,
        description: Option<String>,
        status: TaskStatus,
        assignee: Option<String>,
    ) -> Self {
        let created = now();
        Self {
            id: TaskId::new(),
            title,
            description: description.unwrap_or_default(),
            status,
            assignee: assignee.unwrap_or_default(),
            created_at: created,
            updated_at: created,
        }
    }

    /// Refreshes `updated_at`.
    ///
    /// The timestamp never moves backwards, even if the wall clock does.
    pub fn touch(&mut self) {
        self.updated_at = now().max(self.updated_at);
    }
}

/// Current time at the precision the database keeps (microseconds), so a
/// task read back from storage compares equal to the one that was written.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
