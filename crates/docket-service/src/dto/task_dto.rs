//! Task-related DTOs.

use docket_core::rules::not_blank;
use docket_core::{DocketError, DocketResult, Task, TaskFilter, TaskStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Parses an optional wire status into the enum.
pub(crate) fn parse_status(status: Option<&str>) -> DocketResult<Option<TaskStatus>> {
    status.map(str::parse).transpose()
}

/// Request to create a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: String,

    pub description: Option<String>,

    /// One of `pending`, `in_progress`, `completed`, `cancelled`.
    /// Defaults to `pending` when absent or empty.
    pub status: Option<String>,

    pub assignee: Option<String>,
}

impl CreateTaskRequest {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub assignee: Option<String>,
}

impl UpdateTaskRequest {
    /// Rejects a blank title or unknown status without touching anything.
    pub fn parse(&self) -> DocketResult<Option<TaskStatus>> {
        let status = parse_status(self.status.as_deref())?;
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(DocketError::validation("title: must not be blank"));
        }
        Ok(status)
    }
}

/// Query parameters for listing tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListTasksQuery {
    /// Only tasks in this status.
    pub status: Option<String>,
    /// Only tasks assigned to this person.
    pub assignee: Option<String>,
    /// 1-based page number (default 1).
    pub page: Option<i64>,
    /// Page size (default 10, max 100).
    pub page_size: Option<i64>,
}

impl ListTasksQuery {
    /// Normalises pagination and parses the status predicate.
    pub fn into_filter(self) -> DocketResult<TaskFilter> {
        let status = parse_status(self.status.as_deref())?;
        Ok(TaskFilter::new(status, self.assignee, self.page, self.page_size))
    }
}

/// One page of tasks with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::ValidateExt;

    #[test]
    fn test_create_request_valid() {
        assert!(CreateTaskRequest::new("Buy milk").validate_request().is_ok());
    }

    #[test]
    fn test_create_request_blank_title() {
        for title in ["", "   ", "\t\n"] {
            let err = CreateTaskRequest::new(title).validate_request().unwrap_err();
            assert!(matches!(err, DocketError::Validation(_)), "title {title:?}");
        }
    }

    #[test]
    fn test_create_request_missing_title_deserializes_blank() {
        let request: CreateTaskRequest = serde_json::from_str(r#"{"assignee":"bob"}"#).unwrap();
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_update_request_parse() {
        let request = UpdateTaskRequest {
            status: Some("completed".to_string()),
            ..Default::default()
        };
        assert_eq!(request.parse().unwrap(), Some(TaskStatus::Completed));
        assert_eq!(UpdateTaskRequest::default().parse().unwrap(), None);
    }

    #[test]
    fn test_update_request_rejects_bad_status_and_blank_title() {
        let bad_status = UpdateTaskRequest {
            status: Some("done".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad_status.parse(), Err(DocketError::Validation(_))));

        let blank_title = UpdateTaskRequest {
            title: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(matches!(blank_title.parse(), Err(DocketError::Validation(_))));
    }

    #[test]
    fn test_list_query_normalises() {
        let filter = ListTasksQuery {
            status: Some("pending".to_string()),
            assignee: Some(String::new()),
            page: Some(-3),
            page_size: Some(150),
        }
        .into_filter()
        .unwrap();

        assert_eq!(filter.status, Some(TaskStatus::Pending));
        assert_eq!(filter.assignee, None);
        assert_eq!(filter.page, 1);
        assert_eq!(filter.page_size, 100);
    }

    #[test]
    fn test_list_query_invalid_status() {
        let query = ListTasksQuery {
            status: Some("PENDING".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.into_filter(), Err(DocketError::Validation(_))));
    }
}
