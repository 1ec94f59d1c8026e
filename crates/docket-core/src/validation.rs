//! Validation utilities.

use crate::{DocketError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `DocketError` on failure.
    fn validate_request(&self) -> Result<(), DocketError> {
        self.validate().map_err(validation_errors_to_docket_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `DocketError`.
#[must_use]
pub fn validation_errors_to_docket_error(errors: ValidationErrors) -> DocketError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    DocketError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            let mut error = ValidationError::new("not_blank");
            error.message = Some("must not be blank".into());
            return Err(error);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use super::*;

    #[derive(Validate)]
    struct Form {
        #[validate(custom(function = "not_blank"))]
        title: String,
        #[validate(length(max = 8))]
        assignee: String,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("hello").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_validate_request_reports_fields() {
        let form = Form {
            title: " ".to_string(),
            assignee: "a-very-long-name".to_string(),
        };
        let err = form.validate_request().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, DocketError::Validation(_)));
        assert!(message.contains("title"));
        assert!(message.contains("assignee"));
    }

    #[test]
    fn test_validate_request_ok() {
        let form = Form {
            title: "Buy milk".to_string(),
            assignee: "alice".to_string(),
        };
        assert!(form.validate_request().is_ok());
    }
}
