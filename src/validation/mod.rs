//! Validation helpers for `tracking`.
//!
//! The only domain rule is that an issue has a title. Validation works on the
//! posted form so the submitted values can be echoed back unchanged.

use crate::error::ValidationError;
use crate::model::IssueForm;

/// Validates posted issue forms.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate a form and return all validation errors found.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(form: &IssueForm) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Title: Required.
        if form.title.as_deref().is_none_or(|title| title.trim().is_empty()) {
            errors.push(ValidationError::new("Title", "The Title field is required."));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: Option<&str>) -> IssueForm {
        IssueForm {
            title: title.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn title_present_passes() {
        assert!(IssueValidator::validate(&form(Some("Broken login"))).is_ok());
    }

    #[test]
    fn missing_title_fails() {
        let errors = IssueValidator::validate(&form(None)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "Title");
    }

    #[test]
    fn blank_title_fails() {
        assert!(IssueValidator::validate(&form(Some(""))).is_err());
        assert!(IssueValidator::validate(&form(Some("   "))).is_err());
    }

    #[test]
    fn other_fields_are_unconstrained() {
        let form = IssueForm {
            title: Some("t".to_string()),
            status: Some(String::new()),
            priority: Some("whatever you like".to_string()),
            ..Default::default()
        };
        assert!(IssueValidator::validate(&form).is_ok());
    }

    #[test]
    fn missing_title_reports_required_message() {
        let errors = IssueValidator::validate(&form(Some(" \t"))).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::new("Title", "The Title field is required.")]
        );
    }
}
