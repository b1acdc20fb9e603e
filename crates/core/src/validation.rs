//! Shared input validation helpers.
//!
//! Request DTOs derive [`validator::Validate`]; [`validate_input`] turns the
//! resulting error tree into a single [`CoreError::Validation`] message.

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Run derived validation rules and map failures to [`CoreError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Reject strings that are empty after trimming.
pub fn validate_not_blank(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Reject strings longer than `max` characters.
///
/// For patch paths, where the derived rules on the create DTO do not run.
pub fn validate_max_length(value: &str, field: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field}: must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Flatten field errors into `"field: message; field: message"`, sorted by
/// field name so messages are stable.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: invalid value ({})", e.code),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "is required"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn valid_input_passes() {
        let s = Sample {
            name: "ok".into(),
            email: "a@b.io".into(),
        };
        assert!(validate_input(&s).is_ok());
    }

    #[test]
    fn messages_are_sorted_and_prefixed() {
        let s = Sample {
            name: String::new(),
            email: "nope".into(),
        };
        let err = validate_input(&s).unwrap_err();
        let CoreError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "email: invalid value (email); name: is required");
    }

    #[test]
    fn blank_strings_rejected() {
        assert!(validate_not_blank("   ", "name").is_err());
        assert!(validate_not_blank(" x ", "name").is_ok());
    }

    #[test]
    fn max_length_counts_characters() {
        assert!(validate_max_length("ééé", "estimatedTime", 3).is_ok());
        let err = validate_max_length("abcd", "estimatedTime", 3).unwrap_err();
        assert!(
            matches!(err, CoreError::Validation(msg) if msg == "estimatedTime: must be at most 3 characters")
        );
    }
}
