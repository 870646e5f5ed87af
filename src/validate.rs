//! Field Validation
//!
//! Client-side checks performed before any network call: required,
//! minimum length, and email shape. Violations are reported per field
//! and the operation is aborted without issuing a request.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Deliberately loose shape check; the backend owns real address rules.
const EMAIL_PATTERN: &str = r".+@.+\..+";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// A validation failure attached to a named input field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collects field errors across a form before a submit.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn report(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// The field must be non-blank. Returns whether it passed so callers
    /// can skip dependent checks on empty input.
    pub fn required(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.report(field, "This field is required");
            false
        } else {
            true
        }
    }

    /// The trimmed value must be at least `n` characters.
    pub fn min_len(&mut self, field: &str, value: &str, n: usize) -> bool {
        if value.trim().chars().count() < n {
            self.report(field, &format!("Minimum {} characters", n));
            false
        } else {
            true
        }
    }

    /// The value must look like an email address.
    pub fn email(&mut self, field: &str, value: &str) -> bool {
        if email_regex().is_match(value) {
            true
        } else {
            self.report(field, "Enter a valid email");
            false
        }
    }

    /// Finish the form check, yielding the collected errors if any.
    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
