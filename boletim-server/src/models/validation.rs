//! Validation error types

use std::fmt;

/// Validation error for request payloads and path parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are absent or null
    Missing { fields: Vec<&'static str> },

    /// Value could not be parsed (e.g., non-numeric id, malformed JSON)
    InvalidFormat { field: &'static str, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { fields } => {
                write!(f, "campos obrigatórios ausentes: {}", fields.join(", "))
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Collects required fields, accepting any value that is present and non-null.
///
/// Every missing field is reported at once rather than failing on the first.
#[derive(Debug, Default)]
pub struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the value of a required field, recording it as missing when `None`.
    pub fn take<T: Default>(&mut self, field: &'static str, value: Option<T>) -> T {
        match value {
            Some(v) => v,
            None => {
                self.missing.push(field);
                T::default()
            }
        }
    }

    /// Fail if any field recorded by [`Required::take`] was missing.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Missing {
                fields: self.missing,
            })
        }
    }
}
