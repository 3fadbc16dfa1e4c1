// ABOUTME: Precondition checks run before a health check executes.
// ABOUTME: Rejects explicitly blank required properties with field-specific messages.

use nonempty::NonEmpty;
use std::fmt;

use super::{Property, TaskConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub property: Property,
    pub message: String,
}

/// One or more validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(NonEmpty<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &NonEmpty<FieldError> {
        &self.0
    }

    /// Message reported for `property`, if it failed validation.
    pub fn get(&self, property: Property) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.property == property)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Check every required property and collect all failures.
pub fn validate(config: &TaskConfig) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = Property::ALL
        .into_iter()
        .filter(|p| p.is_required())
        .filter(|&p| config.raw(p).is_some_and(|v| v.trim().is_empty()))
        .map(|property| FieldError {
            property,
            message: format!("{property} must be specified"),
        })
        .collect();

    match NonEmpty::from_vec(errors) {
        Some(errors) => Err(ValidationErrors(errors)),
        None => Ok(()),
    }
}
