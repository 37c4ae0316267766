//! Per-field validation messages

use serde::Serialize;
use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Field name → message, so several errors can be shown at once
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    /// Drop the message for `field`; true when there was one
    pub fn clear(&mut self, field: &str) -> bool {
        self.0.remove(field).is_some()
    }

    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<ValidationErrors> for FieldErrors {
    /// Keep the first message reported for each field
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, problems) in errors.field_errors() {
            if let Some(problem) = problems.first() {
                let message = problem
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| problem.code.to_string());
                fields.set(&field.to_string(), message);
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_reports_presence() {
        let mut errors = FieldErrors::new();
        errors.set("name", "Spacecraft name is required");

        assert!(errors.clear("name"));
        assert!(!errors.clear("name"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_from_validation_errors_keeps_messages() {
        let mut raw = ValidationErrors::new();
        let mut problem = validator::ValidationError::new("required");
        problem.message = Some("Description is required".into());
        raw.add("description", problem);

        let errors = FieldErrors::from(raw);
        assert_eq!(errors.get("description"), Some("Description is required"));
        assert_eq!(errors.len(), 1);
    }
}
