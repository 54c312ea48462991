//! Field-level validation messages.
//!
//! The same [`FieldErrors`] carries client-side checks (before submit) and
//! the backend's `{ "errors": { "field": ["message"] } }` payloads, so a form
//! renders both the same way.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First message for a field, for inline display.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn first(&self) -> Option<(&str, &str)> {
        self.0
            .iter()
            .find_map(|(field, msgs)| msgs.first().map(|m| (field.as_str(), m.as_str())))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, msgs) in other.0 {
            self.0.entry(field).or_default().extend(msgs);
        }
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Parses a backend `errors` object. Single strings are accepted as one-message lists.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let mut errors = Self::new();
        for (field, msgs) in obj {
            match msgs {
                Value::Array(items) => {
                    for item in items.iter().filter_map(Value::as_str) {
                        errors.add(field.clone(), item);
                    }
                }
                Value::String(s) => errors.add(field.clone(), s.clone()),
                _ => {}
            }
        }
        if errors.is_empty() {
            None
        } else {
            Some(errors)
        }
    }

    // ------------------------------------------------------------------------
    // Rules
    // ------------------------------------------------------------------------

    pub fn require(&mut self, field: &str, label: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", label));
        }
        self
    }

    pub fn max_len(&mut self, field: &str, label: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.add(field, format!("{} must not exceed {} characters", label, max));
        }
        self
    }

    /// Empty values pass; otherwise only digits (plus a leading `+`) and an allowed length.
    pub fn digits(&mut self, field: &str, label: &str, value: &str, lengths: &[usize]) -> &mut Self {
        let value = value.trim();
        if value.is_empty() {
            return self;
        }
        let body = value.strip_prefix('+').unwrap_or(value);
        let valid = body.chars().all(|c| c.is_ascii_digit()) && lengths.contains(&body.len());
        if !valid {
            let allowed: Vec<String> = lengths.iter().map(|l| l.to_string()).collect();
            self.add(
                field,
                format!("{} must contain {} digits", label, allowed.join(" or ")),
            );
        }
        self
    }

    /// Empty values pass.
    pub fn email(&mut self, field: &str, label: &str, value: &str) -> &mut Self {
        let value = value.trim();
        if value.is_empty() {
            return self;
        }
        let valid = match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !value.contains(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            self.add(field, format!("{} must be a valid email address", label));
        }
        self
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, msgs)| format!("{}: {}", field, msgs.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_rule_failures_per_field() {
        let mut errors = FieldErrors::new();
        errors
            .require("name", "Name", "  ")
            .max_len("code", "Code", "ABCDEFGHIJK", 10)
            .digits("phone", "Phone", "+12345", &[10, 11])
            .email("email", "Email", "nobody@nowhere");

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("phone"), Some("Phone must contain 10 or 11 digits"));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn optional_fields_pass_when_empty() {
        let mut errors = FieldErrors::new();
        errors
            .digits("phone", "Phone", "", &[10])
            .email("email", "Email", "")
            .digits("mobile", "Mobile", "+79991234567", &[11])
            .email("contact", "Contact", "ops@example.com");
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn parses_backend_errors_object() {
        let errors = FieldErrors::from_value(&json!({
            "code": ["The code has already been taken."],
            "name": "Too short",
            "ignored": 5
        }))
        .unwrap();
        assert_eq!(errors.get("code"), Some("The code has already been taken."));
        assert_eq!(errors.get("name"), Some("Too short"));
        assert_eq!(errors.get("ignored"), None);
        assert_eq!(errors.first(), Some(("code", "The code has already been taken.")));
    }

    #[test]
    fn empty_errors_object_is_none() {
        assert!(FieldErrors::from_value(&json!({})).is_none());
        assert!(FieldErrors::from_value(&json!("x")).is_none());
    }
}
