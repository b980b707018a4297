//! Field-keyed validation messages
//!
//! The backend answers a rejected submission with
//! `{"message": "...", "errors": {"field": ["..."]}}`. [`FieldErrors`] keeps
//! the first message per field so each one can be shown under its input.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Key used for failures that do not belong to a single field.
pub const GENERAL_FIELD: &str = "general";

/// Map of form field name to the message rendered under it.
///
/// # Examples
///
/// ```
/// use taskboard_invite::FieldErrors;
///
/// let errors: FieldErrors =
///     serde_json::from_str(r#"{"email": ["already invited"], "role": "invalid"}"#).unwrap();
/// assert_eq!(errors.get("email"), Some("already invited"));
/// assert_eq!(errors.get("role"), Some("invalid"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// An error map holding a single message under [`GENERAL_FIELD`].
    pub fn general(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(GENERAL_FIELD, message);
        errors
    }

    /// Set the message for `field`, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Message for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Check if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with a message.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, OneOrMany>::deserialize(deserializer)?;
        let map = raw
            .into_iter()
            .filter_map(|(field, messages)| {
                let message = match messages {
                    OneOrMany::One(message) => Some(message),
                    OneOrMany::Many(messages) => messages.into_iter().next(),
                };
                message.map(|m| (field, m))
            })
            .collect();
        Ok(Self(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_keeps_first_message() {
        let errors: FieldErrors = serde_json::from_value(serde_json::json!({
            "emails.0": ["The email must be a valid email address.", "second"],
            "project_ids": [],
        }))
        .unwrap();

        assert_eq!(
            errors.get("emails.0"),
            Some("The email must be a valid email address.")
        );
        assert_eq!(errors.get("project_ids"), None);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_general() {
        let errors = FieldErrors::general("Network error");
        assert_eq!(errors.get(GENERAL_FIELD), Some("Network error"));
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_serialize_shape() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "already invited");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({ "email": "already invited" })
        );
    }
}
