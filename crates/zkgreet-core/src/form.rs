//! # Greeting Form — Model and Validation
//!
//! Holds the three fields the page collects (name, age, address) and the
//! validation rules that gate submission. Validation produces a
//! `GreetingPayload` with a fixed serialized shape, or a `FormErrors` set
//! that blocks the flow.
//!
//! ## Rules
//!
//! - `name` — required, non-empty after trimming.
//! - `age` — a positive integer. Fractional, zero, negative, non-finite,
//!   and out-of-range values are all rejected.
//! - `address` — optional; an empty string is treated as absent.

use serde::{Deserialize, Serialize};

use crate::error::FormErrors;

/// Raw form input as captured from the user, prior to validation.
///
/// `age` is carried as a float so that fractional input reaches the
/// validator instead of being silently truncated at the parsing boundary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GreetingForm {
    /// The user's name.
    pub name: String,
    /// The user's age, as entered.
    pub age: f64,
    /// Free-form address, optional.
    pub address: Option<String>,
}

/// A validated greeting payload.
///
/// Can only be obtained through [`GreetingForm::validate`]. Serializes
/// deterministically: fixed field order, camelCase names, `address`
/// omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreetingPayload {
    /// Validated, trimmed name.
    pub name: String,
    /// Validated age, always a positive integer.
    pub age: u32,
    /// Validated address, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl GreetingForm {
    /// Validate the form, producing a payload or the full set of
    /// field-level violations.
    pub fn validate(&self) -> Result<GreetingPayload, FormErrors> {
        let mut errors = FormErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "must not be empty");
        }

        let age = validate_age(self.age, &mut errors);

        let address = match &self.address {
            Some(a) if !a.trim().is_empty() => Some(a.trim().to_string()),
            _ => None,
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(GreetingPayload {
            name: name.to_string(),
            // Checked above; zero stands in only on the error path.
            age: age.unwrap_or(0),
            address,
        })
    }
}

fn validate_age(age: f64, errors: &mut FormErrors) -> Option<u32> {
    if !age.is_finite() {
        errors.push("age", "must be a number");
        return None;
    }
    if age.fract() != 0.0 {
        errors.push("age", "must be an integer");
        return None;
    }
    if age <= 0.0 {
        errors.push("age", "must be a positive integer");
        return None;
    }
    if age > f64::from(u32::MAX) {
        errors.push("age", "is out of range");
        return None;
    }
    Some(age as u32)
}

impl GreetingPayload {
    /// Serialize the payload to its canonical JSON form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, age: f64, address: Option<&str>) -> GreetingForm {
        GreetingForm {
            name: name.to_string(),
            age,
            address: address.map(str::to_string),
        }
    }

    #[test]
    fn valid_form_produces_payload() {
        let payload = form("Alice", 30.0, Some("12 Main St")).validate().unwrap();
        assert_eq!(payload.name, "Alice");
        assert_eq!(payload.age, 30);
        assert_eq!(payload.address.as_deref(), Some("12 Main St"));
    }

    #[test]
    fn omitted_address_is_accepted() {
        let payload = form("Alice", 18.0, None).validate().unwrap();
        assert_eq!(payload.address, None);
    }

    #[test]
    fn empty_address_treated_as_absent() {
        let payload = form("Alice", 18.0, Some("   ")).validate().unwrap();
        assert_eq!(payload.address, None);
    }

    #[test]
    fn empty_name_blocks_submission() {
        let errs = form("", 18.0, None).validate().unwrap_err();
        assert_eq!(errs.fields.len(), 1);
        assert_eq!(errs.fields[0].field, "name");
    }

    #[test]
    fn negative_age_blocks_submission() {
        let errs = form("Alice", -1.0, None).validate().unwrap_err();
        assert_eq!(errs.fields[0].field, "age");
    }

    #[test]
    fn fractional_age_blocks_submission() {
        let errs = form("Alice", 2.5, None).validate().unwrap_err();
        assert_eq!(errs.fields[0].field, "age");
        assert!(errs.fields[0].message.contains("integer"));
    }

    #[test]
    fn zero_age_blocks_submission() {
        assert!(form("Alice", 0.0, None).validate().is_err());
    }

    #[test]
    fn nan_age_blocks_submission() {
        assert!(form("Alice", f64::NAN, None).validate().is_err());
    }

    #[test]
    fn multiple_violations_collected_together() {
        let errs = form("", 2.5, None).validate().unwrap_err();
        assert_eq!(errs.fields.len(), 2);
    }

    #[test]
    fn payload_serializes_deterministically() {
        let payload = form("Alice", 30.0, Some("12 Main St")).validate().unwrap();
        let a = payload.to_json().unwrap();
        let b = payload.to_json().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, r#"{"name":"Alice","age":30,"address":"12 Main St"}"#);
    }

    #[test]
    fn payload_without_address_omits_the_field() {
        let payload = form("Alice", 30.0, None).validate().unwrap();
        assert_eq!(payload.to_json().unwrap(), r#"{"name":"Alice","age":30}"#);
    }
}
