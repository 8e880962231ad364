//! Request field validation producing Laravel-style `{field: [messages]}` maps.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Wire format of `date_of_origin`.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

static PASSWORD_RULES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [r"[a-z]", r"[A-Z]", r"[0-9]", r"[@$!%*#?&]"]
        .map(|pattern| Regex::new(pattern).expect("valid password regex"))
});

#[derive(Debug, Default, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicate messages for the same field are collapsed.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        let messages = self.0.entry(field).or_default();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Returns the value if present and non-blank, recording an error otherwise.
    pub fn required<'a>(&mut self, field: &'static str, value: Option<&'a str>) -> Option<&'a str> {
        match value {
            Some(v) if !v.trim().is_empty() => Some(v),
            _ => {
                self.add(field, format!("The {} field is required.", label(field)));
                None
            }
        }
    }

    /// `required` for a raw JSON value: anything other than a string records
    /// a type error instead.
    pub fn required_string<'a>(
        &mut self,
        field: &'static str,
        value: Option<&'a Value>,
    ) -> Option<&'a str> {
        match value {
            None | Some(Value::Null) => self.required(field, None),
            Some(Value::String(s)) => self.required(field, Some(s.as_str())),
            Some(_) => {
                self.add(field, format!("The {} must be a string.", label(field)));
                None
            }
        }
    }

    pub fn email(&mut self, field: &'static str, value: &str) {
        if !EMAIL_RE.is_match(value) {
            self.add(
                field,
                format!("The {} must be a valid email address.", label(field)),
            );
        }
    }

    pub fn length_between(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min {
            self.add(
                field,
                format!("The {} must be at least {min} characters.", label(field)),
            );
        } else if len > max {
            self.add(
                field,
                format!("The {} must not be greater than {max} characters.", label(field)),
            );
        }
    }

    /// At least 8 characters with a lowercase letter, an uppercase letter,
    /// a digit and one of `@$!%*#?&`.
    pub fn password(&mut self, field: &'static str, value: &str) {
        if value.chars().count() < 8 {
            self.add(
                field,
                format!("The {} must be at least 8 characters.", label(field)),
            );
        }
        if PASSWORD_RULES.iter().any(|rule| !rule.is_match(value)) {
            self.add(field, format!("The {} format is invalid.", label(field)));
        }
    }

    pub fn date(&mut self, field: &'static str, value: &str) -> Option<NaiveDate> {
        match parse_date(value) {
            Some(date) => Some(date),
            None => {
                self.add(
                    field,
                    format!("The {} does not match the format m/d/Y.", label(field)),
                );
                None
            }
        }
    }

    pub fn one_of(&mut self, field: &'static str, value: &str, allowed: &[&str]) -> bool {
        if allowed.contains(&value) {
            true
        } else {
            self.add(field, format!("The selected {} is invalid.", label(field)));
            false
        }
    }

    pub fn confirmed(&mut self, field: &'static str, value: &str, confirmation: Option<&str>) {
        if confirmation != Some(value) {
            self.add(
                field,
                format!("The {} confirmation does not match.", label(field)),
            );
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.keys().copied().collect();
        write!(f, "{}", fields.join(", "))
    }
}

/// Strict `mm/dd/yyyy`: the value must round-trip through the format, so
/// `1/5/2022` is rejected.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == value).then_some(date)
}

/// `date_of_origin` -> "date of origin", `resetToken` -> "reset token".
fn label(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        if c == '_' {
            out.push(' ');
        } else if c.is_ascii_uppercase() {
            out.push(' ');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_missing_and_blank() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.required("name", Some("Ada")), Some("Ada"));
        assert!(errors.required("description", None).is_none());
        assert!(errors.required("date_of_origin", Some("   ")).is_none());

        assert_eq!(
            errors.get("description").unwrap(),
            ["The description field is required."]
        );
        assert_eq!(
            errors.get("date_of_origin").unwrap(),
            ["The date of origin field is required."]
        );
        assert!(!errors.has("name"));
    }

    #[test]
    fn required_string_rejects_other_json_types() {
        let mut errors = ValidationErrors::new();
        let name = Value::from("Ada");
        let number = Value::from(12345);
        let list = serde_json::json!(["a"]);

        assert_eq!(errors.required_string("name", Some(&name)), Some("Ada"));
        assert!(errors.required_string("description", Some(&number)).is_none());
        assert!(errors.required_string("email", Some(&list)).is_none());
        assert!(errors.required_string("password", Some(&Value::Null)).is_none());

        assert!(!errors.has("name"));
        assert_eq!(
            errors.get("description").unwrap(),
            ["The description must be a string."]
        );
        assert_eq!(errors.get("email").unwrap(), ["The email must be a string."]);
        assert_eq!(
            errors.get("password").unwrap(),
            ["The password field is required."]
        );
    }

    #[test]
    fn password_rules() {
        let mut errors = ValidationErrors::new();
        errors.password("password", "Secret#123");
        assert!(errors.is_empty());

        errors.password("password", "secret#123");
        errors.password("password", "SECRET#123");
        errors.password("password", "Secret1234");
        // One message per field regardless of how many patterns fail.
        assert_eq!(
            errors.get("password").unwrap(),
            ["The password format is invalid."]
        );

        let mut errors = ValidationErrors::new();
        errors.password("password", "Sh#1");
        assert_eq!(errors.get("password").unwrap().len(), 1);
        assert!(errors.get("password").unwrap()[0].contains("at least 8"));
    }

    #[test]
    fn email_format() {
        let mut errors = ValidationErrors::new();
        errors.email("email", "user@example.com");
        assert!(errors.is_empty());
        errors.email("email", "not-an-email");
        assert_eq!(
            errors.get("email").unwrap(),
            ["The email must be a valid email address."]
        );
    }

    #[test]
    fn strict_date_format() {
        assert_eq!(
            parse_date("03/14/2022"),
            NaiveDate::from_ymd_opt(2022, 3, 14)
        );
        assert_eq!(parse_date("3/14/2022"), None);
        assert_eq!(parse_date("2022-03-14"), None);
        assert_eq!(parse_date("02/30/2022"), None);
    }

    #[test]
    fn camel_case_labels() {
        let mut errors = ValidationErrors::new();
        errors.required("resetToken", None);
        assert_eq!(
            errors.get("resetToken").unwrap(),
            ["The reset token field is required."]
        );
    }

    #[test]
    fn serializes_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.one_of("status", "done", &["completed", "opened"]);
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "status": ["The selected status is invalid."] })
        );
    }

    #[test]
    fn name_length_bounds() {
        let mut errors = ValidationErrors::new();
        errors.length_between("name", "Al", 3, 255);
        errors.length_between("name", &"x".repeat(256), 3, 255);
        assert_eq!(errors.get("name").unwrap().len(), 2);
    }
}
