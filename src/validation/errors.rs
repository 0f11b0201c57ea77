use serde::Serialize;
use std::fmt;

/// A single failed rule, tied to one property of the submitted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    pub name: String,
    pub value: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(name: &str, value: &str, msg: String) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            msg,
        }
    }
}

/// Body of every error response: a summary plus the field-level failures,
/// if any. Only rejected input carries `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ValidationErrors {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "errors", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for e in &self.errors {
            write!(f, "; {}", e.msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let errs = ValidationErrors::new(
            "Invalid input",
            vec![FieldError::new("Email", "aaaaa", "Email is not in the correct format.".into())],
        );

        let json = serde_json::to_value(&errs).unwrap();
        assert_eq!(json["Message"], "Invalid input");
        assert_eq!(json["errors"][0]["name"], "Email");
        assert_eq!(json["errors"][0]["value"], "aaaaa");
        assert_eq!(json["errors"][0]["msg"], "Email is not in the correct format.");
    }

    #[test]
    fn test_omits_empty_error_list() {
        let json = serde_json::to_value(ValidationErrors::new("Gone", Vec::new())).unwrap();
        assert_eq!(json, serde_json::json!({ "Message": "Gone" }));
    }

    #[test]
    fn test_display_lists_messages() {
        let errs = ValidationErrors::new(
            "Bad",
            vec![FieldError::new("LastName", "", "Last Name is required.".into())],
        );
        assert_eq!(errs.to_string(), "Bad; Last Name is required.");
    }
}
