//! Field rules for user input.
//!
//! Creation needs every property filled in; an edit only needs one.
//! An empty string and a missing property are the same thing here, and
//! whitespace is not trimmed.

pub mod errors;

pub use errors::*;

use crate::models::User;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// WHATWG "valid e-mail address" expression.
    pub static ref EMAIL_PATTERN: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("email pattern must compile");
}

pub const MISSING_ALL_PROPS: &str =
    "At least one property must be filled out to complete an edit.";
pub const INVALID_INPUT: &str = "Invalid input received, see ErrorList for details.";

/// One property under validation.
struct Property<'a> {
    name: &'static str,
    friendly_name: &'static str,
    value: &'a str,
}

fn required_props(user: &User) -> [Property<'_>; 4] {
    [
        Property {
            name: "FirstName",
            friendly_name: "First Name",
            value: &user.first_name,
        },
        Property {
            name: "LastName",
            friendly_name: "Last Name",
            value: &user.last_name,
        },
        Property {
            name: "Email",
            friendly_name: "Email",
            value: &user.email,
        },
        Property {
            name: "Organization",
            friendly_name: "Organization",
            value: &user.organization,
        },
    ]
}

pub fn required_message(prop: &str) -> String {
    format!("{} is required.", prop)
}

pub fn incorrect_format_message(prop: &str) -> String {
    format!("{} is not in the correct format.", prop)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn check_email(errs: &mut Vec<FieldError>, email: &str) {
    if !email.is_empty() && !is_valid_email(email) {
        errs.push(FieldError::new("Email", email, incorrect_format_message("Email")));
    }
}

/// Checks a user meant for creation. Every property is required and a
/// non-empty email must be well formed. An empty result means valid.
pub fn validate_complete(user: &User) -> Vec<FieldError> {
    let mut errs = Vec::new();

    for p in required_props(user) {
        if p.value.is_empty() {
            errs.push(FieldError::new(p.name, p.value, required_message(p.friendly_name)));
        }
    }

    check_email(&mut errs, &user.email);
    errs
}

/// Checks the payload of an edit. At least one property must be filled
/// out; a supplied email is still format checked.
pub fn validate_partial(user: &User) -> Vec<FieldError> {
    if required_props(user).iter().all(|p| p.value.is_empty()) {
        return vec![FieldError::new("", "", MISSING_ALL_PROPS.to_string())];
    }

    let mut errs = Vec::new();
    check_email(&mut errs, &user.email);
    errs
}
