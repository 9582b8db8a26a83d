//! Validation port and the default rule sets for both entity kinds.
//!
//! Every rule runs; violations are collected rather than stopping at the
//! first one. Field names in messages use the names clients send.

use chrono::{DateTime, Utc};

use crate::errors::{ValidationError, ValidationResult};
use crate::models::{NewOrganization, NewUser, OrganizationInput, UserInput};

const MAX_TEXT_LEN: usize = 255;
const MAX_USERNAME_LEN: usize = 50;
const MAX_EMAIL_LEN: usize = 254;
const MIN_PASSWORD_LEN: usize = 6;
// bcrypt only looks at the first 72 bytes
const MAX_PASSWORD_LEN: usize = 72;

/// Checks candidate fields before they are persisted and produces the
/// validated value set.
pub trait Validator<C>: Send + Sync {
    type Output;

    fn validate(&self, candidate: C) -> ValidationResult<Self::Output>;
}

pub type OrganizationValidator = dyn Validator<OrganizationInput, Output = NewOrganization>;
pub type UserValidator = dyn Validator<UserInput, Output = NewUser>;

/// Default organization rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrganizationSchema;

impl Validator<OrganizationInput> for OrganizationSchema {
    type Output = NewOrganization;

    fn validate(&self, candidate: OrganizationInput) -> ValidationResult<NewOrganization> {
        let mut errors = ValidationError::new();

        let organization = required_text(&mut errors, "organization", candidate.organization);
        let products = required_list(&mut errors, "products", candidate.products);
        let market_value = match candidate.market_value {
            Some(value) if value < 0 => {
                errors.push("marketValue", "\"marketValue\" must be greater than or equal to 0");
                value
            }
            Some(value) => value,
            None => {
                errors.push("marketValue", "\"marketValue\" is required");
                0
            }
        };
        let address = required_text(&mut errors, "address", candidate.address);
        let ceo = required_text(&mut errors, "ceo", candidate.ceo);
        let country = required_text(&mut errors, "country", candidate.country);
        let employees = required_list(&mut errors, "employees", candidate.employees);
        let no_of_employees = candidate.no_of_employees.unwrap_or(0);
        if no_of_employees < 0 {
            errors.push(
                "noOfEmployees",
                "\"noOfEmployees\" must be greater than or equal to 0",
            );
        }

        errors.into_result(NewOrganization {
            organization,
            products,
            market_value,
            address,
            ceo,
            country,
            employees,
            no_of_employees,
        })
    }
}

/// Default user rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct UserSchema;

impl Validator<UserInput> for UserSchema {
    type Output = NewUser;

    fn validate(&self, candidate: UserInput) -> ValidationResult<NewUser> {
        let mut errors = ValidationError::new();

        let username = required_text(&mut errors, "username", candidate.username);
        if !username.is_empty() {
            if username.chars().count() > MAX_USERNAME_LEN {
                errors.push(
                    "username",
                    format!(
                        "\"username\" length must be less than or equal to {} characters long",
                        MAX_USERNAME_LEN
                    ),
                );
            } else if !username
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
            {
                errors.push(
                    "username",
                    "\"username\" can only contain letters, numbers, underscores, hyphens and dots",
                );
            }
        }

        let email = required_text(&mut errors, "email", candidate.email);
        if !email.is_empty() {
            if let Err(message) = check_email(&email) {
                errors.push("email", message);
            }
        }

        let password = match candidate.password {
            None => {
                errors.push("password", "\"password\" is required");
                String::new()
            }
            Some(password) if password.len() < MIN_PASSWORD_LEN => {
                errors.push(
                    "password",
                    format!(
                        "\"password\" length must be at least {} characters long",
                        MIN_PASSWORD_LEN
                    ),
                );
                password
            }
            Some(password) if password.len() > MAX_PASSWORD_LEN => {
                errors.push(
                    "password",
                    format!(
                        "\"password\" length must be less than or equal to {} bytes long",
                        MAX_PASSWORD_LEN
                    ),
                );
                password
            }
            Some(password) => password,
        };

        let created_at = optional_timestamp(&mut errors, "createdAt", candidate.created_at);
        let updated_at = optional_timestamp(&mut errors, "updatedAt", candidate.updated_at);

        errors.into_result(NewUser {
            username,
            email,
            password,
            created_at,
            updated_at,
        })
    }
}

fn required_text(errors: &mut ValidationError, field: &str, value: Option<String>) -> String {
    match value {
        None => {
            errors.push(field, format!("\"{}\" is required", field));
            String::new()
        }
        Some(text) if text.trim().is_empty() => {
            errors.push(field, format!("\"{}\" is not allowed to be empty", field));
            text
        }
        Some(text) if text.chars().count() > MAX_TEXT_LEN => {
            errors.push(
                field,
                format!(
                    "\"{}\" length must be less than or equal to {} characters long",
                    field, MAX_TEXT_LEN
                ),
            );
            text
        }
        Some(text) => text,
    }
}

fn required_list(
    errors: &mut ValidationError,
    field: &str,
    value: Option<Vec<Option<String>>>,
) -> Vec<String> {
    let Some(items) = value else {
        errors.push(field, format!("\"{}\" is required", field));
        return Vec::new();
    };

    let mut accepted = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            None => errors.push(
                field,
                format!("\"{}[{}]\" must be a string", field, index),
            ),
            Some(text) if text.trim().is_empty() => errors.push(
                field,
                format!("\"{}[{}]\" is not allowed to be empty", field, index),
            ),
            Some(text) => accepted.push(text),
        }
    }
    accepted
}

fn optional_timestamp(
    errors: &mut ValidationError,
    field: &str,
    value: Option<String>,
) -> Option<DateTime<Utc>> {
    let raw = value?;
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(_) => {
            errors.push(field, format!("\"{}\" must be a valid date", field));
            None
        }
    }
}

fn check_email(email: &str) -> Result<(), String> {
    if email.len() > MAX_EMAIL_LEN {
        return Err("\"email\" is too long".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err("\"email\" must contain exactly one @".to_string());
    }

    let (local_part, domain_part) = (parts[0], parts[1]);
    if local_part.is_empty() || domain_part.is_empty() {
        return Err("\"email\" must be a valid email".to_string());
    }

    if !domain_part.contains('.') || domain_part.starts_with('.') || domain_part.ends_with('.') {
        return Err("\"email\" must have a valid domain".to_string());
    }

    if email.chars().any(char::is_whitespace) {
        return Err("\"email\" must be a valid email".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn organization_input() -> OrganizationInput {
        OrganizationInput {
            organization: Some("Acme".to_string()),
            products: items(&["anvils"]),
            market_value: Some(1_000),
            address: Some("1 Desert Rd".to_string()),
            ceo: Some("Wile".to_string()),
            country: Some("US".to_string()),
            employees: items(&["Wile", "Road"]),
            no_of_employees: Some(2),
        }
    }

    fn items(values: &[&str]) -> Option<Vec<Option<String>>> {
        Some(values.iter().map(|v| Some(v.to_string())).collect())
    }

    fn user_input() -> UserInput {
        UserInput {
            username: Some("a".to_string()),
            email: Some("a@x.com".to_string()),
            password: Some("secret".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_valid_organization() {
        let validated = OrganizationSchema.validate(organization_input()).unwrap();
        assert_eq!(validated.organization, "Acme");
        assert_eq!(validated.no_of_employees, 2);
    }

    #[test]
    fn test_organization_collects_every_violation() {
        let err = OrganizationSchema
            .validate(OrganizationInput::default())
            .unwrap_err();

        assert_eq!(
            err.fields(),
            vec![
                "organization",
                "products",
                "marketValue",
                "address",
                "ceo",
                "country",
                "employees"
            ]
        );
    }

    #[test]
    fn test_organization_rejects_blank_and_negative() {
        let mut input = organization_input();
        input.ceo = Some("   ".to_string());
        input.market_value = Some(-5);
        input.products = items(&["ok", ""]);

        let err = OrganizationSchema.validate(input).unwrap_err();
        assert!(err.has_field("ceo"));
        assert!(err.has_field("marketValue"));
        assert!(err
            .details
            .iter()
            .any(|d| d.message == "\"products[1]\" is not allowed to be empty"));
    }

    #[test]
    fn test_empty_lists_are_valid() {
        let mut input = organization_input();
        input.products = items(&[]);
        input.employees = items(&[]);
        input.no_of_employees = Some(0);

        assert!(OrganizationSchema.validate(input).is_ok());
    }

    #[test]
    fn test_null_list_items_are_rejected() {
        let mut input = organization_input();
        input.employees = Some(vec![Some("Wile".to_string()), None]);

        let err = OrganizationSchema.validate(input).unwrap_err();
        assert_eq!(err.fields(), vec!["employees"]);
        assert_eq!(err.details[0].message, "\"employees[1]\" must be a string");
    }

    #[test]
    fn test_valid_user() {
        let validated = UserSchema.validate(user_input()).unwrap();
        assert_eq!(validated.username, "a");
        assert_eq!(validated.password, "secret");
        assert!(validated.created_at.is_none());
    }

    #[test]
    fn test_user_email_rules() {
        for bad in ["notanemail", "@example.com", "test@", "a@b@c.com", "a@nodot", "a b@x.com"] {
            let mut input = user_input();
            input.email = Some(bad.to_string());
            let err = UserSchema.validate(input).unwrap_err();
            assert_eq!(err.fields(), vec!["email"], "{bad} should be rejected");
        }
    }

    #[test]
    fn test_user_password_length() {
        let mut input = user_input();
        input.password = Some("short".to_string());
        assert!(UserSchema.validate(input).unwrap_err().has_field("password"));

        let mut input = user_input();
        input.password = Some("x".repeat(73));
        assert!(UserSchema.validate(input).unwrap_err().has_field("password"));
    }

    #[test]
    fn test_user_username_characters() {
        let mut input = user_input();
        input.username = Some("user name".to_string());
        assert!(UserSchema.validate(input).unwrap_err().has_field("username"));

        let mut input = user_input();
        input.username = Some("user.name-1_x".to_string());
        assert!(UserSchema.validate(input).is_ok());
    }

    #[test]
    fn test_user_timestamps() {
        let mut input = user_input();
        input.created_at = Some("2024-01-02T03:04:05Z".to_string());
        let validated = UserSchema.validate(input).unwrap();
        assert_eq!(
            validated.created_at.map(|t| t.to_rfc3339()),
            Some("2024-01-02T03:04:05+00:00".to_string())
        );

        let mut input = user_input();
        input.updated_at = Some("yesterday".to_string());
        assert_eq!(
            UserSchema.validate(input).unwrap_err().fields(),
            vec!["updatedAt"]
        );
    }
}
