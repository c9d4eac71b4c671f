//! Validation for the sign-in and sign-up forms.
//!
//! Sign-in only needs an email and password. Sign-up also collects the
//! personal details the payments network requires to create a customer.

use std::{fmt::Display, str::FromStr};

use email_address::EmailAddress;
use serde::Deserialize;
use thiserror::Error;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::logging::Redacted;

const MIN_NAME_LENGTH: usize = 2;
const MAX_ADDRESS_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 8;

const DATE_OF_BIRTH_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// US state, district and territory postal abbreviations.
const US_STATE_CODES: [&str; 59] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC", "AS", "GU", "MP", "PR", "VI", "AA", "AE", "AP",
];

/// Which form is being submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFormKind {
    /// Logging in to an existing account.
    SignIn,
    /// Creating a new account.
    SignUp,
}

impl FromStr for AuthFormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sign-in" => Ok(Self::SignIn),
            "sign-up" => Ok(Self::SignUp),
            other => Err(format!("unknown auth form type \"{other}\"")),
        }
    }
}

/// The fields of the auth form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    /// The given name.
    FirstName,
    /// The family name.
    LastName,
    /// The first line of the street address.
    Address1,
    /// The city of the street address.
    City,
    /// The state of the street address.
    State,
    /// The ZIP code of the street address.
    PostalCode,
    /// The date of birth.
    DateOfBirth,
    /// The social security number.
    Ssn,
    /// The email address used to log in.
    Email,
    /// The password used to log in.
    Password,
}

impl AuthField {
    /// The name of the form input.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Address1 => "address1",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postalCode",
            Self::DateOfBirth => "dateOfBirth",
            Self::Ssn => "ssn",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// A single invalid field and the message to show under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The invalid field.
    pub field: AuthField,
    /// What is wrong with the field.
    pub message: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.name(), self.message)
    }
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid form: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// The message for `field`, if it failed validation.
    pub fn message_for(&self, field: AuthField) -> Option<&'static str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }
}

/// The submitted auth form.
///
/// Fields only used for sign-up are optional so that a sign-in submission
/// can be deserialized into the same type.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthForm {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// First line of the street address.
    pub address1: Option<String>,
    /// City of the street address.
    pub city: Option<String>,
    /// Two letter US state code, e.g. "NY".
    pub state: Option<String>,
    /// US ZIP code, e.g. "11101" or "11101-1234".
    pub postal_code: Option<String>,
    /// In YYYY-MM-DD format.
    pub date_of_birth: Option<String>,
    /// Nine digits, no dashes.
    pub ssn: Option<String>,
    /// The email address used to log in.
    pub email: String,
    /// The password used to log in.
    pub password: String,
}

impl std::fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("address1", &self.address1)
            .field("city", &self.city)
            .field("state", &self.state)
            .field("postal_code", &self.postal_code)
            .field("date_of_birth", &Redacted(&self.date_of_birth))
            .field("ssn", &Redacted(&self.ssn))
            .field("email", &self.email)
            .field("password", &Redacted(&self.password))
            .finish()
    }
}

impl AuthForm {
    /// Check the form for `kind`.
    ///
    /// # Errors
    ///
    /// Returns every invalid field, with the first failed rule for each field.
    pub fn validate(&self, kind: AuthFormKind) -> Result<(), ValidationErrors> {
        tracing::debug!("validating {kind:?} form: {:?}", self);
        let mut errors = Vec::new();

        let mut check = |field: AuthField, result: Result<(), &'static str>| {
            if let Err(message) = result {
                errors.push(FieldError { field, message });
            }
        };

        if kind == AuthFormKind::SignUp {
            check(
                AuthField::FirstName,
                required(&self.first_name).and_then(validate_first_name),
            );
            check(
                AuthField::LastName,
                required(&self.last_name).and_then(validate_last_name),
            );
            check(
                AuthField::Address1,
                required(&self.address1).and_then(validate_address),
            );
            check(AuthField::City, required(&self.city).and_then(validate_city));
            check(AuthField::State, required(&self.state).and_then(validate_state));
            check(
                AuthField::PostalCode,
                required(&self.postal_code).and_then(validate_postal_code),
            );
            check(
                AuthField::DateOfBirth,
                required(&self.date_of_birth).and_then(validate_date_of_birth),
            );
            check(AuthField::Ssn, required(&self.ssn).and_then(validate_ssn));
        }

        check(AuthField::Email, validate_email(&self.email));
        check(AuthField::Password, validate_password(&self.password));

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!("form has {} invalid fields", errors.len());
            Err(ValidationErrors(errors))
        }
    }
}

fn required(value: &Option<String>) -> Result<&str, &'static str> {
    value.as_deref().ok_or("Required")
}

fn validate_first_name(name: &str) -> Result<(), &'static str> {
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err("First name must be at least 2 characters");
    }

    Ok(())
}

fn validate_last_name(name: &str) -> Result<(), &'static str> {
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err("Last name must be at least 2 characters");
    }

    Ok(())
}

fn validate_address(address: &str) -> Result<(), &'static str> {
    if address.chars().count() > MAX_ADDRESS_LENGTH {
        return Err("Address too long");
    }

    Ok(())
}

fn validate_city(city: &str) -> Result<(), &'static str> {
    if city.chars().count() > MAX_ADDRESS_LENGTH {
        return Err("City name too long");
    }

    Ok(())
}

fn validate_state(state: &str) -> Result<(), &'static str> {
    if state.chars().count() != 2 {
        return Err("State must be 2 letters");
    }

    if !US_STATE_CODES.contains(&state) {
        return Err("Invalid U.S. state code");
    }

    Ok(())
}

fn validate_postal_code(postal_code: &str) -> Result<(), &'static str> {
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let is_valid = match postal_code.len() {
        5 | 9 => all_digits(postal_code),
        10 => match postal_code.split_once('-') {
            Some((zip, plus_four)) => {
                zip.len() == 5 && plus_four.len() == 4 && all_digits(zip) && all_digits(plus_four)
            }
            None => false,
        },
        _ => false,
    };

    if is_valid {
        Ok(())
    } else {
        Err("Invalid U.S. ZIP code")
    }
}

fn validate_date_of_birth(date_of_birth: &str) -> Result<(), &'static str> {
    let bytes = date_of_birth.as_bytes();
    let has_shape = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !has_shape {
        return Err("Date of Birth must be in YYYY-MM-DD format");
    }

    Date::parse(date_of_birth, DATE_OF_BIRTH_FORMAT)
        .map(|_| ())
        .map_err(|_| "Date of Birth is not a valid date")
}

fn validate_ssn(ssn: &str) -> Result<(), &'static str> {
    if ssn.len() == 9 && ssn.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err("SSN must be exactly 9 digits")
    }
}

/// Parse the address with [EmailAddress] and then hold it to the stricter
/// shape sign-up forms accept: no display name or domain literal, a local part
/// of letters, digits and `_'+-.` without leading, trailing or doubled dots,
/// and a domain of alphanumeric labels ending in an alphabetic TLD.
fn validate_email(email: &str) -> Result<(), &'static str> {
    const INVALID: &str = "Invalid email format";

    let address = email.parse::<EmailAddress>().map_err(|_| INVALID)?;
    if address.email() != email {
        return Err(INVALID);
    }

    if is_valid_local_part(address.local_part()) && is_valid_domain(address.domain()) {
        Ok(())
    } else {
        Err(INVALID)
    }
}

fn is_valid_local_part(local_part: &str) -> bool {
    !local_part.is_empty()
        && !local_part.starts_with('.')
        && !local_part.ends_with('.')
        && !local_part.contains("..")
        && local_part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_'+-.".contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();

    let Some((tld, subdomains)) = labels.split_last() else {
        return false;
    };

    !subdomains.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
        && subdomains.iter().all(|label| {
            label.starts_with(|c: char| c.is_ascii_alphanumeric())
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters");
    }

    Ok(())
}
