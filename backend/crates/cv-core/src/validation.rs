//! Field rules for credentials and externally supplied identifiers.
//!
//! Every rule is checked so the caller gets one message per failed field
//! instead of just the first.

use crate::{CoreError, Result as CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;

pub const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;
const MAX_UNIQUE_ID_LENGTH: usize = 256;

/// Validate a register/login payload. `None` means the field was absent.
#[track_caller]
pub fn validate_credentials(email: Option<&str>, password: Option<&str>) -> CoreResult<()> {
    let mut errors = Vec::new();

    match email {
        None => errors.push("\"email\" is required".to_string()),
        Some(e) if e.is_empty() => errors.push("\"email\" is not allowed to be empty".to_string()),
        Some(e) if !is_valid_email(e) => errors.push("\"email\" must be a valid email".to_string()),
        Some(_) => {}
    }

    match password {
        None => errors.push("\"password\" is required".to_string()),
        Some(p) if p.chars().count() < MIN_PASSWORD_LENGTH => errors.push(format!(
            "\"password\" length must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )),
        Some(_) => {}
    }

    finish(errors)
}

/// Validate a caller supplied CareVoice unique id.
#[track_caller]
pub fn validate_unique_id(unique_id: Option<&str>) -> CoreResult<()> {
    let mut errors = Vec::new();

    match unique_id {
        None => errors.push("\"uniqueId\" is required".to_string()),
        Some(id) if id.trim().is_empty() => {
            errors.push("\"uniqueId\" is not allowed to be empty".to_string())
        }
        Some(id) if id.len() > MAX_UNIQUE_ID_LENGTH => errors.push(format!(
            "\"uniqueId\" length must be less than or equal to {} characters long",
            MAX_UNIQUE_ID_LENGTH
        )),
        Some(_) => {}
    }

    finish(errors)
}

#[track_caller]
fn finish(errors: Vec<String>) -> CoreResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation {
            errors,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Pragmatic address check: one `@`, a non-empty local part without
/// whitespace, and a dotted domain whose final label is alphabetic.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LENGTH || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > MAX_LOCAL_PART_LENGTH || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}
