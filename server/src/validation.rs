//! Input validation helpers
//!
//! Field checks run before the ledger is consulted, so malformed requests
//! are rejected without opening a store transaction.

use crate::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Contact names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<String, AppError> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(AppError::InvalidRequest(format!("{field} is required")));
    }
    if value.len() > max_len {
        return Err(AppError::InvalidRequest(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(value.to_string())
}

/// Validate an optional string: trimmed, empty treated as absent.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<Option<String>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.len() > max_len => Err(AppError::InvalidRequest(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))),
        Some(v) => Ok(Some(v.to_string())),
    }
}

/// Validate a contact email: required, plausible shape, within limits.
pub fn validate_email(value: Option<&str>) -> Result<String, AppError> {
    let email = validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        return Err(AppError::InvalidRequest(format!(
            "email address looks invalid: {email}"
        )));
    }
    Ok(email)
}

/// Validate a party size against the slot capacity.
pub fn validate_people(value: Option<i64>, capacity: u32) -> Result<u32, AppError> {
    let people = value.ok_or_else(|| AppError::InvalidRequest("people is required".into()))?;
    if people < 1 {
        return Err(AppError::InvalidRequest(
            "people must be at least 1".into(),
        ));
    }
    if people > i64::from(capacity) {
        return Err(AppError::InvalidRequest(format!(
            "people must be at most {capacity}"
        )));
    }
    Ok(people as u32)
}
