//! Common validation rules shared across request payloads.

use validator::{ValidateEmail, ValidationError};

use crate::types::EmployeeId;

const MAX_NAME_LEN: usize = 100;

/// Validates an employee display name.
///
/// Requirements:
/// - Not blank after trimming
/// - At most 100 characters
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("name_required"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new("name_too_long"));
    }
    Ok(())
}

/// Validates that an hourly wage is a finite, non-negative amount.
pub fn validate_hourly_wage(wage: f64) -> Result<(), ValidationError> {
    if !wage.is_finite() {
        return Err(ValidationError::new("hourly_wage_not_finite"));
    }
    if wage < 0.0 {
        return Err(ValidationError::new("hourly_wage_negative"));
    }
    Ok(())
}

/// Validates a contact email. An empty string is accepted and clears the
/// stored address on update.
pub fn validate_optional_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email"))
}

/// Validates a requested employee PIN (4-8 digits).
pub fn validate_pin(pin: &str) -> Result<(), ValidationError> {
    EmployeeId::parse(pin)
        .map(|_| ())
        .map_err(|_| ValidationError::new("pin_invalid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rejects_blank() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn name_rejects_overlong() {
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn name_accepts_valid() {
        assert!(validate_name("Kim Minji").is_ok());
    }

    #[test]
    fn wage_rejects_negative_and_nan() {
        assert!(validate_hourly_wage(-0.01).is_err());
        assert!(validate_hourly_wage(f64::NAN).is_err());
        assert!(validate_hourly_wage(f64::INFINITY).is_err());
    }

    #[test]
    fn wage_accepts_zero_and_positive() {
        assert!(validate_hourly_wage(0.0).is_ok());
        assert!(validate_hourly_wage(15000.0).is_ok());
    }

    #[test]
    fn optional_email_allows_clearing() {
        assert!(validate_optional_email("").is_ok());
        assert!(validate_optional_email("kim@example.com").is_ok());
        assert!(validate_optional_email("not-an-email").is_err());
    }

    #[test]
    fn pin_rule_follows_employee_id() {
        assert!(validate_pin("0427").is_ok());
        assert!(validate_pin("42").is_err());
        assert!(validate_pin("abcd").is_err());
    }
}
