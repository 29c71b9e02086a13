//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a phone number is 10 to 15 digits, ignoring common
/// separators.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits: Vec<char> = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+' | '.'))
        .collect();

    if digits.len() < 10 || digits.len() > 15 {
        let mut err = ValidationError::new("phone_length");
        err.message = Some(format!("Phone must be 10-15 digits (got {})", digits.len()).into());
        return Err(err);
    }

    if !digits.iter().all(char::is_ascii_digit) {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone may only contain digits and separators".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a login PIN is four to six digits.
pub fn validate_pin(pin: &str) -> Result<(), ValidationError> {
    if pin.len() < 4 || pin.len() > 6 || !pin.chars().all(|c| c.is_ascii_digit()) {
        let mut err = ValidationError::new("pin_format");
        err.message = Some("PIN must be 4-6 digits".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a last initial is a single letter.
pub fn validate_last_initial(initial: &str) -> Result<(), ValidationError> {
    let mut chars = initial.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(()),
        _ => {
            let mut err = ValidationError::new("last_initial");
            err.message = Some("Last initial must be a single letter".into());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone("9155550199").is_ok());
        assert!(validate_phone("915-555-0199").is_ok());
        assert!(validate_phone("+1 (915) 555-0199").is_ok());
    }

    #[test]
    fn test_validate_phone_invalid() {
        assert!(validate_phone("12345").is_err()); // too short
        assert!(validate_phone("1234567890123456").is_err()); // too long
        assert!(validate_phone("91555501ab").is_err()); // letters
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_validate_pin() {
        assert!(validate_pin("1234").is_ok());
        assert!(validate_pin("123456").is_ok());
        assert!(validate_pin("123").is_err());
        assert!(validate_pin("1234567").is_err());
        assert!(validate_pin("12a4").is_err());
    }

    #[test]
    fn test_validate_last_initial() {
        assert!(validate_last_initial("N").is_ok());
        assert!(validate_last_initial("n").is_ok());
        assert!(validate_last_initial("").is_err());
        assert!(validate_last_initial("NG").is_err());
        assert!(validate_last_initial("7").is_err());
    }
}
