//! Input rules for account credentials.

use validator::ValidateEmail;

use super::error::DomainError;

pub const DEFAULT_MIN_PASSWORD_CHARS: usize = 8;

/// Emails are stored exactly as submitted, so surrounding whitespace is rejected
/// rather than trimmed away.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::validation("email must not be empty"));
    }
    if email.trim() != email {
        return Err(DomainError::validation(
            "email must not contain leading or trailing whitespace",
        ));
    }
    if !email.validate_email() {
        return Err(DomainError::validation("email address is malformed"));
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub fn validate_password(password: &str, min_chars: usize) -> Result<(), DomainError> {
    if password.chars().count() < min_chars {
        return Err(DomainError::validation(format!(
            "password must be at least {min_chars} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_address() {
        assert!(validate_email("a@x.com").is_ok());
    }

    #[test]
    fn rejects_empty_and_malformed_addresses() {
        for candidate in ["", "plainaddress", "@x.com", "a@", "a b@x.com", " a@x.com"] {
            assert!(
                validate_email(candidate).is_err(),
                "`{candidate}` should be rejected"
            );
        }
    }

    #[test]
    fn password_length_boundary() {
        assert!(validate_password("1234567", DEFAULT_MIN_PASSWORD_CHARS).is_err());
        assert!(validate_password("12345678", DEFAULT_MIN_PASSWORD_CHARS).is_ok());
    }

    #[test]
    fn password_length_counts_characters() {
        // eight characters, sixteen bytes
        assert!(validate_password("ééééééé", DEFAULT_MIN_PASSWORD_CHARS).is_err());
        assert!(validate_password("éééééééé", DEFAULT_MIN_PASSWORD_CHARS).is_ok());
    }
}
