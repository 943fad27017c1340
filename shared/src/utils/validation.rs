//! Input validation utilities (email, phone, OTP code format)

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

// Local numbers (9-11 digits) or E.164 with leading +
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+[1-9]\d{7,14}|0\d{8,10})$").unwrap()
});

/// Normalize a phone number by stripping common formatting characters
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check whether an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check whether a phone number is valid (local or E.164)
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(&normalize_phone(phone))
}

/// Check whether a string looks like an OTP code of the given length
pub fn is_valid_otp_format(code: &str, length: usize) -> bool {
    code.len() == length && code.chars().all(|c| c.is_ascii_digit())
}

/// Mask a phone number for logging (e.g. `091****678`)
pub fn mask_phone(phone: &str) -> String {
    let normalized = normalize_phone(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 3..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("guest@example.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn test_valid_phones() {
        assert!(is_valid_phone("0912345678"));
        assert!(is_valid_phone("+84912345678"));
        assert!(is_valid_phone("091 234 5678"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("abcdefghij"));
    }

    #[test]
    fn test_otp_format() {
        assert!(is_valid_otp_format("1234", 4));
        assert!(!is_valid_otp_format("123", 4));
        assert!(!is_valid_otp_format("12a4", 4));
        assert!(!is_valid_otp_format("12345", 4));
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("0912345678"), "091****678");
        assert_eq!(mask_phone("1234"), "****");
    }
}
