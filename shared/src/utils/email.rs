//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Same shape check the signup and login screens apply
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Normalize an email address by trimming surrounding whitespace
pub fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

/// Check if an email address is valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Mask an email address for logs (e.g., jo***@example.com)
pub fn mask_email(email: &str) -> String {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(is_valid_email("  padded@example.com  "));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@@example.com"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("johnny@example.com"), "jo***@example.com");
        assert_eq!(mask_email("j@example.com"), "j***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  user@example.com\n"), "user@example.com");
    }
}
