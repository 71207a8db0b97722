//! Address validators used by the image and link panels.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum address length (RFC 5321 4.5.3.1.3).
const MAX_EMAIL_LEN: usize = 256;
/// Maximum local-part length (RFC 5321 4.5.3.1.1).
const MAX_LOCAL_PART_LEN: usize = 64;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_!#$%&'*+\-/=?^`{|}~](\.?[A-Za-z0-9_!#$%&'*+\-/=?^`{|}~])*@([A-Za-z0-9_\-]+\.)+([A-Za-z0-9_]+)$",
    )
    .expect("email pattern is valid")
});

/// Whether `s` looks like an email address.
pub fn is_email(s: &str) -> bool {
    if s.chars().count() > MAX_EMAIL_LEN {
        return false;
    }
    if let Some(at) = s.find('@') {
        if s[..at].chars().count() > MAX_LOCAL_PART_LEN {
            return false;
        }
    }
    EMAIL.is_match(s)
}

/// Whether `s` is an absolute http(s) URL. Only the scheme is checked.
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_plain_address() {
        assert!(is_email("user@example.com"));
        assert!(is_email("first.last+tag@mail.example.co.jp"));
        assert!(is_email("o'brien@example.org"));
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert!(!is_email("not-an-email"));
        assert!(!is_email("user@localhost"));
        assert!(!is_email(".user@example.com"));
        assert!(!is_email("us..er@example.com"));
        assert!(!is_email("user@example.com "));
        assert!(!is_email(""));
    }

    #[test]
    fn test_email_local_part_limit() {
        let ok = format!("{}@example.com", "a".repeat(64));
        assert!(is_email(&ok));
        let too_long = format!("{}@example.com", "a".repeat(65));
        assert!(!is_email(&too_long));
    }

    #[test]
    fn test_email_total_length_limit() {
        // 10 + 1 + 242 + 4 = 257 characters.
        let domain = "d".repeat(242);
        let long = format!("{}@{}.com", "a".repeat(10), domain);
        assert_eq!(long.len(), 257);
        assert!(!is_email(&long));

        let domain = "d".repeat(241);
        let fits = format!("{}@{}.com", "a".repeat(10), domain);
        assert_eq!(fits.len(), 256);
        assert!(is_email(&fits));
    }

    #[test]
    fn test_url() {
        assert!(is_url("http://example.com"));
        assert!(is_url("https://example.com/path"));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("example.com"));
        assert!(!is_url("HTTP://example.com"));
        assert!(!is_url(" http://example.com"));
    }
}
