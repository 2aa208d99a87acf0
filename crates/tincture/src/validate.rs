//! Syntactic input checks.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shape accepted by [`is_valid_email`], anchored at both ends.
///
/// A non-empty local part of letters, digits and `._%+-`, an `@`, domain
/// labels of letters, digits, `.` and `-`, then a dot and an alphabetic
/// top-level label of 2 to 64 letters.
pub const EMAIL_PATTERN: &str = r"\A[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}\z";

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern"));

/// Checks that `candidate` looks like an email address.
///
/// The whole string must match [`EMAIL_PATTERN`]; surrounding whitespace or
/// any other prefix or suffix makes it invalid. This is a sanity check on
/// shape only. Deliverability, internationalized domains and the full RFC
/// 5322 grammar are not considered.
///
/// ```rust
/// use tincture::is_valid_email;
///
/// assert!(is_valid_email("user@domain.com"));
/// assert!(!is_valid_email("user@domain"));
/// assert!(!is_valid_email("user domain.com"));
/// assert!(!is_valid_email("@domain.com"));
/// ```
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_shapes() {
        for address in [
            "user@domain.com",
            "first.last+tag@sub.example.co.uk",
            "a_b%c-d@host-name.io",
            "x@y.museum",
            "UPPER@CASE.ORG",
        ] {
            assert!(is_valid_email(address), "{address} should be valid");
        }
    }

    #[test]
    fn test_rejects_malformed() {
        for address in [
            "",
            "user@domain",
            "user domain.com",
            "@domain.com",
            "user@",
            "user@@domain.com",
            "user@domain.c",
            "user@domain.c0m",
            "user@domain.com.",
            "us er@domain.com",
            "user@dom_ain.com",
            "üser@domain.com",
        ] {
            assert!(!is_valid_email(address), "{address} should be invalid");
        }
    }

    #[test]
    fn test_match_is_anchored() {
        assert!(!is_valid_email(" user@domain.com"));
        assert!(!is_valid_email("user@domain.com "));
        assert!(!is_valid_email("user@domain.com\n"));
        assert!(!is_valid_email("mail me at user@domain.com"));
    }

    #[test]
    fn test_top_level_label_length_bounds() {
        let longest = format!("user@domain.{}", "a".repeat(64));
        let too_long = format!("user@domain.{}", "a".repeat(65));
        assert!(is_valid_email(&longest));
        assert!(!is_valid_email(&too_long));
    }
}
