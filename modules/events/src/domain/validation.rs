//! Input rules shared by the lookup endpoint and the booking action.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::DomainError;

// Lowercase alphanumeric segments joined by single hyphens.
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid slug regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Check a path slug: empty means missing, anything off-pattern is invalid.
pub fn check_slug(slug: &str) -> Result<&str, DomainError> {
    if slug.is_empty() {
        return Err(DomainError::MissingSlug);
    }
    if !is_valid_slug(slug) {
        return Err(DomainError::invalid_slug(slug));
    }
    Ok(slug)
}

/// Trim, lowercase, then validate an email address.
pub fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    if EMAIL_RE.is_match(&email) {
        Ok(email)
    } else {
        Err(DomainError::invalid_email(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_slugs() {
        for slug in ["summer-fest", "a", "2025", "rust-conf-2025", "x1-y2-z3"] {
            assert!(is_valid_slug(slug), "{slug} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_slugs() {
        for slug in [
            "",
            "Summer_Fest",
            "Summer-fest",
            "summer--fest",
            "-summer",
            "summer-",
            "summer fest",
            "summer_fest",
            "café",
            "summer/fest",
            "-",
        ] {
            assert!(!is_valid_slug(slug), "{slug:?} should be invalid");
        }
    }

    #[test]
    fn check_slug_distinguishes_missing_from_invalid() {
        assert!(matches!(check_slug(""), Err(DomainError::MissingSlug)));
        assert!(matches!(
            check_slug("Bad_Slug"),
            Err(DomainError::InvalidSlug { .. })
        ));
        assert_eq!(check_slug("ok-slug").unwrap(), "ok-slug");
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  User@Example.com ").unwrap(),
            "user@example.com"
        );
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["not-an-email", "a@b", "@example.com", "a b@example.com", "", "   "] {
            assert!(
                matches!(normalize_email(email), Err(DomainError::InvalidEmail { .. })),
                "{email:?} should be rejected"
            );
        }
    }
}
