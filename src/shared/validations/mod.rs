//! Input shape checks shared by services and handlers

use std::sync::LazyLock;

use mongodb::bson::oid::ObjectId;
use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Loose `local@domain.tld` shape check. Deliverability is not verified.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Lowercase hex form of an ObjectId, or `None` when `id` is not one.
pub fn canonical_object_id(id: &str) -> Option<String> {
    ObjectId::parse_str(id).ok().map(|oid| oid.to_hex())
}

/// Treats `None`, empty and whitespace-only strings alike.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("valid@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spa ce@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn object_id_canonical_form() {
        assert_eq!(
            canonical_object_id("65f1c2a9e4b0a1b2c3d4e5f6").as_deref(),
            Some("65f1c2a9e4b0a1b2c3d4e5f6")
        );
        assert_eq!(
            canonical_object_id("65F1C2A9E4B0A1B2C3D4E5F6").as_deref(),
            Some("65f1c2a9e4b0a1b2c3d4e5f6")
        );
        assert!(canonical_object_id("invalid-id").is_none());
        assert!(canonical_object_id("65f1c2a9e4b0a1b2c3d4e5f").is_none());
        assert!(canonical_object_id("65f1c2a9e4b0a1b2c3d4e5fg").is_none());
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("x")));
    }
}
