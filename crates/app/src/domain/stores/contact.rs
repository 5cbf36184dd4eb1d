//! Store contact validation.

use std::sync::LazyLock;

use regex::Regex;

/// Same pattern as the `whatsapp_contact` CHECK constraint on `stores`.
pub const E164_PATTERN: &str = r"^\+[1-9][0-9]{1,14}$";

#[expect(clippy::expect_used, reason = "the pattern is a compile-time literal")]
static E164_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(E164_PATTERN).expect("E.164 pattern should compile"));

/// Returns true for an E.164 number: `+`, a non-zero leading digit, then 1 to 14 more digits.
#[must_use]
pub fn is_e164_phone_number(value: &str) -> bool {
    E164_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_e164_numbers() {
        assert!(is_e164_phone_number("+2348012345678"));
        assert!(is_e164_phone_number("+14155550123"));
        assert!(is_e164_phone_number("+12"));
        assert!(is_e164_phone_number("+123456789012345"));
    }

    #[test]
    fn rejects_missing_plus() {
        assert!(!is_e164_phone_number("2348012345678"));
    }

    #[test]
    fn rejects_leading_zero() {
        assert!(!is_e164_phone_number("+0348012345678"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_e164_phone_number("+1"));
        assert!(!is_e164_phone_number("+1234567890123456"));
    }

    #[test]
    fn rejects_non_ascii_digits() {
        assert!(!is_e164_phone_number("+٢٣٤٨٠١٢٣٤٥٦٧٨"));
    }

    #[test]
    fn rejects_trailing_newline() {
        assert!(!is_e164_phone_number("+2348012345678\n"));
    }

    #[test]
    fn pattern_matches_store_constraint() {
        let migration = include_str!("../../../../../migrations/20260301090200_create_stores.sql");

        assert!(
            migration.contains(&format!("whatsapp_contact ~ '{E164_PATTERN}'")),
            "stores migration should check the same pattern"
        );
    }

    #[test]
    fn rejects_non_digits() {
        assert!(!is_e164_phone_number("+234 801 234 5678"));
        assert!(!is_e164_phone_number("+234-8012345678"));
        assert!(!is_e164_phone_number("+"));
        assert!(!is_e164_phone_number(""));
    }
}
