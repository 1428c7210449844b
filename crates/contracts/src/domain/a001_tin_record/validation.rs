use thiserror::Error;

use super::aggregate::TinField;

/// Local form errors. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all required fields.")]
    MissingFields(Vec<TinField>),

    #[error("TIN Number must contain exactly 9 digits (excluding / or -).")]
    MalformedTinNumber,

    #[error("{} must be a date in YYYY-MM-DD form.", .0.label())]
    InvalidDate(TinField),
}

/// Strip the `-` and `/` separators
pub fn normalize_tin_number(value: &str) -> String {
    value.chars().filter(|c| *c != '-' && *c != '/').collect()
}

/// True iff the normalized value is exactly 9 ASCII digits
pub fn validate_tin_number(value: &str) -> bool {
    let normalized = normalize_tin_number(value);
    normalized.len() == 9 && normalized.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tin_number() {
        assert!(validate_tin_number("123-45-6789"));
        assert!(validate_tin_number("12-34-56-789"));
        assert!(validate_tin_number("123456789"));
        assert!(validate_tin_number("123/456/789"));
        assert!(validate_tin_number("--123456789//"));

        assert!(!validate_tin_number("12345678"));
        assert!(!validate_tin_number("1234567890"));
        assert!(!validate_tin_number("ABC456789"));
        assert!(!validate_tin_number("123 456 789"));
        assert!(!validate_tin_number(""));
        assert!(!validate_tin_number("-/-"));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Arabic-Indic digits are numeric but not decimal ASCII
        assert!(!validate_tin_number("١٢٣٤٥٦٧٨٩"));
    }

    #[test]
    fn test_normalize_tin_number() {
        assert_eq!(normalize_tin_number("12-34/56"), "123456");
        assert_eq!(normalize_tin_number("abc"), "abc");
    }
}
