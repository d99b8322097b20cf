use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating phone numbers
    /// Optional leading "+", then 7 to 15 digits; single spaces or hyphens allowed between digits
    /// - Valid: "+919876543210", "0612-345-678", "555 0100 22"
    /// - Invalid: "12345", "phone", "++91 98765", "98765-", "-98765"
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[0-9](?:[ -]?[0-9]){6,14}$").unwrap();

    /// Regex for validating person names
    /// Letters (any script), spaces, apostrophes, periods and hyphens; must start with a letter
    /// - Valid: "Asha Rao", "O'Neil", "J. R. Mehta", "Anne-Marie"
    /// - Invalid: "", " Asha", "R2D2", "-Anne"
    pub static ref PERSON_NAME_REGEX: Regex =
        Regex::new(r"^\p{L}[\p{L} .'\-]*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("+919876543210"));
        assert!(PHONE_REGEX.is_match("0612-345-678"));
        assert!(PHONE_REGEX.is_match("555 0100 22"));
        assert!(PHONE_REGEX.is_match("1234567"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("12345")); // too short
        assert!(!PHONE_REGEX.is_match("phone"));
        assert!(!PHONE_REGEX.is_match("++91 98765 43210"));
        assert!(!PHONE_REGEX.is_match("98765-")); // trailing separator
        assert!(!PHONE_REGEX.is_match("-9876543")); // leading separator
        assert!(!PHONE_REGEX.is_match("1234567890123456")); // too long
    }

    #[test]
    fn test_person_name_regex() {
        assert!(PERSON_NAME_REGEX.is_match("Asha Rao"));
        assert!(PERSON_NAME_REGEX.is_match("O'Neil"));
        assert!(PERSON_NAME_REGEX.is_match("J. R. Mehta"));
        assert!(PERSON_NAME_REGEX.is_match("Anne-Marie"));
        assert!(!PERSON_NAME_REGEX.is_match(""));
        assert!(!PERSON_NAME_REGEX.is_match(" Asha"));
        assert!(!PERSON_NAME_REGEX.is_match("R2D2"));
        assert!(!PERSON_NAME_REGEX.is_match("-Anne"));
    }
}
