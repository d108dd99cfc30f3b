/// Referral code for a member: uppercased first name token plus the
/// last four digits of the phone number, e.g. "ASHA3210".
pub fn referral_code(full_name: &str, phone: &str) -> String {
    let first_name = full_name
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_uppercase();
    let digits: Vec<char> = phone.chars().collect();
    let last4: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("{}{}", first_name, last4)
}

/// Check the referral code format: letters followed by four digits.
pub fn is_valid_referral_code(code: &str) -> bool {
    let letters: String = code
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let rest = &code[letters.len()..];
    !letters.is_empty()
        && letters.chars().all(|c| c.is_ascii_uppercase())
        && rest.len() == 4
        && rest.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referral_code() {
        assert_eq!(referral_code("Asha Rao", "9876543210"), "ASHA3210");
        assert_eq!(referral_code("bob", "6000001234"), "BOB1234");
    }

    #[test]
    fn test_referral_code_format() {
        assert!(is_valid_referral_code("ASHA3210"));
        assert!(is_valid_referral_code("B1234"));
        assert!(!is_valid_referral_code("asha3210"));
        assert!(!is_valid_referral_code("3210"));
        assert!(!is_valid_referral_code("ASHA321"));
        assert!(!is_valid_referral_code("ASHA32100"));
    }
}
