/// Prefix for all business member identifiers.
pub const MEMBER_ID_PREFIX: &str = "GYM";

/// First run of digits in an identifier, if any.
fn numeric_suffix(id: &str) -> Option<u32> {
    let digits: String = id
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Get the next member identifier for a set of existing identifiers.
///
/// The sequence continues from the highest numeric suffix present,
/// not from the count, so gaps left by deleted members are never
/// reassigned. Identifiers without a numeric part are skipped.
pub fn next_member_id(existing: &[String]) -> String {
    let max = existing
        .iter()
        .filter_map(|id| numeric_suffix(id))
        .max()
        .unwrap_or(0);
    format!("{}{:03}", MEMBER_ID_PREFIX, max + 1)
}

/// Check the member identifier format: prefix and at least
/// three digits.
pub fn is_valid_member_id(id: &str) -> bool {
    match id.strip_prefix(MEMBER_ID_PREFIX) {
        Some(rest) => {
            rest.len() >= 3 && rest.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
