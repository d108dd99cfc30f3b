use thiserror::Error as ThisError;

#[derive(ThisError, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must be at least 2 characters")]
    NameTooShort,
    #[error("invalid phone number (must be 10 digits)")]
    InvalidPhone,
    #[error("invalid emergency contact phone number")]
    InvalidEmergencyPhone,
    #[error("plan name is required")]
    PlanNameRequired,
    #[error("plan price must be greater than zero")]
    InvalidPlanPrice,
    #[error("plan duration must be at least one day")]
    InvalidPlanDuration,
    #[error("description must be at least 3 characters")]
    DescriptionTooShort,
    #[error("amount must be greater than zero")]
    InvalidExpenseAmount,
}

/// Mobile number check: ten digits, starting with 6 to 9.
pub fn is_valid_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 10
        && (b'6'..=b'9').contains(&bytes[0])
        && bytes.iter().all(u8::is_ascii_digit)
}

pub fn member_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < 2 {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

pub fn phone(phone: &str) -> Result<(), ValidationError> {
    if !is_valid_phone(phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// Emergency contact phones are optional but must be valid when given.
pub fn emergency_phone(phone: &str) -> Result<(), ValidationError> {
    if !phone.is_empty() && !is_valid_phone(phone) {
        return Err(ValidationError::InvalidEmergencyPhone);
    }
    Ok(())
}

pub fn plan(name: &str, price: f64, duration_days: u32) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::PlanNameRequired);
    }
    if !(price > 0.0) {
        return Err(ValidationError::InvalidPlanPrice);
    }
    if duration_days == 0 {
        return Err(ValidationError::InvalidPlanDuration);
    }
    Ok(())
}

pub fn expense(amount: f64, description: &str) -> Result<(), ValidationError> {
    if !(amount > 0.0) {
        return Err(ValidationError::InvalidExpenseAmount);
    }
    if description.trim().chars().count() < 3 {
        return Err(ValidationError::DescriptionTooShort);
    }
    Ok(())
}
