use validator::ValidationError;

/// Accepts Dutch and international notations such as `0612345678`,
/// `+31 6 1234 5678` or `(020) 123-4567`.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let trimmed = phone.trim();
    let allowed = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    if !allowed || !(6..=20).contains(&trimmed.len()) || digits < 6 {
        return Err(ValidationError::new("phone"));
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
