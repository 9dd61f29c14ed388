use crate::error::ValidationError;

pub(crate) fn parse_identifier(s: &str) -> Result<String, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyIdentifier);
    }
    Ok(trimmed.to_owned())
}
