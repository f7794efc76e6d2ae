pub mod admin_dto;
pub mod auth_dto;
pub mod flashcard_dto;
pub mod quiz_dto;
pub mod stats_dto;

/// Trims incoming optional strings and folds empty ones to `None`, so a
/// partial update can't overwrite a field with whitespace.
pub(crate) fn trim_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(opt.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}
