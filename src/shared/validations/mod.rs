use crate::config::PaginationConfig;
use crate::shared::{DomainError, DomainResult, PageRequest};

/// Clamp caller-supplied paging to `page >= 1` and `1 <= page_size <= max_page_size`.
pub fn validate_pagination(
    page: Option<i64>,
    page_size: Option<i64>,
    config: &PaginationConfig,
) -> PageRequest {
    let page = page.unwrap_or(1).max(1).unsigned_abs();
    // Holds for configs that never went through `AppConfig::validate`
    let max = i64::try_from(config.max_page_size.max(1)).unwrap_or(i64::MAX);
    let default = i64::try_from(config.default_page_size).unwrap_or(i64::MAX);
    let page_size = page_size.unwrap_or(default).clamp(1, max).unsigned_abs();
    PageRequest { page, page_size }
}

/// Trim a mandatory text field, rejecting it when nothing is left.
pub fn required_text(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank input becomes `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
