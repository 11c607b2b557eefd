use crate::utils::error::{CartError, Result};
use std::fmt::Display;
use url::Url;

/// Settings sources check themselves before the engine is opened.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Display, reason: impl Into<String>) -> CartError {
    CartError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The catalog must be reachable over plain HTTP(S).
pub fn validate_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| invalid(field, value, format!("Invalid URL format: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            value,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    Ok(())
}

pub fn validate_path(field: &str, value: &str) -> Result<()> {
    let reason = if value.is_empty() {
        "Path cannot be empty"
    } else if value.contains('\0') {
        "Path contains null bytes"
    } else {
        return Ok(());
    };
    Err(invalid(field, value, reason))
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be blank"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + Display>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value >= min && value <= max {
        return Ok(());
    }
    let reason = format!("Value must be between {} and {}", min, max);
    Err(invalid(field, value, reason))
}
