use crate::utils::error::{BatchClientError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<()> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<()> {
        self.iter().try_for_each(Validate::validate)
    }
}

/// Longest id the service accepts for pools, jobs, tasks and schedules.
pub const MAX_ID_LENGTH: usize = 64;

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BatchClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BatchClientError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BatchClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(BatchClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| BatchClientError::validation(format!("{} is required", field_name)))
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BatchClientError::validation(format!(
            "{} cannot be empty or whitespace-only",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BatchClientError::validation(format!(
            "{} must be between {} and {}, got {}",
            field_name, min, max, value
        )));
    }
    Ok(())
}

/// Pool, job, task and schedule ids: ASCII letters, digits, `-` and `_`, at most 64 long.
pub fn validate_batch_id(field_name: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(BatchClientError::validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    if id.chars().count() > MAX_ID_LENGTH {
        return Err(BatchClientError::validation(format!(
            "{} '{}' exceeds {} characters",
            field_name, id, MAX_ID_LENGTH
        )));
    }
    if let Some(bad) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(BatchClientError::validation(format!(
            "{} '{}' contains invalid character '{}'",
            field_name, id, bad
        )));
    }
    Ok(())
}

/// Fails unless exactly one of the named alternatives is set.
pub fn validate_exactly_one(context: &str, alternatives: &[(&str, bool)]) -> Result<()> {
    let set: Vec<&str> = alternatives
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| *name)
        .collect();

    if set.len() == 1 {
        return Ok(());
    }

    let names: Vec<&str> = alternatives.iter().map(|(name, _)| *name).collect();
    let reason = if set.is_empty() {
        "none is set".to_string()
    } else {
        format!("{} are all set", set.join(", "))
    };
    Err(BatchClientError::validation(format!(
        "{}: exactly one of {} must be set, but {}",
        context,
        names.join(", "),
        reason
    )))
}

pub fn validate_unique_ids<'a, I>(field_name: &str, ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(BatchClientError::validation(format!(
                "{} contains duplicate id '{}'",
                field_name, id
            )));
        }
    }
    Ok(())
}
