use crate::utils::error::{LoaderError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LoaderError::ConfigError {
            message: format!("{}: URL cannot be empty", field_name),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LoaderError::ConfigError {
                message: format!("{}: unsupported URL scheme: {}", field_name, scheme),
            }),
        },
        Err(e) => Err(LoaderError::ConfigError {
            message: format!("{}: invalid URL format: {}", field_name, e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(LoaderError::ConfigError {
            message: format!("{}: value must be at least {}", field_name, min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LoaderError::ConfigError {
            message: format!("{}: value cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

/// A custom-column data URL template must carry the `:id` placeholder that
/// gets substituted per column.
pub fn validate_column_data_template(field_name: &str, template: &str) -> Result<()> {
    validate_non_empty_string(field_name, template)?;
    if !template.contains(":id") {
        return Err(LoaderError::ConfigError {
            message: format!("{}: template is missing the :id placeholder", field_name),
        });
    }
    Ok(())
}
