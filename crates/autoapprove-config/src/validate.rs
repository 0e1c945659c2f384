//! Post-parse policy validation.
//!
//! Rejects values that can never match anything (empty logins, empty file
//! names, empty groups). A file listed in more than one group is allowed but
//! logged, since only the last group listing it takes effect.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validate a parsed policy.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_authors(config)?;
    validate_files(config)?;
    Ok(())
}

fn validate_authors(config: &Config) -> ConfigResult<()> {
    for (index, author) in config.allowed_authors.iter().enumerate() {
        if author.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("allowed-authors[{index}]"),
                message: "author login must not be empty".to_owned(),
            });
        }
    }
    Ok(())
}

fn validate_files(config: &Config) -> ConfigResult<()> {
    let mut first_group: HashMap<&str, usize> = HashMap::new();

    for (index, group) in config.allowed_files.iter().enumerate() {
        if group.is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("allowed-files[{index}]"),
                message: "file group must not be empty".to_owned(),
            });
        }

        for (position, file) in group.iter().enumerate() {
            if file.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    field: format!("allowed-files[{index}][{position}]"),
                    message: "file name must not be empty".to_owned(),
                });
            }

            match first_group.get(file.as_str()) {
                Some(&earlier) if earlier != index => warn!(
                    file = %file,
                    first = earlier,
                    last = index,
                    "file listed in several allowed-files groups; the last one applies"
                ),
                Some(_) => {},
                None => {
                    first_group.insert(file.as_str(), index);
                },
            }
        }
    }
    Ok(())
}
