//! Policy file discovery and loading.
//!
//! Steps of [`load`]:
//! 1. An empty configured path yields the default (empty) policy
//! 2. Reject absolute paths and `..` components, drop `.` components
//! 3. Check the file size, then read `{workspace}/{config_path}`
//! 4. Parse by extension (JSON, TOML, YAML)
//! 5. Validate
//! 6. Return `ResolvedConfig`

use std::path::{Component, Path};

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::types::{Config, ConfigFormat, ResolvedConfig};
use crate::validate;

/// Policy files larger than this are refused.
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Load the policy file named by `config_path`, resolved against
/// `workspace_root`.
///
/// The path is stored in the result in the form GitHub reports changed files
/// in: `/`-separated, without `.` components or repeated separators. That is
/// the name the policy compares changed files against.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the path escapes the workspace, the file
/// cannot be read or parsed, or the policy fails validation.
pub fn load(workspace_root: &Path, config_path: &str) -> ConfigResult<ResolvedConfig> {
    if config_path.is_empty() {
        debug!("no config path given, using default policy");
        return Ok(ResolvedConfig::default());
    }

    let normalized = normalize_config_path(config_path)?;
    let path = workspace_root.join(&normalized);
    let config = load_file(&path)?;
    info!(
        path = %path.display(),
        config_path = %normalized,
        authors = config.allowed_authors.len(),
        groups = config.allowed_files.len(),
        "loaded approval policy"
    );

    Ok(ResolvedConfig {
        config,
        config_path: normalized,
        source: Some(path),
    })
}

/// Rewrite a workspace-relative path into repository file-name form.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] for absolute paths, paths with
/// `..` components and paths that name no file.
pub fn normalize_config_path(config_path: &str) -> ConfigResult<String> {
    let invalid = |message: String| ConfigError::ValidationError {
        field: "config".to_owned(),
        message,
    };

    let mut parts = Vec::new();
    for component in Path::new(config_path).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::CurDir => {},
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid(format!(
                    "'{config_path}' must be a path inside the workspace"
                )));
            },
        }
    }

    if parts.is_empty() {
        return Err(invalid(format!("'{config_path}' does not name a file")));
    }
    Ok(parts.join("/"))
}

/// Load a policy from a specific file path.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] for an unreadable file,
/// [`ConfigError::ParseError`] for malformed content and
/// [`ConfigError::ValidationError`] for an oversized or invalid policy.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let read_error = |e: std::io::Error| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    };

    let size = std::fs::metadata(path).map_err(read_error)?.len();
    if size > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "policy file has {size} bytes; at most {MAX_CONFIG_FILE_SIZE} are read"
            ),
        });
    }

    let content = std::fs::read_to_string(path).map_err(read_error)?;

    let config = parse_str(&content, ConfigFormat::from_path(path), &path.display().to_string())?;
    validate::validate(&config)?;
    Ok(config)
}

/// Parse policy text in the given format. `origin` names the source in errors.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] if the text is malformed.
pub fn parse_str(content: &str, format: ConfigFormat, origin: &str) -> ConfigResult<Config> {
    let parse_err = |message: String| ConfigError::ParseError {
        path: origin.to_owned(),
        message,
    };

    match format {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}
