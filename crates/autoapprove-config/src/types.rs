use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of the approval policy file.
///
/// ```json
/// {
///   "allowed-authors": ["dependabot[bot]"],
///   "allowed-files": [["schema.sql", "migrations/latest.sql"], ["CHANGELOG.md"]]
/// }
/// ```
///
/// Missing keys default to empty lists; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Author logins approved regardless of the files they touch.
    pub allowed_authors: Vec<String>,
    /// Co-change groups of repository-relative file names.
    pub allowed_files: Vec<Vec<String>>,
}

/// Serialization format of a policy file, chosen by extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json` and anything unrecognised.
    #[default]
    Json,
    /// `.toml`.
    Toml,
    /// `.yml` / `.yaml`.
    Yaml,
}

impl ConfigFormat {
    /// Pick the format for `path` from its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Self::Toml,
            Some("yml" | "yaml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// A loaded policy together with where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// The parsed and validated policy.
    pub config: Config,
    /// The configured path, as given (repository-relative). Empty when no
    /// policy file is configured.
    pub config_path: String,
    /// The file that was actually read, if any.
    pub source: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Whether a policy file was loaded.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.source.is_none()
    }
}
