//! Configuration management for the GitBook checker
//!
//! Two kinds of configuration live here:
//!
//! - [`GitBookConfig`]: the `.gitbook.yaml` file under test, validated at
//!   load time so a missing field surfaces as a typed error.
//! - [`CheckExpectations`]: which files and directories the checks expect.
//!   Defaults describe a standard GitBook layout and may be overridden by an
//!   optional `gitbook-check.toml`.

use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;

use crate::error::{
    GitBookCheckError,
    GitBookResult,
};

/// File name of the GitBook configuration
pub const GITBOOK_CONFIG_FILE: &str = ".gitbook.yaml";

/// Content format reported when the configuration does not set one
pub const DEFAULT_FORMAT: &str = "markdown";

/// Locations searched for an expectations override, relative to the root
pub const EXPECTATIONS_FILES: [&str; 3] = [
    ".gitbook-check.toml",
    "gitbook-check.toml",
    ".config/gitbook-check.toml",
];

/// Validated GitBook configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitBookConfig {
    /// Documentation root declared by the configuration
    pub root:      String,
    /// Structure section
    pub structure: Structure,
    /// Content format, if declared
    pub format:    Option<String>,
}

/// The `structure` section of a GitBook configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Structure {
    /// Root document path
    pub readme:  String,
    /// Structural index document path
    pub summary: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawGitBookConfig {
    root:      Option<String>,
    structure: Option<RawStructure>,
    format:    Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStructure {
    readme:  Option<String>,
    summary: Option<String>,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl GitBookConfig {
    /// Load and validate a GitBook configuration file
    pub fn load_file(path: &Path) -> GitBookResult<Self> {
        if !path.exists() {
            return Err(GitBookCheckError::ConfigMissing {
                path: path.to_path_buf(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| GitBookCheckError::io(path, e))?;
        Self::parse(&content, path)
    }

    /// Parse and validate configuration text; `path` is used for errors only
    pub fn parse(content: &str, path: &Path) -> GitBookResult<Self> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| GitBookCheckError::ConfigMalformed {
                path:   path.to_path_buf(),
                field:  None,
                reason: format!("Invalid YAML: {}", e),
            })?;

        // An empty document has no fields at all
        let raw = if value.is_null() {
            RawGitBookConfig::default()
        } else {
            serde_yaml::from_value::<RawGitBookConfig>(value).map_err(|e| {
                GitBookCheckError::ConfigMalformed {
                    path:   path.to_path_buf(),
                    field:  None,
                    reason: format!("Unexpected configuration shape: {}", e),
                }
            })?
        };

        let root =
            required(raw.root).ok_or_else(|| GitBookCheckError::missing_field(path, "root"))?;
        let structure = raw
            .structure
            .ok_or_else(|| GitBookCheckError::missing_field(path, "structure"))?;
        let readme = required(structure.readme)
            .ok_or_else(|| GitBookCheckError::missing_field(path, "structure.readme"))?;
        let summary = required(structure.summary)
            .ok_or_else(|| GitBookCheckError::missing_field(path, "structure.summary"))?;

        Ok(Self {
            root,
            structure: Structure { readme, summary },
            format: raw.format,
        })
    }

    /// Declared format, falling back to [`DEFAULT_FORMAT`]
    pub fn format_or_default(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }
}

/// What the checks expect to find in the documentation root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckExpectations {
    /// GitBook configuration file name
    pub config_file:        String,
    /// Root document checked for content
    pub readme:             String,
    /// Structural index whose links are checked
    pub summary:            String,
    /// Files that must exist
    pub required_files:     Vec<String>,
    /// Directories that must exist
    pub expected_dirs:      Vec<String>,
    /// Extension counted inside expected directories
    pub markdown_extension: String,
    /// Root document must be strictly longer than this many characters
    pub min_readme_length:  usize,
}

impl Default for CheckExpectations {
    fn default() -> Self {
        Self {
            config_file:        GITBOOK_CONFIG_FILE.to_string(),
            readme:             "README.md".to_string(),
            summary:            "SUMMARY.md".to_string(),
            required_files:     vec!["README.md".to_string(), "SUMMARY.md".to_string()],
            expected_dirs:      ["architecture", "developers", "contracts", "examples", "support"]
                .iter()
                .map(|d| (*d).to_string())
                .collect(),
            markdown_extension: ".md".to_string(),
            min_readme_length:  100,
        }
    }
}

impl CheckExpectations {
    /// Load expectations for a documentation root
    ///
    /// The first file of [`EXPECTATIONS_FILES`] that exists wins. Without
    /// any, the defaults are used.
    pub fn load(root: &Path) -> GitBookResult<Self> {
        for candidate in EXPECTATIONS_FILES {
            let path = root.join(candidate);
            if path.is_file() {
                return Self::load_file(&path);
            }
        }

        debug!(root = %root.display(), "no expectations file, using defaults");
        Ok(Self::default())
    }

    /// Load expectations from an explicit TOML file
    pub fn load_file(path: &Path) -> GitBookResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| GitBookCheckError::io(path, e))?;
        let expectations: Self =
            toml::from_str(&content).map_err(|e| GitBookCheckError::Expectations {
                path:   path.to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!(path = %path.display(), "loaded check expectations");
        Ok(expectations)
    }

    /// Path of the GitBook configuration under `root`
    pub fn config_path(&self, root: &Path) -> PathBuf {
        root.join(&self.config_file)
    }
}
