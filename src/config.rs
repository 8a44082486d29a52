//! Generation settings.
//!
//! Read from `java-build-gen.toml` at the root of the walked tree when the file
//! exists. Every field has a default, so an empty file is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_FILE_NAME: &str = "java-build-gen.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Resolve in-repository imports against the import index. When false every
    /// import takes the literal fallback path.
    pub index_libraries: bool,
    /// Import prefixes provided by the platform; never emitted as deps.
    pub builtin_prefixes: Vec<String>,
    pub source_extension: String,
    pub rule_kind: String,
    /// Identifier of the repository being generated, empty for the main one.
    pub repo_name: String,
    /// Directory names skipped by the walker. Glob patterns such as `bazel-*`
    /// are allowed; a plain name matches only itself.
    pub exclude_dirs: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            index_libraries: true,
            builtin_prefixes: vec!["java.".to_string()],
            source_extension: ".java".to_string(),
            rule_kind: "java_library".to_string(),
            repo_name: String::new(),
            exclude_dirs: vec!["bazel-*".to_string(), "target".to_string()],
        }
    }
}

impl GenerationConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Loads `java-build-gen.toml` from `root`, falling back to defaults when absent.
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            tracing::debug!("Loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn is_builtin(&self, import: &str) -> bool {
        self.builtin_prefixes
            .iter()
            .any(|prefix| import.starts_with(prefix.as_str()))
    }

    pub fn is_source_file(&self, file_name: &str) -> bool {
        file_name.ends_with(self.source_extension.as_str())
    }

    pub fn is_excluded_dir(&self, dir_name: &str) -> bool {
        self.exclude_dirs.iter().any(|pattern| match glob::Pattern::new(pattern) {
            Ok(glob) => glob.matches(dir_name),
            Err(_) => pattern == dir_name,
        })
    }
}
