//! Repository configuration (`.unnoise.toml`)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use unnoise_content::{CommentGrammar, ProfileRegistry};
use unnoise_fs::{ConfigStore, NormalizedPath};
use unnoise_git::DEFAULT_REVISION;

use crate::{Error, Result};

/// Configuration file looked up at the repository root.
pub const CONFIG_FILE: &str = ".unnoise.toml";

/// Per-repository settings.
///
/// ```toml
/// reference = "HEAD"
/// exclude_dirs = ["node_modules", "target"]
///
/// [extensions]
/// pyi = "hash"
/// txt = "none"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Revision the working copy is compared against
    pub reference: Option<String>,

    /// Directory names skipped during directory walks, in addition to `.git`
    pub exclude_dirs: Vec<String>,

    /// Extension to grammar name (`hash`, `c-style`, `jsx`, `markup`, `sql`,
    /// `lua`, or `none` for whitespace-only normalization)
    pub extensions: BTreeMap<String, String>,

    /// Source file, kept for error messages
    #[serde(skip)]
    source: Option<NormalizedPath>,
}

impl Config {
    /// Load `.unnoise.toml` from `root`, or defaults when absent.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        match ConfigStore::new().load_optional::<Config>(&path)? {
            Some(config) => {
                tracing::debug!(path = %path, "Loaded configuration");
                Ok(config.with_source(path))
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(path: &NormalizedPath) -> Result<Self> {
        let config: Config = ConfigStore::new().load(path)?;
        Ok(config.with_source(path.clone()))
    }

    fn with_source(mut self, path: NormalizedPath) -> Self {
        self.source = Some(path);
        self
    }

    /// Revision to read reference content from.
    pub fn revision(&self) -> &str {
        self.reference.as_deref().unwrap_or(DEFAULT_REVISION)
    }

    /// Build the profile registry with this configuration's overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a grammar name is not recognized.
    pub fn registry(&self) -> Result<ProfileRegistry> {
        let mut registry = ProfileRegistry::new();
        for (extension, grammar) in &self.extensions {
            let choice = CommentGrammar::parse_choice(grammar).map_err(|source| Error::Config {
                path: self
                    .source
                    .as_ref()
                    .map(NormalizedPath::to_native)
                    .unwrap_or_else(|| CONFIG_FILE.into()),
                source,
            })?;
            registry.insert(extension, choice);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&NormalizedPath::new(temp.path())).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.revision(), "HEAD");
    }

    #[test]
    fn test_load_full_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "reference = \"main\"\nexclude_dirs = [\"target\"]\n\n[extensions]\npyi = \"hash\"\ntxt = \"none\"\n",
        )
        .unwrap();

        let config = Config::load(&NormalizedPath::new(temp.path())).unwrap();
        assert_eq!(config.revision(), "main");
        assert_eq!(config.exclude_dirs, vec!["target".to_string()]);

        let registry = config.registry().unwrap();
        assert_eq!(registry.profile_for("pyi"), Some(CommentGrammar::Hash));
        assert_eq!(registry.profile_for("txt"), None);
        assert_eq!(registry.profile_for("rs"), Some(CommentGrammar::CStyle));
    }

    #[test]
    fn test_unknown_grammar_is_config_error() {
        let config = Config {
            extensions: BTreeMap::from([("x".to_string(), "fortran".to_string())]),
            ..Config::default()
        };
        assert!(matches!(config.registry(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "colour = \"red\"\n").unwrap();

        let result = Config::load(&NormalizedPath::new(temp.path()));
        assert!(matches!(
            result,
            Err(Error::Fs(unnoise_fs::Error::ConfigParse { .. }))
        ));
    }
}
