use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid page pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// An extra opaque component to show as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub name: String,
    /// Derived from the name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub site_root: PathBuf,
    /// Glob of page files, relative to `site_root`.
    #[serde(default = "default_pages")]
    pub pages: String,
    /// Added to the built-in wrapper namespaces.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wrapper_namespaces: Vec<String>,
    /// Added to the built-in leaked prefixes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leaked_prefixes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentConfig>,
}

fn default_pages() -> String {
    "src/pages/**/*.jsx".to_string()
}

impl Config {
    pub fn new(site_root: impl Into<PathBuf>) -> Self {
        Self {
            site_root: site_root.into(),
            pages: default_pages(),
            wrapper_namespaces: vec![],
            leaked_prefixes: vec![],
            components: vec![],
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the site root
        config.site_root = Self::expand_path(&config.site_root).unwrap_or(config.site_root);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/pagewright");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Page files matching `pages` under `site_root`, sorted.
    pub fn page_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let pattern = self.site_root.join(&self.pages).to_string_lossy().into_owned();
        let entries = glob::glob(&pattern)
            .map_err(|source| ConfigError::InvalidPattern { pattern, source })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .collect();
        files.sort();
        Ok(files)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/pagewright/config.toml"));
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = toml::from_str(r#"site_root = "/srv/site""#).unwrap();

        assert_eq!(config.site_root, PathBuf::from("/srv/site"));
        assert_eq!(config.pages, "src/pages/**/*.jsx");
        assert!(config.components.is_empty());
        assert!(config.wrapper_namespaces.is_empty());
        assert!(config.leaked_prefixes.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config_content = r#"
site_root = "/srv/site"
pages = "app/**/*.tsx"
wrapper_namespaces = ["animated"]
leaked_prefixes = ["Back to site"]

[[components]]
name = "PricingTable"
label = "Pricing Table"

[[components]]
name = "FaqAccordion"
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.pages, "app/**/*.tsx");
        assert_eq!(config.wrapper_namespaces, vec!["animated"]);
        assert_eq!(config.leaked_prefixes, vec!["Back to site"]);
        assert_eq!(
            config.components,
            vec![
                ComponentConfig {
                    name: "PricingTable".to_string(),
                    label: Some("Pricing Table".to_string()),
                },
                ComponentConfig {
                    name: "FaqAccordion".to_string(),
                    label: None,
                },
            ]
        );
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/sites/marketing");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("sites/marketing"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("PAGEWRIGHT_TEST_ROOT", "/test/env/path");
        }

        let path = PathBuf::from("$PAGEWRIGHT_TEST_ROOT/site");
        let expanded = Config::expand_path(&path).unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/site"));

        unsafe {
            env::remove_var("PAGEWRIGHT_TEST_ROOT");
        }
    }

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        assert_eq!(
            Config::expand_path(Path::new("/absolute/path")).unwrap(),
            PathBuf::from("/absolute/path")
        );
        assert_eq!(
            Config::expand_path(Path::new("relative/path")).unwrap(),
            PathBuf::from("relative/path")
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_malformed_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "site_root = [").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let mut test_config = Config::new("/tmp/test-site");
        test_config.components.push(ComponentConfig {
            name: "PricingTable".to_string(),
            label: None,
        });

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config.site_root, test_config.site_root);
        assert_eq!(loaded_config.pages, test_config.pages);
        assert_eq!(loaded_config.components, test_config.components);
    }

    #[test]
    fn test_page_files_resolves_glob() {
        let temp_dir = TempDir::new().unwrap();
        let pages = temp_dir.path().join("src/pages/services");
        std::fs::create_dir_all(&pages).unwrap();
        std::fs::write(temp_dir.path().join("src/pages/Home.jsx"), "<section />").unwrap();
        std::fs::write(pages.join("Plumbing.jsx"), "<section />").unwrap();
        std::fs::write(pages.join("notes.txt"), "not a page").unwrap();

        let config = Config::new(temp_dir.path());
        let files = config.page_files().unwrap();

        assert_eq!(
            files,
            vec![
                temp_dir.path().join("src/pages/Home.jsx"),
                temp_dir.path().join("src/pages/services/Plumbing.jsx"),
            ]
        );
    }

    #[test]
    fn test_page_files_invalid_pattern() {
        let mut config = Config::new("/tmp");
        config.pages = "src/[pages".to_string();

        let result = config.page_files();

        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }
}
