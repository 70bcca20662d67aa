use crate::core::paths::LocalPaths;
use crate::error::{FetchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_REMOTE_URL: &str =
    "https://drive.google.com/uc?id=1Kh9aYL7hehGDQpy8EuJzvDFxoyOikHeM";

/// File looked up in the project root when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "celeba-fetch.toml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    /// Base for every relative path below. Never read from the config file.
    #[serde(skip)]
    pub project_root: PathBuf,
    pub remote_url: String,
    pub data_dir: PathBuf,
    pub archive_name: String,
    pub extract_dir_name: String,
    /// Extra download attempts after a network failure.
    pub retries: u8,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            project_root: PathBuf::from("."),
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            data_dir: PathBuf::from("data").join("celeba"),
            archive_name: "img.zip".to_string(),
            extract_dir_name: "img".to_string(),
            retries: 0,
        }
    }
}

impl FetchConfig {
    pub fn new<P: Into<PathBuf>>(project_root: P) -> Self {
        FetchConfig {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    /// Loads the config for `project_root`.
    ///
    /// An explicit `config_path` must exist. Without one, the default file in
    /// the project root is used when present, otherwise built-in defaults.
    pub fn load(project_root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(FetchError::config_error(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let default_path = project_root.join(CONFIG_FILE_NAME);
                if !default_path.exists() {
                    return Ok(Self::new(project_root));
                }
                default_path
            }
        };

        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::parse(&content).map_err(|e| {
            FetchError::config_error(format!("{}: {}", path.display(), e))
        })?;
        config.project_root = project_root.to_path_buf();
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FetchError::config_error(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FetchError::config_error(e.to_string()))
    }

    pub fn with_remote_url<S: Into<String>>(mut self, url: S) -> Self {
        self.remote_url = url.into();
        self
    }

    pub fn with_retries(mut self, retries: u8) -> Self {
        self.retries = retries;
        self
    }

    pub fn paths(&self) -> LocalPaths {
        let data_dir = self.project_root.join(&self.data_dir);
        LocalPaths {
            project_root: self.project_root.clone(),
            archive_path: data_dir.join(&self.archive_name),
            extraction_dir: data_dir.join(&self.extract_dir_name),
            data_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        let config = FetchConfig::new("/project");
        let paths = config.paths();

        assert_eq!(paths.archive_path, Path::new("/project/data/celeba/img.zip"));
        assert_eq!(paths.extraction_dir, Path::new("/project/data/celeba/img"));
        assert_eq!(paths.data_dir, Path::new("/project/data/celeba"));
        assert_eq!(config.retries, 0);
        assert_eq!(config.remote_url, DEFAULT_REMOTE_URL);
    }

    #[test]
    fn test_parse_partial_config() {
        let content = r#"
remote_url = "https://example.com/faces.zip"
retries = 2
"#;

        let config = FetchConfig::parse(content).unwrap();
        assert_eq!(config.remote_url, "https://example.com/faces.zip");
        assert_eq!(config.retries, 2);
        assert_eq!(config.archive_name, "img.zip");
        assert_eq!(config.extract_dir_name, "img");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = FetchConfig::parse("retries = \"many\"");
        assert!(matches!(result, Err(FetchError::Config { .. })));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = FetchConfig::load(temp.path(), None).unwrap();
        assert_eq!(config, FetchConfig::new(temp.path()));
    }

    #[test]
    fn test_load_default_file_from_project_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "data_dir = \"datasets/faces\"\n",
        )
        .unwrap();

        let config = FetchConfig::load(temp.path(), None).unwrap();
        assert_eq!(config.project_root, temp.path());
        assert_eq!(
            config.paths().archive_path,
            temp.path().join("datasets").join("faces").join("img.zip")
        );
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let result = FetchConfig::load(temp.path(), Some(temp.path().join("nope.toml").as_path()));
        assert!(matches!(result, Err(FetchError::Config { .. })));
    }

    #[test]
    fn test_serialize_skips_project_root() {
        let toml = FetchConfig::new("/somewhere").to_toml().unwrap();
        assert!(toml.contains("archive_name = \"img.zip\""));
        assert!(!toml.contains("somewhere"));
    }
}
