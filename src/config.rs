//! Search and output settings.
//!
//! Defaults are overlaid by an optional TOML file, which is overlaid by
//! command-line flags. Every key in the file is optional:
//!
//! ```toml
//! [search]
//! target_run = 10
//! chunk_size = 5000
//! max_digits = 1000000
//!
//! [output]
//! dir = "."
//! preview_chars = 500
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Minimum run of blanked digits that ends the search.
    pub target_run: usize,
    /// Digits added to the prefix between scans.
    pub chunk_size: usize,
    /// Largest prefix the search may request.
    pub max_digits: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            target_run: 10,
            chunk_size: 5000,
            max_digits: 1_000_000,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.target_run == 0 {
            return Err(Error::InvalidConfig("target_run must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk_size must be at least 1".into()));
        }
        if self.max_digits == 0 {
            return Err(Error::InvalidConfig("max_digits must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub preview_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: PathBuf::from("."),
            preview_chars: 500,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub search: SearchConfig,
    pub output: OutputConfig,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target_run: Option<usize>,
    pub chunk_size: Option<usize>,
    pub max_digits: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub preview_chars: Option<usize>,
}

impl Config {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content, path)?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(v) = overrides.target_run {
            self.search.target_run = v;
        }
        if let Some(v) = overrides.chunk_size {
            self.search.chunk_size = v;
        }
        if let Some(v) = overrides.max_digits {
            self.search.max_digits = v;
        }
        if let Some(v) = overrides.output_dir {
            self.output.dir = v;
        }
        if let Some(v) = overrides.preview_chars {
            self.output.preview_chars = v;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.search.validate()
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search.target_run, 10);
        assert_eq!(config.search.chunk_size, 5000);
        assert_eq!(config.search.max_digits, 1_000_000);
        assert_eq!(config.output.preview_chars, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let config = Config::from_toml("[search]\nchunk_size = 250\n", Path::new("t.toml"))?;
        assert_eq!(config.search.chunk_size, 250);
        assert_eq!(config.search.target_run, 10);
        assert_eq!(config.output, OutputConfig::default());
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml("[search]\ntarget = 3\n", Path::new("t.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_from_file_and_override() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[search]\ntarget_run = 4\nmax_digits = 90\n\n[output]\ndir = \"out\"")?;

        let mut config = Config::load(Some(file.path()))?;
        assert_eq!(config.search.target_run, 4);
        assert_eq!(config.output.dir, PathBuf::from("out"));

        config.apply(Overrides {
            target_run: Some(6),
            preview_chars: Some(20),
            ..Overrides::default()
        });
        assert_eq!(config.search.target_run, 6);
        assert_eq!(config.search.max_digits, 90);
        assert_eq!(config.output.preview_chars, 20);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/pispaces.toml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn test_zero_values_are_invalid() {
        for search in [
            SearchConfig { target_run: 0, ..SearchConfig::default() },
            SearchConfig { chunk_size: 0, ..SearchConfig::default() },
            SearchConfig { max_digits: 0, ..SearchConfig::default() },
        ] {
            assert!(matches!(search.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_toml_round_trip_of_effective_config() -> Result<()> {
        let config = Config::default();
        let rendered = config.to_toml()?;
        assert!(rendered.contains("target_run = 10"));
        assert_eq!(Config::from_toml(&rendered, Path::new("t.toml"))?, config);
        Ok(())
    }
}
