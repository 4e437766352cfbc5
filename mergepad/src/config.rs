//! User configuration loaded from `config.toml`.
//!
//! Every key is optional; a missing file means all defaults. The file is read
//! once at startup, before the terminal enters raw mode, so problems can still
//! be reported on stderr.

use std::path::{Path, PathBuf};

use mergepad_core::DiffAlgorithm;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;

/// Failure to read or parse the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings recognised in `config.toml`.
///
/// ```toml
/// theme = "catppuccin-mocha"   # "dark", "light" or "catppuccin-mocha"
/// algorithm = "patience"       # "myers", "patience" or "lcs"
/// sync_view = true
/// syntax_highlight = true
/// log_file = "/tmp/mergepad.log"
/// log_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub algorithm: DiffAlgorithm,
    /// Start with the document panes scrolling together.
    pub sync_view: bool,
    pub syntax_highlight: bool,
    /// Log destination; defaults to `mergepad.log` in the temp directory.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            algorithm: DiffAlgorithm::default(),
            sync_view: false,
            syntax_highlight: true,
            log_file: None,
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    /// Parses config text. Unknown keys are ignored.
    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Loads the config at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    source,
                })
            }
        };
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("mergepad.log"))
    }

    /// The configured log level; unrecognised values fall back to INFO.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::INFO)
    }
}

/// Returns the default config location.
///
/// Prefers `$XDG_CONFIG_HOME/mergepad/config.toml`; falls back to
/// `~/.config/mergepad/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("mergepad").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.theme, "catppuccin-mocha");
        assert_eq!(cfg.algorithm, DiffAlgorithm::Myers);
        assert!(!cfg.sync_view);
        assert!(cfg.syntax_highlight);
        assert_eq!(cfg.log_level(), LevelFilter::INFO);
    }

    #[test]
    fn all_keys_parse() {
        let cfg = Config::parse(
            r#"
            theme = "light"
            algorithm = "patience"
            sync_view = true
            syntax_highlight = false
            log_file = "/var/tmp/mp.log"
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.theme, "light");
        assert_eq!(cfg.algorithm, DiffAlgorithm::Patience);
        assert!(cfg.sync_view);
        assert!(!cfg.syntax_highlight);
        assert_eq!(cfg.log_path(), PathBuf::from("/var/tmp/mp.log"));
        assert_eq!(cfg.log_level(), LevelFilter::DEBUG);
    }

    #[test]
    fn lcs_algorithm_name_parses() {
        assert_eq!(Config::parse("algorithm = \"lcs\"").unwrap().algorithm, DiffAlgorithm::Lcs);
    }

    #[test]
    fn unknown_algorithm_is_a_parse_error() {
        assert!(Config::parse("algorithm = \"histogram\"").is_err());
    }

    #[test]
    fn bad_log_level_falls_back_to_info() {
        let cfg = Config::parse("log_level = \"chatty\"").unwrap();
        assert_eq!(cfg.log_level(), LevelFilter::INFO);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = Config::load(&dir.path().join("config.toml")).unwrap();
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = [").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn config_path_ends_in_app_dir() {
        assert!(config_path().ends_with("mergepad/config.toml"));
    }
}
