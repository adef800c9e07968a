//! Configuration for the verification client.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (`--api-base`, `--timeout`)
//! 2. Environment variables (HALLDETECT_API_BASE)
//! 3. Config file (.halldetect/config.yaml)
//! 4. Defaults (http://localhost:5000, no timeout)
//!
//! Config file discovery:
//! - Searches current directory and parents for .halldetect/config.yaml
//! - Falls back to ~/.halldetect/config.yaml

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::http::parse_base_url;

/// Backend address used when nothing else is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Environment variable selecting the backend address
pub const API_BASE_ENV: &str = "HALLDETECT_API_BASE";

const CONFIG_DIR: &str = ".halldetect";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Backend base address
    #[serde(default)]
    pub api_base: Option<String>,
    /// Request timeout; absent means no timeout
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Where the backend address came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiBaseSource {
    Flag,
    Env,
    File,
    Default,
}

impl fmt::Display for ApiBaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Flag => "--api-base",
            Self::Env => API_BASE_ENV,
            Self::File => "config file",
            Self::Default => "default",
        };
        f.write_str(label)
    }
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Backend base address (validated)
    pub api_base: String,
    /// Where `api_base` came from
    pub api_base_source: ApiBaseSource,
    /// Request timeout, if any
    pub timeout: Option<Duration>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_base_source: ApiBaseSource::Default,
            timeout: None,
            config_file: None,
        }
    }
}

/// Find config file by searching `start` and its parents, then the home directory
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = dirs::home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file is a valid, empty config
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge all sources; pure so it can be tested without touching the environment
fn resolve(
    overrides: &Overrides,
    env_base: Option<String>,
    file: Option<(PathBuf, ConfigFile)>,
) -> Result<ResolvedConfig> {
    let (config_file, file) = match file {
        Some((path, file)) => (Some(path), file),
        None => (None, ConfigFile::default()),
    };

    let env_base = env_base.filter(|v| !v.trim().is_empty());

    let (api_base, api_base_source) = if let Some(base) = overrides.api_base.clone() {
        (base, ApiBaseSource::Flag)
    } else if let Some(base) = env_base {
        (base, ApiBaseSource::Env)
    } else if let Some(base) = file.api_base {
        (base, ApiBaseSource::File)
    } else {
        (DEFAULT_API_BASE.to_string(), ApiBaseSource::Default)
    };

    parse_base_url(&api_base)
        .with_context(|| format!("Backend address from {} is unusable", api_base_source))?;

    let timeout = overrides
        .timeout_seconds
        .or(file.timeout_seconds)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    Ok(ResolvedConfig {
        api_base: api_base.trim().to_string(),
        api_base_source,
        timeout,
        config_file,
    })
}

/// Load configuration from all sources
pub fn load_config(overrides: &Overrides) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    let file = match find_config_file(&cwd) {
        Some(path) => {
            let parsed = load_config_file(&path)?;
            Some((path, parsed))
        }
        None => None,
    };

    resolve(overrides, std::env::var(API_BASE_ENV).ok(), file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_any_source() {
        let config = resolve(&Overrides::default(), None, None).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.api_base_source, ApiBaseSource::Default);
        assert!(config.timeout.is_none());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_priority_order() {
        let file = ConfigFile {
            api_base: Some("http://from-file:5000".to_string()),
            timeout_seconds: Some(30),
        };
        let path = PathBuf::from("/x/.halldetect/config.yaml");

        let config = resolve(
            &Overrides::default(),
            None,
            Some((path.clone(), file.clone())),
        )
        .unwrap();
        assert_eq!(config.api_base, "http://from-file:5000");
        assert_eq!(config.api_base_source, ApiBaseSource::File);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));

        let config = resolve(
            &Overrides::default(),
            Some("http://from-env:5000".to_string()),
            Some((path.clone(), file.clone())),
        )
        .unwrap();
        assert_eq!(config.api_base, "http://from-env:5000");
        assert_eq!(config.api_base_source, ApiBaseSource::Env);

        let overrides = Overrides {
            api_base: Some("http://from-flag:5000".to_string()),
            timeout_seconds: Some(5),
        };
        let config = resolve(
            &overrides,
            Some("http://from-env:5000".to_string()),
            Some((path, file)),
        )
        .unwrap();
        assert_eq!(config.api_base, "http://from-flag:5000");
        assert_eq!(config.api_base_source, ApiBaseSource::Flag);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_blank_env_is_ignored_and_zero_timeout_disables() {
        let overrides = Overrides {
            api_base: None,
            timeout_seconds: Some(0),
        };
        let config = resolve(&overrides, Some("  ".to_string()), None).unwrap();
        assert_eq!(config.api_base_source, ApiBaseSource::Default);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_invalid_base_is_an_error() {
        let overrides = Overrides {
            api_base: Some("nonsense".to_string()),
            timeout_seconds: None,
        };
        let err = resolve(&overrides, None, None).unwrap_err();
        assert!(err.to_string().contains("--api-base"));
    }

    #[test]
    fn test_config_file_discovery_and_parsing() {
        let temp = TempDir::new().unwrap();
        let config_dir = temp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();

        let config_path = config_dir.join(CONFIG_FILE);
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
api_base: http://10.0.0.5:8080
timeout_seconds: 45
"#
        )
        .unwrap();

        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, config_path);

        let parsed = load_config_file(&found).unwrap();
        assert_eq!(parsed.api_base.as_deref(), Some("http://10.0.0.5:8080"));
        assert_eq!(parsed.timeout_seconds, Some(45));
    }

    #[test]
    fn test_empty_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "\n").unwrap();

        let parsed = load_config_file(&path).unwrap();
        assert!(parsed.api_base.is_none());
        assert!(parsed.timeout_seconds.is_none());
    }

    #[test]
    fn test_api_base_source_display() {
        assert_eq!(ApiBaseSource::Env.to_string(), API_BASE_ENV);
        assert_eq!(ApiBaseSource::Default.to_string(), "default");
    }
}
