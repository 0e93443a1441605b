// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_API_URL: &str = "https://jobportalsystem-4fu4.onrender.com/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub session_path: PathBuf,
    pub log_path: PathBuf,
}

/// One environment section of `config.yaml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigSection {
    api_base_url: Option<String>,
    timeout_seconds: Option<u64>,
    session_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ConfigSection,
    #[serde(default)]
    production: ConfigSection,
}

impl PortalConfig {
    /// Load `config.yaml` (if present) for the current environment, then apply env overrides
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let path = config_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("JOBPORTAL_CONFIG").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("config.yaml"));

        let yaml = if path.exists() {
            Some(
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            )
        } else {
            if config_path.is_some() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            None
        };

        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::from_sources(
            &environment,
            yaml.as_deref(),
            |key| std::env::var(key).ok(),
            &current_dir,
        )
    }

    fn get_environment() -> String {
        std::env::var("JOBPORTAL_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Merge defaults, the YAML section for `environment`, and variables from `var`
    pub fn from_sources<F>(
        environment: &str,
        yaml: Option<&str>,
        var: F,
        base_dir: &Path,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ConfigFile = match yaml {
            Some(content) => serde_yaml::from_str(content).context("Failed to parse config.yaml")?,
            None => ConfigFile::default(),
        };

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        let home_dir = var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| base_dir.to_path_buf());

        let api_base_url = var("JOBPORTAL_API_URL")
            .or(section.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_seconds = match var("JOBPORTAL_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("JOBPORTAL_TIMEOUT_SECS must be a number of seconds"))?,
            None => section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let session_path = var("JOBPORTAL_SESSION")
            .map(PathBuf::from)
            .or(section.session_path)
            .unwrap_or_else(|| home_dir.join(".jobportal").join("session.json"));

        let log_path = var("JOBPORTAL_LOG")
            .map(PathBuf::from)
            .or(section.log_path)
            .unwrap_or_else(|| std::env::temp_dir().join("jobportal.log"));

        Ok(Self {
            api_base_url,
            timeout_seconds,
            session_path: resolve_path(&session_path, base_dir),
            log_path: resolve_path(&log_path, base_dir),
        })
    }
}

fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file() {
        let config =
            PortalConfig::from_sources("local", None, vars(&[("HOME", "/home/asha")]), Path::new("/work"))
                .unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert_eq!(
            config.session_path,
            PathBuf::from("/home/asha/.jobportal/session.json")
        );
    }

    #[test]
    fn test_yaml_section_selected_by_environment() {
        let yaml = r#"
local:
  api_base_url: http://localhost:8080/api
  session_path: state/session.json
production:
  api_base_url: https://portal.example.com/api
  timeout_seconds: 60
"#;
        let local = PortalConfig::from_sources("local", Some(yaml), vars(&[]), Path::new("/work"))
            .unwrap();
        assert_eq!(local.api_base_url, "http://localhost:8080/api");
        assert_eq!(local.session_path, PathBuf::from("/work/state/session.json"));

        let prod =
            PortalConfig::from_sources("production", Some(yaml), vars(&[]), Path::new("/work"))
                .unwrap();
        assert_eq!(prod.api_base_url, "https://portal.example.com/api");
        assert_eq!(prod.timeout_seconds, 60);
    }

    #[test]
    fn test_env_overrides_file() {
        let yaml = "local:\n  api_base_url: http://localhost:8080/api\n";
        let config = PortalConfig::from_sources(
            "local",
            Some(yaml),
            vars(&[
                ("JOBPORTAL_API_URL", "http://10.0.0.5/api"),
                ("JOBPORTAL_TIMEOUT_SECS", "5"),
            ]),
            Path::new("/work"),
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5/api");
        assert_eq!(config.timeout_seconds, 5);

        let bad = PortalConfig::from_sources(
            "local",
            None,
            vars(&[("JOBPORTAL_TIMEOUT_SECS", "soon")]),
            Path::new("/work"),
        );
        assert!(bad.is_err());
    }
}
