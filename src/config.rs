use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

pub const API_KEY_ENV: &str = "PANDASCORE_API_KEY";
pub const CONFIG_PATH_ENV: &str = "LOL_CALENDAR_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./config.json";
pub const DEFAULT_API_BASE: &str = "https://api.pandascore.co/lol/";
pub const DEFAULT_WIKI_BASE: &str = "https://lol.gamepedia.com/";

/// Runtime settings, resolved once at startup and handed to every component.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub ignored_leagues: HashSet<String>,
    pub show_results: bool,
    pub api_base: String,
    pub wiki_base: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ignored_leagues: HashSet::new(),
            show_results: false,
            api_base: DEFAULT_API_BASE.to_string(),
            wiki_base: DEFAULT_WIKI_BASE.to_string(),
        }
    }

    pub fn is_ignored(&self, league: &str) -> bool {
        self.ignored_leagues.contains(league)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    ignore_leagues: Vec<String>,
    #[serde(default)]
    show_results: bool,
    #[serde(default)]
    api_base_url: Option<String>,
    #[serde(default)]
    wiki_base_url: Option<String>,
}

/// Reads the config file (if any) and the environment.
pub fn load() -> Result<Config> {
    let path = std::env::var(CONFIG_PATH_ENV)
        .ok()
        .and_then(|p| non_empty(&p).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let env_key = std::env::var(API_KEY_ENV).ok();
    load_from(&path, env_key.as_deref())
}

pub fn load_from(path: &Path, env_key: Option<&str>) -> Result<Config> {
    let file = match fs::read_to_string(path) {
        Ok(raw) => parse_config_json(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no config file at {}", path.display());
            ConfigFile::default()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed reading {}", path.display()));
        }
    };
    resolve(file, env_key)
}

fn parse_config_json(raw: &str) -> Result<ConfigFile> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_json::from_str(trimmed).context("invalid config json")
}

fn resolve(file: ConfigFile, env_key: Option<&str>) -> Result<Config> {
    // Environment wins over the file.
    let api_key = env_key
        .and_then(non_empty)
        .or_else(|| file.api_key.as_deref().and_then(non_empty))
        .map(str::to_string)
        .ok_or_else(|| anyhow!("API key missing (set apiKey in config.json or {API_KEY_ENV})"))?;

    let mut config = Config::new(api_key);
    config.ignored_leagues = file.ignore_leagues.into_iter().collect();
    config.show_results = file.show_results;
    if let Some(base) = file.api_base_url.as_deref().and_then(non_empty) {
        config.api_base = with_trailing_slash(base);
    }
    if let Some(base) = file.wiki_base_url.as_deref().and_then(non_empty) {
        config.wiki_base = with_trailing_slash(base);
    }
    Ok(config)
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigFile, parse_config_json, resolve};

    #[test]
    fn env_key_overrides_file_key() {
        let file = parse_config_json(r#"{"apiKey":"from-file"}"#).expect("valid");
        let config = resolve(file, Some("from-env")).expect("key");
        assert_eq!(config.api_key, "from-env");
    }

    #[test]
    fn blank_env_key_falls_back_to_file() {
        let file = parse_config_json(r#"{"apiKey":"from-file"}"#).expect("valid");
        let config = resolve(file, Some("  ")).expect("key");
        assert_eq!(config.api_key, "from-file");
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = resolve(ConfigFile::default(), None).unwrap_err();
        assert!(err.to_string().contains("API key missing"));
    }

    #[test]
    fn file_fields_are_read() {
        let raw = r#"{
            "apiKey": "k",
            "ignoreLeagues": ["LCK", "LPL"],
            "showResults": true,
            "wikiBaseUrl": "http://localhost:8080"
        }"#;
        let config = resolve(parse_config_json(raw).expect("valid"), None).expect("key");
        assert!(config.show_results);
        assert!(config.is_ignored("LCK"));
        assert!(!config.is_ignored("lck"));
        assert_eq!(config.wiki_base, "http://localhost:8080/");
        assert_eq!(config.api_base, super::DEFAULT_API_BASE);
    }

    #[test]
    fn empty_file_is_default() {
        let file = parse_config_json("  ").expect("empty ok");
        assert!(file.ignore_leagues.is_empty());
        assert!(!file.show_results);
    }
}
