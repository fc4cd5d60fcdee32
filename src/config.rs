use crate::error::FetchError;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Auth,
    ApiUrl,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Auth => "auth",
            ConfigKey::ApiUrl => "api_url",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::Auth, ConfigKey::ApiUrl]
    }

    fn from_key(key: &str) -> Option<ConfigKey> {
        ConfigKey::all().iter().copied().find(|k| k.as_str() == key)
    }
}

/// Properties file read when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "auth.properties";
/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Settings needed to talk to the GitHub API.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub api_url: reqwest::Url,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

/// Parses properties-file content into a map of the recognised keys.
///
/// Entries take the form `key=value`, `key: value` or `key value`. Blank lines
/// and lines starting with `#` or `!` are skipped, a trailing backslash joins
/// the next line onto the value, and the last occurrence of a key wins.
/// Unknown keys are dropped.
pub fn parse_config(content: &str) -> HashMap<ConfigKey, String> {
    let mut config_map = HashMap::new();

    for line in logical_lines(content) {
        let (key, value) = split_entry(&line);
        if let Some(key) = ConfigKey::from_key(key) {
            config_map.insert(key, value.to_string());
        }
    }

    config_map
}

/// Reads the properties file at `path` and extracts the API settings.
///
/// Fails with [`FetchError::Configuration`] when the file cannot be read, the
/// `auth` key is missing or blank, or `api_url` is not an http(s) URL.
pub fn load_config(path: &Path) -> Result<Config, FetchError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FetchError::configuration(path, "file not found"),
        _ => FetchError::configuration(path, format!("couldn't read properties: {e}")),
    })?;

    let config_map = parse_config(&content);

    let token = config_map
        .get(&ConfigKey::Auth)
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            FetchError::configuration(
                path,
                format!("missing value for key `{}`", ConfigKey::Auth.as_str()),
            )
        })?
        .to_string();

    let raw_url = config_map
        .get(&ConfigKey::ApiUrl)
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL);
    let api_url = reqwest::Url::parse(raw_url)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
        .ok_or_else(|| {
            FetchError::configuration(
                path,
                format!(
                    "`{}` must be an absolute http(s) URL, got `{raw_url}`",
                    ConfigKey::ApiUrl.as_str()
                ),
            )
        })?;

    tracing::debug!(path = %path.display(), api_url = %api_url, "loaded configuration");

    Ok(Config { token, api_url })
}

/// Joins continuation lines and drops comments and blank lines.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for raw in content.lines() {
        let mut line = match pending.take() {
            Some(mut head) => {
                head.push_str(raw.trim_start());
                head
            }
            None => {
                let trimmed = raw.trim_start();
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed.to_string()
            }
        };

        if continues(&line) {
            line.pop();
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }

    lines.extend(pending);
    lines
}

/// An odd number of trailing backslashes escapes the line break.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let key_end = line
        .find(|c: char| c == '=' || c == ':' || c.is_whitespace())
        .unwrap_or(line.len());
    let (key, rest) = line.split_at(key_end);
    let rest = rest.trim_start();
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (key, rest.trim_start())
}
