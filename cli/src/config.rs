use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use toml_edit::DocumentMut;
use toml_edit::Item as TomlItem;

/// Settings read from `~/.olla/config.toml`.
///
/// Missing keys stay `None` so the caller can fall back to its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OllaConfig {
    pub reply_delay_ms: Option<u64>,
    pub user_name: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`reply_delay_ms` must be a non-negative integer, got `{0}`")]
    InvalidReplyDelay(String),
    #[error("`profile.user_name` must not be empty")]
    EmptyUserName,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn new_default() -> anyhow::Result<Self> {
        let Some(home) = dirs::home_dir() else {
            anyhow::bail!("cannot determine home directory for config path");
        };
        Ok(Self::new(default_config_path(&home)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file. A missing file yields an empty config.
    ///
    /// Invalid TOML is read with a line-based fallback so one broken table does not hide the
    /// keys that are still readable.
    pub fn load(&self) -> anyhow::Result<OllaConfig> {
        let Some(content) = read_document_string(&self.path)? else {
            return Ok(OllaConfig::default());
        };

        let raw = match content.parse::<DocumentMut>() {
            Ok(doc) => read_raw_settings(&doc),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "config.toml is not valid TOML: {err}");
                parse_raw_settings_fallback(&content)
            }
        };

        raw.validate()
            .with_context(|| format!("invalid config at {}", self.path.display()))
    }
}

pub fn olla_home(home: &Path) -> PathBuf {
    home.join(".olla")
}

fn default_config_path(home: &Path) -> PathBuf {
    olla_home(home).join("config.toml")
}

/// Values as written in the file, before validation.
#[derive(Debug, Default)]
struct RawSettings {
    reply_delay_ms: Option<String>,
    user_name: Option<String>,
}

impl RawSettings {
    fn validate(self) -> Result<OllaConfig, ConfigError> {
        let reply_delay_ms = self
            .reply_delay_ms
            .map(|token| {
                token
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidReplyDelay(token))
            })
            .transpose()?;

        let user_name = match self.user_name {
            Some(name) if name.trim().is_empty() => return Err(ConfigError::EmptyUserName),
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        Ok(OllaConfig {
            reply_delay_ms,
            user_name,
        })
    }
}

fn read_raw_settings(doc: &DocumentMut) -> RawSettings {
    let reply_delay_ms = doc
        .get("reply_delay_ms")
        .and_then(TomlItem::as_value)
        .map(|v| match v.as_integer() {
            Some(n) => n.to_string(),
            None => v.to_string().trim().to_string(),
        });

    let user_name = doc
        .get("profile")
        .and_then(TomlItem::as_table)
        .and_then(|profile| profile.get("user_name"))
        .and_then(TomlItem::as_value)
        .and_then(|v| v.as_str())
        .map(str::to_string);

    RawSettings {
        reply_delay_ms,
        user_name,
    }
}

fn parse_raw_settings_fallback(contents: &str) -> RawSettings {
    let mut table: Option<&str> = None;
    let mut raw = RawSettings::default();

    for line in contents.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            table = parse_table_header_name(trimmed);
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        match (table, key.trim()) {
            (None, "reply_delay_ms") => {
                let Some(value) = strip_toml_comment(value) else {
                    continue;
                };
                let token = value.split_whitespace().next().unwrap_or_default();
                raw.reply_delay_ms = Some(token.to_string());
            }
            (Some("profile"), "user_name") => {
                if let Some(name) = parse_quoted_string(value) {
                    raw.user_name = Some(name.to_string());
                }
            }
            _ => {}
        }
    }

    raw
}

fn parse_table_header_name(line: &str) -> Option<&str> {
    let line = line.trim_start();
    if !line.starts_with('[') {
        return None;
    }
    let end = line.find(']')?;
    if end <= 1 {
        return None;
    }
    let name = line[1..end].trim();
    if name.is_empty() {
        return None;
    }
    Some(name)
}

fn strip_toml_comment(line: &str) -> Option<&str> {
    let line = line.split_once('#').map_or(line, |(head, _)| head).trim();
    if line.is_empty() { None } else { Some(line) }
}

/// `"name"` or `'name'`; anything after the closing quote is ignored.
fn parse_quoted_string(value: &str) -> Option<&str> {
    let value = value.trim_start();
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &value[quote.len_utf8()..];
    let end = rest.find(quote)?;
    Some(&rest[..end])
}

fn read_document_string(path: &Path) -> anyhow::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(anyhow::Error::new(err).context("read config.toml")),
    }
}
