use std::{env, fs, path::Path, time::Duration};

use crate::{domain::ChatId, errors::Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

const REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Typed configuration, read once at startup and passed into constructors.
#[derive(Clone)]
pub struct Config {
    // Credentials
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: ChatId,

    // Upstream
    pub endpoint: String,

    // Loop
    pub poll_interval: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    ///
    /// Every required variable is checked before any is parsed so the error names
    /// all of the missing ones at once.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str| lookup(key).and_then(non_empty);

        let missing: Vec<&str> = REQUIRED_VARS
            .into_iter()
            .filter(|key| value(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "required environment variables are not set: {}",
                missing.join(", ")
            )));
        }

        let practicum_token = value("PRACTICUM_TOKEN").unwrap_or_default();
        let telegram_token = value("TELEGRAM_TOKEN").unwrap_or_default();

        let raw_chat_id = value("TELEGRAM_CHAT_ID").unwrap_or_default();
        let telegram_chat_id = raw_chat_id
            .trim()
            .parse::<i64>()
            .map(ChatId)
            .map_err(|_| {
                Error::Config(format!(
                    "TELEGRAM_CHAT_ID must be a numeric chat id, got {raw_chat_id:?}"
                ))
            })?;

        let endpoint = value("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let poll_interval = match value("RETRY_TIME") {
            None => DEFAULT_POLL_INTERVAL,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::Config(format!(
                        "RETRY_TIME must be a positive number of seconds, got {raw:?}"
                    )))
                }
            },
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            poll_interval,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        env::set_var(key, unquote(v.trim()));
    }
}

fn unquote(val: &str) -> &str {
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        &val[1..val.len() - 1]
    } else {
        val
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
