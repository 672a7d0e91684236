use crate::error::{NotiError, Result};
use crate::package_manager::Whitelist;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "/opt/update-noti/config.json";
pub const INSTALL_DIR: &str = "/opt/update-noti";

const LOG_LEVELS: &[&str] = &["TRACE", "DEBUG", "INFO", "WARN", "WARNING", "ERROR"];

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub slack_webhook: String,
    /// Packages updated without operator review when an upgrade is pending.
    pub auto_update: Vec<String>,
    pub telemetry: Telemetry,
    pub global: Global,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Telemetry {
    pub log_level: String,
    pub log_file: String,
}

/// Settings shared with other agents deployed on the same host.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Global {
    pub slack: Slack,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Slack {
    pub default_webhook: String,
    pub routes: HashMap<String, String>,
}

impl Config {
    /// Reads JSON, or TOML when the file name ends in `.toml`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NotiError::Config(format!("Failed to read '{}': {e}", path.display()))
        })?;

        let mut config: Config = if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        config.set_defaults();
        config.validate()?;
        Ok(config)
    }

    fn set_defaults(&mut self) {
        if self.telemetry.log_level.trim().is_empty() {
            self.telemetry.log_level = "INFO".to_string();
        }
    }

    fn validate(&self) -> Result<()> {
        let level = self.telemetry.log_level.to_ascii_uppercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(NotiError::Config(format!(
                "Unknown log level '{}'",
                self.telemetry.log_level
            )));
        }

        validate_webhook(&self.slack_webhook)?;
        validate_webhook(&self.global.slack.default_webhook)?;
        for url in self.global.slack.routes.values() {
            validate_webhook(url)?;
        }
        Ok(())
    }

    pub fn whitelist(&self) -> Whitelist {
        Whitelist::new(self.auto_update.iter().cloned())
    }

    /// Specific webhook, then the global default. `None` means dry run.
    pub fn webhook(&self) -> Option<&str> {
        [
            self.slack_webhook.as_str(),
            self.global.slack.default_webhook.as_str(),
        ]
        .into_iter()
        .find(|url| !url.is_empty())
    }

    /// Webhook registered under `route` in `global.slack.routes`.
    pub fn route_webhook(&self, route: &str) -> Result<&str> {
        self.global
            .slack
            .routes
            .get(route)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| NotiError::Config(format!("Unknown Slack route '{route}'")))
    }

    pub fn log_file(&self) -> Option<&Path> {
        let file = self.telemetry.log_file.trim();
        (!file.is_empty()).then(|| Path::new(file))
    }
}

fn validate_webhook(url: &str) -> Result<()> {
    if url.is_empty() {
        return Ok(());
    }

    let parsed =
        Url::parse(url).map_err(|_| NotiError::Config(format!("Invalid webhook URL: {url}")))?;
    match parsed.scheme() {
        "https" | "http" => Ok(()),
        scheme => Err(NotiError::Config(format!(
            "Unsupported webhook scheme: {scheme}"
        ))),
    }
}
