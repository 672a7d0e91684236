use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotiError {
    #[error("No supported package manager found.")]
    NoPackageManager,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, NotiError>;
