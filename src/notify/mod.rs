use crate::error::Result;
use serde::Serialize;

pub mod slack;
pub use slack::SlackNotifier;

/// Payload accepted by Slack incoming webhooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackMessage {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl SlackMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

pub trait Notifier {
    fn send(&self, message: &SlackMessage) -> Result<()>;
}
