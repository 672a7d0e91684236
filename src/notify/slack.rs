use super::{Notifier, SlackMessage};
use crate::error::{NotiError, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Posts messages to a Slack incoming webhook.
///
/// Without a webhook the notifier runs dry and prints messages to stdout.
pub struct SlackNotifier {
    client: Client,
    webhook: Option<String>,
}

impl SlackNotifier {
    pub fn new(webhook: Option<&str>) -> Result<Self> {
        Ok(Self::with_client(Self::build_client()?, webhook))
    }

    fn with_client(client: Client, webhook: Option<&str>) -> Self {
        Self {
            client,
            webhook: webhook.filter(|url| !url.is_empty()).map(str::to_string),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.webhook.is_none()
    }

    fn build_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("update-noti/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NotiError::Notification(format!("Failed to build HTTP client: {e}")))
    }

    fn post(&self, webhook: &str, message: &SlackMessage) -> Result<()> {
        debug!("posting {} bytes to Slack webhook", message.text.len());

        let response = self
            .client
            .post(webhook)
            .json(message)
            .send()
            .map_err(|e| NotiError::Notification(format!("Slack request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotiError::Notification(format!(
                "Slack webhook status {}",
                status.as_u16()
            )));
        }
        Ok(())
    }
}

impl Notifier for SlackNotifier {
    fn send(&self, message: &SlackMessage) -> Result<()> {
        match &self.webhook {
            Some(webhook) => self.post(webhook, message),
            None => {
                println!("[dry-run] {}", message.text);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves one HTTP request with `status` and hands back the raw request.
    fn one_shot_server(status: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/hook", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let reply = format!("HTTP/1.1 {status}\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok");
            stream.write_all(reply.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (url, handle)
    }

    fn local_notifier(url: &str) -> SlackNotifier {
        let client = Client::builder().no_proxy().build().unwrap();
        SlackNotifier::with_client(client, Some(url))
    }

    #[test]
    fn empty_webhook_is_dry_run() {
        let notifier = SlackNotifier::new(Some("")).unwrap();
        assert!(notifier.is_dry_run());
        assert!(notifier.send(&SlackMessage::text("hello")).is_ok());
    }

    #[test]
    fn posts_json_text_payload() {
        let (url, server) = one_shot_server("200 OK");
        let notifier = local_notifier(&url);
        notifier.send(&SlackMessage::text("hello host")).unwrap();

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /hook"));
        assert!(request.contains(r#"{"text":"hello host"}"#));
    }

    #[test]
    fn non_success_status_is_an_error() {
        let (url, server) = one_shot_server("500 Internal Server Error");
        let notifier = local_notifier(&url);
        let err = notifier.send(&SlackMessage::text("hello")).unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, NotiError::Notification(msg) if msg.contains("500")));
    }
}
