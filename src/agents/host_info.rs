use crate::agents::command_runner::CommandRunner;
use jiff::Zoned;
use std::fs;
use std::net::UdpSocket;
use std::sync::Arc;
use tracing::debug;

const UNKNOWN: &str = "Unknown";

/// Host metadata shown at the top of every report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub hostname: String,
    pub ip: String,
    pub os: String,
    pub uptime: String,
    pub time: String,
}

/// HostInfoAgent gathers host metadata, falling back to "Unknown" per field
pub struct HostInfoAgent {
    runner: Arc<dyn CommandRunner>,
}

impl HostInfoAgent {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub fn collect(&self) -> HostInfo {
        HostInfo {
            hostname: self.hostname(),
            ip: outbound_ip(),
            os: format!("{} {}", std::env::consts::OS, self.kernel_release()),
            uptime: fs::read_to_string("/proc/uptime")
                .ok()
                .and_then(|raw| parse_uptime_hours(&raw))
                .unwrap_or_else(|| UNKNOWN.to_string()),
            time: Zoned::now().strftime("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    fn hostname(&self) -> String {
        if let Ok(name) = fs::read_to_string("/proc/sys/kernel/hostname") {
            let name = name.trim();
            if !name.is_empty() {
                return name.to_string();
            }
        }
        self.uname("-n").unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn kernel_release(&self) -> String {
        self.uname("-r")
            .unwrap_or_else(|| std::env::consts::ARCH.to_string())
    }

    fn uname(&self, flag: &str) -> Option<String> {
        match self.runner.run("uname", &[flag]) {
            Ok(output) if output.success() => {
                let value = output.stdout.trim();
                (!value.is_empty()).then(|| value.to_string())
            }
            Ok(_) => None,
            Err(e) => {
                debug!("uname {flag} unavailable: {e}");
                None
            }
        }
    }
}

/// Local address the kernel would use for outbound traffic. No packet is sent.
fn outbound_ip() -> String {
    UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| {
            socket.connect("8.8.8.8:80")?;
            socket.local_addr()
        })
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

/// Whole hours from the first field of `/proc/uptime`.
fn parse_uptime_hours(raw: &str) -> Option<String> {
    let seconds: f64 = raw.split_whitespace().next()?.parse().ok()?;
    Some(format!("{}h", (seconds / 3600.0).floor() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::command_runner::CommandOutput;
    use crate::error::{NotiError, Result};

    struct FailingRunner;

    impl CommandRunner for FailingRunner {
        fn run(&self, program: &str, _args: &[&str]) -> Result<CommandOutput> {
            Err(NotiError::CommandExecution(program.to_string()))
        }
    }

    #[test]
    fn uptime_is_truncated_to_hours() {
        assert_eq!(parse_uptime_hours("7199.99 1234.00\n").as_deref(), Some("1h"));
        assert_eq!(parse_uptime_hours("42.0 1.0").as_deref(), Some("0h"));
        assert_eq!(parse_uptime_hours("90000 1").as_deref(), Some("25h"));
    }

    #[test]
    fn malformed_uptime_is_rejected() {
        assert!(parse_uptime_hours("").is_none());
        assert!(parse_uptime_hours("abc 12").is_none());
    }

    #[test]
    fn collect_survives_missing_uname() {
        let info = HostInfoAgent::new(Arc::new(FailingRunner)).collect();
        assert!(info.os.starts_with(std::env::consts::OS));
        assert!(!info.hostname.is_empty());
        assert_eq!(info.time.len(), "2024-01-01 00:00:00".len());
    }
}
