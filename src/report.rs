//! Operator-facing message text (Slack mrkdwn).

use crate::agents::host_info::HostInfo;
use crate::config::INSTALL_DIR;
use crate::package_manager::{ManagerKind, PendingSet, UpdateOutcome};
use std::fmt::Write;

const RULE_WIDTH: usize = 40;
const MAX_LISTED_PENDING: usize = 10;
const MAX_LISTED_UPDATED: usize = 5;

/// Everything a single check run produced.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub host: HostInfo,
    pub manager: ManagerKind,
    pub pending: PendingSet,
    pub outcomes: Vec<UpdateOutcome>,
}

impl CheckReport {
    pub fn updated(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.succeeded)
            .map(|o| o.name.as_str())
            .collect()
    }

    pub fn failed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.succeeded)
            .map(|o| o.name.as_str())
            .collect()
    }

    pub fn to_message(&self) -> String {
        let mut msg = header("SYSTEM UPDATE CHECK");
        msg.push_str(&host_fields(&self.host, self.manager));
        msg.push_str(&rule());

        if self.pending.is_empty() {
            msg.push_str("✅ STATUS: All packages are up to date! 🎉");
            msg.push_str(&footer());
            return msg;
        }

        let pending: Vec<&str> = self.pending.iter().collect();
        msg.push_str(&format!("🔄 AVAILABLE UPDATES ({}):\n", pending.len()));
        msg.push_str(&package_block(&pending, "• ", MAX_LISTED_PENDING));
        msg.push_str(&rule());

        let updated = self.updated();
        let failed = self.failed();
        if !failed.is_empty() {
            msg.push_str(&format!("❌ AUTO-UPDATE FAILED ({}):\n", failed.len()));
            msg.push_str(&package_block(&failed, "❌ ", MAX_LISTED_UPDATED));
            msg.push_str(&rule());
        }

        if updated.is_empty() {
            msg.push_str("⚠️ STATUS: Updates available but none auto-updated");
        } else {
            msg.push_str(&format!("🛠️ AUTO-UPDATED ({}):\n", updated.len()));
            msg.push_str(&package_block(&updated, "✅ ", MAX_LISTED_UPDATED));
            msg.push_str(&rule());
            msg.push_str("✅ STATUS: Updates completed successfully! 🚀");
        }
        msg.push_str(&footer());
        msg
    }
}

/// Notice sent once after the tool has been installed on a host.
pub fn install_message(host: &HostInfo, config_path: &str) -> String {
    let mut msg = header("UPDATE-NOTI INSTALLED!");
    let _ = writeln!(msg, "📅 Time: `{}`", host.time);
    let _ = writeln!(msg, "🖥️ Host: `{}` (`{}`)", host.hostname, host.ip);
    let _ = writeln!(msg, "💻 OS: `{}`", host.os);
    let _ = writeln!(msg, "⏰ Uptime: `{}`", host.uptime);
    let _ = writeln!(msg, "📍 Location: `{INSTALL_DIR}`");
    msg.push_str("📦 Method: Binary from GitHub releases\n");
    msg.push_str("✅ Status: Installation completed successfully! 🚀\n");
    msg.push_str(&rule());
    msg.push_str("⏰ Schedule: Daily at 01:00 + boot backup\n");
    msg.push_str("🔄 Auto-update: Enabled\n");
    let _ = write!(msg, "📝 Config: `{config_path}`");
    msg.push_str(&footer());
    msg
}

fn rule() -> String {
    format!("{}\n", "━".repeat(RULE_WIDTH))
}

fn header(title: &str) -> String {
    format!("{}🔍 *{title}* 🔍\n{}", rule(), rule())
}

fn footer() -> String {
    format!("\n{}", "━".repeat(RULE_WIDTH))
}

fn host_fields(host: &HostInfo, manager: ManagerKind) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📅 Time: `{}`", host.time);
    let _ = writeln!(out, "🖥️ Host: `{}` (`{}`)", host.hostname, host.ip);
    let _ = writeln!(out, "💻 OS: `{}`", host.os);
    let _ = writeln!(out, "⏰ Uptime: `{}`", host.uptime);
    let _ = writeln!(out, "📦 Package Manager: `{manager}`");
    out
}

/// Bullets up to `max_listed` names, a single inline code span beyond that.
fn package_block(names: &[&str], bullet: &str, max_listed: usize) -> String {
    if names.len() > max_listed {
        return format!("`{}`\n", names.join(", "));
    }
    names
        .iter()
        .map(|name| format!("  {bullet}`{name}`\n"))
        .collect()
}
