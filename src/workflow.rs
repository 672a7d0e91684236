use crate::agents::command_runner::{CommandRunner, SystemCommandRunner};
use crate::agents::host_info::HostInfoAgent;
use crate::config::Config;
use crate::error::{NotiError, Result};
use crate::logging;
use crate::notify::{Notifier, SlackMessage, SlackNotifier};
use crate::package_manager::{
    ManagerKind, PathProbe, WhichProbe, apply_updates, detect, list_upgradable, select_candidates,
};
use crate::report::{self, CheckReport};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Detect, list, auto-update the whitelist and report to Slack
pub fn execute_check<P: AsRef<Path>>(
    config_path: P,
    verbose: bool,
    dry_run: bool,
    route: Option<&str>,
) -> Result<()> {
    let config = load_config(config_path.as_ref(), verbose)?;
    let webhook = if dry_run {
        None
    } else {
        match route {
            Some(name) => Some(config.route_webhook(name)?),
            None => config.webhook(),
        }
    };
    let notifier = SlackNotifier::new(webhook)?;
    if notifier.is_dry_run() {
        info!("no webhook configured, the report will be printed instead of sent");
    }
    let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner);
    let show_progress = std::io::stderr().is_terminal();

    run_check(&config, &WhichProbe, runner, &notifier, show_progress)?;
    Ok(())
}

/// Print pending updates without applying or reporting anything
pub fn execute_list(verbose: bool) -> Result<()> {
    logging::init("INFO", verbose, None)?;
    let runner = SystemCommandRunner;

    let manager = detect_manager(&WhichProbe)?;
    let pending = list_upgradable(manager, &runner);

    if pending.is_empty() {
        println!("{}", "All packages are up to date".green());
        return Ok(());
    }
    println!(
        "{}",
        format!("{} pending update(s) via {}:", pending.len(), manager).cyan()
    );
    println!("{}", pending.to_vec().join("\n"));
    Ok(())
}

/// Print the detected package manager
pub fn execute_detect(verbose: bool) -> Result<()> {
    logging::init("INFO", verbose, None)?;
    let manager = detect_manager(&WhichProbe)?;
    println!("{manager}");
    Ok(())
}

/// Send the post-installation notice
pub fn execute_install_complete<P: AsRef<Path>>(config_path: P, verbose: bool) -> Result<()> {
    let config_path = config_path.as_ref();
    let config = load_config(config_path, verbose)?;
    let notifier = SlackNotifier::new(config.webhook())?;
    let host = HostInfoAgent::new(Arc::new(SystemCommandRunner)).collect();

    let message = report::install_message(&host, &config_path.display().to_string());
    notifier.send(&SlackMessage::text(message))?;
    println!("{}", "✓ Installation notice sent".green());
    Ok(())
}

fn load_config(path: &Path, verbose: bool) -> Result<Config> {
    let config = Config::load(path)?;
    logging::init(&config.telemetry.log_level, verbose, config.log_file())?;
    info!("loaded configuration from {}", path.display());
    Ok(config)
}

fn detect_manager(probe: &dyn PathProbe) -> Result<ManagerKind> {
    match detect(probe) {
        ManagerKind::None => Err(NotiError::NoPackageManager),
        kind => {
            info!(manager = %kind, "package manager detected");
            Ok(kind)
        }
    }
}

pub(crate) fn run_check(
    config: &Config,
    probe: &dyn PathProbe,
    runner: Arc<dyn CommandRunner>,
    notifier: &dyn Notifier,
    show_progress: bool,
) -> Result<CheckReport> {
    println!("{}", "Starting system update check...".cyan().bold());

    println!("\n{}", "1. Detecting package manager...".yellow());
    let manager = detect_manager(probe)?;
    println!("{}", format!("✓ Using {manager}").green());

    let host = HostInfoAgent::new(Arc::clone(&runner)).collect();

    println!("\n{}", "2. Listing pending updates...".yellow());
    let pending = list_upgradable(manager, runner.as_ref());
    println!("   Found {} pending update(s)", pending.len());

    let whitelist = config.whitelist();
    debug!(whitelist = ?whitelist.entries(), "auto-update whitelist");
    let candidates = select_candidates(&pending, &whitelist);
    let outcomes = if candidates.is_empty() {
        println!(
            "\n{}",
            "3. No whitelisted packages pending, skipping auto-update".yellow()
        );
        Vec::new()
    } else {
        println!(
            "\n{}",
            format!("3. Auto-updating {} package(s)...", candidates.len()).yellow()
        );
        let pb = progress_bar(candidates.len(), show_progress);
        let outcomes = apply_updates(manager, &candidates, runner.as_ref(), &pb);
        for outcome in &outcomes {
            if outcome.succeeded {
                println!("   {}", format!("✓ {}", outcome.name).green());
            } else {
                println!("   {}", format!("✗ {}", outcome.name).red());
            }
        }
        outcomes
    };

    let report = CheckReport {
        host,
        manager,
        pending,
        outcomes,
    };

    println!("\n{}", "4. Sending report...".yellow());
    match notifier.send(&SlackMessage::text(report.to_message())) {
        Ok(()) => println!("{}", "✓ Report delivered".green()),
        Err(e) => warn!("failed to send Slack message: {e}"),
    }

    Ok(report)
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if !visible {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    if let Ok(style) = ProgressStyle::default_bar().template("  [{bar:40}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
