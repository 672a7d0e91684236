use crate::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "update-noti",
    about = "Checks for OS package updates, auto-updates whitelisted packages and reports to Slack",
    version,
    author
)]
pub struct Cli {
    /// Path to the configuration file (JSON, or TOML with a .toml extension)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: String,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `check`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check for updates, apply whitelisted ones and send the report
    Check {
        /// Print the report instead of posting it to Slack
        #[arg(long)]
        dry_run: bool,

        /// Deliver to a named webhook from global.slack.routes
        #[arg(long, value_name = "NAME", conflicts_with = "dry_run")]
        route: Option<String>,
    },

    /// List pending updates without applying or reporting them
    List,

    /// Print the detected package manager
    Detect,

    /// Send the installation completion notice and exit
    InstallComplete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["update-noti"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_check_flags() {
        let cli =
            Cli::try_parse_from(["update-noti", "check", "--dry-run", "-c", "/tmp/c.json", "-v"])
                .unwrap();
        assert_eq!(cli.config, "/tmp/c.json");
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Some(Commands::Check {
                dry_run: true,
                route: None
            })
        ));
    }

    #[test]
    fn dry_run_conflicts_with_route() {
        assert!(
            Cli::try_parse_from(["update-noti", "check", "--dry-run", "--route", "ops"]).is_err()
        );
    }

    #[test]
    fn parses_install_complete() {
        let cli = Cli::try_parse_from(["update-noti", "install-complete"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::InstallComplete)));
    }
}
