//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--local-prefix <dir>`: Where development checkouts live
//! - `--apps-path <dir>`: AiiDAlab apps directory
//! - `--system-home-app <dir>`: System-wide home app install
//! - `--config-file <file>`: AiiDAlab configuration file
//! - `--registry-url <url>`: App registry API base
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! Every option can also be set through an `AIIDALAB_DEVELOP_*`
//! environment variable. `--apps-path` additionally honors `AIIDALAB_APPS`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::GithubUsername;
use crate::registry::DEFAULT_REGISTRY_URL;

/// develop-aiidalab - Switch an AiiDAlab environment between system and development mode
#[derive(Parser, Debug)]
#[command(name = "develop-aiidalab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the development checkouts [default: ~/local]
    #[arg(
        long,
        global = true,
        env = "AIIDALAB_DEVELOP_LOCAL_PREFIX",
        value_name = "DIR"
    )]
    pub local_prefix: Option<PathBuf>,

    /// AiiDAlab apps directory [default: $AIIDALAB_APPS or ~/apps]
    #[arg(
        long,
        global = true,
        env = "AIIDALAB_DEVELOP_APPS_PATH",
        value_name = "DIR"
    )]
    pub apps_path: Option<PathBuf>,

    /// System-wide home app install [default: /opt/aiidalab-home]
    #[arg(
        long,
        global = true,
        env = "AIIDALAB_DEVELOP_SYSTEM_HOME_APP",
        value_name = "DIR"
    )]
    pub system_home_app: Option<PathBuf>,

    /// AiiDAlab configuration file [default: ~/aiidalab.toml]
    #[arg(
        long,
        global = true,
        env = "AIIDALAB_DEVELOP_CONFIG_FILE",
        value_name = "FILE"
    )]
    pub config_file: Option<PathBuf>,

    /// App registry API base URL
    #[arg(
        long,
        global = true,
        env = "AIIDALAB_DEVELOP_REGISTRY_URL",
        value_name = "URL",
        default_value = DEFAULT_REGISTRY_URL
    )]
    pub registry_url: String,

    /// Enable debug logging
    #[arg(long, global = true, env = "AIIDALAB_DEVELOP_DEBUG")]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true, env = "AIIDALAB_DEVELOP_QUIET")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show whether the environment is in system or development mode
    #[command(
        name = "status",
        long_about = "Inspect the environment and report its mode.\n\n\
            The mode is SYSTEM when the home app link points at the system \
            install and DEVELOPMENT when it points at the local checkout. Every \
            check is printed with a marker; any failing check makes the command \
            exit with status 1.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check the current mode
    develop-aiidalab status

    # Machine-readable report
    develop-aiidalab status --json"
    )]
    Status {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Point the home app back at the system install
    #[command(
        name = "restore",
        long_about = "Restore the system home app.\n\n\
            Replaces the development link in the apps directory with a link to \
            the system install and clears the develop flag in the AiiDAlab \
            configuration file. The local checkouts are left in place.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Leave development mode
    develop-aiidalab restore

    # Running it twice is harmless
    develop-aiidalab restore && develop-aiidalab restore"
    )]
    Restore,

    /// Clone the development repositories and link them in
    #[command(
        name = "setup",
        long_about = "Set up development mode.\n\n\
            Clones aiidalab and aiidalab-home from GitHub into the local prefix \
            (unless they are already there), links the package into the home app \
            checkout, points the home app link at the checkout, and sets the \
            develop flag in the AiiDAlab configuration file.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Clone the upstream repositories
    develop-aiidalab setup

    # Clone your forks over SSH
    develop-aiidalab setup -u octocat --use-ssh

SAFETY:
    If the home app slot holds a real directory, setup stops before cloning
    anything. Move the directory away and run setup again."
    )]
    Setup {
        /// GitHub account that owns the repositories to clone
        #[arg(
            short = 'u',
            long,
            env = "AIIDALAB_DEVELOP_GITHUB_USERNAME",
            default_value = "aiidalab",
            value_name = "NAME"
        )]
        github_username: GithubUsername,

        /// Clone over SSH instead of HTTPS
        #[arg(long, env = "AIIDALAB_DEVELOP_USE_SSH")]
        use_ssh: bool,
    },

    /// Inspect the AiiDAlab configuration file
    #[command(
        name = "config",
        long_about = "View the AiiDAlab configuration file.\n\n\
            Without an action, prints the file location followed by every \
            top-level key. The file is only ever written by setup and restore.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Show everything
    develop-aiidalab config

    # Read the develop flag
    develop-aiidalab config get develop

    # Print the file location
    develop-aiidalab config path"
    )]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Query the AiiDAlab app registry
    #[command(
        name = "registry",
        long_about = "Fetch app metadata from the AiiDAlab registry.\n\n\
            Lists every registered app with its title, or prints the registry \
            entry of a single app as JSON.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List registered apps
    develop-aiidalab registry

    # Show one app
    develop-aiidalab registry --app aiidalab-widgets-base

    # Dump the whole index
    develop-aiidalab registry --json"
    )]
    Registry {
        /// Show a single app
        #[arg(long, value_name = "NAME")]
        app: Option<String>,

        /// Print the full index as JSON
        #[arg(long, conflicts_with = "app")]
        json: bool,
    },

    /// List apps installed in the apps directory
    #[command(
        name = "app",
        long_about = "Show what is installed in the apps directory.\n\n\
            Each entry is shown with its kind (directory, symlink, or file) and, \
            for Git checkouts, the checked-out branch.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List installed apps
    develop-aiidalab app

    # Inspect the home app
    develop-aiidalab app home"
    )]
    App {
        /// App to show (defaults to all)
        name: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    develop-aiidalab completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    develop-aiidalab completion zsh >> ~/.zshrc

    # Fish
    develop-aiidalab completion fish > ~/.config/fish/completions/develop-aiidalab.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the file location and all values
    Show,
    /// Print a single value
    Get {
        /// Top-level key
        key: String,
    },
    /// Print the file location
    Path,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn setup_defaults() {
        let cli = Cli::try_parse_from(["develop-aiidalab", "setup"]).unwrap();
        match cli.command {
            Command::Setup {
                github_username,
                use_ssh,
            } => {
                assert_eq!(github_username.as_str(), "aiidalab");
                assert!(!use_ssh);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn setup_rejects_bad_username() {
        assert!(Cli::try_parse_from(["develop-aiidalab", "setup", "-u", "-bad-"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "develop-aiidalab",
            "status",
            "--local-prefix",
            "/tmp/prefix",
            "--debug",
        ])
        .unwrap();
        assert_eq!(cli.local_prefix, Some(PathBuf::from("/tmp/prefix")));
        assert!(cli.debug);
    }

    #[test]
    fn config_action_optional() {
        let cli = Cli::try_parse_from(["develop-aiidalab", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config { action: None }));

        let cli = Cli::try_parse_from(["develop-aiidalab", "config", "get", "develop"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: Some(ConfigAction::Get { .. })
            }
        ));
    }

    #[test]
    fn registry_app_conflicts_with_json() {
        assert!(
            Cli::try_parse_from(["develop-aiidalab", "registry", "--app", "x", "--json"]).is_err()
        );
    }
}
