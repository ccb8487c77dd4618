//! CLI for Redium: classify article URLs, resolve mirror destinations and
//! manage the stored preferences.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use redium_core::config;
use redium_core::prefs::JsonPreferenceStore;
use std::path::PathBuf;

use commands::{
    run_auto_redirect, run_classify, run_completions, run_open, run_resolve, run_rules,
    run_select, run_services,
};

/// Top-level CLI for Redium.
#[derive(Debug, Parser)]
#[command(name = "redium")]
#[command(about = "Redium: redirect paywalled articles to a free mirror", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/redium/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Preference file (default: ~/.local/state/redium/preferences.json).
    #[arg(long, global = true, value_name = "PATH")]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check whether a URL is a redirectable article.
    Classify {
        /// Page URL.
        url: String,
    },

    /// Print the mirror destination for an article URL.
    Resolve {
        /// Page URL.
        url: String,
        /// Service id to use instead of the stored selection (e.g. Scribe, 12ft).
        #[arg(long)]
        service: Option<String>,
    },

    /// Print the declarative rule update for the current preferences as JSON.
    Rules,

    /// List configured services; the selected one is marked with `*`.
    Services,

    /// Store the selected service and print the recompiled rule update.
    Select {
        /// Service id.
        service: String,
    },

    /// Turn auto-redirect on or off and print the recompiled rule update.
    AutoRedirect {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Simulate a navigation (or a manual action click) and print the host
    /// actions it triggers, one JSON object per line.
    Open {
        /// Page URL.
        url: String,
        /// Tab id the page is loading in.
        #[arg(long, default_value = "1", value_name = "ID")]
        tab: i64,
        /// Simulate the toolbar action instead of automatic interception.
        #[arg(long)]
        manual: bool,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        let cfg = match &cli.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let redirector = cfg.redirector()?;
        let store = match cli.prefs {
            Some(path) => JsonPreferenceStore::new(path),
            None => JsonPreferenceStore::open_default()?,
        };

        match cli.command {
            CliCommand::Classify { url } => run_classify(&redirector, &url),
            CliCommand::Resolve { url, service } => {
                run_resolve(&redirector, &store, &url, service.as_deref()).await?
            }
            CliCommand::Rules => run_rules(&redirector, &store).await?,
            CliCommand::Services => run_services(&redirector, &store).await?,
            CliCommand::Select { service } => run_select(&redirector, &store, &service).await?,
            CliCommand::AutoRedirect { state } => {
                run_auto_redirect(&redirector, &store, state == Toggle::On).await?
            }
            CliCommand::Open { url, tab, manual } => {
                run_open(redirector, store, &url, tab, manual).await?
            }
            CliCommand::Completions { shell } => run_completions(shell, &mut Cli::command()),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
