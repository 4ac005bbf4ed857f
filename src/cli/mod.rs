pub mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::load_config;
use crate::logging::{self, LogTarget};
use crate::tui::{self, Theme};
use report::ReportKind;

/// Terminal dashboard for model execution statistics
#[derive(Parser)]
#[command(name = "execdash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file layered over the defaults and user config
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skip charts; summary cards are still shown
    #[arg(long, global = true)]
    no_charts: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Show execution summary and resource counts
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the daily cost, token and execution series
    Daily {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the top models by execution count
    Models {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let mut config = load_config(self.config.as_deref())?;
        if self.no_charts {
            config.dashboard.charts = false;
        }

        let is_tui = matches!(self.command, None | Some(Commands::Tui));
        // Terminal query must happen before logging and raw mode touch the tty
        let theme = is_tui.then(Theme::detect);

        let target = LogTarget::for_mode(&config.logging, is_tui);
        let _guard = logging::init(&config.logging, &target)?;
        tracing::debug!(?target, base_url = %config.api.base_url, "configuration loaded");

        match self.command {
            None | Some(Commands::Tui) => tui::run(&config, theme.unwrap_or_default()),
            Some(Commands::Stats { json }) => report::run(&config, ReportKind::Stats, json),
            Some(Commands::Daily { json }) => report::run(&config, ReportKind::Daily, json),
            Some(Commands::Models { json }) => report::run(&config, ReportKind::Models, json),
        }
    }
}
