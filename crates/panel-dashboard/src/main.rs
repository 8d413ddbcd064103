//! Panel Dashboard - CLI entry point
//!
//! Each invocation is one dashboard request for one user: it loads the
//! configuration, resolves the user's panel record and runs a single read or
//! write operation against it.

mod commands;

use clap::{Parser, Subcommand};
use commands::PanelMove;
use panel_dashboard::config::loader::ConfigLoader;
use panel_dashboard::config::schema::LogLevel;
use panel_dashboard::{logging, AppContext, AppError};
use panel_layout::ColumnsCount;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Per-user dashboard panel layouts
#[derive(Parser)]
#[command(name = "pdash")]
#[command(version, about = "Per-user dashboard panel layouts")]
struct Cli {
    /// User whose panels to read or change (default: storage.default_user)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Configuration file (default: $XDG_CONFIG_HOME/panel-dashboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the pdash CLI
#[derive(Subcommand)]
enum Commands {
    /// List registered panels with their enabled and locked state
    Panels,

    /// Enable exactly the given panels, disabling all others
    Enable {
        /// Panel names
        #[arg(required = true)]
        panels: Vec<String>,
    },

    /// Enable every registered panel
    Reset,

    /// Show the stored layout of every enabled panel as JSON
    Layout {
        /// Columns-count (default: dashboard.default_columns)
        #[arg(long)]
        columns: Option<ColumnsCount>,
    },

    /// Collapse a panel
    Collapse {
        /// Panel name
        panel: String,
        /// Columns-count (default: dashboard.default_columns)
        #[arg(long)]
        columns: Option<ColumnsCount>,
    },

    /// Expand a collapsed panel
    Expand {
        /// Panel name
        panel: String,
        /// Columns-count (default: dashboard.default_columns)
        #[arg(long)]
        columns: Option<ColumnsCount>,
    },

    /// Move panels to new positions, given as <panel>=<column>:<order>
    Move {
        /// Moves such as `news=0:1`
        #[arg(required = true, value_parser = commands::parse_move)]
        moves: Vec<PanelMove>,
        /// Columns-count (default: dashboard.default_columns)
        #[arg(long)]
        columns: Option<ColumnsCount>,
    },

    /// Show the rendered grid and the unpositioned panels as JSON
    Columns {
        /// Columns-count (default: dashboard.default_columns)
        #[arg(long)]
        columns: Option<ColumnsCount>,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Config { action } => {
            logging::init(LogLevel::default());
            commands::run_config_command(action, cli.config.as_deref())
        }
        command => run_request(command, cli.config.as_deref(), cli.user),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Loads config, resolves the user and runs one panel command.
fn run_request(
    command: Commands,
    config_path: Option<&Path>,
    user: Option<String>,
) -> Result<(), AppError> {
    let config = ConfigLoader::load(config_path)?;
    logging::init(config.logging.level);
    let ctx = AppContext::new(config, user)?;

    match command {
        Commands::Panels => commands::run_panels_command(&ctx),
        Commands::Enable { panels } => commands::run_enable_command(&ctx, &panels),
        Commands::Reset => commands::run_reset_command(&ctx),
        Commands::Layout { columns } => commands::run_layout_command(&ctx, columns),
        Commands::Collapse { panel, columns } => {
            commands::run_collapse_command(&ctx, &panel, columns, true)
        }
        Commands::Expand { panel, columns } => {
            commands::run_collapse_command(&ctx, &panel, columns, false)
        }
        Commands::Move { moves, columns } => commands::run_move_command(&ctx, &moves, columns),
        Commands::Columns { columns } => commands::run_columns_command(&ctx, columns),
        Commands::Config { action } => commands::run_config_command(action, config_path),
    }
}
