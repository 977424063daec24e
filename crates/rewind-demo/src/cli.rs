use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rewind::HistoryConfig;

use crate::error::{DemoError, Result};
use crate::flows::{parse_script, run_checkpoint, run_editor, run_script};
use crate::logging;

#[derive(Debug, Parser)]
#[command(
    name = "rewind-demo",
    about = "Walk through snapshot-based undo/redo flows",
    version
)]
pub struct Cli {
    /// TOML file holding a history configuration (e.g. `max_depth = 50`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum checkpoints kept; overrides --config.
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `rewind.history=trace`).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Save one state, change it, restore it.
    Checkpoint,

    /// Checkpoint a text editor after each edit, then undo everything.
    Editor(EditorArgs),

    /// Run set:<text>/record/undo/redo/revert steps against a text buffer.
    Script(ScriptArgs),
}

#[derive(Debug, Args)]
pub struct EditorArgs {
    /// Texts applied in order, each followed by a checkpoint.
    #[arg(default_values_t = [
        "Hello C#".to_string(),
        "Hello .Net".to_string(),
        "Hello Visual Studio".to_string(),
    ])]
    pub edits: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// Steps to run, e.g. `set:A record set:B record undo redo`.
    #[arg(required = true)]
    pub ops: Vec<String>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = resolve_config(cli.config.as_ref(), cli.max_depth)?;
    tracing::debug!(target: "rewind_demo", max_depth = config.max_depth, "history config resolved");

    match cli.command {
        Commands::Checkpoint => run_checkpoint(out),
        Commands::Editor(args) => run_editor(config, &args.edits, out),
        Commands::Script(args) => {
            let ops = parse_script(&args.ops)?;
            run_script(config, &ops, out)
        }
    }
}

/// Defaults, then the config file, then `--max-depth`.
pub fn resolve_config(path: Option<&PathBuf>, max_depth: Option<usize>) -> Result<HistoryConfig> {
    let mut config = match path {
        Some(path) => HistoryConfig::from_toml_file(path)?,
        None => HistoryConfig::default(),
    };
    if let Some(max_depth) = max_depth {
        config.max_depth = max_depth;
    }
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(DemoError::invalid_argument(errors.join("; ")));
    }
    Ok(config)
}
