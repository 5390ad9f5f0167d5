use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dualys",
    about = "Dualys: layered virtual environment plans",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the reference plans, branch, merge, and execute them
    Demo(DemoArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Entry point looked up by the WebAssembly strategy
    #[arg(long)]
    pub entry_point: Option<String>,

    /// Accept merges of plans whose bases have equal content
    #[arg(long)]
    pub merge_by_state: bool,

    /// Stage this WebAssembly module into web-server at the entry point
    #[arg(long)]
    pub wasm_module: Option<PathBuf>,
}
