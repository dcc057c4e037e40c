use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "carnet-cli")]
#[command(about = "Carnet CLI - Interactive terminal contact manager", long_about = None)]
pub struct Cli {
    /// Agenda to select on startup
    #[arg(short, long)]
    pub agenda: Option<String>,

    /// Backend base URL (overrides config)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(long)]
    pub config_path: Option<std::path::PathBuf>,

    /// List available agendas and exit
    #[arg(long)]
    pub list_agendas: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    Version,
}
