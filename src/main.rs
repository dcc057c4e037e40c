use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use carnet_cli::api::ContactClient;
use carnet_cli::cli::{Cli, Commands};
use carnet_cli::config::ConfigManager;
use carnet_cli::state::Store;
use carnet_cli::ui;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Version) = cli.command {
        println!("carnet-cli {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let config_manager = if let Some(config_path) = cli.config_path {
        ConfigManager::with_path(config_path)
    } else {
        ConfigManager::new()?
    };

    let mut config = config_manager.load()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    init_logging(cli.list_agendas, &config_manager)?;

    let client = ContactClient::new(config.api_url.clone());

    // Command mode: print the agenda list and exit
    if cli.list_agendas {
        return handle_list_agendas(&client).await;
    }

    if !atty::is(atty::Stream::Stdout) {
        anyhow::bail!("carnet-cli needs an interactive terminal; use --list-agendas for scripted output");
    }

    let store = Arc::new(Store::new(client));
    let initial_agenda = cli.agenda.or(config.default_agenda);

    ui::run(store, initial_agenda).await?;
    Ok(())
}

/// Command mode logs to stderr; the interactive UI logs to a file beside the
/// config so log lines never corrupt the terminal output.
fn init_logging(command_mode: bool, config_manager: &ConfigManager) -> Result<()> {
    if command_mode {
        TermLogger::init(
            LevelFilter::Warn,
            simplelog::Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )
        .context("Failed to initialize logger")?;
        return Ok(());
    }

    let log_path = config_manager
        .config_path()
        .with_file_name("carnet-cli.log");
    let file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file at {}", log_path.display()))?;
    WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file)
        .context("Failed to initialize logger")?;
    Ok(())
}

async fn handle_list_agendas(client: &ContactClient) -> Result<()> {
    let agendas = client.list_agendas().await?;

    if agendas.is_empty() {
        println!("No agendas found.");
        return Ok(());
    }

    println!("Available agendas:");
    for agenda in agendas {
        println!("  - {}", agenda.slug);
    }

    Ok(())
}
