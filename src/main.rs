use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

use brokr::broker::AlpacaClient;
use brokr::config::Config;
use brokr::server::StdioServer;
use brokr::tools::{ToolCatalog, ToolDispatcher};

mod cli;

use cli::{Cli, Commands};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("brokr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("brokr.log");

    // Setup env_logger with file output; stdout stays reserved for responses
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None | Some(Commands::Serve) => run_server(config).await,
        Some(Commands::Tools { schemas }) => handle_tools_command(*schemas),
        Some(Commands::Call { name, arguments }) => {
            handle_call_command(name, arguments, config).await
        }
    }
}

async fn run_server(config: &Config) -> Result<()> {
    info!("Starting stdio tool server");

    let broker = AlpacaClient::new(&config.alpaca).context("Failed to create Alpaca client")?;
    let dispatcher = ToolDispatcher::new(broker);
    let server = StdioServer::new(dispatcher, &config.server);

    server.run().await.context("Server loop failed")?;
    Ok(())
}

fn handle_tools_command(schemas: bool) -> Result<()> {
    let catalog = ToolCatalog::brokerage();

    for tool in catalog.all() {
        println!("{}  {}", tool.name.green(), tool.description);
        if schemas {
            let schema = serde_json::to_string_pretty(&tool.input_schema)
                .context("Failed to render tool schema")?;
            println!("{}", schema);
        }
    }
    Ok(())
}

async fn handle_call_command(name: &str, arguments: &str, config: &Config) -> Result<()> {
    info!("One-shot call: {}", name);

    let arguments: serde_json::Value =
        serde_json::from_str(arguments).context("Arguments must be a JSON object")?;

    let broker = AlpacaClient::new(&config.alpaca).context("Failed to create Alpaca client")?;
    let dispatcher = ToolDispatcher::new(broker);

    let result = dispatcher.dispatch(name, arguments).await;
    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("Failed to render result")?
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config)
        .await
        .context("Application failed")?;

    Ok(())
}
