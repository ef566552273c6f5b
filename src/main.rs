use clap::{Parser, Subcommand};
use easyconnect::anyconnect::{ProcessRunner, VpnClient};
use easyconnect::config::ConfigStore;
use easyconnect::console::{Console, StdConsole};
use easyconnect::platform;
use easyconnect::toggle::{self, Action, ToggleError};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "easyconnect")]
#[command(about = "Toggle a Cisco AnyConnect VPN connection on or off")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the per-user default
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the AnyConnect command-line client
    #[arg(long, global = true, value_name = "PATH")]
    vpn_client: Option<PathBuf>,

    /// Exit without waiting for Enter
    #[arg(long, global = true)]
    no_pause: bool,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Connect if disconnected, disconnect if connected (default)
    Toggle,
    /// Connect unless already connected
    Connect,
    /// Disconnect if connected
    Disconnect,
    /// Show current VPN status
    Status,
    /// Prompt for settings and rewrite the config file
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries prompts and progress
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {}", e);
    }

    let mut console = StdConsole::new();
    let result = execute(&cli, &mut console);
    let code = finish(result, &mut console, !cli.no_pause);
    std::process::exit(code);
}

/// Report the run's result, wait for Enter if asked, and pick the exit code
fn finish(result: Result<(), ToggleError>, console: &mut dyn Console, pause: bool) -> i32 {
    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            debug!("{:?}", e);
            let _ = console.say(&e.to_string());
            1
        }
    };

    if pause {
        console.pause();
    }
    code
}

fn execute(cli: &Cli, console: &mut dyn Console) -> Result<(), ToggleError> {
    let store = match &cli.config {
        Some(path) => ConfigStore::at(path.clone())?,
        None => ConfigStore::resolve()?,
    };
    debug!("Config file: {}", store.path().display());

    let action = match cli.command.unwrap_or(Commands::Toggle) {
        Commands::Init => {
            store.generate(console)?;
            return Ok(());
        }
        Commands::Toggle => Action::Toggle,
        Commands::Connect => Action::Connect,
        Commands::Disconnect => Action::Disconnect,
        Commands::Status => Action::Status,
    };

    let program = cli
        .vpn_client
        .clone()
        .unwrap_or_else(platform::client_executable);
    let client = VpnClient::with_runner(program, ProcessRunner);

    toggle::run_session(action, &store, &client, console)?;
    Ok(())
}
