use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "momentum", version, about = "Momentum CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Epics with their statistics
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Suggested next actions
    Suggest {
        /// Maximum number of suggestions (defaults to config)
        #[arg(long)]
        max: Option<usize>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Log work against a directive
    Checkin(commands::checkin::CheckinArgs),
    /// Epic management
    Epic {
        #[command(subcommand)]
        action: commands::epic::EpicAction,
    },
    /// Export, reset or clear stored data
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MOMENTUM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status { json } => commands::status::run(json),
        Commands::Suggest { max, json } => commands::suggest::run(max, json),
        Commands::Checkin(args) => commands::checkin::run(args),
        Commands::Epic { action } => commands::epic::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
