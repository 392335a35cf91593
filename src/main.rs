use anyhow::Result;
use clap::{Parser, Subcommand};

/// menuplan - meal planning and shopping lists
#[derive(Parser)]
#[command(name = "menuplan")]
#[command(about = "Plan dishes on a calendar and generate shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = menuplan::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    menuplan::observability::init_observability(&config.observability)?;

    match cli.command {
        Commands::Serve { host, port } => menuplan::server::serve(config, host, port).await,
        Commands::Migrate => menuplan::migrate::migrate(&config).await,
        Commands::Reset => menuplan::migrate::reset(&config).await,
    }
}
