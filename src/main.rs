use clap::Parser;
use fundctl::cli::{self, Cli};
use fundctl::config::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.logging.init();
    info!("fundctl starting");

    if let Err(e) = cli::execute(cli.command, config).await {
        error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}
