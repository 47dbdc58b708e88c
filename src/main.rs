use anyhow::Result;
use clap::Parser;

use item_api::{cli, config, init_tracing, server};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    match args.get_command() {
        cli::Commands::Start => {
            let cfg = config::load_config(&args.config)?;
            init_tracing(&cfg.server.log_level, &cfg.server.log_format);
            server::start_server(cfg).await?;
        }
        cli::Commands::Test => {
            let cfg = config::load_config(&args.config)?;
            println!("Configuration OK");
            println!("  server:   {}:{}", cfg.server.host, cfg.server.port);
            println!(
                "  database: {}@{}:{}/{}",
                cfg.database.user, cfg.database.host, cfg.database.port, cfg.database.name
            );
            println!("  service:  {}", cfg.telemetry.service_name);
        }
        cli::Commands::Version => {
            println!("item-api v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
