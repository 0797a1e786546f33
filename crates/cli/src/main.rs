use anyhow::Context;
use clap::{Parser, Subcommand};

use catalog_kernel::settings::Settings;

/// Serve and inspect the catalog API
#[derive(Debug, Parser)]
#[command(name = "catalog-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the merged OpenAPI document
    Openapi,
    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().with_context(|| "failed to load catalog settings")?;

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            catalog_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "catalog-cli serving");
            catalog_app::run(settings).await
        }
        Command::Openapi => {
            let registry = catalog_app::registry(&settings);
            let document = catalog_http::openapi::document(&registry, &settings.server);
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        }
        Command::Config => {
            println!("environment = {:?}", settings.environment);
            println!("{:#?}", settings.server);
            println!("{:#?}", settings.telemetry);
            println!("auth.genre_credential = <redacted>");
            Ok(())
        }
    }
}
