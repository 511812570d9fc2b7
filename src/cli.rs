//! Command-line interface for the tourdb binary.

use clap::{Parser, Subcommand};

use crate::rest::config::HttpServerConfig;
use crate::rest::server::RestServer;
use crate::store::InMemoryStore;

#[derive(Parser)]
#[command(name = "tourdb", version, about = "Tour catalog HTTP API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = 3000)]
        port: u16,

        /// Allowed CORS origin (repeatable); none means permissive
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },
}

/// Parse arguments and dispatch
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve {
            host,
            port,
            cors_origins,
        } => {
            let config = HttpServerConfig {
                host,
                port,
                cors_origins,
            };
            let server = RestServer::new(InMemoryStore::new(), config);
            server.start().await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses_serve() {
        let cli = Cli::try_parse_from(["tourdb", "serve", "--port", "8080"]).unwrap();
        let Command::Serve { port, host, .. } = cli.command;
        assert_eq!(port, 8080);
        assert_eq!(host, "0.0.0.0");
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
