use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mcp_fetch::config::FetchConfig;
use mcp_fetch::{http, server};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransportMode {
    Stdio,
    Http,
}

#[derive(Parser, Debug)]
#[command(name = "mcp-fetch", version)]
#[command(about = "MCP server that gives a model the ability to make web requests")]
struct Args {
    /// Transport mode: stdio (default) or http
    #[arg(long, value_enum, env = "TRANSPORT", default_value = "stdio")]
    transport: TransportMode,

    /// Host to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "localhost")]
    host: String,

    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Bearer token for HTTP authentication (optional)
    #[arg(long, env = "AUTH_TOKEN")]
    auth_token: Option<String>,

    /// Custom User-Agent string to use for requests
    #[arg(long, env = "CUSTOM_USER_AGENT")]
    user_agent: Option<String>,

    /// Proxy URL to use for requests (e.g., http://proxy:8080)
    #[arg(long, env = "PROXY_URL")]
    proxy_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging only if LOG_LEVEL environment variable is set
    if let Ok(log_level) = std::env::var("LOG_LEVEL") {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
            )
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();

        tracing::info!("Starting fetch MCP server with log level: {}", log_level);
    }

    let args = Args::parse();

    if let Some(ref user_agent) = args.user_agent {
        tracing::info!("Using custom user agent: {}", user_agent);
    }

    if let Some(ref proxy) = args.proxy_url {
        tracing::info!("Using proxy: {}", proxy);
    }

    let config = FetchConfig::new(args.user_agent, args.proxy_url);

    let result = match args.transport {
        TransportMode::Stdio => server::run_stdio(config).await,
        TransportMode::Http => {
            http::serve_http(&args.host, args.port, args.auth_token, config).await
        }
    };

    if let Err(e) = result {
        tracing::error!("Failed to run MCP server: {}", e);
        return Err(e);
    }

    Ok(())
}
