use clap::Parser;
use rootwalk_domain::CliOverrides;
use std::net::IpAddr;
use tracing::info;

mod bootstrap;
mod di;
mod repl;

#[derive(Parser)]
#[command(name = "rootwalk")]
#[command(version)]
#[command(about = "rootwalk - iterative DNS resolver that walks referrals down from a root server")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Root server every walk starts from
    #[arg(short = 'r', long, value_name = "IP")]
    root_server: Option<IpAddr>,

    /// Per-query timeout in milliseconds
    #[arg(short = 't', long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Maximum referral depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Domains to resolve once, skipping the interactive prompt
    #[arg(value_name = "DOMAIN")]
    domains: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        root_server: cli.root_server,
        query_timeout_ms: cli.timeout_ms,
        max_depth: cli.max_depth,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(
        root = %config.resolver.root_server,
        "Starting rootwalk v{}",
        env!("CARGO_PKG_VERSION")
    );

    let services = di::ResolverServices::new(&config)?;
    let session = repl::Session::new(services);

    if cli.domains.is_empty() {
        session.run().await?;
    } else {
        for domain in &cli.domains {
            session.lookup(domain).await;
        }
    }

    info!("Session closed");
    Ok(())
}
