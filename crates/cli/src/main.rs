use clap::Parser;
use pinpoint_dns_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "pinpoint-dns")]
#[command(version)]
#[command(about = "Pinpoint DNS - DNS responder with local overrides and upstream forwarding")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Pinpoint DNS v{}", env!("CARGO_PKG_VERSION"));

    let nameservers = bootstrap::resolve_nameservers(&config).await?;
    let dns_services = di::DnsServices::new(&config, nameservers);
    info!(
        records = dns_services.use_case.records().len(),
        "Override records loaded"
    );

    let shutdown = CancellationToken::new();
    tokio::spawn(bootstrap::watch_shutdown_signals(shutdown.clone()));

    let listen_addr = config.server.listen_addr();
    if let Err(e) = server::start_dns_server(&listen_addr, dns_services.handler, shutdown).await {
        error!(error = %e, bind_address = %listen_addr, "DNS server error");
        return Err(e);
    }

    info!("Server shutdown complete");
    Ok(())
}
