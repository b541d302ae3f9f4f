use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dns_probe::cli::{self, Args};
use dns_probe::config::Config;
use dns_probe::{dns, transport, utils};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            utils::print_red(&format!("Error occurred: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = Config::load(args.config.as_deref(), args.overrides())
        .context("failed to load configuration")?;

    init_logging(&config.logging.level);

    let mut rng = utils::query_rng(args.seed);
    let (query_id, query) = dns::build_query_with_id(&args.domain, args.record_type, &mut rng)
        .with_context(|| format!("failed to build query for {}", args.domain))?;

    if args.print_query {
        utils::print_yellow(&format!("query (hex)       : {}", utils::hex_bytes(&query)));
        utils::print_yellow(&format!("query (base64url) : {}", utils::base64_url_bytes(&query)));
    }

    info!(
        domain = %args.domain,
        record_type = args.record_type,
        server = %config.resolver.address,
        "sending query"
    );

    let udp = transport::UdpTransport::new(config.resolver.timeout());
    let header = udp
        .exchange(&query, &config.resolver.address)
        .with_context(|| format!("query to {} failed", config.resolver.address))?;

    if header.id != query_id {
        warn!(expected = query_id, received = header.id, "response id does not match query id");
    }

    let flags = if args.verbose {
        dns::parse_flags(&header, query_id)
    } else {
        Vec::new()
    };

    cli::display_header(&header, &flags);
    if header.id == query_id {
        utils::print_green("id matched");
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
