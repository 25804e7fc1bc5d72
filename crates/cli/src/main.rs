use clap::Parser;
use ferrous_dig_application::ports::DnsResolver;
use ferrous_dig_domain::{CliOverrides, Config, DnsQuery, RecordType};
use ferrous_dig_infrastructure::dns::{CacheKey, PacketCodec};
use ferrous_dig_jobs::{CacheSweepJob, JobRunner};
use std::process::ExitCode;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "ferrous-dig")]
#[command(version)]
#[command(about = "Ferrous Dig - DNS lookup tool with a persistent response cache")]
struct Cli {
    /// Domain names to query (IPv4 addresses with --reverse)
    #[arg(value_name = "DOMAIN")]
    domains: Vec<String>,

    /// Record type (A, NS, CNAME, PTR, MX, TXT, AAAA)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    record_type: Option<RecordType>,

    /// DNS server address or hostname
    #[arg(short = 's', long)]
    server: Option<String>,

    /// DNS server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Query timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Treat each argument as an IPv4 address and look up its PTR record
    #[arg(long)]
    reverse: bool,

    /// Bypass the response cache
    #[arg(long)]
    no_cache: bool,

    /// Print cache statistics
    #[arg(long)]
    cache_stats: bool,

    /// Drop every cached response before querying
    #[arg(long)]
    clear_cache: bool,

    /// Cache snapshot loaded at start and written at exit
    #[arg(long, value_name = "PATH")]
    cache_file: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Show header details and per-query timings
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            server: self.server.clone(),
            port: self.port,
            timeout: self.timeout,
            record_type: self.record_type,
            no_cache: self.no_cache,
            cache_file: self.cache_file.clone(),
            log_level: self.log_level.clone(),
        }
    }

    /// Names to put on the wire, in argument order.
    fn query_names(&self) -> anyhow::Result<Vec<String>> {
        if !self.reverse {
            return Ok(self.domains.clone());
        }
        let names = self
            .domains
            .iter()
            .map(|ip| PacketCodec::reverse_name(ip))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

fn template_query(config: &Config, reverse: bool) -> DnsQuery {
    let record_type = if reverse {
        RecordType::PTR
    } else {
        config.resolver.record_type
    };

    DnsQuery::new("", record_type)
        .with_server(config.resolver.server.as_str())
        .with_port(config.resolver.port)
        .with_timeout(config.resolver.timeout_duration())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);
    bootstrap::log_config_summary(cli.config.as_deref(), &config);

    if cli.domains.is_empty() && !cli.cache_stats && !cli.clear_cache {
        anyhow::bail!("a domain name is required");
    }

    let names = cli.query_names()?;
    let mut services = di::DnsServices::new(&config);

    if cli.clear_cache {
        match &services.cache {
            Some(cache) => {
                cache.clear();
                println!("Cache cleared successfully.");
            }
            None => warn!("Cache is disabled, nothing to clear"),
        }
    }

    let shutdown = CancellationToken::new();
    let mut runner = JobRunner::new().with_shutdown_token(shutdown.clone());
    if let Some(maintenance) = &services.cache_maintenance {
        runner = runner.with_cache_sweep(
            CacheSweepJob::new(maintenance.clone())
                .with_interval_secs(config.cache.cleanup_interval),
        );
    }
    let job_handles = runner.start();

    let template = template_query(&config, cli.reverse);
    let all_succeeded = match names.as_slice() {
        [] => true,
        [name] => run_single(&services, &template.for_domain(name.as_str()), cli.verbose).await,
        _ => {
            let outcomes = services.bulk_query.execute(names.as_slice(), &template).await;
            for outcome in &outcomes {
                println!("{}", output::format_bulk_outcome(outcome));
            }
            outcomes.iter().all(|outcome| outcome.is_success())
        }
    };

    if cli.verbose || names.len() > 1 {
        let events = services.drain_events();
        if !events.is_empty() {
            println!();
            print!("{}", output::format_timing_summary(&events));
        }
    }

    if cli.cache_stats {
        match &services.cache {
            Some(cache) => {
                println!();
                print!("{}", output::format_cache_stats(&cache.stats()));
            }
            None => println!("Cache is disabled."),
        }
    }

    if let Err(e) = services.persist_cache(&config) {
        error!(error = %e, "Failed to save cache");
    }

    shutdown.cancel();
    for handle in job_handles {
        let _ = handle.await;
    }
    info!("ferrous-dig finished");

    Ok(if all_succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run_single(services: &di::DnsServices, query: &DnsQuery, verbose: bool) -> bool {
    println!("{}", output::format_query_banner(query));
    println!();

    let start = Instant::now();
    let resolution = match services.resolver.resolve(query).await {
        Ok(resolution) => resolution,
        Err(e) => {
            eprintln!("Error: {}", e);
            return false;
        }
    };
    let elapsed = start.elapsed();

    print!("{}", output::format_response(&resolution.message, elapsed, verbose));

    if let Some(cache) = &services.cache {
        let key = CacheKey::new(&query.domain, query.record_type, &query.server);
        let remaining = cache.is_cached(&key).then(|| cache.remaining_ttl(&key));
        println!();
        println!("{}", output::format_cache_status(resolution.cache_hit, remaining));
    }

    true
}
