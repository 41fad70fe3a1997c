use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scoopnet::analysis::stats::network_analytics;
use scoopnet::export;
use scoopnet::{NetworkConfig, NetworkGenerator};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    CsvConnections,
    CsvUsers,
}

/// Generate a synthetic ScoopSocials user network
#[derive(Parser, Debug)]
#[command(name = "scoopnet")]
#[command(about = "Generate a deterministic demo social network", long_about = None)]
struct Args {
    /// Total users, including the seed demo account
    #[arg(long, env = "SCOOPNET_POPULATION", default_value_t = 7)]
    population: usize,

    /// Minimum connections every user must end with
    #[arg(long, env = "SCOOPNET_MIN_CONNECTIONS", default_value_t = 1)]
    min_connections: usize,

    /// Optional cap for the random connection phase
    #[arg(long, env = "SCOOPNET_MAX_CONNECTIONS")]
    max_connections: Option<usize>,

    #[arg(long, env = "SCOOPNET_SEED", default_value_t = 12345)]
    seed: u64,

    #[arg(short, long, env = "SCOOPNET_FORMAT", value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output file; stdout when omitted
    #[arg(short, long, env = "SCOOPNET_OUTPUT")]
    output: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,

    /// Log network analytics after generation
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoopnet=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let generator = NetworkGenerator::new(NetworkConfig {
        population: args.population,
        min_connections: args.min_connections,
        max_connections: args.max_connections,
        seed: args.seed,
        ..NetworkConfig::default()
    })
    .context("invalid network configuration")?;

    let network = generator.generate_network();

    if args.stats {
        let stats = network_analytics(&network);
        tracing::info!(
            users = stats.total_users,
            connections = stats.total_connections,
            average = stats.average_connections,
            components = stats.components,
            most_connected = ?stats.most_connected.map(|u| u.name),
            least_connected = ?stats.least_connected.map(|u| u.name),
            "network analytics"
        );
    }

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match args.format {
        OutputFormat::Json => export::json::write_network(&mut writer, &network, args.pretty)?,
        OutputFormat::CsvConnections => {
            let rows = export::csv::write_connections(&mut writer, &network)?;
            tracing::debug!(rows, "wrote connections");
        }
        OutputFormat::CsvUsers => {
            let rows = export::csv::write_users(&mut writer, &network)?;
            tracing::debug!(rows, "wrote users");
        }
    }
    writer.flush().context("failed to flush output")?;

    Ok(())
}
