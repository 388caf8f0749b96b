//! Photon Sieve Layout CLI
//!
//! Generates a pinhole layout from a TOML configuration (or the built-in
//! defaults) and writes a TOML report of every ring and pinhole.

use clap::Parser;
use photon_sieve::{
    analysis::{LayoutChecker, LayoutStatistics},
    config::{ExhaustionPolicy, SieveConfig},
    metrics::{MetricsRegistry, MetricsSnapshot},
    sieve::{SieveBuilder, SieveReport},
};
use std::path::PathBuf;
use tracing::{info, warn};

/// Photon sieve ring layout and pinhole packing.
#[derive(Debug, Parser)]
#[command(name = "photon-sieve", version, about)]
struct Args {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible layout (overrides the config file).
    #[arg(short, long)]
    seed: Option<u64>,

    /// Candidate pinholes drawn per ring before giving up.
    #[arg(long)]
    max_attempts: Option<u64>,

    /// Skip rings that cannot be filled instead of aborting.
    #[arg(long)]
    skip_exhausted: bool,

    /// Write the TOML report here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write Prometheus text metrics to this file.
    #[arg(long)]
    metrics_out: Option<PathBuf>,

    /// Re-check every packing constraint and fail if any is violated.
    #[arg(long)]
    verify: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    info!("Photon Sieve v{}", photon_sieve::VERSION);

    let mut config = match &args.config {
        Some(path) => SieveConfig::from_file(path)?,
        None => SieveConfig::default(),
    };
    if args.seed.is_some() {
        config.packing.seed = args.seed;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.packing.max_attempts_per_ring = max_attempts;
    }
    if args.skip_exhausted {
        config.packing.on_exhaustion = ExhaustionPolicy::Skip;
    }

    let builder = SieveBuilder::new(config.clone())?;
    info!(
        wavelength_mm = config.optics.wavelength_mm,
        focal_distance_mm = config.optics.focal_distance_mm,
        zones = config.optics.zones,
        rings = builder.zone_plate().ring_pairs().count(),
        "Packing sieve"
    );

    let layout = builder.build()?;

    for shortfall in &layout.skipped {
        warn!(
            zone = shortfall.zone,
            open_area = shortfall.open_area,
            target = shortfall.target_open_area,
            "Ring left out of the sieve"
        );
    }

    let stats = LayoutStatistics::analyze(&layout.sieve);
    info!(
        pinholes = stats.sample_size,
        min_radius = stats.min_radius,
        max_radius = stats.max_radius,
        acceptance_rate = stats.acceptance_rate(),
        "Packing statistics"
    );

    if args.verify {
        let violations = LayoutChecker::new(config.fabrication.clone()).check_sieve(&layout.sieve);
        for violation in &violations {
            warn!("{}", violation);
        }
        if !violations.is_empty() {
            return Err(format!("{} layout violations", violations.len()).into());
        }
        info!("Layout verified");
    }

    if let Some(path) = &args.metrics_out {
        let registry = MetricsRegistry::new()?;
        registry.update(&MetricsSnapshot::from_layout(&layout));
        std::fs::write(path, registry.encode()?)?;
        info!(path = %path.display(), "Metrics written");
    }

    let report = SieveReport::new(&layout, &config).to_toml()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, report)?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{}", report),
    }

    info!(
        pinholes = layout.sieve.total_pinholes(),
        open_area_mm2 = layout.sieve.total_open_area(),
        f_number = layout.sieve.f_number(),
        "Done"
    );

    Ok(())
}
