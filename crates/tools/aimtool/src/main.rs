mod config;

use aim::{AimRequest, AimResult, AimStats, DefaultPolicy, Resolver};
use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use config::AimtoolConfig;
use geom::{Angle, Fixed};
use map::{ActorId, Level};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aimtool")]
#[command(about = "Inspect portal levels and run autoaim queries", long_about = None)]
struct Cli {
    /// Config file (TOML); defaults to $AIMTOOL_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a level, then summarize it
    Check {
        /// Level file (.toml or .ron)
        level: PathBuf,
    },

    /// Resolve one shot
    Resolve {
        /// Level file (.toml or .ron)
        level: PathBuf,

        /// Name of the shooting actor
        #[arg(long)]
        from: String,

        /// Horizontal direction in degrees, counterclockwise from +x
        #[arg(long, default_value_t = 0.0)]
        angle: f64,

        /// Maximum distance in map units
        #[arg(long, default_value_t = 2048.0)]
        range: f64,

        /// Allow friends and not-autoaimed actors as targets
        #[arg(long)]
        no_mask: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a full circle of shots
    Sweep {
        /// Level file (.toml or .ron)
        level: PathBuf,

        /// Name of the shooting actor
        #[arg(long)]
        from: String,

        /// Maximum distance in map units
        #[arg(long, default_value_t = 2048.0)]
        range: f64,

        /// Number of evenly spaced directions
        #[arg(long, default_value_t = 64)]
        steps: u32,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
}

/// One resolution in printable form
#[derive(Debug, Serialize)]
struct ShotReport {
    angle: f64,
    target: Option<String>,
    distance: Option<f64>,
    slope: f64,
    stats: AimStats,
}

impl ShotReport {
    fn new(level: &Level, angle: f64, result: &AimResult<ActorId>) -> Self {
        Self {
            angle,
            target: result.target.map(|id| level.actor_by_id(id).name.clone()),
            distance: result.distance.map(Fixed::to_f64),
            slope: result.slope.to_f64(),
            stats: result.stats,
        }
    }

    fn print(&self) {
        match (&self.target, self.distance) {
            (Some(target), Some(distance)) => println!(
                "{:>8.2}°  {target} at {distance:.1}, slope {:.4}",
                self.angle, self.slope
            ),
            _ => println!("{:>8.2}°  no target, slope {:.4}", self.angle, self.slope),
        }
        debug!(
            intercepts = self.stats.intercepts,
            crossings = self.stats.crossings,
            depth = self.stats.max_depth,
            "shot stats"
        );
    }
}

#[derive(Debug, Serialize)]
struct SweepReport {
    source: String,
    range: f64,
    hits: usize,
    stats: AimStats,
    shots: Vec<ShotReport>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AimtoolConfig::load(cli.config.as_deref())?;

    let filter =
        EnvFilter::try_from_env("AIMTOOL_LOG").unwrap_or_else(|_| EnvFilter::new(&config.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { level } => check(&level),
        Commands::Resolve {
            level,
            from,
            angle,
            range,
            no_mask,
            json,
        } => resolve(&config, &level, &from, angle, range, !no_mask, json),
        Commands::Sweep {
            level,
            from,
            range,
            steps,
            json,
        } => sweep(&config, &level, &from, range, steps, json),
    }
}

fn load_level(path: &Path) -> Result<Level> {
    Level::load(path).with_context(|| format!("loading level {}", path.display()))
}

fn check(path: &Path) -> Result<()> {
    let level = load_level(path)?;
    let groups: Vec<String> = level.groups().iter().map(|g| g.0.to_string()).collect();

    println!("Level: {}", level.name());
    println!("  regions: {}", level.regions().len());
    println!("  lines:   {}", level.lines().len());
    println!("  actors:  {}", level.actors().len());
    println!("  portals: {}", level.portals().len());
    println!("  groups:  {}", groups.join(", "));

    for portal in level.portals() {
        println!(
            "  portal {} -> group {} by ({}, {}, {})",
            portal.name, portal.to_group.0, portal.delta.x, portal.delta.y, portal.delta.z
        );
    }
    Ok(())
}

fn resolver<'a>(config: &AimtoolConfig, level: &'a Level) -> Resolver<'a, Level> {
    Resolver::new(level, DefaultPolicy, config.aim.clone())
}

fn resolve(
    config: &AimtoolConfig,
    path: &Path,
    from: &str,
    angle: f64,
    range: f64,
    mask: bool,
    json: bool,
) -> Result<()> {
    ensure!(range > 0.0, "range must be positive, got {range}");
    let level = load_level(path)?;
    let source = level.actor_id(from)?;

    let result = resolver(config, &level).resolve(&AimRequest {
        source,
        angle: Angle::from_degrees(angle),
        range: Fixed::from_f64(range),
        mask,
    });
    let report = ShotReport::new(&level, angle, &result);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}

fn sweep(
    config: &AimtoolConfig,
    path: &Path,
    from: &str,
    range: f64,
    steps: u32,
    json: bool,
) -> Result<()> {
    ensure!(range > 0.0, "range must be positive, got {range}");
    ensure!(steps > 0, "steps must be at least 1");
    let level = load_level(path)?;
    let source = level.actor_id(from)?;
    let resolver = resolver(config, &level);

    let mut stats = AimStats::default();
    let shots: Vec<ShotReport> = (0..steps)
        .map(|i| {
            let degrees = 360.0 * f64::from(i) / f64::from(steps);
            let result = resolver.resolve(&AimRequest {
                source,
                angle: Angle::from_degrees(degrees),
                range: Fixed::from_f64(range),
                mask: true,
            });
            stats.absorb(&result.stats);
            ShotReport::new(&level, degrees, &result)
        })
        .collect();

    let hits = shots.iter().filter(|shot| shot.target.is_some()).count();
    info!(
        level = %level.name(),
        source = from,
        steps,
        hits,
        crossings = stats.crossings,
        "sweep complete"
    );

    if json {
        let report = SweepReport {
            source: from.to_string(),
            range,
            hits,
            stats,
            shots,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for shot in shots.iter().filter(|shot| shot.target.is_some()) {
            shot.print();
        }
        println!(
            "{hits}/{steps} directions found a target ({} intercepts, {} crossings, depth {})",
            stats.intercepts, stats.crossings, stats.max_depth
        );
    }
    Ok(())
}
