use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use glam::DVec2;
use log::info;
use trajsim_core::{
    simulate_pairwise, simulate_uniform_fall, PairwiseConfig, RunParameters, UniformFallConfig,
};

mod export;
mod logging;

#[derive(Parser)]
#[command(name = "trajsim")]
#[command(about = "trajsim - integrate point masses and dump their trajectory", long_about = None)]
struct Cli {
    #[command(flatten)]
    logging: logging::LoggingArgs,

    /// Write the trajectory CSV to this file instead of stdout
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// A single particle falling under constant gravity
    Fall(FallArgs),
    /// Particles coupled pairwise by springs
    Pairwise(PairwiseArgs),
}

/// Options shared by every scenario; unset values keep the scenario default
#[derive(Args)]
struct RunArgs {
    /// Total simulated time (s)
    #[arg(long, allow_hyphen_values = true)]
    total_time: Option<f64>,
    /// Step size (s)
    #[arg(long, allow_hyphen_values = true)]
    timestep: Option<f64>,
    /// Particle mass (kg)
    #[arg(long, allow_hyphen_values = true)]
    mass: Option<f64>,
}

impl RunArgs {
    fn apply(&self, run: RunParameters) -> RunParameters {
        RunParameters {
            total_time: self.total_time.unwrap_or(run.total_time),
            timestep: self.timestep.unwrap_or(run.timestep),
            mass: self.mass.unwrap_or(run.mass),
        }
    }
}

#[derive(Args)]
struct FallArgs {
    #[command(flatten)]
    run: RunArgs,
    /// Horizontal launch velocity (m/s)
    #[arg(long, allow_hyphen_values = true)]
    initial_velocity: Option<f64>,
    /// Starting height (m)
    #[arg(long)]
    height: Option<f64>,
    /// Gravitational acceleration (m/s²)
    #[arg(long)]
    gravity: Option<f64>,
}

impl FallArgs {
    fn to_config(&self) -> UniformFallConfig {
        let default = UniformFallConfig::default();
        UniformFallConfig {
            run: self.run.apply(default.run),
            initial_velocity: self.initial_velocity.unwrap_or(default.initial_velocity),
            height: self.height.unwrap_or(default.height),
            gravity: self.gravity.unwrap_or(default.gravity),
        }
    }
}

#[derive(Args)]
struct PairwiseArgs {
    #[command(flatten)]
    run: RunArgs,
    /// Spring constant (N/m)
    #[arg(long)]
    stiffness: Option<f64>,
    /// Pair separation at which the spring force vanishes (m)
    #[arg(long)]
    rest_length: Option<f64>,
    /// Initial particle position as `x,y`; repeat once per particle
    #[arg(long = "position", value_parser = parse_vec2, allow_hyphen_values = true)]
    positions: Vec<DVec2>,
    /// Initial particle velocity as `x,y`; repeat once per particle
    #[arg(long = "velocity", value_parser = parse_vec2, allow_hyphen_values = true)]
    velocities: Vec<DVec2>,
}

impl PairwiseArgs {
    fn to_config(&self) -> PairwiseConfig {
        let default = PairwiseConfig::default();
        PairwiseConfig {
            run: self.run.apply(default.run),
            stiffness: self.stiffness.unwrap_or(default.stiffness),
            rest_length: self.rest_length.unwrap_or(default.rest_length),
            initial_positions: if self.positions.is_empty() {
                default.initial_positions
            } else {
                self.positions.clone()
            },
            initial_velocities: self.velocities.clone(),
        }
    }
}

fn parse_vec2(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(DVec2::new(x, y))
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    logging::install(&cli.logging)?;

    let trajectory = match &cli.command {
        Commands::Fall(args) => simulate_uniform_fall(&args.to_config())?,
        Commands::Pairwise(args) => simulate_pairwise(&args.to_config())?,
    };
    info!(
        "computed {} steps for {} particle(s)",
        trajectory.step_count(),
        trajectory.particle_count()
    );

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            export::write_csv(&trajectory, BufWriter::new(file))
        }
        None => export::write_csv(&trajectory, io::stdout().lock()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vec2_accepts_signed_pairs() {
        assert_eq!(parse_vec2("-1, 0.5"), Ok(DVec2::new(-1.0, 0.5)));
        assert!(parse_vec2("1").is_err());
        assert!(parse_vec2("a,b").is_err());
    }

    #[test]
    fn cli_overrides_only_given_fields() {
        let cli = Cli::try_parse_from([
            "trajsim",
            "pairwise",
            "--stiffness",
            "2",
            "--position",
            "0,0",
            "--position",
            "-3,0",
        ])
        .unwrap();

        let Commands::Pairwise(args) = &cli.command else {
            panic!("expected pairwise subcommand");
        };
        let config = args.to_config();
        assert_eq!(config.stiffness, 2.0);
        assert_eq!(config.rest_length, PairwiseConfig::default().rest_length);
        assert_eq!(
            config.initial_positions,
            vec![DVec2::ZERO, DVec2::new(-3.0, 0.0)]
        );
    }

    #[test]
    fn negative_run_values_reach_validation() {
        let cli = Cli::try_parse_from([
            "trajsim",
            "fall",
            "--timestep",
            "-0.05",
            "--mass",
            "-1",
        ])
        .unwrap();
        let Commands::Fall(args) = &cli.command else {
            panic!("expected fall subcommand");
        };
        let config = args.to_config();
        assert_eq!(config.run.timestep, -0.05);
        assert_eq!(config.run.mass, -1.0);
        assert!(matches!(
            simulate_uniform_fall(&config),
            Err(trajsim_core::SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn fall_defaults_match_core_defaults() {
        let cli = Cli::try_parse_from(["trajsim", "fall"]).unwrap();
        let Commands::Fall(args) = &cli.command else {
            panic!("expected fall subcommand");
        };
        assert_eq!(args.to_config(), UniformFallConfig::default());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
