//! Command-line interface for matrix generation and clue queries

use crate::algorithm::filter::{Clue, ToleranceConfig};
use crate::algorithm::generator::{GeneratorConfig, MatrixGenerator};
use crate::engine::protocol::{ClueInput, CountryRef, Request, Response};
use crate::engine::session::{Session, SessionConfig};
use crate::engine::worker::EngineWorker;
use crate::io::configuration::{
    DEFAULT_MATRIX_FILE, DEFAULT_SIMPLIFY_TOLERANCE_DEG, DEFAULT_TOLERANCE_FLOOR_KM,
    DEFAULT_TOLERANCE_RATIO, UNKNOWN_DISTANCE_KM,
};
use crate::io::error::{EngineError, Result, WithPath, invalid_parameter};
use crate::io::geojson::parse_world;
use crate::io::progress::GenerationProgress;
use crate::io::source::{DataSource, FileSource};
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "regionsleuth")]
#[command(
    author,
    version,
    about = "Deduce an unknown country from distance clues to known countries"
)]
/// Command-line arguments for the engine tools
pub struct Cli {
    /// Suppress progress output and informational logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available operations
#[derive(Subcommand)]
pub enum Command {
    /// Precompute the pairwise distance matrix for a feature collection
    Generate(GenerateArgs),
    /// Filter regions against a set of clues
    Filter(FilterArgs),
    /// Answer JSON requests read line by line from stdin
    Serve(ServeArgs),
}

/// Arguments for `generate`
#[derive(Args)]
pub struct GenerateArgs {
    /// GeoJSON feature collection of all regions
    #[arg(value_name = "WORLD")]
    pub world: PathBuf,

    /// Output matrix path (defaults to distances.json next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Simplification tolerance in degrees applied before measuring
    #[arg(short, long, default_value_t = DEFAULT_SIMPLIFY_TOLERANCE_DEG)]
    pub tolerance: f64,

    /// Compute rows on a single thread
    #[arg(long)]
    pub sequential: bool,
}

/// Tolerance flags shared by query commands
#[derive(Args, Clone, Copy)]
pub struct ToleranceArgs {
    /// Minimum tolerance in kilometers for non-zero clues
    #[arg(long, default_value_t = DEFAULT_TOLERANCE_FLOOR_KM)]
    pub tolerance_floor: f64,

    /// Tolerance as a fraction of the declared distance
    #[arg(long, default_value_t = DEFAULT_TOLERANCE_RATIO)]
    pub tolerance_ratio: f64,
}

impl ToleranceArgs {
    /// Session tunables built from the flags
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance value is negative or not finite
    pub fn session_config(&self) -> Result<SessionConfig> {
        let tolerance = ToleranceConfig {
            floor_km: self.tolerance_floor,
            ratio: self.tolerance_ratio,
        };
        tolerance.validate()?;
        Ok(SessionConfig {
            tolerance,
            unknown_distance_km: UNKNOWN_DISTANCE_KM,
        })
    }
}

/// Arguments for `filter`
#[derive(Args)]
pub struct FilterArgs {
    /// GeoJSON feature collection of all regions
    #[arg(value_name = "WORLD")]
    pub world: PathBuf,

    /// Precomputed distance matrix
    #[arg(short, long)]
    pub distances: Option<PathBuf>,

    /// Clue as REGION=KILOMETERS; repeatable
    #[arg(short, long = "clue", value_name = "REGION=KM", value_parser = parse_clue)]
    pub clues: Vec<Clue>,

    /// Measure against full geometry including outlying territories
    #[arg(long)]
    pub territories: bool,

    /// Tolerance settings
    #[command(flatten)]
    pub tolerance: ToleranceArgs,
}

/// Arguments for `serve`
#[derive(Args)]
pub struct ServeArgs {
    /// Directory relative request locations resolve against
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Tolerance settings
    #[command(flatten)]
    pub tolerance: ToleranceArgs,
}

/// Parse a `REGION=KILOMETERS` clue
///
/// # Errors
///
/// Returns a message if the separator, region or distance is missing or invalid
pub fn parse_clue(text: &str) -> std::result::Result<Clue, String> {
    let (region, distance) = text
        .rsplit_once('=')
        .ok_or_else(|| format!("expected REGION=KILOMETERS, got '{text}'"))?;
    let region = region.trim();
    if region.is_empty() {
        return Err(format!("missing region in '{text}'"));
    }
    let distance_km: f64 = distance
        .trim()
        .parse()
        .map_err(|e| format!("invalid distance in '{text}': {e}"))?;
    if !(distance_km.is_finite() && distance_km >= 0.0) {
        return Err(format!("distance must be non-negative in '{text}'"));
    }
    Ok(Clue::new(region, distance_km))
}

/// Default matrix location for a world file
pub fn default_matrix_path(world: &Path) -> PathBuf {
    world
        .parent()
        .map_or_else(|| PathBuf::from(DEFAULT_MATRIX_FILE), |dir| dir.join(DEFAULT_MATRIX_FILE))
}

/// Dispatches a parsed command line
pub struct CommandRunner {
    cli: Cli,
}

impl CommandRunner {
    /// Create a runner for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if loading, computing or writing fails
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Generate(args) => self.generate(args),
            Command::Filter(args) => Self::filter(args),
            Command::Serve(args) => Self::serve(args),
        }
    }

    fn generate(&self, args: &GenerateArgs) -> Result<()> {
        if !(args.tolerance.is_finite() && args.tolerance >= 0.0) {
            return Err(invalid_parameter(
                "tolerance",
                &args.tolerance,
                &"must be a finite non-negative number of degrees",
            ));
        }

        let started = Instant::now();
        let location = args.world.display().to_string();
        let text = FileSource::new().fetch(&location)?;
        let world = parse_world(&text, &location)?;
        info!(regions = world.len(), tolerance = args.tolerance, "generating distance matrix");

        let config = GeneratorConfig {
            simplify_tolerance_deg: args.tolerance,
            parallel: !args.sequential,
            ..GeneratorConfig::default()
        };
        let progress = GenerationProgress::new(world.len(), self.cli.quiet);
        let matrix = MatrixGenerator::new(&world, config).generate(|_| progress.row_done());
        progress.finish();

        let output = args
            .output
            .clone()
            .unwrap_or_else(|| default_matrix_path(&args.world));
        matrix.save(&output)?;
        info!(
            path = %output.display(),
            elapsed_s = started.elapsed().as_secs(),
            "distance matrix written"
        );
        Ok(())
    }

    fn filter(args: &FilterArgs) -> Result<()> {
        let worker = EngineWorker::spawn(Session::with_config(
            FileSource::new(),
            args.tolerance.session_config()?,
        ))?;

        let init = Request::Init {
            world_url: args.world.display().to_string(),
            distances_url: args.distances.as_ref().map(|path| path.display().to_string()),
        };
        if let Response::Error { error } = worker.request(init)? {
            return Err(EngineError::WorldLoad {
                location: args.world.display().to_string(),
                reason: error,
            });
        }

        let filter = Request::Filter {
            clues: args
                .clues
                .iter()
                .map(|clue| ClueInput {
                    country: CountryRef::Id(clue.region.clone()),
                    distance: clue.distance_km,
                })
                .collect(),
            include_territories: args.territories,
        };

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let stdout_path = Path::new("<stdout>");
        match worker.request(filter)? {
            Response::Candidates { candidates } => {
                for candidate in &candidates {
                    let name = candidate
                        .properties
                        .get("name")
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or_default();
                    writeln!(out, "{}\t{name}", candidate.id).with_path(stdout_path, "write")?;
                }
                info!(candidates = candidates.len(), "filter finished");
                Ok(())
            }
            Response::Error { error } => Err(EngineError::InvalidParameter {
                parameter: "clue",
                value: args
                    .clues
                    .iter()
                    .map(|clue| clue.region.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
                reason: error,
            }),
            Response::Ready { .. } => Ok(()),
        }
    }

    fn serve(args: &ServeArgs) -> Result<()> {
        let source = args
            .root
            .as_ref()
            .map_or_else(FileSource::new, |root| FileSource::with_root(root.clone()));
        let worker = EngineWorker::spawn(Session::with_config(
            source,
            args.tolerance.session_config()?,
        ))?;

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let stdin_path = Path::new("<stdin>");
        let stdout_path = Path::new("<stdout>");

        for line in stdin.lock().lines() {
            let line = line.with_path(stdin_path, "read")?;
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<Request>(&line) {
                Ok(request) => worker.request(request)?,
                Err(e) => Response::error(&format!("Malformed request: {e}")),
            };

            let encoded = serde_json::to_string(&response).map_err(|e| EngineError::FileSystem {
                path: stdout_path.to_path_buf(),
                operation: "encode response",
                source: e.into(),
            })?;
            writeln!(out, "{encoded}").with_path(stdout_path, "write")?;
            out.flush().with_path(stdout_path, "flush")?;
        }

        worker.shutdown();
        Ok(())
    }
}
