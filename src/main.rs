use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;
use skirmish_map_generator::{MapError, MapParameters, generate_map};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Generates a symmetric two-player skirmish map")]
struct Cli {
    /// Configuration file, JSON with comments
    #[arg(long, default_value = "config.jsonc")]
    config: PathBuf,
    /// Directory the map text is saved to
    #[arg(long, default_value = "Generated maps")]
    output_dir: PathBuf,
    /// Overrides the seed of the configuration file
    #[arg(long)]
    seed: Option<u64>,
    /// Also saves a preview image to this path
    #[arg(long)]
    png: Option<PathBuf>,
    /// Side length in pixels of one tile in the preview image
    #[arg(long, default_value_t = 16)]
    scale: u32,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<(), MapError> {
    let mut map_parameters = match MapParameters::from_file(&cli.config) {
        Ok(map_parameters) => map_parameters,
        Err(MapError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            warn!(config = %cli.config.display(), "configuration file not found, using defaults");
            MapParameters::default()
        },
        Err(e) => return Err(e),
    };

    if let Some(seed) = cli.seed {
        map_parameters.seed = seed;
    }
    let seed = map_parameters.resolve_seed();
    info!(seed, "generating map");

    let tile_map = generate_map(&map_parameters)?;

    print!("{}", tile_map.to_text());
    tile_map.save_text(&cli.output_dir)?;

    if let Some(path) = &cli.png {
        tile_map.save_png(path, cli.scale)?;
    }

    Ok(())
}
