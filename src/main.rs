//! fixed-raster: rasterize a RON scene on the jittered subsample grid
//!
//! Prints the number of covered subsamples and optionally writes the
//! resolved Z-buffer as a PNG.

use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use log::info;
use tracing_subscriber::filter::LevelFilter;

use fixed_raster::scene::{load_scene, SceneError};
use fixed_raster::VERSION;

/// Rasterize the triangles of a scene file.
#[derive(FromArgs)]
struct Args {
    /// scene file (RON)
    #[argh(positional)]
    scene: PathBuf,

    /// write the resolved image to this PNG file
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// count coverage only, without a depth/color buffer
    #[argh(switch)]
    coverage_only: bool,

    /// log per-triangle details
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn run(args: &Args) -> Result<usize, SceneError> {
    let scene = load_scene(&args.scene)?;
    info!(
        "Loaded {} triangles from {} (r_shift {}, ss_w_lg2 {}, ss_i {})",
        scene.triangles.len(),
        args.scene.display(),
        scene.config.r_shift,
        scene.config.ss_w_lg2,
        scene.config.ss_i
    );

    if args.coverage_only {
        let hits = scene.coverage();
        return Ok(hits.iter().sum());
    }

    let mut zbuffer = scene.zbuffer();
    let hits = scene.rasterize_into(&mut zbuffer);
    for (i, count) in hits.iter().enumerate() {
        info!("triangle {}: {} hits", i, count);
    }
    info!("{} of {} subsample slots covered", zbuffer.covered_slots(), zbuffer.depths.len());

    if let Some(path) = &args.output {
        zbuffer.save_png(path)?;
        info!("Wrote {}x{} image to {}", zbuffer.width, zbuffer.height, path.display());
    }

    Ok(hits.iter().sum())
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    let level = if args.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("fixed-raster v{}", VERSION);

    match run(&args) {
        Ok(total) => {
            println!("{}", total);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", args.scene.display(), e);
            ExitCode::FAILURE
        }
    }
}
