// main.rs
//
// Command-line front end. `slice` runs the snapshot pipeline, `inspect`
// summarises a centerline file and `tube` sweeps a test surface along one.

use centerline_slicer::centerline::Centerline;
use centerline_slicer::config::{CameraAlignment, PipelineConfig, RowPolicy};
use centerline_slicer::errors::Result;
use centerline_slicer::float_types::Real;
use centerline_slicer::{Mesh, RasterBackend, run};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "centerline-slicer", version, about = "Cross-section snapshots along a vessel centerline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Slice the input mesh(es) along the centerline and write PNG snapshots
    Slice {
        /// Directory holding the inputs; the output directory is created inside it
        #[arg(long, default_value = ".")]
        base: PathBuf,
        /// Single-mesh mode: input.stl with centerline_resampled.csv
        #[arg(long)]
        single: bool,
        /// Mesh file(s), at most two, overriding the defaults
        #[arg(long = "mesh")]
        meshes: Vec<PathBuf>,
        /// Centerline file overriding the default
        #[arg(long)]
        centerline: Option<PathBuf>,
        /// Output directory overriding `slices`
        #[arg(long)]
        output: Option<PathBuf>,
        /// Warn about and drop malformed centerline rows instead of aborting
        #[arg(long)]
        skip_malformed: bool,
        /// Keep the camera looking down -Z instead of along each segment
        #[arg(long)]
        fixed_camera: bool,
    },
    /// Print a summary of a centerline file
    Inspect {
        csv: PathBuf,
        #[arg(long)]
        skip_malformed: bool,
    },
    /// Write a closed tube surface swept along a centerline as STL
    Tube {
        csv: PathBuf,
        #[arg(long, default_value_t = 0.8)]
        radius: Real,
        #[arg(long, default_value_t = 8)]
        sides: usize,
        #[arg(long, default_value = "output/tube.stl")]
        output: PathBuf,
        /// Write ASCII instead of binary STL
        #[arg(long)]
        ascii: bool,
    },
}

const fn policy(skip_malformed: bool) -> RowPolicy {
    if skip_malformed { RowPolicy::Skip } else { RowPolicy::Abort }
}

fn execute(command: Command) -> Result<()> {
    match command {
        Command::Slice {
            base,
            single,
            meshes,
            centerline,
            output,
            skip_malformed,
            fixed_camera,
        } => {
            let mut config = if single {
                PipelineConfig::single_mesh()
            } else {
                PipelineConfig::default()
            }
            .with_base_dir(base)
            .with_row_policy(policy(skip_malformed));
            if !meshes.is_empty() {
                config = config.with_meshes(meshes);
            }
            if let Some(centerline) = centerline {
                config = config.with_centerline(centerline);
            }
            if let Some(output) = output {
                config = config.with_output_dir(output);
            }
            if fixed_camera {
                config = config.with_camera(CameraAlignment::Fixed);
            }

            let mut backend = RasterBackend::new(config.width, config.height);
            let report = run(&config, &mut backend)?;
            if !report.degenerate.is_empty() {
                log::warn!("skipped zero-length segment(s) {:?}", report.degenerate);
            }
            println!("{} snapshot(s) written", report.snapshots.len());
        }
        Command::Inspect { csv, skip_malformed } => {
            let centerline = Centerline::load(&csv, policy(skip_malformed))?;
            println!("{}", centerline.summary());
        }
        Command::Tube { csv, radius, sides, output, ascii } => {
            let centerline = Centerline::load(&csv, RowPolicy::Abort)?;
            let path: Vec<_> = centerline.points.iter().map(|p| p.position).collect();
            let tube = Mesh::tube(&path, radius, sides);
            if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)?;
            }
            if ascii {
                std::fs::write(&output, tube.to_stl_ascii("tube"))?;
            } else {
                std::fs::write(&output, tube.to_stl_binary()?)?;
            }
            log::info!("{} triangle(s) written to {}", tube.len(), output.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match execute(Cli::parse().command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        },
    }
}
