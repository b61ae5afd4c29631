//! plyslice CLI - slice PLY scans at specified heights and export CSV.
//!
//! Run `plyslice --help` for available commands.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use plyslice::batch;
use plyslice::float_types::Real;
use plyslice::heights::build_height_map;
use plyslice::io::keyfile;
use plyslice::plane::DEFAULT_LANDMARK_OFFSET;

#[derive(Parser)]
#[command(name = "plyslice")]
#[command(version, about = "Slice PLY scans at specific heights", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Slice one scan file at the given height
    Single {
        /// Input scan file
        scan: PathBuf,

        /// Slice height
        #[arg(short = 'z', long)]
        slice_z: Real,

        /// Output directory (default: the scan's directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Slice every scan in a directory using a slice-height key file
    Batch {
        /// Directory holding the .ply scans
        scan_dir: PathBuf,

        /// Key file with FileName and Z' columns
        #[arg(short, long)]
        key_file: PathBuf,

        /// Output directory (default: next to each scan)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Recurse into subdirectories
        #[arg(short, long)]
        recurse: bool,
    },

    /// Slice every scan in a directory using per-scan landmark files
    BatchLandmarks {
        /// Directory holding the .ply scans
        scan_dir: PathBuf,

        /// Directory holding one <scan-stem>.txt landmark file per scan
        #[arg(short, long)]
        landmark_dir: PathBuf,

        /// Offset along the landmark plane's normal
        #[arg(short = 'z', long, default_value_t = DEFAULT_LANDMARK_OFFSET)]
        z_offset: Real,

        /// Output directory (default: next to each scan)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Recurse into subdirectories
        #[arg(short, long)]
        recurse: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        },
    }
}

fn run(command: Commands) -> plyslice::Result<()> {
    match command {
        Commands::Single {
            scan,
            slice_z,
            out_dir,
        } => {
            let path = batch::slice_pipeline(&scan, slice_z, out_dir.as_deref())?;
            log::info!("wrote {}", path.display());
        },
        Commands::Batch {
            scan_dir,
            key_file,
            out_dir,
            recurse,
        } => {
            let rows = keyfile::read_height_rows(&key_file)?;
            let heights = build_height_map(rows);
            let report = batch::run_batch(&scan_dir, &heights, out_dir.as_deref(), recurse)?;
            println!("{}", report.summary());
            for (path, reason) in &report.failures {
                println!("  failed {}: {reason}", path.display());
            }
        },
        Commands::BatchLandmarks {
            scan_dir,
            landmark_dir,
            z_offset,
            out_dir,
            recurse,
        } => {
            let report = batch::run_landmark_batch(
                &scan_dir,
                &landmark_dir,
                z_offset,
                out_dir.as_deref(),
                recurse,
            )?;
            println!("{}", report.summary());
            for (path, reason) in &report.failures {
                println!("  failed {}: {reason}", path.display());
            }
        },
    }
    Ok(())
}
