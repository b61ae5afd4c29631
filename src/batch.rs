//! Batch orchestration across a directory of scan files.
//!
//! One bad scan must never take the rest of the batch down: every per-file
//! failure is caught, logged and recorded in the [`BatchReport`], and
//! processing moves on to the next file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{Result, SliceError};
use crate::float_types::Real;
use crate::io::{csv, landmarks as landmark_files, ply};
use crate::plane::Plane;

/// Outcome summary of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Scan files seen under the scan directory.
    pub total: usize,
    /// Scans sliced and exported successfully.
    pub processed: usize,
    /// Scans skipped because no slice parameter was found for them.
    pub skipped: Vec<PathBuf>,
    /// Scans whose pipeline failed, with the failure reason.
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchReport {
    fn from_outcomes(outcomes: Vec<FileOutcome>) -> Self {
        let mut report = BatchReport {
            total: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                FileOutcome::Processed => report.processed += 1,
                FileOutcome::Skipped(path) => report.skipped.push(path),
                FileOutcome::Failed(path, reason) => report.failures.push((path, reason)),
            }
        }
        report
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} scans seen, {} sliced, {} skipped, {} failed",
            self.total,
            self.processed,
            self.skipped.len(),
            self.failures.len()
        )
    }
}

enum FileOutcome {
    Processed,
    Skipped(PathBuf),
    Failed(PathBuf, String),
}

/// Slice every `.ply` scan under `scan_dir` using per-scan heights.
///
/// `heights` maps scan file stems (case sensitive) to slice heights, as
/// built by [`crate::heights::build_height_map`]. Scans without an entry
/// are recorded as skipped. Subdirectories are entered only when `recurse`
/// is set. With the `parallel` feature scans are processed concurrently;
/// the report is the same either way.
pub fn run_batch(
    scan_dir: &Path,
    heights: &HashMap<String, Real>,
    out_dir: Option<&Path>,
    recurse: bool,
) -> Result<BatchReport> {
    let scans = collect_scans(scan_dir, recurse)?;
    log::info!("batch: {} scan files under {}", scans.len(), scan_dir.display());

    let slice_one = |scan: &PathBuf| -> FileOutcome {
        let stem = scan_stem(scan);
        // Presence check, not truthiness: a height of 0.0 is a parameter.
        match heights.get(&stem) {
            None => {
                let reason = SliceError::ParameterNotFound { stem };
                log::warn!("skipping {}: {reason}", scan.display());
                FileOutcome::Skipped(scan.clone())
            },
            Some(&z) => match slice_pipeline(scan, z, out_dir) {
                Ok(path) => {
                    log::info!("sliced {} at z={z} -> {}", scan.display(), path.display());
                    FileOutcome::Processed
                },
                Err(err) => {
                    log::warn!("failed {}: {err}", scan.display());
                    FileOutcome::Failed(scan.clone(), err.to_string())
                },
            },
        }
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<FileOutcome> = scans.par_iter().map(slice_one).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<FileOutcome> = scans.iter().map(slice_one).collect();

    let report = BatchReport::from_outcomes(outcomes);
    log::info!("batch finished: {}", report.summary());
    Ok(report)
}

/// Slice every `.ply` scan under `scan_dir` using per-scan landmark files.
///
/// Each scan stem pairs with `<stem>.txt` in `landmark_dir`; scans without
/// a landmark file are recorded as skipped.
pub fn run_landmark_batch(
    scan_dir: &Path,
    landmark_dir: &Path,
    z_offset: Real,
    out_dir: Option<&Path>,
    recurse: bool,
) -> Result<BatchReport> {
    let scans = collect_scans(scan_dir, recurse)?;
    log::info!("batch: {} scan files under {}", scans.len(), scan_dir.display());

    let slice_one = |scan: &PathBuf| -> FileOutcome {
        let landmark_path = landmark_dir.join(format!("{}.txt", scan_stem(scan)));
        if !landmark_path.is_file() {
            let reason = SliceError::ParameterNotFound { stem: scan_stem(scan) };
            log::warn!("skipping {}: {reason}", scan.display());
            return FileOutcome::Skipped(scan.clone());
        }
        match slice_pipeline_landmarks(scan, &landmark_path, z_offset, out_dir) {
            Ok(path) => {
                log::info!("sliced {} -> {}", scan.display(), path.display());
                FileOutcome::Processed
            },
            Err(err) => {
                log::warn!("failed {}: {err}", scan.display());
                FileOutcome::Failed(scan.clone(), err.to_string())
            },
        }
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<FileOutcome> = scans.par_iter().map(slice_one).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<FileOutcome> = scans.iter().map(slice_one).collect();

    let report = BatchReport::from_outcomes(outcomes);
    log::info!("batch finished: {}", report.summary());
    Ok(report)
}

/// Slice one scan at height `z` and write its cross-section CSV.
///
/// `out_dir` defaults to the scan's own directory.
pub fn slice_pipeline(scan_path: &Path, z: Real, out_dir: Option<&Path>) -> Result<PathBuf> {
    let plane = Plane::horizontal(z);
    write_section(scan_path, &plane, z, out_dir)
}

/// Slice one scan with a plane derived from its landmark file.
///
/// The output file name is keyed by the plane origin's height, the glabella
/// Z plus `z_offset`.
pub fn slice_pipeline_landmarks(
    scan_path: &Path,
    landmark_path: &Path,
    z_offset: Real,
    out_dir: Option<&Path>,
) -> Result<PathBuf> {
    let landmarks = landmark_files::load(landmark_path)?;
    let plane = Plane::from_landmarks(&landmarks, z_offset)?;
    let slice_param = plane.point().z;
    write_section(scan_path, &plane, slice_param, out_dir)
}

fn write_section(
    scan_path: &Path,
    plane: &Plane,
    slice_param: Real,
    out_dir: Option<&Path>,
) -> Result<PathBuf> {
    let out_dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| scan_path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    let scan_name = scan_stem(scan_path);

    let surface = ply::load(scan_path)?;
    if let Some((z_min, z_max)) = surface.z_bounds() {
        log::debug!(
            "{scan_name}: {} triangles, z extent [{z_min:.1}, {z_max:.1}]",
            surface.num_triangles()
        );
    }

    let polylines = surface.section(plane);
    if polylines.len() > 1 {
        log::debug!(
            "{scan_name}: section has {} components, concatenating",
            polylines.len()
        );
    }
    let points: Vec<_> = polylines
        .iter()
        .flat_map(|polyline| polyline.points.iter().copied())
        .collect();

    csv::write_csv(&points, &scan_name, slice_param, &out_dir)
}

fn scan_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Enumerate `.ply` files under `dir`, sorted for deterministic processing.
///
/// The scan extension is assumed to be lowercase `.ply` on every platform,
/// which keeps stem comparison against the key mapping case-exact.
fn collect_scans(dir: &Path, recurse: bool) -> Result<Vec<PathBuf>> {
    let mut scans = Vec::new();
    collect_into(dir, recurse, &mut scans)?;
    scans.sort();
    Ok(scans)
}

fn collect_into(dir: &Path, recurse: bool, scans: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recurse {
                collect_into(&path, recurse, scans)?;
            }
        } else if path.extension().is_some_and(|extension| extension == "ply") {
            scans.push(path);
        }
    }
    Ok(())
}
