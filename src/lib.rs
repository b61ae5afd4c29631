//! Cross-section extraction from triangulated 3D head scans.
//!
//! `plyslice` intersects a scanned, triangulated surface with a cutting plane
//! and exports the resulting boundary polyline(s) as a CSV coordinate list.
//! Planes come in two flavours:
//!
//! - a horizontal plane at a fixed Z height, and
//! - an oblique plane derived from three anatomical landmark points
//!   (tragion left/right and orbitale right), offset along its own normal
//!   from the glabella landmark.
//!
//! Whole directories of scans can be processed in one run, with per-scan
//! slice parameters resolved from a key file or from per-scan landmark
//! files. A failure on one scan never aborts the batch.
//!
//! # Features
//! - **f64**: use f64 as Real (default)
//! - **f32**: use f32 as Real, conflicts with f64
//! - **parallel**: process batch scans concurrently with rayon

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod batch;
pub mod errors;
pub mod float_types;
pub mod heights;
pub mod io;
pub mod landmarks;
pub mod plane;
pub mod section;
pub mod surface;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::{Result, SliceError};
pub use landmarks::Landmarks;
pub use plane::Plane;
pub use section::BoundaryPolyline;
pub use surface::Surface;
