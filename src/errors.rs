//! Crate error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`SliceError`].
pub type Result<T> = std::result::Result<T, SliceError>;

/// All the ways a slice operation can fail.
///
/// Within a batch these are caught and recorded per scan; a single-file
/// pipeline propagates them to the caller.
#[derive(Debug, Error)]
pub enum SliceError {
    /// A landmark required for plane construction is absent.
    #[error("required landmark \"{name}\" is missing")]
    MissingLandmark {
        /// The absent landmark name.
        name: &'static str,
    },

    /// The three plane-defining landmarks are collinear.
    #[error("landmark points are collinear and do not define a plane")]
    DegenerateLandmarks,

    /// A plane was given a near-zero-length normal.
    #[error("plane normal has near-zero length")]
    DegeneratePlane,

    /// The scan file could not be loaded as a triangulated surface.
    #[error("failed to load surface from {path}: {message}")]
    SurfaceLoad {
        /// The scan file path.
        path: PathBuf,
        /// Loader error detail.
        message: String,
    },

    /// A scan has no matching entry in the slice parameter mapping.
    #[error("no slice parameter found for scan \"{stem}\"")]
    ParameterNotFound {
        /// The scan file stem used for lookup.
        stem: String,
    },

    /// A face references a vertex index outside the vertex list.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidFaceIndex {
        /// The face index.
        face: usize,
        /// The out-of-range vertex index.
        vertex: usize,
    },

    /// The slice-height key file is missing columns or has unparseable rows.
    #[error("malformed key file {path}: {message}")]
    MalformedKeyFile {
        /// The key file path.
        path: PathBuf,
        /// Parse error detail.
        message: String,
    },

    /// A landmark file row could not be parsed.
    #[error("malformed landmark file {path}: {message}")]
    MalformedLandmarkFile {
        /// The landmark file path.
        path: PathBuf,
        /// Parse error detail.
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
