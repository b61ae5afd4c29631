//! File-format collaborators: PLY scans in, CSV cross-sections out, and the
//! key/landmark files that carry per-scan slice parameters.

pub mod csv;
pub mod keyfile;
pub mod landmarks;
pub mod ply;
