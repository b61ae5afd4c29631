//! Scan-name to slice-height resolution.

use std::collections::HashMap;
use std::path::Path;

use crate::float_types::Real;

/// Build the scan-stem to slice-height map from `(name, height)` rows.
///
/// Names are reduced to their file stem before use, so `"A.ply"` and `"A"`
/// key the same scan. Comparison is case sensitive. Duplicate stems keep the
/// first height seen and drop the rest.
///
/// Batch lookups must go through [`HashMap::get`] on the result: a height of
/// `0.0` is a legitimate slice parameter, distinguished from an absent key
/// by presence, never by value.
pub fn build_height_map<I, S>(rows: I) -> HashMap<String, Real>
where
    I: IntoIterator<Item = (S, Real)>,
    S: AsRef<str>,
{
    let mut heights = HashMap::new();
    for (name, height) in rows {
        heights.entry(file_stem(name.as_ref())).or_insert(height);
    }
    heights
}

/// File name with any extension stripped.
pub fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_owned())
}
