//! Landmark file parsing.
//!
//! Landmark files are whitespace-delimited text with one header line, then
//! one `name x y z` row per landmark.

use std::fs;
use std::path::Path;

use nalgebra::Point3;

use crate::errors::{Result, SliceError};
use crate::float_types::Real;
use crate::landmarks::Landmarks;

/// Load a landmark set from a whitespace-delimited text file.
pub fn load(path: &Path) -> Result<Landmarks> {
    let contents = fs::read_to_string(path)?;
    let mut landmarks = Landmarks::new();

    // First line is a header.
    for (line_number, line) in contents.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(landmark_error(
                path,
                format!("line {}: expected \"name x y z\"", line_number + 1),
            ));
        }

        let mut coords: [Real; 3] = [0.0; 3];
        for (coord, field) in coords.iter_mut().zip(&fields[1..]) {
            *coord = field.parse::<Real>().map_err(|_| {
                landmark_error(path, format!("line {}: unparseable coordinate", line_number + 1))
            })?;
        }

        landmarks.insert(fields[0], Point3::new(coords[0], coords[1], coords[2]));
    }

    Ok(landmarks)
}

fn landmark_error(path: &Path, message: String) -> SliceError {
    SliceError::MalformedLandmarkFile {
        path: path.to_path_buf(),
        message,
    }
}
