//! PLY (Stanford polygon) scan loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::errors::{Result, SliceError};
use crate::float_types::Real;
use crate::surface::Surface;

/// Load a triangulated surface from a PLY scan file.
///
/// Both ASCII and binary PLY are accepted. Faces with more than three
/// vertices are fan-triangulated; a file with no faces is treated as a load
/// failure rather than an empty surface, since a scan without geometry
/// cannot be sliced.
pub fn load(path: &Path) -> Result<Surface> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let scan = parser.read_ply(&mut reader).map_err(|e| SliceError::SurfaceLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let vertex_element = scan.payload.get("vertex").ok_or_else(|| load_error(path, "no vertex element"))?;

    let mut vertices: Vec<Point3<Real>> = Vec::with_capacity(vertex_element.len());
    for vertex in vertex_element {
        let x = scalar(vertex, "x").ok_or_else(|| load_error(path, "vertex missing x"))?;
        let y = scalar(vertex, "y").ok_or_else(|| load_error(path, "vertex missing y"))?;
        let z = scalar(vertex, "z").ok_or_else(|| load_error(path, "vertex missing z"))?;
        vertices.push(Point3::new(x, y, z));
    }

    let face_element = scan.payload.get("face").ok_or_else(|| load_error(path, "no face element"))?;

    let mut faces: Vec<[usize; 3]> = Vec::with_capacity(face_element.len());
    for face in face_element {
        let indices = index_list(face, "vertex_indices")
            .or_else(|| index_list(face, "vertex_index"))
            .ok_or_else(|| load_error(path, "face missing vertex_indices"))?;

        match indices.len() {
            0..=2 => continue,
            3 => faces.push([indices[0], indices[1], indices[2]]),
            _ => {
                // Fan triangulation around the first vertex.
                for i in 1..indices.len() - 1 {
                    faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            },
        }
    }

    if faces.is_empty() {
        return Err(load_error(path, "contains no faces"));
    }

    Surface::new(vertices, faces)
}

fn load_error(path: &Path, message: &str) -> SliceError {
    SliceError::SurfaceLoad {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Read a numeric property as `Real`, accepting any scalar PLY type.
fn scalar(element: &DefaultElement, name: &str) -> Option<Real> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as Real),
        Property::Double(v) => Some(*v as Real),
        Property::Int(v) => Some(*v as Real),
        Property::UInt(v) => Some(*v as Real),
        Property::Short(v) => Some(*v as Real),
        Property::UShort(v) => Some(*v as Real),
        Property::Char(v) => Some(*v as Real),
        Property::UChar(v) => Some(*v as Real),
        _ => None,
    }
}

/// Read an index-list property, accepting any integer list PLY type.
fn index_list(element: &DefaultElement, name: &str) -> Option<Vec<usize>> {
    match element.get(name)? {
        Property::ListInt(v) => Some(v.iter().map(|&i| i as usize).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&i| i as usize).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&i| i as usize).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&i| i as usize).collect()),
        Property::ListChar(v) => Some(v.iter().map(|&i| i as usize).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&i| i as usize).collect()),
        _ => None,
    }
}
