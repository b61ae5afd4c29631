//! Triangulated scan surface.

use nalgebra::Point3;

use crate::errors::{Result, SliceError};
use crate::float_types::Real;

/// A triangulated surface: vertex positions plus triangle index triples.
///
/// Surfaces are immutable once built. Sectioning reads triangles through
/// [`Surface::triangles`] and never touches the underlying buffers.
#[derive(Debug, Clone)]
pub struct Surface {
    vertices: Vec<Point3<Real>>,
    faces: Vec<[usize; 3]>,
}

impl Surface {
    /// Build a surface, validating every face index against the vertex list.
    pub fn new(vertices: Vec<Point3<Real>>, faces: Vec<[usize; 3]>) -> Result<Self> {
        for (face, indices) in faces.iter().enumerate() {
            for &vertex in indices {
                if vertex >= vertices.len() {
                    return Err(SliceError::InvalidFaceIndex { face, vertex });
                }
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.faces.len()
    }

    /// Iterate the triangles as vertex-position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        self.faces
            .iter()
            .map(|face| [self.vertices[face[0]], self.vertices[face[1]], self.vertices[face[2]]])
    }

    /// Z extent of the surface, or `None` when it has no vertices.
    pub fn z_bounds(&self) -> Option<(Real, Real)> {
        let mut vertices = self.vertices.iter();
        let first = vertices.next()?;
        let mut bounds = (first.z, first.z);
        for vertex in vertices {
            bounds.0 = bounds.0.min(vertex.z);
            bounds.1 = bounds.1.max(vertex.z);
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_face_index_is_rejected() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let result = Surface::new(vertices, vec![[0, 1, 3]]);
        assert!(matches!(
            result,
            Err(SliceError::InvalidFaceIndex { face: 0, vertex: 3 })
        ));
    }

    #[test]
    fn z_bounds_span_all_vertices() {
        let vertices = vec![
            Point3::new(0.0, 0.0, -2.0),
            Point3::new(1.0, 0.0, 7.5),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let surface = Surface::new(vertices, vec![[0, 1, 2]]).unwrap();
        assert_eq!(surface.z_bounds(), Some((-2.0, 7.5)));

        let empty = Surface::new(Vec::new(), Vec::new()).unwrap();
        assert_eq!(empty.z_bounds(), None);
        assert_eq!(empty.num_triangles(), 0);
    }
}
