//! Test support library
//! Provides fixture surfaces and scan files shared by the integration tests.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use nalgebra::Point3;
use plyslice::Surface;
use plyslice::float_types::Real;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Axis-aligned unit cube spanning (0,0,0) to (1,1,1), 12 triangles.
pub fn unit_cube() -> Surface {
    let (vertices, faces) = unit_cube_buffers();
    Surface::new(vertices, faces).unwrap()
}

/// Vertex and face buffers of the unit cube, for building fixture files.
pub fn unit_cube_buffers() -> (Vec<Point3<Real>>, Vec<[usize; 3]>) {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        // bottom
        [0, 2, 1],
        [0, 3, 2],
        // top
        [4, 5, 6],
        [4, 6, 7],
        // front, y = 0
        [0, 1, 5],
        [0, 5, 4],
        // back, y = 1
        [2, 3, 7],
        [2, 7, 6],
        // left, x = 0
        [0, 4, 7],
        [0, 7, 3],
        // right, x = 1
        [1, 2, 6],
        [1, 6, 5],
    ];
    (vertices, faces)
}

/// Write the unit cube as an ASCII PLY scan file.
pub fn write_cube_ply(path: &Path) {
    let (vertices, faces) = unit_cube_buffers();
    let mut out = fs::File::create(path).unwrap();

    writeln!(out, "ply").unwrap();
    writeln!(out, "format ascii 1.0").unwrap();
    writeln!(out, "element vertex {}", vertices.len()).unwrap();
    writeln!(out, "property float x").unwrap();
    writeln!(out, "property float y").unwrap();
    writeln!(out, "property float z").unwrap();
    writeln!(out, "element face {}", faces.len()).unwrap();
    writeln!(out, "property list uchar int vertex_indices").unwrap();
    writeln!(out, "end_header").unwrap();
    for v in &vertices {
        writeln!(out, "{} {} {}", v.x, v.y, v.z).unwrap();
    }
    for f in &faces {
        writeln!(out, "3 {} {} {}", f[0], f[1], f[2]).unwrap();
    }
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("plyslice_it_{label}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}
