//! Cutting plane construction and point classification.

use nalgebra::{Point3, Vector3};

use crate::errors::{Result, SliceError};
use crate::float_types::{EPSILON, Real};
use crate::landmarks::{GLABELLA, Landmarks, ORBITALE_RIGHT, TRAGION_LEFT, TRAGION_RIGHT};

// Point classification relative to a plane
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Default offset along the landmark plane's normal, in scan units.
pub const DEFAULT_LANDMARK_OFFSET: Real = 15.0;

/// An oriented cutting plane described by a point on it and a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Point3<Real>,
    normal: Vector3<Real>,
}

impl Plane {
    /// Create a plane through `point` with the given `normal`.
    ///
    /// The normal is normalized on construction; a near-zero-length normal
    /// is rejected with [`SliceError::DegeneratePlane`].
    pub fn new(point: Point3<Real>, normal: Vector3<Real>) -> Result<Self> {
        if normal.norm_squared() < EPSILON * EPSILON {
            return Err(SliceError::DegeneratePlane);
        }
        Ok(Self {
            point,
            normal: normal.normalize(),
        })
    }

    /// Horizontal plane (parallel to XY) at height `z`.
    pub fn horizontal(z: Real) -> Self {
        Self {
            point: Point3::new(0.0, 0.0, z),
            normal: Vector3::z(),
        }
    }

    /// Oblique plane derived from anatomical landmarks.
    ///
    /// The normal is the cross product of two edge vectors of the triangle
    /// (tragion right, tragion left, orbitale right). That vertex order is
    /// fixed: it determines the normal's sign, and reordering would flip the
    /// orientation of every slice taken with the plane. The plane origin is
    /// the glabella landmark raised by `z_offset` along Z.
    ///
    /// Fails with [`SliceError::MissingLandmark`] when a required name is
    /// absent and [`SliceError::DegenerateLandmarks`] when the three points
    /// are collinear within tolerance.
    pub fn from_landmarks(landmarks: &Landmarks, z_offset: Real) -> Result<Self> {
        let tragion_right = landmarks.required(TRAGION_RIGHT)?;
        let tragion_left = landmarks.required(TRAGION_LEFT)?;
        let orbitale_right = landmarks.required(ORBITALE_RIGHT)?;
        let glabella = landmarks.required(GLABELLA)?;

        let edge_a = tragion_left - tragion_right;
        let edge_b = orbitale_right - tragion_right;
        let normal = edge_a.cross(&edge_b);
        if normal.norm_squared() < EPSILON * EPSILON {
            return Err(SliceError::DegenerateLandmarks);
        }

        Ok(Self {
            point: Point3::new(glabella.x, glabella.y, glabella.z + z_offset),
            normal: normal.normalize(),
        })
    }

    /// A point on the plane.
    pub const fn point(&self) -> Point3<Real> {
        self.point
    }

    /// The plane's unit normal.
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Signed distance from `point` to the plane along the normal.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&(point - self.point))
    }

    /// Classify a point as [`COPLANAR`], [`FRONT`] or [`BACK`].
    ///
    /// Points within [`EPSILON`] of the plane count as coplanar so that
    /// scan vertices grazing the plane do not flip sides on float noise.
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let distance = self.signed_distance(point);
        if distance.abs() < EPSILON {
            COPLANAR
        } else if distance > 0.0 {
            FRONT
        } else {
            BACK
        }
    }
}
