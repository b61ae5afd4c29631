//! Named anatomical landmark points.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::errors::{Result, SliceError};
use crate::float_types::Real;

/// Left tragion landmark name.
pub const TRAGION_LEFT: &str = "tragion_left";
/// Right tragion landmark name.
pub const TRAGION_RIGHT: &str = "tragion_right";
/// Right orbitale landmark name.
pub const ORBITALE_RIGHT: &str = "orbitale_right";
/// Glabella landmark name, used as the cutting plane origin.
pub const GLABELLA: &str = "glabella";

/// Mapping from landmark name to its scanned position.
///
/// Any number of landmarks may be stored; building an oblique cutting plane
/// requires [`TRAGION_LEFT`], [`TRAGION_RIGHT`], [`ORBITALE_RIGHT`] and
/// [`GLABELLA`] to be present.
#[derive(Debug, Clone, Default)]
pub struct Landmarks {
    points: HashMap<String, Point3<Real>>,
}

impl Landmarks {
    /// Create an empty landmark set.
    pub fn new() -> Self {
        Self {
            points: HashMap::new(),
        }
    }

    /// Add or replace a landmark.
    pub fn insert(&mut self, name: impl Into<String>, point: Point3<Real>) {
        self.points.insert(name.into(), point);
    }

    /// Look up a landmark by name.
    pub fn get(&self, name: &str) -> Option<&Point3<Real>> {
        self.points.get(name)
    }

    /// Look up a landmark that must be present for plane construction.
    pub fn required(&self, name: &'static str) -> Result<Point3<Real>> {
        self.points
            .get(name)
            .copied()
            .ok_or(SliceError::MissingLandmark { name })
    }

    /// Number of stored landmarks.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Point3<Real>)> for Landmarks {
    fn from_iter<I: IntoIterator<Item = (S, Point3<Real>)>>(iter: I) -> Self {
        let mut landmarks = Landmarks::new();
        for (name, point) in iter {
            landmarks.insert(name, point);
        }
        landmarks
    }
}
