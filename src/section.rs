//! Plane cross-sectioning of triangulated surfaces.
//!
//! Every triangle is classified against the cutting plane by signed vertex
//! distance. Spanning triangles emit one intersection segment each; segments
//! are then chained into boundary polylines by matching shared endpoints
//! through a quantized hash map, so each polyline is a connected walk along
//! the section and disjoint components stay separate.

use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;

use crate::float_types::{EPSILON, Real};
use crate::plane::{BACK, COPLANAR, FRONT, Plane, SPANNING};
use crate::surface::Surface;

/// One connected boundary curve of a cross-section.
#[derive(Debug, Clone)]
pub struct BoundaryPolyline {
    /// Boundary points in walk order. For a closed polyline the first point
    /// is repeated at the end.
    pub points: Vec<Point3<Real>>,
    /// Whether the walk returned to its starting point.
    pub closed: bool,
}

impl BoundaryPolyline {
    /// Number of points, including the closing repeat for closed polylines.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polyline has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Intersection segment emitted by a single triangle.
type Segment = [Point3<Real>; 2];

impl Surface {
    /// Intersect the surface with `plane` and return the boundary polylines
    /// of the cross-section.
    ///
    /// A plane that misses the surface, or an empty surface, yields an empty
    /// vector; sectioning never fails for a well-formed plane.
    pub fn section(&self, plane: &Plane) -> Vec<BoundaryPolyline> {
        let mut segments: Vec<Segment> = Vec::new();
        let mut seen: HashSet<(PointKey, PointKey)> = HashSet::new();

        for triangle in self.triangles() {
            if let Some(segment) = intersect_triangle(&triangle, plane) {
                // An edge lying exactly in the plane is reported by both of
                // its adjacent triangles; keep one copy.
                if seen.insert(segment_key(&segment)) {
                    segments.push(segment);
                }
            }
        }

        let polylines = chain_segments(&segments);
        log::debug!(
            "section: {} triangles -> {} segments -> {} polylines",
            self.num_triangles(),
            segments.len(),
            polylines.len()
        );
        polylines
    }
}

/// Intersect one triangle with the plane.
///
/// Vertices inside the epsilon band count as on-plane intersection points;
/// edges whose endpoints sit on strictly opposite sides contribute a point
/// by linear interpolation of the signed distances. A triangle yields a
/// segment only when exactly two distinct intersection points result, so
/// single-vertex touches and fully coplanar triangles emit nothing.
fn intersect_triangle(triangle: &[Point3<Real>; 3], plane: &Plane) -> Option<Segment> {
    let distances = [
        plane.signed_distance(&triangle[0]),
        plane.signed_distance(&triangle[1]),
        plane.signed_distance(&triangle[2]),
    ];
    let types = distances.map(|distance| {
        if distance.abs() < EPSILON {
            COPLANAR
        } else if distance > 0.0 {
            FRONT
        } else {
            BACK
        }
    });

    // A fully coplanar triangle contributes no segment of its own; the
    // section boundary is recovered from the spanning triangles next to it.
    if (types[0] | types[1] | types[2]) == COPLANAR {
        return None;
    }

    let mut points: Vec<Point3<Real>> = Vec::with_capacity(2);

    for (point, &ty) in triangle.iter().zip(&types) {
        if ty == COPLANAR {
            points.push(*point);
        }
    }

    for i in 0..3 {
        let j = (i + 1) % 3;
        if (types[i] | types[j]) == SPANNING {
            let t = distances[i] / (distances[i] - distances[j]);
            points.push(triangle[i] + (triangle[j] - triangle[i]) * t);
        }
    }

    points.dedup_by(|a, b| (a.coords - b.coords).norm() < EPSILON);

    if points.len() == 2 {
        Some([points[0], points[1]])
    } else {
        None
    }
}

/// Chain segments into polylines by walking shared endpoints.
fn chain_segments(segments: &[Segment]) -> Vec<BoundaryPolyline> {
    if segments.is_empty() {
        return Vec::new();
    }

    let mut endpoint_map: HashMap<PointKey, Vec<usize>> = HashMap::new();
    for (i, segment) in segments.iter().enumerate() {
        endpoint_map.entry(PointKey::new(&segment[0])).or_default().push(i);
        endpoint_map.entry(PointKey::new(&segment[1])).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut polylines = Vec::new();

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        polylines.push(chain_from(start, segments, &endpoint_map, &mut used));
    }

    polylines
}

/// Build one polyline starting from `start`, growing the tail until the walk
/// closes or runs dry, then growing the head for open chains whose starting
/// segment sat mid-chain.
fn chain_from(
    start: usize,
    segments: &[Segment],
    endpoint_map: &HashMap<PointKey, Vec<usize>>,
    used: &mut [bool],
) -> BoundaryPolyline {
    used[start] = true;
    let mut points = vec![segments[start][0], segments[start][1]];

    let closed = loop {
        let tail = *points.last().expect("chain holds at least two points");
        if points.len() > 2 && point_eq(&tail, &points[0]) {
            break true;
        }
        match take_incident(&tail, segments, endpoint_map, used) {
            Some(next) => points.push(next),
            None => break false,
        }
    };

    if !closed {
        let mut head = Vec::new();
        loop {
            let front = *head.last().unwrap_or(&points[0]);
            match take_incident(&front, segments, endpoint_map, used) {
                Some(next) => head.push(next),
                None => break,
            }
        }
        if !head.is_empty() {
            head.reverse();
            head.extend(points);
            points = head;
        }
    }

    BoundaryPolyline { points, closed }
}

/// Claim an unused segment incident to `point` and return its far endpoint.
fn take_incident(
    point: &Point3<Real>,
    segments: &[Segment],
    endpoint_map: &HashMap<PointKey, Vec<usize>>,
    used: &mut [bool],
) -> Option<Point3<Real>> {
    let indices = endpoint_map.get(&PointKey::new(point))?;
    let index = *indices.iter().find(|&&index| !used[index])?;
    used[index] = true;

    let segment = &segments[index];
    if point_eq(&segment[0], point) {
        Some(segment[1])
    } else {
        Some(segment[0])
    }
}

fn point_eq(a: &Point3<Real>, b: &Point3<Real>) -> bool {
    (a.coords - b.coords).norm() < EPSILON
}

/// Endpoints quantized to the chaining tolerance so floating-point points
/// can be matched through a hash map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct PointKey {
    x: i64,
    y: i64,
    z: i64,
}

impl PointKey {
    fn new(point: &Point3<Real>) -> Self {
        let scale = 1.0 / EPSILON;
        Self {
            x: (point.x * scale).round() as i64,
            y: (point.y * scale).round() as i64,
            z: (point.z * scale).round() as i64,
        }
    }
}

/// Canonical unordered key for a segment's endpoint pair.
fn segment_key(segment: &Segment) -> (PointKey, PointKey) {
    let a = PointKey::new(&segment[0]);
    let b = PointKey::new(&segment[1]);
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> Surface {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(5.0, 10.0, 10.0),
        ];
        Surface::new(vertices, vec![[0, 1, 2]]).unwrap()
    }

    #[test]
    fn bisecting_a_triangle_yields_one_segment() {
        let surface = single_triangle();
        let plane = Plane::horizontal(5.0);

        let polylines = surface.section(&plane);
        assert_eq!(polylines.len(), 1);
        let polyline = &polylines[0];
        assert!(!polyline.closed);
        assert_eq!(polyline.len(), 2);

        // Signed distances at the vertices are -5, -5 and 5, so both
        // crossing edges split at t = 0.5.
        assert_eq!(polyline.points[0], Point3::new(7.5, 5.0, 5.0));
        assert_eq!(polyline.points[1], Point3::new(2.5, 5.0, 5.0));
    }

    #[test]
    fn plane_outside_the_surface_yields_nothing() {
        let surface = single_triangle();
        assert!(surface.section(&Plane::horizontal(11.0)).is_empty());
        assert!(surface.section(&Plane::horizontal(-1.0)).is_empty());
    }

    #[test]
    fn empty_surface_yields_nothing() {
        let surface = Surface::new(Vec::new(), Vec::new()).unwrap();
        assert!(surface.section(&Plane::horizontal(0.0)).is_empty());
    }

    #[test]
    fn vertex_touch_emits_no_segment() {
        // Apex exactly on the plane, base strictly below.
        let vertices = vec![
            Point3::new(0.0, 0.0, -10.0),
            Point3::new(10.0, 0.0, -10.0),
            Point3::new(5.0, 10.0, 0.0),
        ];
        let surface = Surface::new(vertices, vec![[0, 1, 2]]).unwrap();
        assert!(surface.section(&Plane::horizontal(0.0)).is_empty());
    }

    #[test]
    fn in_plane_edge_is_emitted_once() {
        // Two triangles share the edge (0,0,0)-(10,0,0) which lies exactly
        // in the cutting plane, one apex above and one below.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
            Point3::new(5.0, 5.0, -5.0),
        ];
        let surface = Surface::new(vertices, vec![[0, 1, 2], [1, 0, 3]]).unwrap();

        let polylines = surface.section(&Plane::horizontal(0.0));
        assert_eq!(polylines.len(), 1);
        assert_eq!(polylines[0].len(), 2);
    }

    #[test]
    fn adjacent_triangles_chain_into_one_walk() {
        // Two triangles sharing a spanning edge produce two segments that
        // meet at the shared edge's crossing point.
        let vertices = vec![
            Point3::new(0.0, 0.0, -5.0),
            Point3::new(10.0, 0.0, 5.0),
            Point3::new(0.0, 10.0, -5.0),
            Point3::new(10.0, 10.0, 5.0),
        ];
        let surface = Surface::new(vertices, vec![[0, 1, 2], [1, 3, 2]]).unwrap();

        let polylines = surface.section(&Plane::horizontal(0.0));
        assert_eq!(polylines.len(), 1);
        let polyline = &polylines[0];
        assert!(!polyline.closed);
        assert_eq!(polyline.len(), 3);

        // Consecutive points must differ, and every point sits on the plane.
        for pair in polyline.points.windows(2) {
            assert!((pair[0].coords - pair[1].coords).norm() > EPSILON);
        }
        for point in &polyline.points {
            assert!(point.z.abs() < EPSILON);
        }
    }

    #[test]
    fn disjoint_triangles_stay_separate() {
        // Two far-apart triangles must not be stitched together.
        let vertices = vec![
            Point3::new(0.0, 0.0, -5.0),
            Point3::new(10.0, 0.0, -5.0),
            Point3::new(5.0, 0.0, 5.0),
            Point3::new(100.0, 100.0, -5.0),
            Point3::new(110.0, 100.0, -5.0),
            Point3::new(105.0, 100.0, 5.0),
        ];
        let surface = Surface::new(vertices, vec![[0, 1, 2], [3, 4, 5]]).unwrap();

        let polylines = surface.section(&Plane::horizontal(0.0));
        assert_eq!(polylines.len(), 2);
        for polyline in &polylines {
            assert_eq!(polyline.len(), 2);
        }
    }
}
