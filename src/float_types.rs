// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Tolerance used when classifying points against a cutting plane and when
/// matching segment endpoints during polyline chaining. Points closer to the
/// plane than this are treated as lying on it.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Tolerance used when classifying points against a cutting plane and when
/// matching segment endpoints during polyline chaining. Points closer to the
/// plane than this are treated as lying on it.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-6;
