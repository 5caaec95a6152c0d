//! Distances on a sphere

use crate::Coor3D;

/// The great circle distance between two geographical coordinates
/// (in degrees) on a sphere of radius `radius`.
///
/// The central angle is computed from the spherical law of cosines. The
/// cosine is clamped to [-1, 1], so rounding cannot push it outside the
/// domain of `acos` for (nearly) coincident or antipodal points.
///
/// ```rust
/// use geodetic::prelude::*;
/// use geodetic::sphere::great_circle_distance;
/// let quadrant = great_circle_distance(&Coor3D::geo(0., 0., 0.), &Coor3D::geo(90., 0., 0.), 1.);
/// assert!((quadrant - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
/// ```
#[must_use]
pub fn great_circle_distance(from: &Coor3D, to: &Coor3D, radius: f64) -> f64 {
    let phi1 = from.latitude().to_radians();
    let phi2 = to.latitude().to_radians();
    let dlam = (to.longitude() - from.longitude()).to_radians();
    let cosine = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * dlam.cos();
    radius * cosine.clamp(-1., 1.).acos()
}

// ----- Tests ---------------------------------------------------------------------
