//! Reduction of terrestrial observations: Deflection of the vertical, and
//! reduction of measured distances to a reference surface.

use crate::Coor3D;
use crate::Ellipsoid;

/// The meridian and prime vertical components, (ξ, η), of the deflection
/// of the vertical, in seconds of arc, from the geodetic and astronomic
/// longitude and latitude (degrees) of a point.
#[must_use]
pub fn deflection_components(geodetic: &Coor3D, astronomic: &Coor3D) -> (f64, f64) {
    let xi = (astronomic.latitude() - geodetic.latitude()) * 3600.;
    let eta = (astronomic.longitude() - geodetic.longitude())
        * geodetic.latitude().to_radians().cos()
        * 3600.;
    (xi, eta)
}

/// The Gaussian mean radius of curvature, sqrt(MN), at the latitude
/// `latitude` (degrees). A suitable radius for the reduction of distances
/// of limited length.
#[must_use]
pub fn gaussian_radius(ellps: &Ellipsoid, latitude: f64) -> f64 {
    let es = ellps.eccentricity_squared();
    let s = latitude.to_radians().sin();
    ellps.semimajor_axis() * (1. - es).sqrt() / (1. - es * s * s)
}

/// A distance reduced to a spherical reference surface, as chord and as arc
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reduced {
    pub chord: f64,
    pub arc: f64,
}

impl Reduced {
    fn from_chord(chord: f64, radius: f64) -> Reduced {
        let arc = chord * (1. + chord * chord / (24. * radius * radius));
        Reduced { chord, arc }
    }
}

/// Reduce the slant distance between two points at heights `h1` and `h2`
/// to the reference surface of radius `radius`.
///
/// With ellipsoidal heights, the reduction is to the ellipsoid, with
/// orthometric heights, to the geoid.
#[must_use]
pub fn slant_to_surface(slant: f64, h1: f64, h2: f64, radius: f64) -> Reduced {
    let dh = h1 - h2;
    let chord =
        ((slant * slant - dh * dh) / ((1. + h1 / radius) * (1. + h2 / radius))).sqrt();
    Reduced::from_chord(chord, radius)
}

/// Reduce a horizontal distance, measured between two points at heights
/// `h1` and `h2`, to the reference surface of radius `radius`, by scaling
/// with the mean height.
#[must_use]
pub fn horizontal_to_surface(horizontal: f64, h1: f64, h2: f64, radius: f64) -> Reduced {
    let mean_height = (h1 + h2) / 2.;
    let chord = horizontal * (radius - mean_height) / radius;
    Reduced::from_chord(chord, radius)
}

// ----- Tests ---------------------------------------------------------------------
