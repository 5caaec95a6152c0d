//! Local topocentric coordinates.
//!
//! The topocentric (east, north, up) system has its origin at a station,
//! its up-axis along the ellipsoidal normal, and its north-axis in the
//! plane of the meridian. Differences of geocentric cartesian coordinates
//! are rotated into, and out of, this system by the matrix given by the
//! geographical longitude and latitude of the station.

use crate::Coor3D;

// The rows of the rotation from geocentric differences to east, north, up
fn rotation(origin: &Coor3D) -> [[f64; 3]; 3] {
    let (sinlam, coslam) = origin.longitude().to_radians().sin_cos();
    let (sinphi, cosphi) = origin.latitude().to_radians().sin_cos();
    [
        [-sinlam, coslam, 0.],
        [-sinphi * coslam, -sinphi * sinlam, cosphi],
        [cosphi * coslam, cosphi * sinlam, sinphi],
    ]
}

/// East, north, up of the cartesian coordinate `point`, as seen from
/// the station with cartesian coordinate `station` and geographical
/// coordinate `origin` (degrees).
#[must_use]
pub fn to_enu(station: &Coor3D, point: &Coor3D, origin: &Coor3D) -> Coor3D {
    let r = rotation(origin);
    let d = *point - *station;
    let mut enu = Coor3D::origin();
    for i in 0..3 {
        enu[i] = r[i][0] * d[0] + r[i][1] * d[1] + r[i][2] * d[2];
    }
    enu
}

/// The geocentric cartesian difference (dX, dY, dZ) corresponding to the
/// topocentric (east, north, up) at the station with geographical
/// coordinate `origin` (degrees). The inverse of [`to_enu`].
#[must_use]
pub fn from_enu(enu: &Coor3D, origin: &Coor3D) -> Coor3D {
    // The rotation is orthogonal, so its inverse is its transpose
    let r = rotation(origin);
    let mut d = Coor3D::origin();
    for i in 0..3 {
        d[i] = r[0][i] * enu[0] + r[1][i] * enu[1] + r[2][i] * enu[2];
    }
    d
}

// ----- Tests ---------------------------------------------------------------------
