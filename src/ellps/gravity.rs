//! Normal gravity, and the reductions turning observed gravity into
//! gravity anomalies.
//!
//! Latitudes in degrees, heights in meters, gravity in m/s², except where
//! noted: Observed gravity and anomalies are, by surveying tradition, given
//! in mGal (1 mGal = 10⁻⁵ m/s²).

use super::Ellipsoid;

/// Equatorial normal gravity of GRS80 [m/s²]
pub const GRS80_GAMMA_EQUATOR: f64 = 9.780_326_771_5;

/// Polar normal gravity of GRS80 [m/s²]
pub const GRS80_GAMMA_POLE: f64 = 9.832_186_368_5;

/// Angular velocity of the Earth, ω [rad/s]
pub const ANGULAR_VELOCITY: f64 = 7_292_115.0e-11;

/// Geocentric gravitational constant of GRS80, GM [m³/s²]
pub const GM: f64 = 3_986_005.0e8;

/// Newtonian constant of gravitation, G [m³/(kg s²)]
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_08e-11;

/// Standard density of the topographic masses [kg/m³]
pub const CRUST_DENSITY: f64 = 2670.0;

const MGAL: f64 = 1.0e-5;

impl Ellipsoid {
    /// The Somigliana closed formula for the normal gravity on the surface
    /// of the ellipsoid. Uses the GRS80 equatorial and polar normal gravity.
    /// [Moritz (2000)](crate::Bibliography::Mor00), eq. (21).
    #[must_use]
    pub fn normal_gravity(&self, latitude: f64) -> f64 {
        let a = self.semimajor_axis();
        let b = self.semiminor_axis();
        let es = self.eccentricity_squared();

        let k = (b * GRS80_GAMMA_POLE - a * GRS80_GAMMA_EQUATOR) / (a * GRS80_GAMMA_EQUATOR);
        let s = latitude.to_radians().sin().powi(2);

        GRS80_GAMMA_EQUATOR * (1.0 + k * s) / (1.0 - s * es).sqrt()
    }

    /// The free-air correction, i.e. the change of normal gravity from the
    /// ellipsoid to the height `height`, to second order.
    /// [Hofmann-Wellenhof & Moritz (2006)](crate::Bibliography::Hof06), eq. (2-215).
    /// The value is to be **added** to the observed gravity.
    #[must_use]
    pub fn free_air_correction(&self, latitude: f64, height: f64) -> f64 {
        let a = self.semimajor_axis();
        let b = self.semiminor_axis();
        let f = self.flattening();
        let gamma = self.normal_gravity(latitude);
        let s = latitude.to_radians().sin().powi(2);
        let m = ANGULAR_VELOCITY * ANGULAR_VELOCITY * a * a * b / GM;

        let first_order = 2.0 * gamma / a * height * (1.0 + f + m - 2.0 * f * s);
        first_order - 3.0 * gamma * height * height / (a * a)
    }
}

/// The free-air anomaly [mGal], from observed gravity (in mGal), normal
/// gravity and free-air correction (both in m/s²)
#[must_use]
pub fn free_air_anomaly(observed: f64, normal_gravity: f64, free_air_correction: f64) -> f64 {
    (observed * MGAL - normal_gravity + free_air_correction) / MGAL
}

/// The Bouguer plate correction [m/s²] for a plate of thickness `height`
/// and density `density` (kg/m³, typically [`CRUST_DENSITY`])
#[must_use]
pub fn bouguer_correction(height: f64, density: f64) -> f64 {
    2.0 * std::f64::consts::PI * density * GRAVITATIONAL_CONSTANT * height
}

/// The Bouguer anomaly [mGal], from observed gravity (in mGal), normal
/// gravity, free-air correction, and Bouguer correction (all in m/s²)
#[must_use]
pub fn bouguer_anomaly(
    observed: f64,
    normal_gravity: f64,
    free_air_correction: f64,
    bouguer_correction: f64,
) -> f64 {
    (observed * MGAL - normal_gravity + free_air_correction - bouguer_correction) / MGAL
}

/// The geopotential number [m²/s²] of the last benchmark of a levelling
/// line, given the (gravity in mGal, levelled height difference in m) of
/// each leg, starting from a benchmark of geopotential number zero.
#[must_use]
pub fn geopotential_number(legs: &[(f64, f64)]) -> f64 {
    legs.iter()
        .map(|(gravity, height_difference)| gravity * MGAL * height_difference)
        .sum()
}

// ----- Tests ---------------------------------------------------------------------

// Note that the tests in this section are **regression tests**: The values checked
// are not based on external authoritative sources. They only serve to be reasonably
// sure that future code changes do not change the functionality.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn normal_gravity() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        assert!((ellps.normal_gravity(0.) - GRS80_GAMMA_EQUATOR).abs() < 1e-12);
        assert!((ellps.normal_gravity(90.) - GRS80_GAMMA_POLE).abs() < 1e-9);
        assert!((ellps.normal_gravity(-90.) - GRS80_GAMMA_POLE).abs() < 1e-9);

        // Agrees with the GRS80 series expansion to a fraction of a µGal
        assert!((ellps.normal_gravity(45.) - 9.806_199_202_630_822).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn free_air() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let fac = ellps.free_air_correction(45., 1000.);
        assert!((fac - 0.003_084_826_269_831_8).abs() < 1e-12);

        // The classical 0.3086 mGal/m rule of thumb
        assert!((fac / MGAL / 1000. - 0.3086).abs() < 1e-3);

        let normal = ellps.normal_gravity(45.);
        let anomaly = free_air_anomaly(980_000., normal, fac);
        assert!((anomaly - -311.437_622_569).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn bouguer() -> Result<(), Error> {
        let bc = bouguer_correction(1000., CRUST_DENSITY);
        assert!((bc - 0.001_119_650_653_244_9).abs() < 1e-15);

        let ellps = Ellipsoid::named("GRS80")?;
        let normal = ellps.normal_gravity(45.);
        let fac = ellps.free_air_correction(45., 1000.);
        let anomaly = bouguer_anomaly(980_000., normal, fac, bc);
        assert!((anomaly - -423.402_687_894).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn geopotential() {
        assert_eq!(geopotential_number(&[]), 0.);
        let c = geopotential_number(&[(978_000., 10.), (978_100., -2.5)]);
        assert!((c - (9.78 * 10. - 9.781 * 2.5)).abs() < 1e-12);
    }
}
