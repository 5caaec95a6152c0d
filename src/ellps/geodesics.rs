use super::Ellipsoid;
use crate::math::angular::normalize_azimuth;
use crate::Coor3D;
use crate::Error;
use log::{trace, warn};

/// Upper bound on the number of iterations of the geodesic solvers
pub const MAX_ITERATIONS: usize = 2000;

/// Convergence criterion (radians) for the geodesic solvers
pub const TOLERANCE: f64 = 1e-12;

// Below this, sin σ is taken as zero, i.e. coincident or antipodal points
const COINCIDENT: f64 = 1e-15;

// Below this, cos²α is taken as zero, i.e. the geodesic follows the equator
const EQUATORIAL: f64 = 1e-15;

/// How the fixed point iteration of a geodesic solver terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convergence {
    /// The update fell below [`TOLERANCE`]
    Converged,
    /// [`MAX_ITERATIONS`] reached: The solution is the best estimate
    /// available, but may be inaccurate. Typical for near-antipodal points.
    IterationCap,
}

/// Solution of the inverse geodesic problem. Azimuths in degrees, in the
/// interval [0, 360), distance in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseSolution {
    /// The ellipsoidal distance between the two points
    pub distance: f64,
    /// The azimuth of the geodesic at the first point, toward the second
    pub azimuth12: f64,
    /// The azimuth of the geodesic at the second point, back toward the first
    pub azimuth21: f64,
    pub iterations: usize,
    pub convergence: Convergence,
    /// The geodesic runs along the equator, where the approximation of
    /// cos(2σₘ) is singular, and has been replaced by 0
    pub equatorial: bool,
}

/// Solution of the direct geodesic problem. Angles in degrees, the azimuth
/// in the interval [0, 360).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectSolution {
    pub latitude: f64,
    pub longitude: f64,
    /// The azimuth of the geodesic at the destination, back toward the origin
    pub azimuth21: f64,
    pub iterations: usize,
    pub convergence: Convergence,
}

impl InverseSolution {
    /// Insist on convergence: Turns an iteration capped solution into an
    /// [`Error::Convergence`]
    pub fn converged(self) -> Result<Self, Error> {
        match self.convergence {
            Convergence::Converged => Ok(self),
            Convergence::IterationCap => Err(Error::Convergence(self.iterations)),
        }
    }

    /// The azimuth of the geodesic as it continues beyond the second point
    #[must_use]
    pub fn final_azimuth(&self) -> f64 {
        normalize_azimuth(self.azimuth21 + 180.)
    }

    /// True unless the iteration was capped
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.convergence == Convergence::Converged
    }
}

impl DirectSolution {
    /// Insist on convergence: Turns an iteration capped solution into an
    /// [`Error::Convergence`]
    pub fn converged(self) -> Result<Self, Error> {
        match self.convergence {
            Convergence::Converged => Ok(self),
            Convergence::IterationCap => Err(Error::Convergence(self.iterations)),
        }
    }

    /// The azimuth of the geodesic as it continues beyond the destination
    #[must_use]
    pub fn final_azimuth(&self) -> f64 {
        normalize_azimuth(self.azimuth21 + 180.)
    }

    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.convergence == Convergence::Converged
    }

    /// The destination as a geographical coordinate (with zero height)
    #[must_use]
    pub fn destination(&self) -> Coor3D {
        Coor3D::geo(self.latitude, self.longitude, 0.)
    }
}

// A and B, the 6th order series in u² of Vincenty (1975), eqs. (3) and (4)
#[allow(non_snake_case)]
fn series(ellps: &Ellipsoid, aacos2: f64) -> (f64, f64) {
    let us = aacos2 * ellps.second_eccentricity_squared();
    let A = 1. + us / 16384. * (4096. + us * (-768. + us * (320. - 175. * us)));
    let B = us / 1024. * (256. + us * (-128. + us * (74. - 47. * us)));
    (A, B)
}

// Δσ, the difference between the arc on the auxiliary sphere and
// the (scaled) distance on the ellipsoid. Vincenty (1975), eq. (6)
#[allow(non_snake_case)]
fn delta_sigma(B: f64, sssin: f64, sscos: f64, ssmx2cos: f64) -> f64 {
    let t1 = -1. + 2. * ssmx2cos * ssmx2cos;
    let t2 = -3. + 4. * sssin * sssin;
    let t3 = -3. + 4. * ssmx2cos * ssmx2cos;
    B * sssin * (ssmx2cos + B / 4. * (sscos * t1 - B / 6. * ssmx2cos * t2 * t3))
}

// The longitude difference between the ellipsoid and the auxiliary sphere,
// λ - L. Vincenty (1975), eqs. (10) and (11)
#[allow(non_snake_case)]
fn longitude_correction(
    f: f64,
    aasin: f64,
    aacos2: f64,
    ss: f64,
    sssin: f64,
    sscos: f64,
    ssmx2cos: f64,
) -> f64 {
    let C = f / 16. * aacos2 * (4. + f * (4. - 3. * aacos2));
    (1. - C)
        * f
        * aasin
        * (ss + C * sssin * (ssmx2cos + C * sscos * (-1. + 2. * ssmx2cos * ssmx2cos)))
}

fn check_finite(name: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() {
        return Ok(());
    }
    Err(Error::InvalidParameter(name.to_string(), value.to_string()))
}

fn check_point(name: &str, point: &Coor3D) -> Result<(), Error> {
    check_finite(name, point.longitude())?;
    check_finite(name, point.latitude())?;
    if point.latitude().abs() > 90. {
        return Err(Error::InvalidParameter(
            name.to_string(),
            format!("latitude {} outside [-90, 90]", point.latitude()),
        ));
    }
    Ok(())
}

// ----- Geodesics -------------------------------------------------------------
impl Ellipsoid {
    /// The latitude on the auxiliary sphere, *U = atan((1 - f) tan φ)*, in radians.
    /// Takes the geographic latitude in degrees.
    #[must_use]
    pub fn reduced_latitude(&self, latitude: f64) -> f64 {
        ((1. - self.f) * latitude.to_radians().tan()).atan()
    }

    /// The direct geodesic problem: Given a point of origin, an `azimuth` (in
    /// degrees) and a `distance` (in meters) along the geodesic, find the
    /// destination, and the azimuth from the destination back toward
    /// the origin.
    ///
    /// We use the algorithm by Vincenty ([1975](crate::Bibliography::Vin75)).
    /// The Vincenty algorithm is relatively simple to implement, but for
    /// near-antipodal cases, it suffers from lack of convergence and loss
    /// of accuracy. Hence, the iteration is capped at [`MAX_ITERATIONS`],
    /// and the outcome is reported in the `convergence` field of the
    /// solution.
    #[allow(non_snake_case)]
    pub fn geodesic_fwd(
        &self,
        from: &Coor3D,
        azimuth: f64,
        distance: f64,
    ) -> Result<DirectSolution, Error> {
        check_point("from", from)?;
        check_finite("azimuth", azimuth)?;
        check_finite("distance", distance)?;
        if distance < 0. {
            return Err(Error::InvalidParameter(
                "distance".to_string(),
                distance.to_string(),
            ));
        }

        // Coordinates of the point of origin, P1
        let B1 = from.latitude();
        let L1 = from.longitude();

        // The latitude of P1 projected onto the auxiliary sphere
        let U1 = self.reduced_latitude(B1);
        let U1cos = U1.cos();
        let U1sin = U1.sin();

        // σ_1, here ss1, is the angular distance on the aux sphere from P1 to equator
        let azimuth = azimuth.to_radians();
        let azicos = azimuth.cos();
        let azisin = azimuth.sin();
        let ss1 = U1.tan().atan2(azicos);

        // α, the forward azimuth of the geodesic at equator
        let aasin = U1cos * azisin;
        let aacos2 = 1. - aasin * aasin;

        let (A, B) = series(self, aacos2);

        // Initial estimate for σ, the angular distance on the auxiliary sphere
        let b = self.semiminor_axis();
        let first = distance / (b * A);
        let mut ss = first;
        let mut ssmx2cos = 0.;
        let mut convergence = Convergence::IterationCap;
        let mut i = 0_usize;

        while i < MAX_ITERATIONS {
            i += 1;

            // 2σ_m, where σ_m is the latitude of the midpoint on the aux sphere
            ssmx2cos = (2. * ss1 + ss).cos();
            let dss = delta_sigma(B, ss.sin(), ss.cos(), ssmx2cos);

            let next = first + dss;
            let change = (next - ss).abs();
            ss = next;
            if !ss.is_finite() {
                return Err(Error::SingularGeometry("non-finite arc length"));
            }

            // Stop criterion: Last update of σ made little difference
            if change < TOLERANCE {
                convergence = Convergence::Converged;
                break;
            }
        }

        trace!("geodesic_fwd: {i} iterations");
        if convergence == Convergence::IterationCap {
            warn!("geodesic_fwd: no convergence after {i} iterations");
        }

        // B2: Latitude of destination
        let sssin = ss.sin();
        let sscos = ss.cos();
        let t4 = U1cos * azicos * sssin;
        let t5 = U1cos * azicos * sscos;
        let B2 = (U1sin * sscos + t4).atan2((1. - self.f) * aasin.hypot(U1sin * sssin - t5));

        // L2: Longitude of destination
        let ll = (sssin * azisin).atan2(U1cos * sscos - U1sin * sssin * azicos);
        let L = ll - longitude_correction(self.f, aasin, aacos2, ss, sssin, sscos, ssmx2cos);
        let L2 = L1 + L.to_degrees();

        // The azimuth at P2, continuing away from P1
        let aa2 = aasin.atan2(t5 - U1sin * sssin);

        let latitude = B2.to_degrees();
        let azimuth21 = normalize_azimuth(aa2.to_degrees() + 180.);
        if !(latitude.is_finite() && L2.is_finite() && azimuth21.is_finite()) {
            return Err(Error::SingularGeometry("non-finite destination"));
        }

        Ok(DirectSolution {
            latitude,
            longitude: L2,
            azimuth21,
            iterations: i,
            convergence,
        })
    }

    /// The inverse geodesic problem: Given two points, find the distance
    /// between them, and the azimuths at each end.
    ///
    /// See [`geodesic_fwd`](crate::Ellipsoid::geodesic_fwd) for the
    /// caveats regarding near-antipodal points.
    ///
    /// Coincident points make the azimuths undefined, and are reported
    /// as [`Error::CoincidentPoints`].
    #[allow(non_snake_case)] // allow math-like notation
    pub fn geodesic_inv(&self, from: &Coor3D, to: &Coor3D) -> Result<InverseSolution, Error> {
        check_point("from", from)?;
        check_point("to", to)?;

        let B1 = from.latitude();
        let B2 = to.latitude();
        let L = (to.longitude() - from.longitude()).to_radians();

        let U1 = self.reduced_latitude(B1);
        let U2 = self.reduced_latitude(B2);

        let U1cos = U1.cos();
        let U2cos = U2.cos();
        let U1sin = U1.sin();
        let U2sin = U2.sin();

        // Initial estimate for λ, the longitude on the auxiliary sphere
        let mut ll = L;

        let mut aacos2 = 0.;
        let mut ssmx2cos = 0.;
        let mut sscos = 0.;
        let mut sssin = 0.;
        let mut llsin = 0.;
        let mut llcos = 1.;
        let mut equatorial = false;
        let mut convergence = Convergence::IterationCap;

        let mut i = 0_usize;

        while i < MAX_ITERATIONS {
            i += 1;

            // σ, the angular separation between the points
            llsin = ll.sin();
            llcos = ll.cos();
            let t1 = U2cos * llsin;
            let t2 = U1cos * U2sin - U2cos * U1sin * llcos;
            sssin = t1.hypot(t2);
            sscos = U1sin * U2sin + U1cos * U2cos * llcos;
            if sssin < COINCIDENT {
                if sscos > 0. {
                    // Below the nanometer level, directions are undefined.
                    // This includes the case of a pole given with different longitudes
                    return Err(Error::CoincidentPoints);
                }
                return Err(Error::SingularGeometry("antipodal points"));
            }
            let ss = sssin.atan2(sscos);

            // α, the forward azimuth of the geodesic at equator
            let aasin = U1cos * U2cos * llsin / sssin;
            aacos2 = 1. - aasin * aasin;

            // cosine of 2 times σ_m, the angular separation from the midpoint to the equator
            equatorial = aacos2.abs() < EQUATORIAL;
            ssmx2cos = if equatorial {
                0.
            } else {
                sscos - 2. * U1sin * U2sin / aacos2
            };

            let ll_next =
                L + longitude_correction(self.f, aasin, aacos2, ss, sssin, sscos, ssmx2cos);
            if !ll_next.is_finite() {
                return Err(Error::SingularGeometry(
                    "non-finite longitude on the auxiliary sphere",
                ));
            }
            let dl = (ll - ll_next).abs();
            ll = ll_next;
            if dl < TOLERANCE {
                convergence = Convergence::Converged;
                break;
            }
        }

        trace!("geodesic_inv: {i} iterations");
        if convergence == Convergence::IterationCap {
            warn!("geodesic_inv: no convergence after {i} iterations");
        }

        let (A, B) = series(self, aacos2);

        // The difference between the dist on the aux sphere and on the ellipsoid.
        let ss = sssin.atan2(sscos);
        let dss = delta_sigma(B, sssin, sscos, ssmx2cos);

        // Distance, forward azimuth, return azimuth
        let s = self.semiminor_axis() * A * (ss - dss);
        let a1 = (U2cos * llsin).atan2(U1cos * U2sin - U1sin * U2cos * llcos);
        let a2 = (U1cos * llsin).atan2(-U1sin * U2cos + U1cos * U2sin * llcos);

        let azimuth12 = normalize_azimuth(a1.to_degrees());
        let azimuth21 = normalize_azimuth(a2.to_degrees() + 180.);
        if !(s.is_finite() && azimuth12.is_finite() && azimuth21.is_finite()) {
            return Err(Error::SingularGeometry("non-finite geodesic"));
        }

        Ok(InverseSolution {
            distance: s,
            azimuth12,
            azimuth21,
            iterations: i,
            convergence,
            equatorial,
        })
    }

    /// Geodesic distance between two points.
    ///
    /// # Examples
    ///
    /// ```rust
    /// // Compute the distance between Copenhagen and Paris
    /// use geodetic::prelude::*;
    /// let ellps = Ellipsoid::named("GRS80")?;
    /// let p0 = Coor3D::geo(55., 12., 0.);
    /// let p1 = Coor3D::geo(49., 2., 0.);
    /// let d = ellps.distance(&p0, &p1)?;
    /// assert!((d - 956_066.231_959).abs() < 1e-5);
    /// # Ok::<(), geodetic::Error>(())
    /// ```
    pub fn distance(&self, from: &Coor3D, to: &Coor3D) -> Result<f64, Error> {
        Ok(self.geodesic_inv(from, to)?.converged()?.distance)
    }
}

// ----- Tests ---------------------------------------------------------------------
