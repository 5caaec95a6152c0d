use super::Ellipsoid;
use crate::Coor3D;

// ----- Cartesian <--> Geographic conversion ----------------------------------

impl Ellipsoid {
    /// Geographic to cartesian conversion. The input is longitude and
    /// latitude in degrees, and ellipsoidal height in meters.
    ///
    /// Follows the derivation given by
    /// Bowring ([1976](crate::Bibliography::Bow76) and
    /// [1985](crate::Bibliography::Bow85))
    #[must_use]
    #[allow(non_snake_case)]
    pub fn cartesian(&self, geographic: &Coor3D) -> Coor3D {
        let lam = geographic.longitude().to_radians();
        let phi = geographic.latitude().to_radians();
        let h = geographic.height();

        let N = self.meridian_normal(geographic.latitude());
        let cosphi = phi.cos();
        let sinphi = phi.sin();
        let coslam = lam.cos();
        let sinlam = lam.sin();

        let X = (N + h) * cosphi * coslam;
        let Y = (N + h) * cosphi * sinlam;
        let Z = (N * (1.0 - self.eccentricity_squared()) + h) * sinphi;

        Coor3D::raw(X, Y, Z)
    }

    /// Cartesian to geographic conversion. Returns longitude and latitude
    /// in degrees, and ellipsoidal height in meters.
    ///
    /// Follows the derivation given by
    /// Bowring ([1976](crate::Bibliography::Bow76) and
    /// [1985](crate::Bibliography::Bow85))
    #[must_use]
    #[allow(non_snake_case)]
    pub fn geographic(&self, cartesian: &Coor3D) -> Coor3D {
        let X = cartesian[0];
        let Y = cartesian[1];
        let Z = cartesian[2];

        // We need a few additional ellipsoidal parameters
        let a = self.semimajor_axis();
        let b = self.semiminor_axis();
        let eps = self.second_eccentricity_squared();
        let es = self.eccentricity_squared();

        // The longitude is straightforward: Plain geometry in the equatorial
        // plane, with atan2 taking care of the quadrants
        let lam = Y.atan2(X);

        // The perpendicular distance from the point coordinate to the Z-axis
        // (HM eq. 5-28)
        let p = X.hypot(Y);

        // On the polar axis, within a picometer
        if p < 1.0e-12 {
            // The sign of Z determines the hemisphere
            let phi = 90_f64.copysign(Z);
            let h = Z.abs() - b;
            return Coor3D::gis(lam.to_degrees(), phi, h);
        }

        // Bowring's auxiliary angle, θ, from its tangent, T. Fukushima
        // (1999), Appendix B: one sqrt replaces three trigonometric calls
        let T = (Z * a) / (p * b);
        let c = 1.0 / (1.0 + T * T).sqrt();
        let s = c * T;

        let phi_num = Z + eps * b * s.powi(3);
        let phi_denom = p - es * a * c.powi(3);
        let phi = phi_num.atan2(phi_denom);

        let lenphi = phi_num.hypot(phi_denom);
        let sinphi = phi_num / lenphi;
        let cosphi = phi_denom / lenphi;

        // N, inlined from sinphi
        let N = a / (1.0 - sinphi.powi(2) * es).sqrt();

        // Bowring (1985): better conditioned than h = p / cosphi - N
        let h = p * cosphi + Z * sinphi - a * a / N;

        Coor3D::gis(lam.to_degrees(), phi.to_degrees(), h)
    }
}

// ----- Tests ---------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn geo_to_cart() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        // Roundtrip geographic <-> cartesian
        let geo = Coor3D::geo(55., 12., 100.);
        let cart = ellps.cartesian(&geo);
        let geo2 = ellps.geographic(&cart);
        assert!((geo[0] - geo2[0]).abs() < 1.0e-10);
        assert!((geo[1] - geo2[1]).abs() < 1.0e-10);
        assert!((geo[2] - geo2[2]).abs() < 1.0e-6);
        Ok(())
    }

    #[test]
    fn all_quadrants() -> Result<(), Error> {
        let ellps = Ellipsoid::named("SAD69")?;
        for (lon, lat) in [(-46.6, -23.5), (135., 35.), (-120., 45.), (-170., -80.)] {
            let geo = Coor3D::gis(lon, lat, 760.);
            let geo2 = ellps.geographic(&ellps.cartesian(&geo));
            assert!((geo2.longitude() - lon).abs() < 1e-10);
            assert!((geo2.latitude() - lat).abs() < 1e-10);
            assert!((geo2.height() - 760.).abs() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn axes_and_poles() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let a = ellps.semimajor_axis();
        let b = ellps.semiminor_axis();

        let cart = ellps.cartesian(&Coor3D::gis(90., 0., 0.));
        assert!(cart[0].abs() < 1e-6);
        assert!((cart[1] - a).abs() < 1e-6);
        assert!(cart[2].abs() < 1e-6);

        let cart = ellps.cartesian(&Coor3D::gis(0., -90., 10.));
        assert!((cart[2] + b + 10.).abs() < 1e-6);

        let geo = ellps.geographic(&Coor3D::raw(0., 0., b + 10.));
        assert_eq!(geo.latitude(), 90.);
        assert!((geo.height() - 10.).abs() < 1e-9);
        Ok(())
    }
}
