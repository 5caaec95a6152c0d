//! *Ellipsoidal geodesy for surveying work*.
//!
//! The core of the crate is the [`Ellipsoid`] and its two
//! geodesic solvers:
//! [`geodesic_inv`](Ellipsoid::geodesic_inv), computing distance and azimuths
//! between two points, and [`geodesic_fwd`](Ellipsoid::geodesic_fwd), computing
//! the destination given a point of origin, an azimuth and a distance.
//! Both follow [Vincenty (1975)](crate::Bibliography::Vin75).
//!
//! Around the core, a handful of closed-form helpers: geographic/cartesian
//! conversion, datum shifts, great circle distances, topocentric coordinates,
//! normal gravity, and reductions of observed distances.
//!
//! Angular quantities are given and returned in decimal degrees, lengths in
//! meters.
//!
//! ```rust
//! use geodetic::prelude::*;
//! let ellps = Ellipsoid::named("GRS80")?;
//! let cph = Coor3D::geo(55., 12., 0.);
//! let cdg = Coor3D::geo(49., 2., 0.);
//! let geodesic = ellps.geodesic_inv(&cph, &cdg)?.converged()?;
//! assert!((geodesic.distance - 956_066.232).abs() < 1e-3);
//! # Ok::<(), geodetic::Error>(())
//! ```

mod coordinate;
mod ellps;

pub mod datum;
pub mod math;
pub mod reduction;
#[cfg(feature = "with_plain")]
pub mod resource;
pub mod sphere;
pub mod topocentric;

pub use coordinate::Coor3D;
pub use datum::Datum;
pub use datum::DatumShifts;
pub use datum::Translation;
pub use ellps::gravity;
pub use ellps::Convergence;
pub use ellps::DirectSolution;
pub use ellps::Ellipsoid;
pub use ellps::InverseSolution;
pub use ellps::MAX_ITERATIONS;
pub use ellps::TOLERANCE;

/// The bread-and-butter, shrink-wrapped for external use
pub mod prelude {
    pub use crate::math::angular::dd_to_dms;
    pub use crate::math::angular::dms_to_dd;
    pub use crate::math::angular::Dms;
    pub use crate::Convergence;
    pub use crate::Coor3D;
    pub use crate::Datum;
    pub use crate::DatumShifts;
    pub use crate::DirectSolution;
    pub use crate::Ellipsoid;
    pub use crate::Error;
    pub use crate::InverseSolution;
    pub use crate::Translation;
}

use thiserror::Error;

/// The *Geodetic* error messaging enumeration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error")]
    Io(#[from] std::io::Error),

    #[error("invalid value for parameter {0}: {1}")]
    InvalidParameter(String, String),

    #[error("coincident points: the azimuth is undefined")]
    CoincidentPoints,

    #[error("singular geometry: {0}")]
    SingularGeometry(&'static str),

    #[error("no convergence after {0} iterations")]
    Convergence(usize),

    #[error("{0} not found{1}")]
    NotFound(String, String),

    #[error("syntax error: {0}")]
    Syntax(String),
}

/// Literature, that has been useful in designing and implementing this library.
pub enum Bibliography {
    /// B.R. Bowring (1976): *Transformation from spatial to geographical coordinates*.
    /// Survey Review 23(181), pp. 323–327.
    Bow76,

    /// B.R. Bowring (1985): *The accuracy of geodetic latitude and height equations*.
    /// Survey Review, 28(218), pp.202-206,
    /// [DOI](https://doi.org/10.1179/sre.1985.28.218.202)
    Bow85,

    /// H. Moritz (2000): *Geodetic Reference System 1980*.
    /// Journal of Geodesy, 74(1), pp.128-133.
    /// [DOI](https://doi.org/10.1007/s001900050278)
    Mor00,

    /// B. Hofmann-Wellenhof and H. Moritz (2006): *Physical Geodesy*, 2nd ed.
    /// Springer, Wien.
    Hof06,

    /// T. Vincenty (1975) Direct and Inverse Solutions of Geodesics on the Ellipsoid
    /// with application of nested equations.
    /// Survey Review, 23(176): 88-93.
    /// [pdf](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf)
    /// (See also Wikipedia: [Vincenty's formulae](https://en.wikipedia.org/wiki/Vincenty's_formulae)).
    Vin75,

    /// T. Vincenty (1976). Correspondence. Survey Review. 23(180): 294.
    Vin76,
}
