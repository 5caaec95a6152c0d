use crate::Error;
use log::debug;
use std::collections::BTreeMap;

mod constants;
mod geocart;
mod geodesics;
pub mod gravity;

pub use geodesics::Convergence;
pub use geodesics::DirectSolution;
pub use geodesics::InverseSolution;
pub use geodesics::MAX_ITERATIONS;
pub use geodesics::TOLERANCE;

/// An ellipsoid of revolution, given by its semimajor axis and flattening.
///
/// The semiminor axis and the eccentricities are derived once, at
/// construction time, and can never be set independently. An `Ellipsoid`
/// is immutable, so it may be shared freely between threads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
    b: f64,
    e1: f64,
    e2: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::derive(6_378_137.0, 1. / 298.257_222_101)
    }
}

/// Constructors for `Ellipsoid`
impl Ellipsoid {
    /// User defined ellipsoid. The semimajor axis must be positive,
    /// the flattening in the interval [0, 1). A flattening of 0
    /// gives a sphere.
    pub fn new(semimajor_axis: f64, flattening: f64) -> Result<Ellipsoid, Error> {
        if !semimajor_axis.is_finite() || semimajor_axis <= 0. {
            return Err(Error::InvalidParameter(
                "a".to_string(),
                semimajor_axis.to_string(),
            ));
        }
        if !flattening.is_finite() || !(0. ..1.).contains(&flattening) {
            return Err(Error::InvalidParameter(
                "f".to_string(),
                flattening.to_string(),
            ));
        }
        Ok(Ellipsoid::derive(semimajor_axis, flattening))
    }

    // Unchecked: callers guarantee a > 0 and 0 <= f < 1
    fn derive(a: f64, f: f64) -> Ellipsoid {
        let b = a * (1. - f);
        let aa = a * a;
        let bb = b * b;
        Ellipsoid {
            a,
            f,
            b,
            e1: ((aa - bb) / aa).sqrt(),
            e2: ((aa - bb) / bb).sqrt(),
        }
    }

    /// Predefined ellipsoid; built-in, or given as a string formatted
    /// (a, rf) tuple, e.g. "6378137, 298.25"
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        // Is it one of the few builtins?
        if let Some(e) = constants::ELLIPSOID_LIST
            .iter()
            .find(|ellps| ellps.0 == name)
        {
            return Ellipsoid::new(e.1, flattening_from_reciproque(e.2));
        }

        // Remove optional parenthesis
        let name = name.trim();
        let name = name
            .strip_prefix('(')
            .and_then(|n| n.strip_suffix(')'))
            .unwrap_or(name);

        // The "semimajor, reciproque-flattening" form, e.g. "6378137, 298.3"
        let a_and_rf = name.split(',').collect::<Vec<_>>();
        if a_and_rf.len() == 2_usize {
            if let Ok(a) = a_and_rf[0].trim().parse::<f64>() {
                if let Ok(rf) = a_and_rf[1].trim().parse::<f64>() {
                    return Ellipsoid::new(a, flattening_from_reciproque(rf));
                }
            }
        }

        Err(Error::NotFound(
            String::from(name),
            String::from(": Ellipsoid::named()"),
        ))
    }

    /// Parse an ellipsoid table. Each line holds the semimajor axis, the
    /// flattening written as a fraction, `1/rf`, and (last on the line) the
    /// name of the ellipsoid. Anything between the flattening and the name is
    /// ignored. Blank lines and lines starting with `#` are skipped.
    ///
    /// ```text
    /// 6378137.0 1/298.257222101 GRS80
    /// 6378160.0 1/298.25 South American 1969 SAD69
    /// ```
    pub fn parse_table(table: &str) -> Result<BTreeMap<String, Ellipsoid>, Error> {
        let mut ellipsoids = BTreeMap::new();
        for (lineno, line) in table.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let syntax = || Error::Syntax(format!("ellipsoid table, line {}: {line}", lineno + 1));
            let fields = line.split_whitespace().collect::<Vec<_>>();
            if fields.len() < 3 {
                return Err(syntax());
            }
            let a = fields[0].parse::<f64>().map_err(|_| syntax())?;
            let rf = fields[1]
                .strip_prefix("1/")
                .ok_or_else(syntax)?
                .parse::<f64>()
                .map_err(|_| syntax())?;
            let name = fields[fields.len() - 1];

            let ellps = Ellipsoid::new(a, flattening_from_reciproque(rf))?;
            debug!("ellipsoid table: {name} = {ellps:?}");
            ellipsoids.insert(name.to_string(), ellps);
        }
        Ok(ellipsoids)
    }
}

// EPSG convention: zero reciproque flattening indicates zero flattening
fn flattening_from_reciproque(rf: f64) -> f64 {
    if rf != 0.0 {
        1.0 / rf
    } else {
        rf
    }
}

// ----- Size, shape, and curvature ---------------------------------------------------

impl Ellipsoid {
    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b = a(1 - f)*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.b
    }

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The (first) eccentricity *e = sqrt((a² - b²) / a²)*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.e1
    }

    /// The squared eccentricity *e²*
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.e1 * self.e1
    }

    /// The second eccentricity *e' = sqrt((a² - b²) / b²)*
    #[must_use]
    pub fn second_eccentricity(&self) -> f64 {
        self.e2
    }

    /// The squared second eccentricity *e'²*
    #[must_use]
    pub fn second_eccentricity_squared(&self) -> f64 {
        self.e2 * self.e2
    }

    /// The radius of curvature in the prime vertical, *N*, i.e. the length
    /// of the ellipsoidal normal from the surface to the rotation axis,
    /// at the latitude `latitude` (in degrees).
    #[must_use]
    pub fn meridian_normal(&self, latitude: f64) -> f64 {
        let s = latitude.to_radians().sin();
        self.a / (1.0 - self.eccentricity_squared() * s * s).sqrt()
    }

    /// The length of the ellipsoidal normal from the surface to the
    /// equatorial plane, *N(1 - e²)*, at the latitude `latitude` (in degrees).
    #[must_use]
    pub fn equator_normal(&self, latitude: f64) -> f64 {
        self.meridian_normal(latitude) * (1.0 - self.eccentricity_squared())
    }
}

// ----- Tests ---------------------------------------------------------------------
