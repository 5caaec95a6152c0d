use std::ops::{Add, Index, IndexMut, Sub};

/// A 3D coordinate tuple. Geographic coordinates are stored in the order
/// longitude, latitude, height, with the angular elements in degrees.
/// Cartesian coordinates are stored as X, Y, Z, in meters.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Coor3D(pub [f64; 3]);

// ----- C O N S T R U C T O R S ---------------------------------------------

/// Constructors
impl Coor3D {
    /// A `Coor3D` from latitude/longitude/height, with the angular input in degrees
    #[must_use]
    pub fn geo(latitude: f64, longitude: f64, height: f64) -> Coor3D {
        Coor3D([longitude, latitude, height])
    }

    /// A `Coor3D` from longitude/latitude/height, with the angular input in degrees
    #[must_use]
    pub fn gis(longitude: f64, latitude: f64, height: f64) -> Coor3D {
        Coor3D([longitude, latitude, height])
    }

    /// A `Coor3D` taken verbatim, e.g. cartesian X, Y, Z
    #[must_use]
    pub fn raw(first: f64, second: f64, third: f64) -> Coor3D {
        Coor3D([first, second, third])
    }

    /// A `Coor3D` consisting of 3 `0`s
    #[must_use]
    pub fn origin() -> Coor3D {
        Coor3D([0., 0., 0.])
    }
}

// ----- A C C E S S O R S ---------------------------------------------------

impl Coor3D {
    /// The longitude of a geographic coordinate, in degrees
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.0[0]
    }

    /// The latitude of a geographic coordinate, in degrees
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.0[1]
    }

    /// The ellipsoidal height of a geographic coordinate, in meters
    #[must_use]
    pub fn height(&self) -> f64 {
        self.0[2]
    }

    /// True if all elements are finite, i.e. neither `NaN` nor infinite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }

    /// Euclidean distance between two points in the 3D space.
    ///
    /// Meaningful for cartesian coordinates only: For geographical
    /// coordinates, see [`geodesic_inv`](crate::Ellipsoid::geodesic_inv).
    #[must_use]
    pub fn hypot3(&self, other: &Self) -> f64 {
        (self[0] - other[0])
            .hypot(self[1] - other[1])
            .hypot(self[2] - other[2])
    }
}

// ----- O P E R A T O R S ---------------------------------------------------

impl Index<usize> for Coor3D {
    type Output = f64;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl IndexMut<usize> for Coor3D {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

impl Add for Coor3D {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Coor3D([self[0] + other[0], self[1] + other[1], self[2] + other[2]])
    }
}

impl Sub for Coor3D {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Coor3D([self[0] - other[0], self[1] - other[1], self[2] - other[2]])
    }
}

// ----- T E S T S ---------------------------------------------------
