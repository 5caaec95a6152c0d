//! Three-parameter datum shifts.
//!
//! A datum shift is carried out by converting the geographical coordinates
//! to cartesian on the source ellipsoid, translating the cartesian
//! coordinates, and converting back to geographical coordinates on the
//! target ellipsoid.
//!
//! The translations are kept in a [`DatumShifts`] table, keyed by
//! `"<source>2<target>"`, e.g. `"SAD692SIRGAS2000"`. The table is an
//! ordinary value: Build it once (from the built-in list, or from a text
//! resource), and hand it to whoever needs it.

use crate::Coor3D;
use crate::Ellipsoid;
use crate::Error;
use log::debug;
use std::collections::BTreeMap;

/// A datum, as far as datum shifts are concerned: A name and an ellipsoid.
#[derive(Clone, Debug, PartialEq)]
pub struct Datum {
    name: String,
    ellps: Ellipsoid,
}

#[rustfmt::skip]
const DATUM_LIST: [(&str, &str); 4] = [
    ("SIRGAS2000", "GRS80"),
    ("SAD69",      "SAD69"),
    ("SICAD",      "intl"),
    ("WGS84",      "WGS84"),
];

impl Datum {
    #[must_use]
    pub fn new(name: &str, ellps: Ellipsoid) -> Datum {
        Datum {
            name: name.to_string(),
            ellps,
        }
    }

    /// One of the built-in datums: SIRGAS2000, SAD69, SICAD, WGS84
    pub fn named(name: &str) -> Result<Datum, Error> {
        let Some(datum) = DATUM_LIST.iter().find(|d| d.0 == name) else {
            return Err(Error::NotFound(name.to_string(), ": Datum::named()".to_string()));
        };
        Ok(Datum::new(datum.0, Ellipsoid::named(datum.1)?))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellps
    }
}

/// A geocentric translation, in meters
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Translation {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Translation {
    #[must_use]
    pub fn new(dx: f64, dy: f64, dz: f64) -> Translation {
        Translation { dx, dy, dz }
    }

    /// The translation undoing this one
    #[must_use]
    pub fn reversed(&self) -> Translation {
        Translation::new(-self.dx, -self.dy, -self.dz)
    }
}

#[rustfmt::skip]
const BUILTIN_SHIFTS: [(&str, f64, f64, f64); 4] = [
    ("SIRGAS20002SAD69",   67.35,   -3.88,  38.22),
    ("SAD692SIRGAS2000",  -67.35,    3.88, -38.22),
    ("SICAD2SIRGAS2000", -144.35,  242.88, -33.22),
    ("SIRGAS20002SICAD",  144.35, -242.88,  33.22),
];

/// An immutable table of datum shift parameters
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatumShifts {
    shifts: BTreeMap<String, Translation>,
}

impl DatumShifts {
    /// The translations between SIRGAS2000, SAD69 and SICAD
    #[must_use]
    pub fn builtin() -> DatumShifts {
        let shifts = BUILTIN_SHIFTS
            .iter()
            .map(|s| (s.0.to_string(), Translation::new(s.1, s.2, s.3)))
            .collect();
        DatumShifts { shifts }
    }

    /// Parse a datum shift table. Each line holds a key, `<source>2<target>`,
    /// and the three translations, dx, dy, dz, in meters, separated by
    /// whitespace. Blank lines and lines starting with `#` are skipped.
    ///
    /// ```text
    /// # key               dx      dy      dz
    /// SAD692SIRGAS2000  -67.35    3.88  -38.22
    /// ```
    pub fn parse(table: &str) -> Result<DatumShifts, Error> {
        let mut shifts = BTreeMap::new();
        for (lineno, line) in table.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let syntax = || Error::Syntax(format!("datum table, line {}: {line}", lineno + 1));
            let fields = line.split_whitespace().collect::<Vec<_>>();
            if fields.len() != 4 || !fields[0].contains('2') {
                return Err(syntax());
            }
            let mut t = [0.; 3];
            for (i, field) in fields[1..].iter().enumerate() {
                t[i] = field.parse::<f64>().map_err(|_| syntax())?;
            }
            debug!("datum table: {} = {t:?}", fields[0]);
            shifts.insert(fields[0].to_string(), Translation::new(t[0], t[1], t[2]));
        }
        Ok(DatumShifts { shifts })
    }

    /// Entries of `other` take precedence over those of `self`
    #[must_use]
    pub fn merged(&self, other: &DatumShifts) -> DatumShifts {
        let mut shifts = self.shifts.clone();
        shifts.extend(other.shifts.iter().map(|(k, v)| (k.clone(), *v)));
        DatumShifts { shifts }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// The translation from `source` to `target`. If only the opposite
    /// direction is tabulated, its reverse is returned.
    pub fn lookup(&self, source: &str, target: &str) -> Result<Translation, Error> {
        if source == target {
            return Ok(Translation::default());
        }
        if let Some(t) = self.shifts.get(&format!("{source}2{target}")) {
            return Ok(*t);
        }
        if let Some(t) = self.shifts.get(&format!("{target}2{source}")) {
            return Ok(t.reversed());
        }
        Err(Error::NotFound(
            format!("{source}2{target}"),
            ": DatumShifts::lookup()".to_string(),
        ))
    }

    /// Shift the geographical coordinate `geo` (longitude, latitude in
    /// degrees, ellipsoidal height in meters) from the datum `source` to
    /// the datum `target`. Non-finite input is an [`Error::InvalidParameter`].
    pub fn shift(&self, geo: &Coor3D, source: &Datum, target: &Datum) -> Result<Coor3D, Error> {
        if !geo.is_finite() {
            return Err(Error::InvalidParameter("geo".to_string(), format!("{geo:?}")));
        }
        let t = self.lookup(source.name(), target.name())?;
        let cart = source.ellipsoid().cartesian(geo);
        let shifted = cart + Coor3D::raw(t.dx, t.dy, t.dz);
        Ok(target.ellipsoid().geographic(&shifted))
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datums() -> Result<(), Error> {
        let sirgas = Datum::named("SIRGAS2000")?;
        assert_eq!(sirgas.name(), "SIRGAS2000");
        assert_eq!(*sirgas.ellipsoid(), Ellipsoid::named("GRS80")?);
        assert_eq!(Datum::named("SAD69")?.ellipsoid().flattening(), 1. / 298.25);
        assert!(matches!(Datum::named("NAD27"), Err(Error::NotFound(..))));
        Ok(())
    }

    #[test]
    fn lookup() -> Result<(), Error> {
        let shifts = DatumShifts::builtin();
        assert_eq!(shifts.len(), 4);
        let t = shifts.lookup("SIRGAS2000", "SAD69")?;
        assert_eq!(t, Translation::new(67.35, -3.88, 38.22));
        assert_eq!(shifts.lookup("SAD69", "SAD69")?, Translation::default());
        assert!(matches!(
            shifts.lookup("SAD69", "SICAD"),
            Err(Error::NotFound(..))
        ));

        // Only one direction tabulated
        let shifts = DatumShifts::parse("A2B 1 2 3")?;
        assert_eq!(shifts.lookup("B", "A")?, Translation::new(-1., -2., -3.));
        Ok(())
    }

    #[test]
    fn parse() -> Result<(), Error> {
        let table = "
            # key               dx      dy      dz
            SAD692SIRGAS2000  -67.35    3.88  -38.22

            SICAD2SIRGAS2000 -144.35  242.88  -33.22
        ";
        let shifts = DatumShifts::parse(table)?;
        assert_eq!(shifts.len(), 2);
        assert_eq!(
            shifts.lookup("SAD69", "SIRGAS2000")?,
            DatumShifts::builtin().lookup("SAD69", "SIRGAS2000")?
        );

        assert!(matches!(
            DatumShifts::parse("SAD692SIRGAS2000 1 2"),
            Err(Error::Syntax(_))
        ));
        assert!(matches!(
            DatumShifts::parse("SAD692SIRGAS2000 1 2 x"),
            Err(Error::Syntax(_))
        ));

        let merged = DatumShifts::builtin().merged(&DatumShifts::parse("SAD692SIRGAS2000 1 2 3")?);
        assert_eq!(merged.len(), 4);
        assert_eq!(
            merged.lookup("SAD69", "SIRGAS2000")?,
            Translation::new(1., 2., 3.)
        );
        Ok(())
    }

    #[test]
    fn shift() -> Result<(), Error> {
        let shifts = DatumShifts::builtin();
        let sirgas = Datum::named("SIRGAS2000")?;
        let sad69 = Datum::named("SAD69")?;

        // São Paulo
        let p = Coor3D::gis(-46.6333, -23.5505, 760.);
        let q = shifts.shift(&p, &sirgas, &sad69)?;

        // The cartesian displacement equals the translation
        let d = sad69.ellipsoid().cartesian(&q) - sirgas.ellipsoid().cartesian(&p);
        assert!((d[0] - 67.35).abs() < 1e-6);
        assert!((d[1] + 3.88).abs() < 1e-6);
        assert!((d[2] - 38.22).abs() < 1e-6);

        // ...and back again
        let r = shifts.shift(&q, &sad69, &sirgas)?;
        assert!((r.longitude() - p.longitude()).abs() < 1e-10);
        assert!((r.latitude() - p.latitude()).abs() < 1e-10);
        assert!((r.height() - p.height()).abs() < 1e-6);

        // Non-finite input is rejected, rather than shifted into NaNs
        let bad = Coor3D::gis(-46.6333, f64::NAN, 760.);
        assert!(matches!(
            shifts.shift(&bad, &sirgas, &sad69),
            Err(Error::InvalidParameter(..))
        ));
        Ok(())
    }
}
