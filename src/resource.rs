//! Run time configuration: Text resources, such as ellipsoid and datum
//! shift tables, found along a search path.
//!
//! By default, the search path is `./geodetic`, followed by `geodetic`
//! under the user's local data directory (e.g. `~/.local/share/geodetic`
//! on Linux). Resources reside in the `resources` subdirectory of each.

use crate::datum::DatumShifts;
use crate::Ellipsoid;
use crate::Error;
use log::{debug, trace};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// File name of the ellipsoid table, cf. [`Ellipsoid::parse_table`]
pub const ELLIPSOID_TABLE: &str = "ellipsoid.txt";

/// File name of the datum shift table, cf. [`DatumShifts::parse`]
pub const DATUM_TABLE: &str = "datum.txt";

/// A search path for text resources
#[derive(Debug, Clone)]
pub struct Resources {
    paths: Vec<PathBuf>,
}

impl Default for Resources {
    fn default() -> Resources {
        let mut paths = Vec::new();

        let localpath: PathBuf = [".", "geodetic"].iter().collect();
        paths.push(localpath);

        if let Some(mut userpath) = dirs::data_local_dir() {
            userpath.push("geodetic");
            paths.push(userpath);
        }

        Resources { paths }
    }
}

impl Resources {
    /// A search path consisting of `paths` only
    #[must_use]
    pub fn with_paths(paths: &[PathBuf]) -> Resources {
        Resources {
            paths: paths.to_vec(),
        }
    }

    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// The text of the first resource called `name` found along the search path
    pub fn get(&self, name: &str) -> Result<String, Error> {
        for path in &self.paths {
            let mut full_path = path.clone();
            full_path.push("resources");
            full_path.push(name);
            trace!("looking for {name} at {}", full_path.display());
            match std::fs::read_to_string(&full_path) {
                Ok(result) => {
                    debug!("found {name} at {}", full_path.display());
                    return Ok(result);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(Error::NotFound(
            name.to_string(),
            ": Resources::get()".to_string(),
        ))
    }

    /// The built-in datum shifts, amended by the entries of the datum
    /// shift table, if one is found along the search path
    pub fn datum_shifts(&self) -> Result<DatumShifts, Error> {
        let builtin = DatumShifts::builtin();
        match self.get(DATUM_TABLE) {
            Ok(table) => Ok(builtin.merged(&DatumShifts::parse(&table)?)),
            Err(Error::NotFound(..)) => Ok(builtin),
            Err(e) => Err(e),
        }
    }

    /// The user defined ellipsoids of the ellipsoid table, if one is
    /// found along the search path
    pub fn ellipsoids(&self) -> Result<BTreeMap<String, Ellipsoid>, Error> {
        match self.get(ELLIPSOID_TABLE) {
            Ok(table) => Ellipsoid::parse_table(&table),
            Err(Error::NotFound(..)) => Ok(BTreeMap::new()),
            Err(e) => Err(e),
        }
    }

    /// An ellipsoid by name: First from the ellipsoid table,
    /// then from the built-ins of [`Ellipsoid::named`]
    pub fn ellipsoid(&self, name: &str) -> Result<Ellipsoid, Error> {
        if let Some(ellps) = self.ellipsoids()?.get(name) {
            return Ok(*ellps);
        }
        Ellipsoid::named(name)
    }
}

// ----- Tests ---------------------------------------------------------------------
