//! GD: Geodetic computations from the command line.
//!
//! Reads whitespace separated numbers, one computation per line, from the
//! files given (or stdin), and writes the results to stdout.
use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use geodetic::prelude::*;
use geodetic::resource::Resources;
use log::{debug, trace, warn};
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Operation {
    /// lat1 lon1 lat2 lon2  ->  distance azimuth12 azimuth21
    Inverse,
    /// lat lon azimuth distance  ->  lat2 lon2 azimuth21
    Direct,
    /// lat lon height  ->  X Y Z
    Cart,
    /// X Y Z  ->  lat lon height
    Geo,
    /// lat lon height  ->  lat lon height, shifted from --from to --to
    Datum,
    /// decimal degrees  ->  degrees, minutes, seconds
    Dms,
}

impl Operation {
    fn arity(self) -> usize {
        match self {
            Operation::Inverse | Operation::Direct => 4,
            Operation::Cart | Operation::Geo | Operation::Datum => 3,
            Operation::Dms => 1,
        }
    }
}

/// GD: Ellipsoidal geodesics (Vincenty), geographic/cartesian conversion,
/// and datum shifts. Angles are decimal degrees, lengths are meters.
#[derive(Parser, Debug)]
#[clap(name = "gd")]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The operation to carry out
    #[clap(value_enum)]
    operation: Operation,

    /// Ellipsoid, by name or as "a, rf"
    #[clap(short, long, default_value = "GRS80")]
    ellps: String,

    /// Source datum for the datum operation
    #[clap(long, default_value = "SAD69")]
    from: String,

    /// Target datum for the datum operation
    #[clap(long, default_value = "SIRGAS2000")]
    to: String,

    /// Number of decimals in output
    #[clap(short = 'd', long)]
    decimals: Option<usize>,

    /// Treat iteration capped geodesics as errors
    #[clap(long)]
    strict: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// The files to operate on (stdin if none given)
    args: Vec<PathBuf>,
}

struct Worker {
    operation: Operation,
    ellps: Ellipsoid,
    shifts: DatumShifts,
    from: Datum,
    to: Datum,
    decimals: usize,
    strict: bool,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("This is TRACE");
    debug!("{:#?}", options);

    let resources = Resources::default();
    debug!("resource paths: {:?}", resources.paths());

    let ellps = resources
        .ellipsoid(&options.ellps)
        .with_context(|| format!("unknown ellipsoid '{}'", options.ellps))?;
    let worker = Worker {
        operation: options.operation,
        ellps,
        shifts: resources.datum_shifts()?,
        from: datum(&resources, &options.from)?,
        to: datum(&resources, &options.to)?,
        decimals: options.decimals.unwrap_or(match options.operation {
            Operation::Cart | Operation::Geo | Operation::Datum => 9,
            _ => 10,
        }),
        strict: options.strict,
    };

    if options.args.is_empty() {
        let stdin = std::io::stdin();
        worker.process(stdin.lock())?;
        return Ok(());
    }

    for path in &options.args {
        let file = std::fs::File::open(path)
            .with_context(|| format!("cannot open {}", path.display()))?;
        worker.process(BufReader::new(file))?;
    }
    Ok(())
}

// Built-in datums, or datums on a user defined ellipsoid of the same name
fn datum(resources: &Resources, name: &str) -> Result<Datum, anyhow::Error> {
    if let Ok(datum) = Datum::named(name) {
        return Ok(datum);
    }
    let ellps = resources
        .ellipsoid(name)
        .with_context(|| format!("unknown datum '{name}'"))?;
    Ok(Datum::new(name, ellps))
}

impl Worker {
    fn process(&self, input: impl BufRead) -> Result<(), anyhow::Error> {
        for (lineno, line) in input.lines().enumerate() {
            let line = line?;
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }

            let args = line
                .split_whitespace()
                .map(|item| item.parse::<f64>())
                .collect::<Result<Vec<_>, _>>();
            let arity = self.operation.arity();
            let args = match args {
                Ok(args) if args.len() == arity => args,
                _ => {
                    warn!("line {}: expected {arity} numbers: {line}", lineno + 1);
                    continue;
                }
            };

            match self.compute(&args) {
                Ok(output) => println!("{output}"),
                Err(e) if self.strict => bail!("line {}: {e}", lineno + 1),
                Err(e) => warn!("line {}: {e}", lineno + 1),
            }
        }
        Ok(())
    }

    fn compute(&self, args: &[f64]) -> Result<String, Error> {
        let d = self.decimals;
        let output = match self.operation {
            Operation::Inverse => {
                let from = Coor3D::geo(args[0], args[1], 0.);
                let to = Coor3D::geo(args[2], args[3], 0.);
                let mut g = self.ellps.geodesic_inv(&from, &to)?;
                if self.strict {
                    g = g.converged()?;
                }
                trace!("{g:?}");
                let mark = if g.is_converged() { "" } else { "  # no convergence" };
                format!(
                    "{:.3$} {:.4$} {:.4$}{mark}",
                    g.distance, g.azimuth12, g.azimuth21, d.min(6), d
                )
            }
            Operation::Direct => {
                let from = Coor3D::geo(args[0], args[1], 0.);
                let mut g = self.ellps.geodesic_fwd(&from, args[2], args[3])?;
                if self.strict {
                    g = g.converged()?;
                }
                trace!("{g:?}");
                let mark = if g.is_converged() { "" } else { "  # no convergence" };
                format!(
                    "{:.3$} {:.3$} {:.3$}{mark}",
                    g.latitude, g.longitude, g.azimuth21, d
                )
            }
            Operation::Cart => {
                let cart = self.ellps.cartesian(&Coor3D::geo(args[0], args[1], args[2]));
                format!("{:.3$} {:.3$} {:.3$}", cart[0], cart[1], cart[2], d.min(6))
            }
            Operation::Geo => {
                let geo = self.ellps.geographic(&Coor3D::raw(args[0], args[1], args[2]));
                format!(
                    "{:.3$} {:.3$} {:.4$}",
                    geo.latitude(),
                    geo.longitude(),
                    geo.height(),
                    d,
                    d.min(6)
                )
            }
            Operation::Datum => {
                let geo = Coor3D::geo(args[0], args[1], args[2]);
                let shifted = self.shifts.shift(&geo, &self.from, &self.to)?;
                format!(
                    "{:.3$} {:.3$} {:.4$}",
                    shifted.latitude(),
                    shifted.longitude(),
                    shifted.height(),
                    d,
                    d.min(6)
                )
            }
            Operation::Dms => {
                let dms = dd_to_dms(args[0]);
                format!("{dms}")
            }
        };
        Ok(output)
    }
}
