use std::fmt;

/// An angle split into degrees, minutes and seconds-with-decimals.
/// The sign is carried separately, so angles between -1° and 0°
/// can be represented.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Dms {
    /// Back to degrees-with-decimals
    #[must_use]
    pub fn to_dd(&self) -> f64 {
        let dd = self.degrees as f64 + (self.minutes as f64 + self.seconds / 60.) / 60.;
        if self.negative {
            return -dd;
        }
        dd
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(
            f,
            "{sign}{}°{:02}'{:06.3}\"",
            self.degrees, self.minutes, self.seconds
        )
    }
}

/// Transformation from degrees, minutes and seconds-with-decimals
/// to degrees-with-decimals. The sign is taken from the degree-component,
/// including negative zero, so `dms_to_dd(-0., 30., 0.)` is -0.5.
/// Minutes and seconds are taken as unsigned.
#[must_use]
pub fn dms_to_dd(d: f64, m: f64, s: f64) -> f64 {
    let dd = d.abs() + (m.abs() + s.abs() / 60.) / 60.;
    if d.is_sign_negative() {
        return -dd;
    }
    dd
}

/// Transformation from degrees-with-decimals to degrees, minutes and
/// seconds-with-decimals.
#[must_use]
pub fn dd_to_dms(dd: f64) -> Dms {
    let negative = dd < 0.;
    let dd = dd.abs();
    let mut d = dd.floor();
    let mm = (dd - d) * 60.;
    let mut m = mm.floor();
    let mut s = (mm - m) * 60.;

    // Carry, in case of floating point overshoot
    if s >= 60. {
        s -= 60.;
        m += 1.;
    }
    if m >= 60. {
        m -= 60.;
        d += 1.;
    }

    Dms {
        negative,
        degrees: d as u32,
        minutes: m as u32,
        seconds: s,
    }
}

/// Normalize an azimuth in degrees to the interval [0, 360).
/// Negative zero is returned as positive zero.
#[must_use]
pub fn normalize_azimuth(azimuth: f64) -> f64 {
    let azimuth = azimuth.rem_euclid(360.);
    // rem_euclid may round up to the modulus itself for tiny negative input
    if azimuth >= 360. {
        return 0.;
    }
    azimuth + 0.
}

// ----- Tests ---------------------------------------------------------------------
