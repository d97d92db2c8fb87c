//! Main point matrix, ancestral and crossroads derivations.
//!
//! All arithmetic is non-negative integer modulo 22. The slots form a
//! dependency chain (`D` needs `A` and `B`, `L` needs `D`, ...), so they
//! are computed as one ordered sequence of bindings — the order is data
//! dependency, not style.

use crate::pgd::result::{Ancestral, Crossroads, MainPoints};
use crate::pgd::{Gender, PgdError};

/// Everything here is closed under this modulus: a defined slot is
/// always in [0, 21].
pub const MODULUS: u64 = 22;

/// Splits a `DD.MM.YYYY` date string into its three integer components.
/// The year may carry any number of digits. Range validation (day 1-31,
/// month 1-12) is the caller's responsibility; this only rejects input
/// that does not decompose into three integers.
pub fn decompose_date(date: &str) -> Result<(u64, u64, u64), PgdError> {
    let malformed = || PgdError::MalformedDate(date.to_string());

    let mut parts = date.split('.');
    let day = parts.next().ok_or_else(malformed)?;
    let month = parts.next().ok_or_else(malformed)?;
    let year = parts.next().ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }

    Ok((
        day.parse().map_err(|_| malformed())?,
        month.parse().map_err(|_| malformed())?,
        year.parse().map_err(|_| malformed())?,
    ))
}

/// Sum of the decimal digits of `n`.
pub fn digit_sum(mut n: u64) -> u64 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Computes the 16-slot main matrix plus the ancestral and crossroads
/// aggregates for one (day, month, year, gender) tuple.
///
/// An unrecognized gender is not an error: the gender-conditioned slots
/// (`M/N/O/P`, `ROPP`, `RCO`, the whole crossroads block) simply come
/// back absent.
pub fn compute_points(
    x1: u64,
    x2: u64,
    x3: u64,
    gender: Gender,
) -> (MainPoints, Ancestral, Crossroads) {
    let a = x1 % MODULUS;
    let b = x2; // month is used verbatim, not reduced
    let v = digit_sum(x3) % MODULUS;
    let g = (a + b + v) % MODULUS;
    let d = (a + b) % MODULUS;
    let l = (MODULUS - d) % MODULUS;
    let e = (b + v) % MODULUS;
    let k = (MODULUS - e) % MODULUS;
    let j = (d + e) % MODULUS;
    let z = (d.abs_diff(e) + j) % MODULUS;
    let i = (j + z) % MODULUS;
    let y = (a + v + z) % MODULUS;

    let (m, n, o, p) = match gender {
        Gender::Female => {
            let m = (g + i + l) % MODULUS;
            let n = (m + y) % MODULUS;
            (Some(m), Some(n), None, None)
        }
        Gender::Male => {
            let o = (g + i + k) % MODULUS;
            let p = (o + y) % MODULUS;
            (None, None, Some(o), Some(p))
        }
        Gender::Other => (None, None, None, None),
    };

    let rsd = j;
    let ropp = match gender {
        Gender::Female => Some((l + e) % MODULUS),
        Gender::Male => Some((d + k) % MODULUS),
        Gender::Other => None,
    };
    let rco = ropp.map(|ropp| (rsd + ropp) % MODULUS);
    let rus = i;

    // Second-tier point: N for female, P for male. The crossroads slots
    // are absolute differences of values already in [0, 21] — no extra
    // modulo is applied, except to the ICO sum.
    let tier = match gender {
        Gender::Female => n,
        Gender::Male => p,
        Gender::Other => None,
    };
    let isd = tier.map(|t| rsd.abs_diff(t));
    let iopp = match (ropp, tier) {
        (Some(ropp), Some(t)) => Some(ropp.abs_diff(t)),
        _ => None,
    };
    let ius = tier.map(|t| rus.abs_diff(t));
    let ico = match (isd, iopp) {
        (Some(isd), Some(iopp)) => Some((isd + iopp) % MODULUS),
        _ => None,
    };

    let main_points = MainPoints {
        a: a as u8,
        b: b as u8,
        v: v as u8,
        g: g as u8,
        d: d as u8,
        l: l as u8,
        e: e as u8,
        k: k as u8,
        j: j as u8,
        z: z as u8,
        i: i as u8,
        y: y as u8,
        m: m.map(|v| v as u8),
        n: n.map(|v| v as u8),
        o: o.map(|v| v as u8),
        p: p.map(|v| v as u8),
    };
    let ancestral = Ancestral {
        rsd: rsd as u8,
        ropp: ropp.map(|v| v as u8),
        rco: rco.map(|v| v as u8),
        rus: rus as u8,
    };
    let crossroads = Crossroads {
        isd: isd.map(|v| v as u8),
        iopp: iopp.map(|v| v as u8),
        ico: ico.map(|v| v as u8),
        ius: ius.map(|v| v as u8),
    };

    (main_points, ancestral, crossroads)
}
