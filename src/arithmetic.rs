use num_bigint::{BigInt, BigUint};
use num_traits::One;

use crate::error::{Error, Result};

/// 640320^3 / 24, the denominator growth of each Chudnovsky term.
const C3_OVER_24: u64 = 10_939_058_860_032_000;
const LINEAR_A: u64 = 13_591_409;
const LINEAR_B: u64 = 545_140_134;
/// Decimal digits gained per series term.
const DIGITS_PER_TERM: f64 = 14.181_647_462_725_477;

/// Partial products of the series over the term range `[a, b)`.
struct Split {
    p: BigInt,
    q: BigInt,
    t: BigInt,
}

/// Evaluates the Chudnovsky series over `[a, b)` by binary splitting.
fn split(a: u64, b: u64) -> Split {
    if b - a == 1 {
        let (p, q) = if a == 0 {
            (BigInt::one(), BigInt::one())
        } else {
            let p = BigInt::from(6 * a - 5) * BigInt::from(2 * a - 1) * BigInt::from(6 * a - 1);
            let q = BigInt::from(a).pow(3) * BigInt::from(C3_OVER_24);
            (p, q)
        };
        let mut t = &p * BigInt::from(LINEAR_A + LINEAR_B * a);
        if a & 1 == 1 {
            t = -t;
        }
        return Split { p, q, t };
    }

    let m = (a + b) / 2;
    let left = split(a, m);
    let right = split(m, b);
    Split {
        p: &left.p * &right.p,
        q: &left.q * &right.q,
        t: &right.q * &left.t + &left.p * &right.t,
    }
}

/// Returns `floor(pi * 10^decimals)` up to a few units in the last place.
///
/// Callers that need every digit exact must ask for guard digits beyond the
/// ones they keep.
pub fn pi_fixed(decimals: usize) -> Result<BigUint> {
    let exponent = u32::try_from(decimals)
        .map_err(|_| Error::DigitSource(format!("precision of {decimals} decimals is too large")))?;
    let terms = (decimals as f64 / DIGITS_PER_TERM) as u64 + 1;

    let Split { q, t, .. } = split(0, terms);

    let one = BigUint::from(10u32).pow(exponent);
    let sqrt_c = (BigUint::from(10_005u32) * &one * &one).sqrt();

    let scaled = q * BigInt::from(426_880u32) * BigInt::from(sqrt_c) / t;
    scaled
        .to_biguint()
        .ok_or_else(|| Error::DigitSource("series evaluated to a negative value".into()))
}

/// Decimal digits of pi with `decimals` places after the leading `3`, no point.
pub fn pi_string(decimals: usize) -> Result<String> {
    Ok(pi_fixed(decimals)?.to_str_radix(10))
}
