//! # Number Theory Formulas
//!
//! Integer building blocks for the Chinese Remainder Theorem: greatest common
//! divisor, Bézout coefficients, modular inverses and canonical residues.
//!
//! Everything operates on [`BigInt`], so products of many moduli never lose
//! precision.
//!
//! ## Notation
//!
//! - `a mod m` = flooring remainder, same sign as `m`
//! - `⌊a/b⌋` = flooring division
//! - `g` = gcd(a, b), always non-negative from [`gcd`]
//!
//! ## References
//!
//! - Knuth, TAOCP Vol. 2, §4.5.2 (Euclid's algorithm)
//! - Knuth, TAOCP Vol. 2, §4.3.2 (Chinese Remainder Theorem)

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

// =============================================================================
// DIVISION
// =============================================================================

/// Flooring division ⌊a/b⌋.
///
/// Rounds toward negative infinity, unlike the `/` operator which truncates.
///
/// # Panics
/// Panics if `b` is zero.
#[inline]
pub fn floor_div(a: &BigInt, b: &BigInt) -> BigInt {
    a.div_floor(b)
}

/// Flooring remainder `a mod b`, with the sign of `b`.
///
/// Satisfies `a == b * floor_div(a, b) + floor_mod(a, b)`.
///
/// # Panics
/// Panics if `b` is zero.
#[inline]
pub fn floor_mod(a: &BigInt, b: &BigInt) -> BigInt {
    a.mod_floor(b)
}

/// Canonical residue of `a` modulo `m`, in `[0, m)`.
///
/// # Formula
/// - normalize(a, m) = ((a mod m) + m) mod m
///
/// With a flooring `mod` the outer step is a no-op for `m > 0`, but it keeps
/// the result canonical whatever remainder convention produced the input.
///
/// # Arguments
/// * `a` - Any integer, negative allowed
/// * `m` - Modulus, must be positive
///
/// # Panics
/// Panics if `m` is zero.
pub fn normalize(a: &BigInt, m: &BigInt) -> BigInt {
    floor_mod(&(floor_mod(a, m) + m), m)
}

// =============================================================================
// GREATEST COMMON DIVISOR
// =============================================================================

/// Greatest common divisor by repeated remainder.
///
/// # Algorithm
/// ```text
/// while b != 0: (a, b) = (b, a mod b)
/// return |a|
/// ```
///
/// Defined for any integers, including negatives and zero. Returns 0 only
/// when both inputs are 0.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = &a % &b;
        a = std::mem::replace(&mut b, r);
    }
    a.abs()
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `a*x + b*y = g` and `g = gcd(a, b)`.
///
/// # Definition
/// ```text
/// egcd(a, 0) = (a, 1, 0)
/// egcd(a, b) = (g, y1, x1 - ⌊a/b⌋·y1)   where (g, x1, y1) = egcd(b, a mod b)
/// ```
///
/// Evaluated bottom-up instead of by recursion so very long descents cannot
/// exhaust the stack; the coefficients are identical to the recursive form.
/// `g` carries the sign the descent produces, so it is non-negative whenever
/// `b > 0`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    // Quotients of the descent, innermost last.
    let mut quotients = Vec::new();
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let (q, r) = a.div_mod_floor(&b);
        quotients.push(q);
        a = std::mem::replace(&mut b, r);
    }

    // Unwind: base case (a, 1, 0), then (g, y1, x1 - q*y1) per level.
    let mut x = BigInt::one();
    let mut y = BigInt::zero();
    for q in quotients.iter().rev() {
        let next_y = &x - q * &y;
        x = std::mem::replace(&mut y, next_y);
    }
    (a, x, y)
}

/// Multiplicative inverse of `a` modulo `m`.
///
/// # Formula
/// - (g, x, _) = extended_gcd(a, m)
/// - a⁻¹ = ((x mod m) + m) mod m, when g = 1
///
/// # Returns
/// `Some(y)` with `y` in `[0, m)` and `(a*y) mod m == 1 mod m`, or `None`
/// when `a` and `m` share a factor.
///
/// # Arguments
/// * `a` - Value to invert
/// * `m` - Modulus, must be positive
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Option<BigInt> {
    let (g, x, _) = extended_gcd(a, m);
    if !g.is_one() {
        return None;
    }
    Some(normalize(&x, m))
}

// =============================================================================
// PAIRWISE COPRIMALITY
// =============================================================================

/// gcd of one pair of moduli, by 0-indexed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairGcd {
    pub i: usize,
    pub j: usize,
    pub gcd: BigInt,
}

impl PairGcd {
    pub fn is_coprime(&self) -> bool {
        self.gcd.is_one()
    }
}

/// Lazily computes gcd(m_i, m_j) for every pair `i < j`, in row-major order.
pub fn pairwise_gcds(moduli: &[BigInt]) -> impl Iterator<Item = PairGcd> + '_ {
    (0..moduli.len()).flat_map(move |i| {
        (i + 1..moduli.len()).map(move |j| PairGcd {
            i,
            j,
            gcd: gcd(&moduli[i], &moduli[j]),
        })
    })
}

/// The pairs a coprimality check visits, in row-major order.
///
/// Ends right after the first pair that is not coprime unless `collect_all`
/// is set, in which case every pair is visited. No non-coprime pair among the
/// yielded ones means the moduli are pairwise coprime.
pub fn coprimality_scan(moduli: &[BigInt], collect_all: bool) -> impl Iterator<Item = PairGcd> + '_ {
    let mut pairs = pairwise_gcds(moduli);
    let mut stopped = false;
    std::iter::from_fn(move || {
        if stopped {
            return None;
        }
        let pair = pairs.next()?;
        stopped = !collect_all && !pair.is_coprime();
        Some(pair)
    })
}
