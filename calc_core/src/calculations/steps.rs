//! # Step-by-Step Narration
//!
//! Structured record of what the CRT solver did, in the order it did it.
//! Each step names the concrete values involved so a front end can print
//! them verbatim without recomputing anything.
//!
//! Steps are data first: [`SolutionStep::lines`] renders the display text,
//! and the JSON form keeps every number as a decimal string.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::steps::SolutionStep;
//! use num_bigint::BigInt;
//!
//! let step = SolutionStep::PairGcd {
//!     first: BigInt::from(3),
//!     second: BigInt::from(5),
//!     gcd: BigInt::from(1),
//! };
//! assert_eq!(step.to_string(), "gcd(3, 5) = 1");
//! ```

use std::fmt;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// One narrated step of a CRT solve.
///
/// `entry` fields are 1-indexed positions in the input list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolutionStep {
    /// An accepted congruence, with its remainder before and after normalization
    Congruence {
        entry: usize,
        #[serde(with = "crate::bigint_serde")]
        original: BigInt,
        #[serde(with = "crate::bigint_serde")]
        normalized: BigInt,
        #[serde(with = "crate::bigint_serde")]
        modulus: BigInt,
    },

    /// Start of the coprimality check
    CoprimalityHeader,

    /// gcd of one pair of moduli
    PairGcd {
        #[serde(with = "crate::bigint_serde")]
        first: BigInt,
        #[serde(with = "crate::bigint_serde")]
        second: BigInt,
        #[serde(with = "crate::bigint_serde")]
        gcd: BigInt,
    },

    /// Every pair passed
    AllCoprime,

    /// M = product of all moduli
    Product {
        #[serde(with = "crate::bigint_serde::vec")]
        moduli: Vec<BigInt>,
        #[serde(with = "crate::bigint_serde")]
        product: BigInt,
    },

    /// Start of the per-congruence terms
    TermHeader,

    /// M_i, y_i and the contribution a_i × M_i × y_i for one congruence
    Term {
        entry: usize,
        #[serde(with = "crate::bigint_serde")]
        remainder: BigInt,
        #[serde(with = "crate::bigint_serde")]
        modulus: BigInt,
        #[serde(with = "crate::bigint_serde")]
        combined_modulus: BigInt,
        #[serde(with = "crate::bigint_serde")]
        partial_product: BigInt,
        #[serde(with = "crate::bigint_serde")]
        inverse: BigInt,
        #[serde(with = "crate::bigint_serde")]
        contribution: BigInt,
    },

    /// Sum of all contributions
    Sum {
        #[serde(with = "crate::bigint_serde")]
        total: BigInt,
    },

    /// Final reduction of the sum into [0, M)
    Normalize {
        #[serde(with = "crate::bigint_serde")]
        total: BigInt,
        #[serde(with = "crate::bigint_serde")]
        modulus: BigInt,
        #[serde(with = "crate::bigint_serde")]
        x: BigInt,
    },
}

impl SolutionStep {
    /// Display lines for this step. Most steps are a single line; a term is four.
    pub fn lines(&self) -> Vec<String> {
        match self {
            SolutionStep::Congruence {
                entry,
                original,
                normalized,
                modulus,
            } => {
                if original == normalized {
                    vec![format!("Congruence {entry}: x ≡ {normalized} (mod {modulus})")]
                } else {
                    vec![format!(
                        "Congruence {entry}: x ≡ {original} (mod {modulus}) normalized to x ≡ {normalized} (mod {modulus})"
                    )]
                }
            }
            SolutionStep::CoprimalityHeader => vec!["Checking pairwise coprimality of moduli:".to_string()],
            SolutionStep::PairGcd { first, second, gcd } => vec![format!("gcd({first}, {second}) = {gcd}")],
            SolutionStep::AllCoprime => vec!["All moduli are pairwise coprime ✓".to_string()],
            SolutionStep::Product { moduli, product } => {
                let factors: Vec<String> = moduli.iter().map(|m| m.to_string()).collect();
                vec![format!(
                    "Step 1: Calculate M = product of all moduli = {} = {product}",
                    factors.join(" × ")
                )]
            }
            SolutionStep::TermHeader => vec!["Step 2: For each congruence, calculate:".to_string()],
            SolutionStep::Term {
                entry: i,
                remainder,
                modulus,
                combined_modulus,
                partial_product,
                inverse,
                contribution,
            } => vec![
                format!("For congruence {i} (x ≡ {remainder} mod {modulus}):"),
                format!("  M{i} = M / m{i} = {combined_modulus} / {modulus} = {partial_product}"),
                format!("  y{i} = M{i}⁻¹ mod m{i} = {partial_product}⁻¹ mod {modulus} = {inverse}"),
                format!(
                    "  Contribution: a{i} × M{i} × y{i} = {remainder} × {partial_product} × {inverse} = {contribution}"
                ),
            ],
            SolutionStep::Sum { total } => vec![format!("Step 3: Sum all contributions = {total}")],
            SolutionStep::Normalize { total, modulus, x } => {
                vec![format!("Step 4: Normalize: x = {total} mod {modulus} = {x}")]
            }
        }
    }

    /// Whether a front end should put a blank line before this step
    pub fn starts_section(&self) -> bool {
        matches!(
            self,
            SolutionStep::CoprimalityHeader
                | SolutionStep::Product { .. }
                | SolutionStep::TermHeader
                | SolutionStep::Term { .. }
                | SolutionStep::Sum { .. }
        )
    }
}

impl fmt::Display for SolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Flatten a step list into display lines, with blank separators between sections.
pub fn render_steps(steps: &[SolutionStep]) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, step) in steps.iter().enumerate() {
        if idx > 0 && step.starts_section() {
            lines.push(String::new());
        }
        lines.extend(step.lines());
    }
    lines
}
