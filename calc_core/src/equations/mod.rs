//! # Number Theory Equations
//!
//! This module contains the integer formulas used by the CRT calculator.
//! Having equations in one place enables:
//! - Easy verification against textbook definitions
//! - Documentation of remainder and division conventions
//! - Consistent implementation across calculations
//!
//! ## Modules
//!
//! - [`number_theory`] - gcd, extended gcd, modular inverse, normalization
//! - [`registry`] - Equation metadata and usage tracking for step listings
//!
//! ## Conventions
//!
//! - **Division**: flooring (rounds toward negative infinity)
//! - **Remainder**: flooring, takes the sign of the divisor
//! - **Residues**: canonical representatives lie in `[0, m)`

pub mod number_theory;
pub mod registry;

// Re-export commonly used items
pub use number_theory::{
    coprimality_scan,
    extended_gcd,
    floor_div,
    floor_mod,
    gcd,
    mod_inverse,
    normalize,
    pairwise_gcds,
    PairGcd,
};

pub use registry::{Equation, EquationCategory, EquationMetadata, EquationTracker, ALL_EQUATIONS};
