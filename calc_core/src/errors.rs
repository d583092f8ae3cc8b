//! # Error Types
//!
//! Structured error types for calc_core. These errors are designed to be
//! informative for both humans and programs: each variant carries the
//! offending values so a front end can highlight the right input row, and
//! the `Display` text is the message a calculator page shows to the user.
//!
//! Big integers are carried as decimal strings so errors stay JSON-friendly.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn require_two(count: usize) -> CalcResult<()> {
//!     if count < 2 {
//!         return Err(CalcError::not_enough_congruences(count));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_two(1).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Which half of a congruence entry failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CongruenceField {
    Remainder,
    Modulus,
}

impl std::fmt::Display for CongruenceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CongruenceField::Remainder => write!(f, "remainder"),
            CongruenceField::Modulus => write!(f, "modulus"),
        }
    }
}

/// A pair of moduli sharing a factor greater than 1.
///
/// `first_entry` and `second_entry` are 1-indexed positions in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoprimeViolation {
    pub first_entry: usize,
    pub second_entry: usize,
    pub first: String,
    pub second: String,
    pub gcd: String,
}

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by front ends and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Fewer than two congruences were supplied
    #[error("Please enter at least 2 congruences (got {provided})")]
    NotEnoughCongruences { provided: usize },

    /// A remainder or modulus is not an integer
    #[error("Please enter valid integers for congruence {entry} ({field} '{value}' is not an integer)")]
    InvalidInteger {
        entry: usize,
        field: CongruenceField,
        value: String,
    },

    /// A modulus is zero or negative
    #[error("Modulus {entry} must be positive (got {value})")]
    NonPositiveModulus { entry: usize, value: String },

    /// Two moduli share a common factor, so the CRT does not apply.
    ///
    /// `first`, `second` and `gcd` describe the first violating pair;
    /// `violations` lists every pair found (just the first one unless all
    /// violations were requested).
    #[error("Moduli {first} and {second} are not coprime (gcd = {gcd}). The Chinese Remainder Theorem requires all moduli to be pairwise coprime.")]
    ModuliNotPairwiseCoprime {
        first: String,
        second: String,
        gcd: String,
        violations: Vec<CoprimeViolation>,
    },

    /// Internal invariant violation: pairwise coprime moduli always yield an inverse
    #[error("Cannot find modular inverse of {value} modulo {modulus}")]
    NoModularInverse { value: String, modulus: String },

    /// Worksheet row index out of range
    #[error("Row {index} does not exist (worksheet has {len} rows)")]
    RowNotFound { index: usize, len: usize },

    /// Worksheet cannot shrink below the minimum number of rows
    #[error("A worksheet needs at least {minimum} congruences")]
    MinimumRows { minimum: usize },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create a NotEnoughCongruences error
    pub fn not_enough_congruences(provided: usize) -> Self {
        CalcError::NotEnoughCongruences { provided }
    }

    /// Create an InvalidInteger error for a 1-indexed entry
    pub fn invalid_integer(entry: usize, field: CongruenceField, value: impl Into<String>) -> Self {
        CalcError::InvalidInteger {
            entry,
            field,
            value: value.into(),
        }
    }

    /// Create a NonPositiveModulus error for a 1-indexed entry
    pub fn non_positive_modulus(entry: usize, value: impl ToString) -> Self {
        CalcError::NonPositiveModulus {
            entry,
            value: value.to_string(),
        }
    }

    /// Create a ModuliNotPairwiseCoprime error from the violations found.
    ///
    /// Returns `None` when `violations` is empty.
    pub fn not_coprime(violations: Vec<CoprimeViolation>) -> Option<Self> {
        let head = violations.first()?.clone();
        Some(CalcError::ModuliNotPairwiseCoprime {
            first: head.first,
            second: head.second,
            gcd: head.gcd,
            violations,
        })
    }

    /// Create a NoModularInverse error
    pub fn no_modular_inverse(value: impl ToString, modulus: impl ToString) -> Self {
        CalcError::NoModularInverse {
            value: value.to_string(),
            modulus: modulus.to_string(),
        }
    }

    /// Check if the user can fix this error by editing their input
    pub fn is_user_correctable(&self) -> bool {
        !matches!(
            self,
            CalcError::NoModularInverse { .. } | CalcError::SerializationError { .. }
        )
    }

    /// 1-indexed input entry the error points at, if any
    pub fn entry(&self) -> Option<usize> {
        match self {
            CalcError::InvalidInteger { entry, .. } | CalcError::NonPositiveModulus { entry, .. } => {
                Some(*entry)
            }
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::NotEnoughCongruences { .. } => "NOT_ENOUGH_CONGRUENCES",
            CalcError::InvalidInteger { .. } => "INVALID_INTEGER",
            CalcError::NonPositiveModulus { .. } => "NON_POSITIVE_MODULUS",
            CalcError::ModuliNotPairwiseCoprime { .. } => "MODULI_NOT_COPRIME",
            CalcError::NoModularInverse { .. } => "NO_MODULAR_INVERSE",
            CalcError::RowNotFound { .. } => "ROW_NOT_FOUND",
            CalcError::MinimumRows { .. } => "MINIMUM_ROWS",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
