//! # calc_core - Chinese Remainder Theorem Calculation Engine
//!
//! `calc_core` is the computational heart of the CRT calculator. It solves
//! systems of congruences exactly, explains each step, and reports bad input
//! as structured errors. All inputs and outputs are JSON-serializable, so the
//! same engine can sit behind a web page, a CLI or an API.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Exact**: Arbitrary-precision integers, no floating point
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::crt::{calculate, CrtInput, SolverSettings};
//!
//! let input = CrtInput::from_pairs("Sunzi", &[("2", "3"), ("3", "5"), ("2", "7")]);
//! let outcome = calculate(&input, &SolverSettings::default());
//!
//! assert_eq!(outcome.status_line(), "x ≡ 23 (mod 105)");
//! for line in outcome.step_lines() {
//!     println!("{line}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The CRT solver and its step narration
//! - [`equations`] - Number theory formulas and the equation registry
//! - [`worksheet`] - Editable calculator state
//! - [`errors`] - Structured error types
//! - [`bigint_serde`] - Decimal-string JSON encoding for big integers

pub mod bigint_serde;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod worksheet;

// Re-export commonly used types at crate root for convenience
pub use calculations::crt::{calculate, solve, CrtInput, CrtOutcome, CrtSolution, SolverSettings};
pub use errors::{CalcError, CalcResult};
pub use worksheet::CrtWorksheet;
