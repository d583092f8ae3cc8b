//! # Calculations
//!
//! This module contains the calculator logic. Each calculation follows the
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, raw text as typed)
//! - `*Solution` / `*Outcome` - Results (JSON-serializable)
//! - `calculate(input, settings)` - Pure calculation function
//!
//! All types are designed for front-end consumption:
//! - Clean JSON serialization, big integers as decimal strings
//! - Structured error responses
//! - Step narration as data, rendered on demand
//!
//! ## Available Calculations
//!
//! - [`crt`] - Chinese Remainder Theorem solver
//! - [`steps`] - Step-by-step narration shared by the solvers

pub mod crt;
pub mod steps;

// Re-export commonly used types
pub use crt::{
    calculate, solve, solve_with_steps, verify, Congruence, CongruenceInput, CrtInput, CrtOutcome, CrtSolution,
    SolutionResult, SolverSettings,
};
pub use steps::{render_steps, SolutionStep};
