//! # Equation Registry
//!
//! Central registry of the formulas behind the CRT calculator. Each equation
//! has metadata: a plain-text formula, variable definitions, a category and
//! the function that implements it.
//!
//! The solver records which equations it applied in an [`EquationTracker`],
//! so a front end can print a "formulas used" panel next to the steps.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::ModularInverse, "Congruence 1");
//!
//! let meta = Equation::ModularInverse.metadata();
//! assert_eq!(meta.source_function, "mod_inverse");
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// gcd and Bézout coefficients
    Divisibility,
    /// Residues and inverses
    ModularArithmetic,
    /// Combining congruences into one solution
    Combination,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Divisibility => "Divisibility",
            EquationCategory::ModularArithmetic => "Modular Arithmetic",
            EquationCategory::Combination => "Combination",
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "M", "m_i", "y_i")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str) -> Self {
        Self { symbol, description }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a registered equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the CRT solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// gcd(a, b) by repeated remainder
    Gcd,
    /// a·x + b·y = gcd(a, b)
    ExtendedGcd,
    /// ((a mod m) + m) mod m
    Normalization,
    /// y = a⁻¹ mod m
    ModularInverse,
    /// gcd(m_i, m_j) = 1 for all i < j
    PairwiseCoprimality,
    /// M = m_1 · m_2 · … · m_k
    ModulusProduct,
    /// M_i = M / m_i
    PartialProduct,
    /// x = (Σ a_i · M_i · y_i) mod M
    CrtCombination,
}

/// Every registered equation, in listing order.
pub const ALL_EQUATIONS: &[Equation] = &[
    Equation::Gcd,
    Equation::ExtendedGcd,
    Equation::Normalization,
    Equation::ModularInverse,
    Equation::PairwiseCoprimality,
    Equation::ModulusProduct,
    Equation::PartialProduct,
    Equation::CrtCombination,
];

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::Gcd => EquationMetadata {
                name: "Greatest Common Divisor",
                description: "Largest integer dividing both operands, by Euclid's algorithm",
                formula_plain: "while b != 0: (a, b) = (b, a mod b); gcd = |a|",
                variables: vec![
                    Variable::new("a", "First operand"),
                    Variable::new("b", "Second operand"),
                ],
                category: EquationCategory::Divisibility,
                source_function: "gcd",
            },
            Equation::ExtendedGcd => EquationMetadata {
                name: "Extended Euclidean Algorithm",
                description: "Bézout coefficients x, y with a·x + b·y = gcd(a, b)",
                formula_plain: "egcd(a, 0) = (a, 1, 0); egcd(a, b) = (g, y1, x1 - floor(a/b)·y1)",
                variables: vec![
                    Variable::new("g", "gcd(a, b)"),
                    Variable::new("x", "Coefficient of a"),
                    Variable::new("y", "Coefficient of b"),
                ],
                category: EquationCategory::Divisibility,
                source_function: "extended_gcd",
            },
            Equation::Normalization => EquationMetadata {
                name: "Remainder Normalization",
                description: "Canonical residue of a remainder in [0, m)",
                formula_plain: "a' = ((a mod m) + m) mod m",
                variables: vec![
                    Variable::new("a", "Remainder as entered"),
                    Variable::new("m", "Modulus"),
                ],
                category: EquationCategory::ModularArithmetic,
                source_function: "normalize",
            },
            Equation::ModularInverse => EquationMetadata {
                name: "Modular Inverse",
                description: "Multiplicative inverse modulo m via the extended Euclidean algorithm",
                formula_plain: "y = a⁻¹ mod m, (a·y) mod m = 1",
                variables: vec![
                    Variable::new("a", "Value to invert"),
                    Variable::new("m", "Modulus"),
                    Variable::new("y", "Inverse in [0, m)"),
                ],
                category: EquationCategory::ModularArithmetic,
                source_function: "mod_inverse",
            },
            Equation::PairwiseCoprimality => EquationMetadata {
                name: "Pairwise Coprimality",
                description: "Every pair of moduli must share no factor greater than 1",
                formula_plain: "gcd(m_i, m_j) = 1 for all i < j",
                variables: vec![Variable::new("m_i", "Modulus of congruence i")],
                category: EquationCategory::Divisibility,
                source_function: "coprimality_scan",
            },
            Equation::ModulusProduct => EquationMetadata {
                name: "Combined Modulus",
                description: "Product of all moduli; the solution is unique modulo M",
                formula_plain: "M = m_1 × m_2 × … × m_k",
                variables: vec![
                    Variable::new("M", "Combined modulus"),
                    Variable::new("m_i", "Modulus of congruence i"),
                ],
                category: EquationCategory::Combination,
                source_function: "solve",
            },
            Equation::PartialProduct => EquationMetadata {
                name: "Partial Product",
                description: "Product of every modulus except m_i",
                formula_plain: "M_i = M / m_i",
                variables: vec![
                    Variable::new("M_i", "Partial product for congruence i"),
                    Variable::new("M", "Combined modulus"),
                ],
                category: EquationCategory::Combination,
                source_function: "solve",
            },
            Equation::CrtCombination => EquationMetadata {
                name: "CRT Combination",
                description: "Sum of per-congruence contributions reduced modulo M",
                formula_plain: "x = (Σ a_i × M_i × y_i) mod M",
                variables: vec![
                    Variable::new("a_i", "Normalized remainder of congruence i"),
                    Variable::new("M_i", "Partial product"),
                    Variable::new("y_i", "Inverse of M_i modulo m_i"),
                    Variable::new("x", "Solution in [0, M)"),
                ],
                category: EquationCategory::Combination,
                source_function: "solve",
            },
        }
    }
}

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// One application of an equation during a solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Where it was applied (e.g., "Congruence 2")
    pub context: String,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collects equation usages during a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }
}
