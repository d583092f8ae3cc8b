//! # Chinese Remainder Theorem Calculation
//!
//! Solves a system of congruences
//!
//! ```text
//! x ≡ a_1 (mod m_1)
//! x ≡ a_2 (mod m_2)
//! ...
//! x ≡ a_k (mod m_k)
//! ```
//!
//! for the unique `x` in `[0, M)`, `M = m_1 × … × m_k`, when the moduli are
//! pairwise coprime.
//!
//! ## Procedure
//!
//! 1. At least two congruences
//! 2. Every entry parses as an integer and every modulus is positive
//! 3. Remainders are normalized into `[0, m_i)`
//! 4. Moduli are pairwise coprime
//! 5. `M = ∏ m_i`
//! 6. `M_i = M / m_i`, `y_i = M_i⁻¹ mod m_i`, contribution `a_i × M_i × y_i`
//! 7. `x = (Σ contributions) mod M`
//!
//! Validation stops at the first problem and no partial solution is ever
//! returned alongside an error.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::crt::{calculate, CrtInput, SolverSettings};
//!
//! let input = CrtInput::from_pairs("Worked example", &[("2", "3"), ("3", "5"), ("2", "7")]);
//! let outcome = calculate(&input, &SolverSettings::default());
//!
//! let solution = outcome.solution().unwrap();
//! assert_eq!(solution.congruence_text(), "x ≡ 23 (mod 105)");
//! assert_eq!(solution.general_solution(), "x = 23 + 105k");
//! ```

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::calculations::steps::{render_steps, SolutionStep};
use crate::equations::number_theory::{coprimality_scan, mod_inverse, normalize};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult, CongruenceField, CoprimeViolation};

/// Smallest system the CRT calculator accepts.
pub const MIN_CONGRUENCES: usize = 2;

// ============================================================================
// Settings
// ============================================================================

/// Solver options.
///
/// ## JSON Example
///
/// ```json
/// { "report_all_violations": false, "record_steps": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Keep checking after the first non-coprime pair and report every one
    pub report_all_violations: bool,

    /// Record the step-by-step narration
    pub record_steps: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            report_all_violations: false,
            record_steps: true,
        }
    }
}

// ============================================================================
// Input Types
// ============================================================================

/// One congruence as raw text, exactly as typed into the calculator form.
///
/// ## JSON Example
///
/// ```json
/// { "remainder": "-1", "modulus": "5" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CongruenceInput {
    pub remainder: String,
    pub modulus: String,
}

impl CongruenceInput {
    pub fn new(remainder: impl Into<String>, modulus: impl Into<String>) -> Self {
        CongruenceInput {
            remainder: remainder.into(),
            modulus: modulus.into(),
        }
    }

    /// Parse both fields. `entry` is the 1-indexed position used in errors.
    ///
    /// The sign of the modulus is not checked here.
    pub fn parse(&self, entry: usize) -> CalcResult<Congruence> {
        let remainder = parse_integer(&self.remainder)
            .ok_or_else(|| CalcError::invalid_integer(entry, CongruenceField::Remainder, self.remainder.trim()))?;
        let modulus = parse_integer(&self.modulus)
            .ok_or_else(|| CalcError::invalid_integer(entry, CongruenceField::Modulus, self.modulus.trim()))?;
        Ok(Congruence { remainder, modulus })
    }
}

/// Parse a decimal integer: surrounding whitespace, an optional sign, digits.
///
/// Anything else (decimals, exponents, digit separators, trailing text) is
/// rejected.
pub fn parse_integer(text: &str) -> Option<BigInt> {
    let text = text.trim();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    if text.starts_with('-') {
        Some(-magnitude)
    } else {
        Some(magnitude)
    }
}

/// A parsed congruence `x ≡ remainder (mod modulus)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Congruence {
    #[serde(with = "crate::bigint_serde")]
    pub remainder: BigInt,
    #[serde(with = "crate::bigint_serde")]
    pub modulus: BigInt,
}

impl Congruence {
    /// Build a congruence. The modulus is checked when the system is solved.
    ///
    /// # Example
    ///
    /// ```rust
    /// use calc_core::calculations::crt::Congruence;
    /// use num_bigint::BigInt;
    ///
    /// let c = Congruence::new(-1, 5);
    /// assert_eq!(c.normalized().remainder, BigInt::from(4));
    /// ```
    pub fn new(remainder: impl Into<BigInt>, modulus: impl Into<BigInt>) -> Self {
        Congruence {
            remainder: remainder.into(),
            modulus: modulus.into(),
        }
    }

    /// Same congruence with the remainder moved into `[0, modulus)`.
    pub fn normalized(&self) -> Congruence {
        Congruence {
            remainder: normalize(&self.remainder, &self.modulus),
            modulus: self.modulus.clone(),
        }
    }

    /// Whether `x` satisfies this congruence.
    pub fn is_satisfied_by(&self, x: &BigInt) -> bool {
        normalize(x, &self.modulus) == normalize(&self.remainder, &self.modulus)
    }
}

/// Input parameters for a CRT calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Sunzi",
///   "congruences": [
///     { "remainder": "2", "modulus": "3" },
///     { "remainder": "3", "modulus": "5" },
///     { "remainder": "2", "modulus": "7" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrtInput {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    /// Congruences in entry order
    pub congruences: Vec<CongruenceInput>,
}

impl CrtInput {
    pub fn new(label: impl Into<String>, congruences: Vec<CongruenceInput>) -> Self {
        CrtInput {
            label: label.into(),
            congruences,
        }
    }

    /// Convenience constructor from `(remainder, modulus)` text pairs.
    pub fn from_pairs(label: impl Into<String>, pairs: &[(&str, &str)]) -> Self {
        let congruences = pairs
            .iter()
            .map(|(remainder, modulus)| CongruenceInput::new(*remainder, *modulus))
            .collect();
        CrtInput::new(label, congruences)
    }

    /// Validate input parameters.
    ///
    /// Checks the entry count, then each entry in order: both fields parse,
    /// and the modulus is positive. Returns the parsed congruences.
    pub fn validate(&self) -> CalcResult<Vec<Congruence>> {
        check_arity(self.congruences.len())?;
        self.congruences
            .iter()
            .enumerate()
            .map(|(idx, raw)| parse_entry(idx + 1, raw))
            .collect()
    }
}

/// Parse one entry and check its modulus sign.
fn parse_entry(entry: usize, raw: &CongruenceInput) -> CalcResult<Congruence> {
    let parsed = raw.parse(entry)?;
    check_modulus(entry, &parsed)?;
    Ok(parsed)
}

fn check_arity(count: usize) -> CalcResult<()> {
    if count < MIN_CONGRUENCES {
        return Err(CalcError::not_enough_congruences(count));
    }
    Ok(())
}

fn check_modulus(entry: usize, congruence: &Congruence) -> CalcResult<()> {
    if !congruence.modulus.is_positive() {
        return Err(CalcError::non_positive_modulus(entry, &congruence.modulus));
    }
    Ok(())
}

// ============================================================================
// Result Types
// ============================================================================

/// The unique solution `x` modulo `modulus`.
///
/// ## JSON Example
///
/// ```json
/// { "x": "23", "modulus": "105" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrtSolution {
    /// Solution in `[0, modulus)`
    #[serde(with = "crate::bigint_serde")]
    pub x: BigInt,

    /// Product of all moduli (M)
    #[serde(with = "crate::bigint_serde")]
    pub modulus: BigInt,
}

impl CrtSolution {
    /// `x ≡ 23 (mod 105)`
    pub fn congruence_text(&self) -> String {
        format!("x ≡ {} (mod {})", self.x, self.modulus)
    }

    /// The solution family, `x = 23 + 105k`
    pub fn general_solution(&self) -> String {
        format!("x = {} + {}k", self.x, self.modulus)
    }

    /// Whether this solution satisfies every congruence.
    pub fn satisfies(&self, congruences: &[Congruence]) -> bool {
        verify(&self.x, congruences)
    }
}

/// Either a solution or the reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SolutionResult {
    Success(CrtSolution),
    Failure { error: CalcError },
}

impl From<CalcResult<CrtSolution>> for SolutionResult {
    fn from(result: CalcResult<CrtSolution>) -> Self {
        match result {
            Ok(solution) => SolutionResult::Success(solution),
            Err(error) => SolutionResult::Failure { error },
        }
    }
}

/// Full output of a calculation: the result plus how the solver got there.
///
/// Steps are kept on failure too, up to the point where validation stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrtOutcome {
    pub label: String,
    pub result: SolutionResult,
    pub steps: Vec<SolutionStep>,
    pub equations: EquationTracker,
}

impl CrtOutcome {
    pub fn solution(&self) -> Option<&CrtSolution> {
        match &self.result {
            SolutionResult::Success(solution) => Some(solution),
            SolutionResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&CalcError> {
        match &self.result {
            SolutionResult::Success(_) => None,
            SolutionResult::Failure { error } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.solution().is_some()
    }

    /// Steps rendered as display lines
    pub fn step_lines(&self) -> Vec<String> {
        render_steps(&self.steps)
    }

    /// One-line summary: the solution, or the error message
    pub fn status_line(&self) -> String {
        match &self.result {
            SolutionResult::Success(solution) => solution.congruence_text(),
            SolutionResult::Failure { error } => format!("Error: {error}"),
        }
    }

    /// Convert into a plain `Result`, dropping the narration.
    pub fn into_result(self) -> CalcResult<CrtSolution> {
        match self.result {
            SolutionResult::Success(solution) => Ok(solution),
            SolutionResult::Failure { error } => Err(error),
        }
    }
}

// ============================================================================
// Solver
// ============================================================================

/// Working state of one solve: the narration and the equations applied.
struct Solver<'a> {
    settings: &'a SolverSettings,
    steps: Vec<SolutionStep>,
    equations: EquationTracker,
}

impl<'a> Solver<'a> {
    fn new(settings: &'a SolverSettings) -> Self {
        Solver {
            settings,
            steps: Vec::new(),
            equations: EquationTracker::new(),
        }
    }

    fn step(&mut self, step: SolutionStep) {
        if self.settings.record_steps {
            self.steps.push(step);
        }
    }

    fn record(&mut self, equation: Equation, context: impl Into<String>) {
        if self.settings.record_steps {
            self.equations.record(equation, context);
        }
    }

    /// Check the modulus of one entry and normalize its remainder.
    fn accept(&mut self, entry: usize, congruence: &Congruence) -> CalcResult<Congruence> {
        check_modulus(entry, congruence)?;
        let normalized = congruence.normalized();
        self.record(Equation::Normalization, format!("Congruence {entry}"));
        self.step(SolutionStep::Congruence {
            entry,
            original: congruence.remainder.clone(),
            normalized: normalized.remainder.clone(),
            modulus: normalized.modulus.clone(),
        });
        Ok(normalized)
    }

    fn check_coprime(&mut self, system: &[Congruence]) -> CalcResult<()> {
        let moduli: Vec<BigInt> = system.iter().map(|c| c.modulus.clone()).collect();
        self.step(SolutionStep::CoprimalityHeader);

        let mut violations = Vec::new();
        for pair in coprimality_scan(&moduli, self.settings.report_all_violations) {
            self.record(Equation::Gcd, format!("gcd(m{}, m{})", pair.i + 1, pair.j + 1));
            self.step(SolutionStep::PairGcd {
                first: moduli[pair.i].clone(),
                second: moduli[pair.j].clone(),
                gcd: pair.gcd.clone(),
            });
            if !pair.is_coprime() {
                violations.push(CoprimeViolation {
                    first_entry: pair.i + 1,
                    second_entry: pair.j + 1,
                    first: moduli[pair.i].to_string(),
                    second: moduli[pair.j].to_string(),
                    gcd: pair.gcd.to_string(),
                });
            }
        }

        if let Some(err) = CalcError::not_coprime(violations) {
            tracing::debug!(code = err.error_code(), "moduli rejected: {err}");
            return Err(err);
        }
        self.record(Equation::PairwiseCoprimality, "all moduli");
        self.step(SolutionStep::AllCoprime);
        Ok(())
    }

    /// Steps 4-8: coprimality, product, terms, final reduction.
    fn combine(&mut self, system: &[Congruence]) -> CalcResult<CrtSolution> {
        self.check_coprime(system)?;

        let moduli: Vec<BigInt> = system.iter().map(|c| c.modulus.clone()).collect();
        let product: BigInt = moduli.iter().product();
        tracing::debug!(congruences = system.len(), modulus = %product, "combined modulus");
        self.record(Equation::ModulusProduct, "M");
        self.step(SolutionStep::Product {
            moduli,
            product: product.clone(),
        });

        self.step(SolutionStep::TermHeader);
        let mut total = BigInt::zero();
        for (idx, congruence) in system.iter().enumerate() {
            let entry = idx + 1;
            let partial = &product / &congruence.modulus;
            self.record(Equation::PartialProduct, format!("Congruence {entry}"));

            let inverse = match mod_inverse(&partial, &congruence.modulus) {
                Some(inverse) => inverse,
                None => {
                    tracing::warn!(%partial, modulus = %congruence.modulus, "no inverse for coprime moduli");
                    return Err(CalcError::no_modular_inverse(&partial, &congruence.modulus));
                }
            };
            self.record(Equation::ExtendedGcd, format!("Congruence {entry}"));
            self.record(Equation::ModularInverse, format!("Congruence {entry}"));

            let contribution = &congruence.remainder * &partial * &inverse;
            tracing::trace!(entry, %partial, %inverse, %contribution, "term");
            total += &contribution;

            self.step(SolutionStep::Term {
                entry,
                remainder: congruence.remainder.clone(),
                modulus: congruence.modulus.clone(),
                combined_modulus: product.clone(),
                partial_product: partial,
                inverse,
                contribution,
            });
        }

        let x = normalize(&total, &product);
        self.record(Equation::CrtCombination, "x");
        self.step(SolutionStep::Sum { total: total.clone() });
        self.step(SolutionStep::Normalize {
            total,
            modulus: product.clone(),
            x: x.clone(),
        });

        tracing::debug!(%x, modulus = %product, "solved");
        Ok(CrtSolution { x, modulus: product })
    }

    fn finish(self, label: &str, result: CalcResult<CrtSolution>) -> CrtOutcome {
        CrtOutcome {
            label: label.to_string(),
            result: result.into(),
            steps: self.steps,
            equations: self.equations,
        }
    }
}

/// Calculate the CRT solution for raw text input.
///
/// Never fails outright: validation and math problems come back as
/// [`SolutionResult::Failure`] inside the outcome, with the steps recorded
/// up to that point.
///
/// # Arguments
///
/// * `input` - Congruences as entered
/// * `settings` - Solver options
pub fn calculate(input: &CrtInput, settings: &SolverSettings) -> CrtOutcome {
    let mut solver = Solver::new(settings);
    let result = run_text(&mut solver, &input.congruences);
    if let Err(err) = &result {
        tracing::debug!(label = %input.label, code = err.error_code(), "calculation failed");
    }
    solver.finish(&input.label, result)
}

fn run_text(solver: &mut Solver<'_>, entries: &[CongruenceInput]) -> CalcResult<CrtSolution> {
    check_arity(entries.len())?;
    let mut system = Vec::with_capacity(entries.len());
    for (idx, raw) in entries.iter().enumerate() {
        let parsed = parse_entry(idx + 1, raw)?;
        system.push(solver.accept(idx + 1, &parsed)?);
    }
    solver.combine(&system)
}

/// Solve already-parsed congruences, returning the outcome with steps.
pub fn solve_with_steps(congruences: &[Congruence], settings: &SolverSettings) -> CrtOutcome {
    let mut solver = Solver::new(settings);
    let result = run_parsed(&mut solver, congruences);
    solver.finish("", result)
}

fn run_parsed(solver: &mut Solver<'_>, congruences: &[Congruence]) -> CalcResult<CrtSolution> {
    check_arity(congruences.len())?;
    let system = congruences
        .iter()
        .enumerate()
        .map(|(idx, congruence)| solver.accept(idx + 1, congruence))
        .collect::<CalcResult<Vec<_>>>()?;
    solver.combine(&system)
}

/// Solve already-parsed congruences.
///
/// # Returns
///
/// * `Ok(CrtSolution)` - `x` in `[0, M)` and `M`
/// * `Err(CalcError)` - fewer than two congruences, a non-positive modulus,
///   or moduli that are not pairwise coprime
///
/// # Example
///
/// ```rust
/// use calc_core::calculations::crt::{solve, Congruence};
///
/// use num_bigint::BigInt;
///
/// let system = vec![Congruence::new(1, 3), Congruence::new(2, 5)];
/// let solution = solve(&system).unwrap();
/// assert_eq!(solution.x, BigInt::from(7));
/// assert_eq!(solution.modulus, BigInt::from(15));
/// ```
pub fn solve(congruences: &[Congruence]) -> CalcResult<CrtSolution> {
    let settings = SolverSettings {
        record_steps: false,
        ..SolverSettings::default()
    };
    let mut solver = Solver::new(&settings);
    run_parsed(&mut solver, congruences)
}

/// Check that `x` satisfies every congruence: `x mod m_i == a_i mod m_i`.
///
/// Returns false if any modulus is not positive.
pub fn verify(x: &BigInt, congruences: &[Congruence]) -> bool {
    congruences
        .iter()
        .all(|c| c.modulus.is_positive() && c.is_satisfied_by(x))
}

/// Product of the moduli, or one for an empty list.
pub fn combined_modulus(congruences: &[Congruence]) -> BigInt {
    congruences
        .iter()
        .fold(BigInt::one(), |acc, c| acc * &c.modulus)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn system(pairs: &[(i64, i64)]) -> Vec<Congruence> {
        pairs
            .iter()
            .map(|&(r, m)| Congruence::new(r, m))
            .collect()
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("42"), Some(big(42)));
        assert_eq!(parse_integer("  -7 "), Some(big(-7)));
        assert_eq!(parse_integer("+3"), Some(big(3)));
        assert_eq!(parse_integer("007"), Some(big(7)));
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("-"), None);
        assert_eq!(parse_integer("x"), None);
        assert_eq!(parse_integer("3.5"), None);
        assert_eq!(parse_integer("12abc"), None);
        assert_eq!(parse_integer("1_000"), None);
        assert_eq!(parse_integer("--1"), None);
    }

    #[test]
    fn test_sunzi_example() {
        let solution = solve(&system(&[(2, 3), (3, 5), (2, 7)])).unwrap();
        assert_eq!(solution.x, big(23));
        assert_eq!(solution.modulus, big(105));
    }

    #[test]
    fn test_two_congruences() {
        let solution = solve(&system(&[(1, 3), (2, 5)])).unwrap();
        assert_eq!((solution.x, solution.modulus), (big(7), big(15)));
    }

    #[test]
    fn test_three_small_moduli() {
        let solution = solve(&system(&[(1, 2), (2, 3), (3, 5)])).unwrap();
        assert_eq!((solution.x, solution.modulus), (big(23), big(30)));
    }

    #[test]
    fn test_non_coprime_moduli() {
        let err = solve(&system(&[(1, 4), (3, 6)])).unwrap_err();
        match err {
            CalcError::ModuliNotPairwiseCoprime { first, second, gcd, .. } => {
                assert_eq!((first.as_str(), second.as_str(), gcd.as_str()), ("4", "6", "2"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_single_congruence() {
        let err = solve(&system(&[(5, 3)])).unwrap_err();
        assert_eq!(err, CalcError::not_enough_congruences(1));
    }

    #[test]
    fn test_invalid_remainder_text() {
        let input = CrtInput::from_pairs("bad", &[("x", "3"), ("1", "5")]);
        let outcome = calculate(&input, &SolverSettings::default());
        assert_eq!(
            outcome.error(),
            Some(&CalcError::invalid_integer(1, CongruenceField::Remainder, "x"))
        );
        assert!(outcome.solution().is_none());
    }

    #[test]
    fn test_non_positive_modulus_names_entry() {
        let err = solve(&system(&[(1, 3), (2, 0)])).unwrap_err();
        assert_eq!(err, CalcError::non_positive_modulus(2, 0));

        let input = CrtInput::from_pairs("neg", &[("1", "3"), ("2", "-5")]);
        assert_eq!(input.validate().unwrap_err(), CalcError::non_positive_modulus(2, -5));
    }

    #[test]
    fn test_entries_checked_in_order() {
        // Entry 1's bad modulus is reported before entry 2's bad text.
        let input = CrtInput::from_pairs("order", &[("1", "0"), ("oops", "5")]);
        let outcome = calculate(&input, &SolverSettings::default());
        assert_eq!(outcome.error(), Some(&CalcError::non_positive_modulus(1, 0)));
    }

    #[test]
    fn test_arity_checked_before_parsing() {
        let input = CrtInput::from_pairs("one", &[("x", "y")]);
        let outcome = calculate(&input, &SolverSettings::default());
        assert_eq!(outcome.error(), Some(&CalcError::not_enough_congruences(1)));
        assert!(outcome.steps.is_empty());
    }

    #[test]
    fn test_negative_remainder_matches_positive() {
        let settings = SolverSettings::default();
        let negative = solve_with_steps(&system(&[(-1, 5), (2, 3)]), &settings);
        let positive = solve_with_steps(&system(&[(4, 5), (2, 3)]), &settings);
        assert_eq!(negative.result, positive.result);
        assert_eq!(negative.steps[1..], positive.steps[1..]);
        assert_eq!(
            negative.step_lines()[0],
            "Congruence 1: x ≡ -1 (mod 5) normalized to x ≡ 4 (mod 5)"
        );
    }

    #[test]
    fn test_report_all_violations() {
        let congruences = system(&[(1, 4), (1, 6), (1, 9)]);
        let first_only = solve_with_steps(&congruences, &SolverSettings::default());
        match first_only.error() {
            Some(CalcError::ModuliNotPairwiseCoprime { violations, .. }) => assert_eq!(violations.len(), 1),
            other => panic!("unexpected result: {other:?}"),
        }

        let settings = SolverSettings {
            report_all_violations: true,
            ..SolverSettings::default()
        };
        let all = solve_with_steps(&congruences, &settings);
        match all.error() {
            Some(CalcError::ModuliNotPairwiseCoprime { first, second, violations, .. }) => {
                assert_eq!((first.as_str(), second.as_str()), ("4", "6"));
                let pairs: Vec<_> = violations.iter().map(|v| (v.first_entry, v.second_entry)).collect();
                assert_eq!(pairs, vec![(1, 2), (2, 3)]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_steps_for_worked_example() {
        let input = CrtInput::from_pairs("Sunzi", &[("2", "3"), ("3", "5"), ("2", "7")]);
        let outcome = calculate(&input, &SolverSettings::default());
        let lines = outcome.step_lines();

        assert_eq!(lines[0], "Congruence 1: x ≡ 2 (mod 3)");
        assert!(lines.contains(&"gcd(3, 7) = 1".to_string()));
        assert!(lines.contains(&"All moduli are pairwise coprime ✓".to_string()));
        assert!(lines.contains(&"Step 1: Calculate M = product of all moduli = 3 × 5 × 7 = 105".to_string()));
        assert!(lines.contains(&"  M2 = M / m2 = 105 / 5 = 21".to_string()));
        assert!(lines.contains(&"  y3 = M3⁻¹ mod m3 = 15⁻¹ mod 7 = 1".to_string()));
        assert!(lines.contains(&"  Contribution: a1 × M1 × y1 = 2 × 35 × 2 = 140".to_string()));
        // 140 + 63 + 30
        assert!(lines.contains(&"Step 3: Sum all contributions = 233".to_string()));
        assert_eq!(lines.last().unwrap(), "Step 4: Normalize: x = 233 mod 105 = 23");
    }

    #[test]
    fn test_steps_stop_at_failure() {
        let input = CrtInput::from_pairs("fail", &[("1", "4"), ("3", "6")]);
        let outcome = calculate(&input, &SolverSettings::default());
        assert!(!outcome.is_success());
        assert_eq!(outcome.steps.last(), Some(&SolutionStep::PairGcd {
            first: big(4),
            second: big(6),
            gcd: big(2),
        }));
        assert!(outcome.status_line().starts_with("Error: Moduli 4 and 6 are not coprime"));
    }

    #[test]
    fn test_record_steps_off() {
        let settings = SolverSettings {
            record_steps: false,
            ..SolverSettings::default()
        };
        let outcome = solve_with_steps(&system(&[(1, 3), (2, 5)]), &settings);
        assert!(outcome.is_success());
        assert!(outcome.steps.is_empty());
        assert!(outcome.equations.usages().is_empty());
    }

    #[test]
    fn test_equations_recorded() {
        let outcome = solve_with_steps(&system(&[(1, 3), (2, 5)]), &SolverSettings::default());
        let used = outcome.equations.unique_equations();
        assert!(used.contains(&Equation::ModularInverse));
        assert!(used.contains(&Equation::CrtCombination));
    }

    #[test]
    fn test_inverse_records_extended_gcd() {
        let outcome = solve_with_steps(&system(&[(2, 3), (3, 5), (2, 7)]), &SolverSettings::default());
        let inverse_steps: Vec<_> = outcome
            .equations
            .usages()
            .iter()
            .filter(|usage| usage.equation == Equation::ExtendedGcd)
            .map(|usage| usage.context.as_str())
            .collect();
        assert_eq!(inverse_steps, vec!["Congruence 1", "Congruence 2", "Congruence 3"]);
    }

    #[test]
    fn test_validate_matches_calculate() {
        let cases: [&[(&str, &str)]; 7] = [
            &[("1", "3")],
            &[("x", "3"), ("1", "5")],
            &[("1", "0"), ("oops", "5")],
            &[("1", "3"), ("2", "-5")],
            &[("1", " 7.5")],
            &[("1", "3"), ("2", "abc"), ("3", "0")],
            &[("1", "3"), ("2", "5")],
        ];
        for pairs in cases {
            let input = CrtInput::from_pairs("agree", pairs);
            let outcome = calculate(&input, &SolverSettings::default());
            match input.validate() {
                Ok(parsed) => {
                    assert!(outcome.is_success(), "{pairs:?}");
                    assert_eq!(parsed.len(), pairs.len());
                }
                Err(err) => assert_eq!(outcome.error(), Some(&err), "{pairs:?}"),
            }
        }
    }

    #[test]
    fn test_modulus_one() {
        let solution = solve(&system(&[(5, 1), (2, 3)])).unwrap();
        assert_eq!((solution.x, solution.modulus), (big(2), big(3)));
    }

    #[test]
    fn test_large_moduli_are_exact() {
        // Product far beyond 2^53
        let p = parse_integer("1000000007").unwrap();
        let q = parse_integer("998244353").unwrap();
        let r = parse_integer("2147483647").unwrap();
        let congruences = vec![
            Congruence::new(123456789, p.clone()),
            Congruence::new(-42, q.clone()),
            Congruence::new(7, r.clone()),
        ];
        let solution = solve(&congruences).unwrap();
        assert_eq!(solution.modulus, &p * &q * &r);
        assert_eq!(solution.modulus, combined_modulus(&congruences));
        assert!(solution.satisfies(&congruences));
    }

    #[test]
    fn test_verify() {
        let congruences = system(&[(2, 3), (3, 5), (2, 7)]);
        assert!(verify(&big(23), &congruences));
        assert!(verify(&big(128), &congruences));
        assert!(!verify(&big(24), &congruences));
        assert!(!verify(&big(0), &system(&[(0, 0)])));
    }

    #[test]
    fn test_outcome_serialization() {
        let input = CrtInput::from_pairs("json", &[("1", "3"), ("2", "5")]);
        let outcome = calculate(&input, &SolverSettings::default());
        let json = serde_json::to_string_pretty(&outcome).unwrap();
        assert!(json.contains("\"status\": \"success\""));
        assert!(json.contains("\"x\": \"7\""));
        assert!(json.contains("\"modulus\": \"15\""));

        let roundtrip: CrtOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, outcome);
    }

    #[test]
    fn test_failure_serialization() {
        let result = SolutionResult::Failure {
            error: CalcError::not_enough_congruences(1),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"status":"failure","error":{"type":"NotEnoughCongruences","details":{"provided":1}}}"#
        );
    }

    #[test]
    fn test_input_deserialization_defaults_label() {
        let input: CrtInput =
            serde_json::from_str(r#"{"congruences":[{"remainder":"1","modulus":"3"},{"remainder":"2","modulus":"5"}]}"#)
                .unwrap();
        assert_eq!(input.label, "");
        assert_eq!(input.validate().unwrap().len(), 2);
    }
}
