//! # Worksheet State
//!
//! The `CrtWorksheet` struct holds everything a calculator front end shows:
//! the congruence rows being edited, solver settings and the outcome of the
//! last calculation. It replaces per-widget view state with one explicit,
//! serializable value.
//!
//! ## Structure
//!
//! ```text
//! CrtWorksheet
//! ├── meta: WorksheetMetadata (version, title, timestamps)
//! ├── settings: SolverSettings (violation reporting, step recording)
//! ├── rows: Vec<CongruenceRow> (always at least two)
//! └── outcome: Option<CrtOutcome> (last calculation, cleared on edit)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::worksheet::{CrtWorksheet, RowField};
//!
//! let mut sheet = CrtWorksheet::new("Homework 3");
//! sheet.update(0, RowField::Remainder, "1").unwrap();
//! sheet.update(0, RowField::Modulus, "3").unwrap();
//! sheet.update(1, RowField::Remainder, "2").unwrap();
//! sheet.update(1, RowField::Modulus, "5").unwrap();
//!
//! let outcome = sheet.calculate();
//! assert_eq!(outcome.status_line(), "x ≡ 7 (mod 15)");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::crt::{calculate, CongruenceInput, CrtInput, CrtOutcome, SolverSettings, MIN_CONGRUENCES};
use crate::errors::{CalcError, CalcResult};

/// Current schema version for serialized worksheets
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Which text box of a row to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    Remainder,
    Modulus,
}

/// One editable congruence row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CongruenceRow {
    /// Stable identity across inserts and removals
    pub id: Uuid,

    #[serde(flatten)]
    pub input: CongruenceInput,
}

impl CongruenceRow {
    fn new(input: CongruenceInput) -> Self {
        CongruenceRow {
            id: Uuid::new_v4(),
            input,
        }
    }

    fn empty() -> Self {
        CongruenceRow::new(CongruenceInput::default())
    }
}

/// Calculator worksheet: rows being edited plus the last result.
///
/// Loading pads the rows to two and drops a stored outcome that the rows
/// and settings no longer produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "StoredWorksheet")]
pub struct CrtWorksheet {
    /// Worksheet metadata (version, title, timestamps)
    pub meta: WorksheetMetadata,

    /// Solver options used by [`CrtWorksheet::calculate`]
    pub settings: SolverSettings,

    rows: Vec<CongruenceRow>,

    outcome: Option<CrtOutcome>,
}

impl CrtWorksheet {
    /// Create a worksheet with two empty rows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use calc_core::worksheet::CrtWorksheet;
    ///
    /// let sheet = CrtWorksheet::new("Scratch");
    /// assert_eq!(sheet.row_count(), 2);
    /// assert!(sheet.outcome().is_none());
    /// ```
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        CrtWorksheet {
            meta: WorksheetMetadata {
                version: SCHEMA_VERSION.to_string(),
                title: title.into(),
                created: now,
                modified: now,
            },
            settings: SolverSettings::default(),
            rows: (0..MIN_CONGRUENCES).map(|_| CongruenceRow::empty()).collect(),
            outcome: None,
        }
    }

    /// Create a worksheet pre-filled from an input, padded to two rows.
    pub fn from_input(input: &CrtInput) -> Self {
        let mut sheet = CrtWorksheet::new(input.label.clone());
        sheet.rows = input
            .congruences
            .iter()
            .cloned()
            .map(CongruenceRow::new)
            .collect();
        sheet.pad_rows();
        sheet
    }

    /// Rows in display order
    pub fn rows(&self) -> &[CongruenceRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Append an empty row. Returns its id.
    pub fn add_congruence(&mut self) -> Uuid {
        let row = CongruenceRow::empty();
        let id = row.id;
        self.rows.push(row);
        self.edited();
        id
    }

    /// Remove the row at `index` (0-based).
    ///
    /// Fails with `MinimumRows` when only two rows remain.
    pub fn remove_congruence(&mut self, index: usize) -> CalcResult<CongruenceRow> {
        self.check_index(index)?;
        if self.rows.len() <= MIN_CONGRUENCES {
            return Err(CalcError::MinimumRows {
                minimum: MIN_CONGRUENCES,
            });
        }
        let row = self.rows.remove(index);
        self.edited();
        Ok(row)
    }

    /// Position of the row with the given id.
    pub fn position(&self, id: &Uuid) -> Option<usize> {
        self.rows.iter().position(|row| &row.id == id)
    }

    /// Replace the text of one field of the row at `index` (0-based).
    pub fn update(&mut self, index: usize, field: RowField, text: impl Into<String>) -> CalcResult<()> {
        self.check_index(index)?;
        let input = &mut self.rows[index].input;
        match field {
            RowField::Remainder => input.remainder = text.into(),
            RowField::Modulus => input.modulus = text.into(),
        }
        self.edited();
        Ok(())
    }

    /// Reset to two empty rows with no result. Settings are kept.
    pub fn clear(&mut self) {
        self.rows = (0..MIN_CONGRUENCES).map(|_| CongruenceRow::empty()).collect();
        self.edited();
    }

    /// Current rows as a calculation input.
    pub fn to_input(&self) -> CrtInput {
        CrtInput::new(
            self.meta.title.clone(),
            self.rows.iter().map(|row| row.input.clone()).collect(),
        )
    }

    /// Run the solver on the current rows and keep the outcome.
    ///
    /// A failed calculation replaces any earlier solution, so an error is
    /// never shown next to a stale answer.
    pub fn calculate(&mut self) -> &CrtOutcome {
        let outcome = calculate(&self.to_input(), &self.settings);
        tracing::debug!(
            title = %self.meta.title,
            rows = self.rows.len(),
            success = outcome.is_success(),
            "worksheet calculated"
        );
        self.touch();
        self.outcome.insert(outcome)
    }

    /// Outcome of the last calculation, if the rows have not changed since.
    pub fn outcome(&self) -> Option<&CrtOutcome> {
        self.outcome.as_ref()
    }

    /// Text for a status bar: the solution, the error, or a prompt.
    pub fn status_line(&self) -> String {
        match &self.outcome {
            Some(outcome) => outcome.status_line(),
            None => "Enter remainders and moduli, then calculate".to_string(),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    fn pad_rows(&mut self) {
        while self.rows.len() < MIN_CONGRUENCES {
            self.rows.push(CongruenceRow::empty());
        }
    }

    fn edited(&mut self) {
        self.outcome = None;
        self.touch();
    }

    fn check_index(&self, index: usize) -> CalcResult<()> {
        if index >= self.rows.len() {
            return Err(CalcError::RowNotFound {
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }
}

impl Default for CrtWorksheet {
    fn default() -> Self {
        CrtWorksheet::new("")
    }
}

/// Serialized form of a worksheet, checked on the way in.
#[derive(Deserialize)]
struct StoredWorksheet {
    meta: WorksheetMetadata,
    #[serde(default)]
    settings: SolverSettings,
    #[serde(default)]
    rows: Vec<CongruenceRow>,
    #[serde(default)]
    outcome: Option<CrtOutcome>,
}

impl From<StoredWorksheet> for CrtWorksheet {
    fn from(stored: StoredWorksheet) -> Self {
        let mut sheet = CrtWorksheet {
            meta: stored.meta,
            settings: stored.settings,
            rows: stored.rows,
            outcome: None,
        };
        sheet.pad_rows();

        if let Some(outcome) = stored.outcome {
            if outcome == calculate(&sheet.to_input(), &sheet.settings) {
                sheet.outcome = Some(outcome);
            } else {
                tracing::debug!(title = %sheet.meta.title, "dropping stored outcome that does not match the rows");
            }
        }
        sheet
    }
}

/// Worksheet metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Worksheet title, used as the calculation label
    pub title: String,

    /// When the worksheet was created
    pub created: DateTime<Utc>,

    /// When the worksheet was last modified
    pub modified: DateTime<Utc>,
}
