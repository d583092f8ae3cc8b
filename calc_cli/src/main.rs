//! # CRT Calculator CLI
//!
//! Terminal front end for the Chinese Remainder Theorem solver.
//!
//! ```text
//! calc_cli 2:3 3:5 2:7          solve and show the steps
//! calc_cli --json -- -1:5 2:3   JSON outcome (use -- before negative values)
//! calc_cli --interactive        prompt for each congruence
//! calc_cli --equations          list the formulas used
//! ```
//!
//! Exit codes: 0 solved, 2 the input needs fixing, 1 internal failure.

mod cli;
mod logger;

use std::io::{self, BufRead, Write};
use std::process;

use anyhow::Context;
use calc_core::calculations::crt::{calculate, CrtOutcome};
use calc_core::equations::registry::{EquationCategory, ALL_EQUATIONS};
use calc_core::worksheet::{CrtWorksheet, RowField};
use clap::Parser;

use crate::cli::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if config.equations {
        print_equations();
        if !config.wants_prompt() && config.congruences.is_empty() {
            return Ok(());
        }
    }

    let outcome = if config.wants_prompt() {
        let mut sheet = CrtWorksheet::from_input(&config.input());
        sheet.settings = config.settings();
        prompt_rows(&mut sheet)?;
        sheet.calculate().clone()
    } else {
        calculate(&config.input(), &config.settings())
    };

    if config.json {
        let json = serde_json::to_string_pretty(&outcome).context("encoding outcome as JSON")?;
        println!("{json}");
    } else {
        print_outcome(&outcome);
    }

    if let Some(err) = outcome.error() {
        tracing::debug!(code = err.error_code(), "exiting with failure");
        process::exit(if err.is_user_correctable() { 2 } else { 1 });
    }
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush().context("flushing prompt")?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("reading from stdin")?;
    Ok(input.trim().to_string())
}

/// Ask for the row count, then every remainder and modulus.
fn prompt_rows(sheet: &mut CrtWorksheet) -> anyhow::Result<()> {
    println!("Chinese Remainder Theorem Calculator");
    println!("====================================");
    println!();

    let current = sheet.row_count();
    let wanted = loop {
        let answer = prompt(&format!("Number of congruences [{current}]: "))?;
        match cli::prompted_row_count(&answer, current) {
            Ok(count) => break count,
            Err(reason) => println!("  {reason}"),
        }
    };
    while sheet.row_count() < wanted {
        sheet.add_congruence();
    }
    while sheet.row_count() > wanted {
        sheet.remove_congruence(sheet.row_count() - 1)?;
    }

    for index in 0..sheet.row_count() {
        let entry = index + 1;
        let row = sheet.rows()[index].input.clone();
        let remainder = prompt(&format!("  a{entry} (remainder) [{}]: ", row.remainder))?;
        if !remainder.is_empty() {
            sheet.update(index, RowField::Remainder, remainder)?;
        }
        let modulus = prompt(&format!("  m{entry} (modulus) [{}]: ", row.modulus))?;
        if !modulus.is_empty() {
            sheet.update(index, RowField::Modulus, modulus)?;
        }
    }
    println!();
    Ok(())
}

fn print_outcome(outcome: &CrtOutcome) {
    println!("═══════════════════════════════════════");
    println!("  CHINESE REMAINDER THEOREM");
    println!("═══════════════════════════════════════");

    if !outcome.steps.is_empty() {
        println!();
        for line in outcome.step_lines() {
            println!("{line}");
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    match (outcome.solution(), outcome.error()) {
        (Some(solution), _) => {
            println!("  RESULT: {}", solution.congruence_text());
            println!("  General solution: {}", solution.general_solution());
        }
        (None, Some(err)) => {
            println!("  ERROR [{}]: {}", err.error_code(), err);
        }
        (None, None) => {}
    }
    println!("═══════════════════════════════════════");
}

fn print_equations() {
    let categories = [
        EquationCategory::Divisibility,
        EquationCategory::ModularArithmetic,
        EquationCategory::Combination,
    ];
    for category in categories {
        println!("{}", category.display_name());
        for equation in ALL_EQUATIONS {
            let meta = equation.metadata();
            if meta.category != category {
                continue;
            }
            println!("  {:<30} {}", meta.name, meta.formula_plain);
        }
        println!();
    }
}
