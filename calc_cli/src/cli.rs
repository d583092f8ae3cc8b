use calc_core::calculations::crt::{CongruenceInput, CrtInput, SolverSettings, MIN_CONGRUENCES};
use clap::Parser;

/// Most rows the interactive prompt will set up
pub const MAX_PROMPT_ROWS: usize = 64;

#[derive(Parser, Debug)]
#[command(name = "calc_cli")]
#[command(about = "Chinese Remainder Theorem calculator")]
pub struct CliConfig {
    /// Congruences as REMAINDER:MODULUS (or REMAINDER,MODULUS), e.g. 2:3 3:5 2:7
    #[arg(value_name = "R:M", value_parser = parse_congruence, allow_hyphen_values = true)]
    pub congruences: Vec<CongruenceInput>,

    #[arg(long, default_value = "CLI", help = "Label recorded with the calculation")]
    pub label: String,

    #[arg(long, help = "Print the full outcome as JSON")]
    pub json: bool,

    #[arg(long, help = "Report every pair of moduli that are not coprime")]
    pub all_violations: bool,

    #[arg(long, help = "Skip the step-by-step solution")]
    pub no_steps: bool,

    #[arg(long, short, help = "Prompt for congruences interactively")]
    pub interactive: bool,

    #[arg(long, help = "List the equations the solver uses and exit")]
    pub equations: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn settings(&self) -> SolverSettings {
        SolverSettings {
            report_all_violations: self.all_violations,
            record_steps: !self.no_steps,
        }
    }

    pub fn input(&self) -> CrtInput {
        CrtInput::new(self.label.clone(), self.congruences.clone())
    }

    /// Prompt mode when asked for, or when there is nothing else to do
    pub fn wants_prompt(&self) -> bool {
        self.interactive || (self.congruences.is_empty() && !self.equations)
    }
}

/// Split `R:M` or `R,M` into raw text. The numbers are checked by the solver.
fn parse_congruence(text: &str) -> Result<CongruenceInput, String> {
    let (remainder, modulus) = text
        .split_once([':', ','])
        .ok_or_else(|| format!("expected REMAINDER:MODULUS, got '{text}'"))?;
    Ok(CongruenceInput::new(remainder.trim(), modulus.trim()))
}

/// Row count from the prompt answer.
///
/// Blank or unreadable answers keep `current`, counts above
/// [`MAX_PROMPT_ROWS`] are refused, and small ones are raised to two.
pub fn prompted_row_count(answer: &str, current: usize) -> Result<usize, String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(current);
    }
    match answer.parse::<usize>() {
        Ok(count) if count > MAX_PROMPT_ROWS => Err(format!(
            "at most {MAX_PROMPT_ROWS} congruences can be entered here, got {count}"
        )),
        Ok(count) => Ok(count.max(MIN_CONGRUENCES)),
        Err(_) => Ok(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_congruences() {
        let config = CliConfig::try_parse_from(["calc_cli", "2:3", "3,5", "2:7"]).unwrap();
        assert_eq!(config.congruences.len(), 3);
        assert_eq!(config.congruences[1], CongruenceInput::new("3", "5"));
        assert!(!config.wants_prompt());
        assert_eq!(config.settings(), SolverSettings::default());
    }

    #[test]
    fn test_negative_remainder_after_separator() {
        let config = CliConfig::try_parse_from(["calc_cli", "--json", "--", "-1:5", "2:3"]).unwrap();
        assert!(config.json);
        assert_eq!(config.congruences[0], CongruenceInput::new("-1", "5"));
    }

    #[test]
    fn test_missing_separator_rejected() {
        assert!(CliConfig::try_parse_from(["calc_cli", "23"]).is_err());
    }

    #[test]
    fn test_flags_map_to_settings() {
        let config = CliConfig::try_parse_from(["calc_cli", "--all-violations", "--no-steps", "1:4", "3:6"]).unwrap();
        let settings = config.settings();
        assert!(settings.report_all_violations);
        assert!(!settings.record_steps);
        assert_eq!(config.input().label, "CLI");
    }

    #[test]
    fn test_prompt_mode() {
        assert!(CliConfig::try_parse_from(["calc_cli"]).unwrap().wants_prompt());
        assert!(CliConfig::try_parse_from(["calc_cli", "-i"]).unwrap().wants_prompt());
        assert!(!CliConfig::try_parse_from(["calc_cli", "--equations"]).unwrap().wants_prompt());
    }

    #[test]
    fn test_prompted_row_count() {
        assert_eq!(prompted_row_count("", 3), Ok(3));
        assert_eq!(prompted_row_count("abc", 3), Ok(3));
        assert_eq!(prompted_row_count("1", 3), Ok(2));
        assert_eq!(prompted_row_count(" 5 ", 2), Ok(5));
        assert_eq!(prompted_row_count("64", 2), Ok(64));
        assert!(prompted_row_count("65", 2).is_err());
        // Larger than usize: unreadable, keeps the current count
        assert_eq!(prompted_row_count("99999999999999999999999999", 2), Ok(2));
    }
}
