//! Vehicle parameter inspection
//!
//! Parameters come from the PARM records of a log. Listing supports glob-style
//! filtering (`*`, `?`, `[...]`), matched case-insensitively; the CLI defaults the
//! pattern to `*`.

use crate::Result;
use glob::{MatchOptions, Pattern};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter name to value, ordered by name
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterSet {
    values: BTreeMap<String, f64>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter. Logs record every change, so the last value wins.
    pub fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// Parameters whose name matches `pattern`, sorted by name
pub fn filter_by_pattern<'a>(
    parameters: &'a ParameterSet,
    pattern: &str,
) -> Result<Vec<(&'a str, f64)>> {
    let pattern = Pattern::new(pattern)?;
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };
    Ok(parameters
        .iter()
        .filter(|(name, _)| pattern.matches_with(name, options))
        .collect())
}

/// One line of the parameter dump: name in a 16 character column, then the value
pub fn format_parameter_line(name: &str, value: f64) -> String {
    format!("{:<16.16} {:.6}", name, value)
}

/// Result of checking a parameter against an expectation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleOutcome {
    Pass(f64),
    Fail(f64),
    NotFound,
}

impl RuleOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, RuleOutcome::Pass(_))
    }
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleOutcome::Pass(value) => write!(f, "{:?} - OK", value),
            RuleOutcome::Fail(value) => write!(f, "{:?} - Warning!", value),
            RuleOutcome::NotFound => write!(f, "not found in log"),
        }
    }
}

/// Evaluates `predicate` against the named parameter
pub fn check_named_rule<F>(parameters: &ParameterSet, name: &str, predicate: F) -> RuleOutcome
where
    F: Fn(f64) -> bool,
{
    match parameters.get(name) {
        Some(value) if predicate(value) => RuleOutcome::Pass(value),
        Some(value) => RuleOutcome::Fail(value),
        None => RuleOutcome::NotFound,
    }
}

/// A parameter expected to hold an exact value
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRule {
    pub name: String,
    pub label: String,
    pub expected: f64,
}

impl ParameterRule {
    pub fn new(name: &str, label: &str, expected: f64) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            expected,
        }
    }

    /// Parses `NAME=VALUE` as given on the command line
    pub fn parse(spec: &str) -> Option<Self> {
        let (name, value) = spec.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let expected = value.trim().parse::<f64>().ok()?;
        Some(Self::new(name, name, expected))
    }

    pub fn check(&self, parameters: &ParameterSet) -> RuleOutcome {
        check_named_rule(parameters, &self.name, |value| value == self.expected)
    }
}

/// Checks applied to every log: servo auto trim on, stall prevention off
pub fn default_rules() -> Vec<ParameterRule> {
    vec![
        ParameterRule::new("SERVO_AUTO_TRIM", "Servo auto trim", 1.0),
        ParameterRule::new("STALL_PREVENTION", "Stall prevention", 0.0),
    ]
}
