//! src/core/types.rs
//!
//! Core type definitions for the number input
//!
//! This module defines the values that flow between the widget and the
//! bound application state:
//! - `Value`: loosely typed candidate value as handed over by a host
//! - `ModelValue`: the canonical bound number (finite or absent, never NaN)
//! - `Precision`: number of fractional digits shown and kept
//! - `Bound`: a resolved minimum or maximum limit
//! - `Rule` / `ValidityRecord`: per-rule pass/fail state
//! - `FocusState`: which representation is currently on screen

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Upper limit for fractional digits, same ceiling as `toFixed` style formatters
pub const MAX_PRECISION: u32 = 20;

/// Loosely typed value handed over by the host
///
/// Hosts bind arbitrary data to an input, so every conversion and validation
/// entry point accepts a `Value` rather than a concrete number.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Nothing bound
    #[default]
    Null,
    /// Boolean flag
    Bool(bool),
    /// Any IEEE-754 number, including non-finite ones
    Number(f64),
    /// Text as typed or configured
    Text(String),
    /// Sequence of values
    List(Vec<Value>),
    /// Key/value record
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the number this value stands for, if it is a finite one
    ///
    /// Numeric text (surrounding whitespace allowed) counts as a number,
    /// which is how attribute strings such as `min="0"` arrive.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Value::Text(text) => parse_finite(text),
            _ => None,
        }
    }

    /// Renders the value the way a dynamic host stringifies it
    ///
    /// Used when a grammar check has to look at non-text values. Finite
    /// numbers are always written positionally, never with an exponent:
    /// `1e21` becomes `"1000000000000000000000"` and so passes the number
    /// grammar, where a JavaScript host would write `"1e+21"`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) if n.is_nan() => "NaN".to_string(),
            Value::Number(n) if n.is_infinite() => {
                if *n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
            }
            Value::Number(n) => n.to_string(),
            Value::Text(text) => text.clone(),
            Value::List(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => other.to_text(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Map(_) => "[object Object]".to_string(),
        }
    }
}

/// Parses a finite decimal number, rejecting `inf`/`nan` spellings
pub(crate) fn parse_finite(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<ModelValue> for Value {
    fn from(model: ModelValue) -> Self {
        match model.get() {
            Some(n) => Value::Number(n),
            None => Value::Null,
        }
    }
}

impl From<Precision> for Value {
    fn from(precision: Precision) -> Self {
        Value::Number(f64::from(precision.0))
    }
}

/// Canonical number bound to the application
///
/// Either a finite number or absent. Construction funnels every number
/// through [`ModelValue::new`], so NaN and infinities can never be stored.
/// Negative zero is normalised to zero.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub struct ModelValue(Option<f64>);

impl ModelValue {
    /// No valid number
    pub const ABSENT: ModelValue = ModelValue(None);

    /// Wraps a number, mapping non-finite input to absent
    pub fn new(n: f64) -> Self {
        if !n.is_finite() {
            return Self::ABSENT;
        }
        // -0.0 == 0.0, this drops the sign bit
        Self(Some(if n == 0.0 { 0.0 } else { n }))
    }

    pub fn get(self) -> Option<f64> {
        self.0
    }

    pub fn is_absent(self) -> bool {
        self.0.is_none()
    }

    /// Plain, unformatted text for editing: `"930000"`, `"12.5"` or `""`
    pub fn editable_text(self) -> String {
        self.0.map(|n| n.to_string()).unwrap_or_default()
    }
}

impl From<Option<f64>> for ModelValue {
    fn from(n: Option<f64>) -> Self {
        n.map(ModelValue::new).unwrap_or_default()
    }
}

impl From<ModelValue> for Option<f64> {
    fn from(model: ModelValue) -> Self {
        model.0
    }
}

impl From<&Value> for ModelValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => ModelValue::new(*n),
            _ => ModelValue::ABSENT,
        }
    }
}

impl fmt::Display for ModelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{}", n),
            None => write!(f, "absent"),
        }
    }
}

/// Number of fractional digits (defaults to 0)
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Precision(u32);

impl Precision {
    /// Creates a precision, clamped to [`MAX_PRECISION`]
    pub fn new(digits: u32) -> Self {
        Self(digits.min(MAX_PRECISION))
    }

    /// Resolves a configured precision value
    ///
    /// Anything that is not a non-negative finite number falls back to 0.
    /// Fractions are truncated.
    pub fn resolve(value: &Value) -> Self {
        match value.as_number() {
            Some(n) if n >= 0.0 => Self::new(n.trunc().min(f64::from(MAX_PRECISION)) as u32),
            _ => Self::default(),
        }
    }

    pub fn digits(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved minimum or maximum limit
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
pub struct Bound(f64);

impl Bound {
    /// Resolves a configured bound, `None` when it is not a finite number
    ///
    /// `None` disables the corresponding check.
    pub fn resolve(value: &Value) -> Option<Self> {
        value.as_number().map(Self)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation rules owned by the number input
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    /// Value follows the HTML5 number grammar
    Number,
    /// Value is greater than or equal to the minimum
    Min,
    /// Value is less than or equal to the maximum
    Max,
}

impl Rule {
    /// Key under which the rule is recorded in a validity record
    pub fn name(self) -> &'static str {
        match self {
            Rule::Number => "number",
            Rule::Min => "min",
            Rule::Max => "max",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-rule pass/fail state of one input
///
/// Keyed by rule name rather than [`Rule`] so host-side rules such as
/// `required` can live in the same record.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidityRecord(BTreeMap<String, bool>);

impl ValidityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, rule: &str, valid: bool) {
        self.0.insert(rule.to_string(), valid);
    }

    /// Recorded state of a rule, `None` if it never ran
    pub fn get(&self, rule: &str) -> Option<bool> {
        self.0.get(rule).copied()
    }

    /// Rules that never ran count as passing
    pub fn is_valid(&self, rule: &str) -> bool {
        self.get(rule).unwrap_or(true)
    }

    pub fn all_valid(&self) -> bool {
        self.0.values().all(|valid| *valid)
    }

    /// Names of failing rules, in name order
    pub fn failing(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, valid)| !**valid)
            .map(|(rule, _)| rule.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(rule, valid)| (rule.as_str(), *valid))
    }
}

/// Which representation the input currently shows
///
/// - `Unfocused`: formatted view (`"930,000"`)
/// - `Focused`: raw editable number (`"930000"`)
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FocusState {
    #[default]
    Unfocused,
    Focused,
}

impl fmt::Display for FocusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusState::Unfocused => write!(f, "unfocused"),
            FocusState::Focused => write!(f, "focused"),
        }
    }
}
