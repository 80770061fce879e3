//! Input configuration
//!
//! Everything a host passes to a bound number input:
//!
//! - **`model`**: initial bound number (absent when omitted)
//! - **`min` / `max`**: bounds, any JSON scalar; non-numeric disables the check
//! - **`precision`**: fractional digits, defaults to 0
//! - **`required`**: host-side rule layered on top of the number rules
//! - **`separators`**: grouping and decimal marks
//! - **`select_delay_ms`**: delay of the "select all" after focusing
//!
//! # Example
//!
//! ```
//! use number_input::config::InputConfig;
//!
//! let config = InputConfig::from_json(r#"{ "model": 930000, "min": 0, "max": "1000000" }"#)?;
//! let input = config.build_input()?;
//! assert_eq!(input.host().rendered(), "930,000");
//! # Ok::<(), number_input::config::ConfigError>(())
//! ```

pub mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::format::{GroupedFormatter, NumberFormatter, Separators};
use crate::core::host::{Attr, MemoryControl, Scope};
use crate::core::mediator::{NumberInput, SELECT_DELAY};
use crate::core::types::{ModelValue, Value};

pub use error::ConfigError;

/// Configuration of one bound number input
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// Initial model value
    pub model: Option<f64>,
    /// Minimum, as configured (not yet resolved)
    pub min: Value,
    /// Maximum, as configured (not yet resolved)
    pub max: Value,
    /// Fractional digits, as configured
    pub precision: Value,
    /// Whether the host requires a value
    pub required: bool,
    /// Grouping and decimal marks
    pub separators: Separators,
    /// Delay before the content is selected after focusing
    pub select_delay_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            model: None,
            min: Value::Null,
            max: Value::Null,
            precision: Value::Null,
            required: false,
            separators: Separators::default(),
            select_delay_ms: SELECT_DELAY.as_millis() as u64,
        }
    }
}

impl InputConfig {
    /// Loads and validates a JSON config file
    ///
    /// A leading `~` is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// `ConfigError::Parse` for malformed JSON and the errors of
    /// [`InputConfig::validate`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = path
            .to_str()
            .ok_or_else(|| ConfigError::InvalidPath(path.to_path_buf()))?;
        let expanded = PathBuf::from(shellexpand::tilde(raw).as_ref());

        if !expanded.exists() {
            return Err(ConfigError::NotFound(expanded));
        }

        let content = fs::read_to_string(&expanded)?;
        log::debug!("Loaded input config from {}", expanded.display());
        Self::from_json(&content)
    }

    /// Parses and validates a JSON config
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that can never be meant
    ///
    /// - a negative or non-finite numeric precision (non-numeric precision
    ///   is allowed and falls back to 0, like any unresolvable attribute)
    /// - identical separators, or separators that are digits or signs
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Value::Number(n) = self.precision {
            if !n.is_finite() || n < 0.0 {
                return Err(ConfigError::InvalidPrecision(n));
            }
        }

        let Separators { group, decimal } = self.separators;
        let clashes = |ch: char| ch.is_ascii_digit() || ch == '-' || ch == '+';
        if group == decimal || clashes(group) || clashes(decimal) {
            return Err(ConfigError::InvalidSeparators { group, decimal });
        }

        Ok(())
    }

    pub fn attributes(&self) -> Attributes {
        Attributes {
            min: self.min.clone(),
            max: self.max.clone(),
            precision: self.precision.clone(),
        }
    }

    pub fn formatter(&self) -> Rc<dyn NumberFormatter> {
        Rc::new(GroupedFormatter::new(self.separators))
    }

    pub fn select_delay(&self) -> Duration {
        Duration::from_millis(self.select_delay_ms)
    }

    /// In-memory form control holding the initial model
    pub fn control(&self) -> MemoryControl {
        MemoryControl::new(ModelValue::from(self.model)).with_required(self.required)
    }

    /// Validates the config and binds a number input to an in-memory control
    pub fn build_input(&self) -> Result<NumberInput<MemoryControl, Attributes>, ConfigError> {
        self.validate()?;
        Ok(NumberInput::bind(self.control(), self.attributes(), self.formatter())
            .with_select_delay(self.select_delay()))
    }
}

/// Attribute values of one input
///
/// Setting a value models the host re-evaluating an attribute expression;
/// the input reads the new value on its next check.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    min: Value,
    max: Value,
    precision: Value,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attr: Attr) -> &Value {
        match attr {
            Attr::Min => &self.min,
            Attr::Max => &self.max,
            Attr::Precision => &self.precision,
        }
    }

    /// Replaces an attribute value, returns whether it changed
    pub fn set(&mut self, attr: Attr, value: Value) -> bool {
        let slot = match attr {
            Attr::Min => &mut self.min,
            Attr::Max => &mut self.max,
            Attr::Precision => &mut self.precision,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub fn with(mut self, attr: Attr, value: impl Into<Value>) -> Self {
        self.set(attr, value.into());
        self
    }
}

impl Scope for Attributes {
    fn eval(&self, attr: Attr) -> Value {
        self.get(attr).clone()
    }
}

#[cfg(test)]
mod tests;
