// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Thousand-separator number formatting
//!
//! The `format(number, precision)` utility used by the conversions:
//! rounds to a fixed number of fractional digits and groups the integer
//! part in threes. Separators are configurable so the same formatter
//! covers `1,234.5` as well as `1.234,5` style locales.

use serde::{Deserialize, Serialize};

use crate::core::types::{ModelValue, Precision};

/// Grouping and decimal marks
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Separators {
    /// Inserted between groups of three integer digits
    pub group: char,
    /// Separates the integer part from the fraction
    pub decimal: char,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            group: ',',
            decimal: '.',
        }
    }
}

/// Formats numbers for display and undoes that formatting for parsing
pub trait NumberFormatter {
    /// Formats `number` with exactly `precision` fractional digits
    ///
    /// Returns an empty string for non-finite input.
    fn format(&self, number: f64, precision: Precision) -> String;

    /// Strips grouping and normalises the decimal mark to `.`
    ///
    /// The result is not guaranteed to be numeric, it is just text the
    /// standard float parser understands when it was a formatted number.
    fn unformat(&self, text: &str) -> String;

    /// Unrounded, ungrouped text of `number` for editing
    fn editable(&self, number: f64) -> String {
        ModelValue::new(number).editable_text()
    }

    /// Respells typed text with `.` as decimal mark and `,` as group mark
    ///
    /// The number grammar is written for that spelling. Unlike
    /// [`NumberFormatter::unformat`] this keeps group marks, so a grouped
    /// number still fails the grammar in any locale.
    fn canonical(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Default formatter: half-away-from-zero rounding, groups of three
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupedFormatter {
    separators: Separators,
}

impl GroupedFormatter {
    pub fn new(separators: Separators) -> Self {
        Self { separators }
    }

    pub fn separators(&self) -> Separators {
        self.separators
    }
}

/// Rounds half away from zero to `digits` fractional digits
///
/// Falls back to the unrounded value when scaling overflows; such numbers
/// have no fractional part worth rounding anyway.
fn round_half_away(number: f64, digits: usize) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = number * factor;
    if !scaled.is_finite() {
        return number;
    }
    let rounded = scaled.round() / factor;
    if rounded.is_finite() { rounded } else { number }
}

impl NumberFormatter for GroupedFormatter {
    fn format(&self, number: f64, precision: Precision) -> String {
        if !number.is_finite() {
            return String::new();
        }

        let digits = precision.digits();
        let fixed = format!("{:.*}", digits, round_half_away(number, digits).abs());
        let (integer, fraction) = match fixed.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);

        // No "-0" or "-0.00"
        let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
        if number.is_sign_negative() && !is_zero {
            out.push('-');
        }

        for (i, ch) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                out.push(self.separators.group);
            }
            out.push(ch);
        }

        if let Some(fraction) = fraction {
            out.push(self.separators.decimal);
            out.push_str(fraction);
        }

        out
    }

    fn unformat(&self, text: &str) -> String {
        text.chars()
            .filter(|ch| *ch != self.separators.group)
            .map(|ch| if ch == self.separators.decimal { '.' } else { ch })
            .collect()
    }

    fn editable(&self, number: f64) -> String {
        let text = ModelValue::new(number).editable_text();
        if self.separators.decimal == '.' {
            return text;
        }
        text.replace('.', &self.separators.decimal.to_string())
    }

    fn canonical(&self, text: &str) -> String {
        let Separators { group, decimal } = self.separators;
        text.chars()
            .map(|ch| match ch {
                _ if ch == decimal => '.',
                _ if ch == group => ',',
                _ => ch,
            })
            .collect()
    }
}
