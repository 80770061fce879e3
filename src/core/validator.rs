// Copyright 2025 bakri (tidynest@proton.me)
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

//! Number, minimum and maximum validation
//!
//! Every check returns a [`Verdict`]: the pass/fail result for its rule plus
//! the value to hand to the next stage. Recording the result is left to the
//! caller, so the checks themselves stay pure.
//!
//! # Emptiness
//! An empty value passes all three rules. Forbidding emptiness is the job
//! of a separate `required` rule owned by the host, and keeping the two
//! apart is what lets a host tell "missing" from "not a number".
//!
//! # Ordering
//! The number check runs first. Bound checks coerce the candidate through
//! the model conversion before comparing, so text is never compared
//! against a bound directly.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::curry::{curry, Curried, Function};
use crate::core::types::{Bound, ModelValue, Rule, Value};

/// Decides whether a candidate counts as empty
pub type Emptiness = fn(&Value) -> bool;

/// HTML5 number grammar: optional sign, then digits or a decimal point
/// with optional digits on either side
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(\d+|\d*\.\d*)\s*$").expect("number pattern should be valid regex")
});

/// Result of running one rule
#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    /// Rule that produced this verdict
    pub rule: Rule,
    /// Whether the value passed
    pub valid: bool,
    /// Value for the next stage (null when a number check failed)
    pub value: Value,
}

impl Verdict {
    fn pass(rule: Rule, value: Value) -> Self {
        Self {
            rule,
            valid: true,
            value,
        }
    }
}

/// Checks that a value is empty or follows the HTML5 number grammar
///
/// Non-text values are checked by their text form, so `true`, `[]`, `{}`
/// and infinities all fail. A failing value is replaced by null.
pub fn is_number(value: &Value, is_empty: Emptiness) -> Verdict {
    if is_empty(value) || NUMBER_PATTERN.is_match(&value.to_text()) {
        return Verdict::pass(Rule::Number, value.clone());
    }

    Verdict {
        rule: Rule::Number,
        valid: false,
        value: Value::Null,
    }
}

/// Checks `value >= bound`
///
/// `coerce` is the model conversion the value is compared through. An
/// unresolvable bound, an empty value and a value that does not coerce to a
/// number all pass. The value itself is passed through either way: an
/// out-of-range number is still a number.
pub fn meets_minimum(
    bound: Option<Bound>,
    value: &Value,
    coerce: impl Fn(&Value) -> ModelValue,
    is_empty: Emptiness,
) -> Verdict {
    meets_bound(Rule::Min, bound, value, coerce, is_empty, |n, limit| n >= limit)
}

/// Checks `value <= bound`, see [`meets_minimum`]
pub fn meets_maximum(
    bound: Option<Bound>,
    value: &Value,
    coerce: impl Fn(&Value) -> ModelValue,
    is_empty: Emptiness,
) -> Verdict {
    meets_bound(Rule::Max, bound, value, coerce, is_empty, |n, limit| n <= limit)
}

fn meets_bound(
    rule: Rule,
    bound: Option<Bound>,
    value: &Value,
    coerce: impl Fn(&Value) -> ModelValue,
    is_empty: Emptiness,
    within: fn(f64, f64) -> bool,
) -> Verdict {
    let Some(bound) = bound else {
        return Verdict::pass(rule, value.clone());
    };
    if is_empty(value) {
        return Verdict::pass(rule, value.clone());
    }

    let valid = match coerce(value).get() {
        Some(n) => within(n, bound.get()),
        None => true,
    };

    Verdict {
        rule,
        valid,
        value: value.clone(),
    }
}

/// Curried [`is_number`]: `(value) -> verdict`
pub fn number_rule(is_empty: Emptiness) -> Curried<Value, Verdict> {
    curry(Function::unary(move |value: Value| is_number(&value, is_empty)))
}

/// Curried [`meets_minimum`]: `(precision, bound, value) -> verdict`
///
/// `to_model` is the curried model conversion, `(precision, candidate)`.
pub fn min_rule(to_model: Curried<Value, Value>, is_empty: Emptiness) -> Curried<Value, Verdict> {
    bound_rule(Rule::Min, to_model, is_empty)
}

/// Curried [`meets_maximum`]: `(precision, bound, value) -> verdict`
pub fn max_rule(to_model: Curried<Value, Value>, is_empty: Emptiness) -> Curried<Value, Verdict> {
    bound_rule(Rule::Max, to_model, is_empty)
}

fn bound_rule(rule: Rule, to_model: Curried<Value, Value>, is_empty: Emptiness) -> Curried<Value, Verdict> {
    curry(Function::ternary(move |precision: Value, bound: Value, value: Value| {
        let coerce = |candidate: &Value| {
            to_model
                .call([precision.clone(), candidate.clone()])
                .complete()
                .map(|model| ModelValue::from(&model))
                .unwrap_or_default()
        };
        let bound = Bound::resolve(&bound);
        match rule {
            Rule::Max => meets_maximum(bound, &value, coerce, is_empty),
            _ => meets_minimum(bound, &value, coerce, is_empty),
        }
    }))
}
