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

//! View/model conversion
//!
//! Two pure, precision-aware conversions:
//! - [`to_model`]: candidate (typed text or number) → [`ModelValue`]
//! - [`to_view`]: model (or the current view text) → formatted display text
//!
//! Both take the formatter as a parameter so the input mediator and the
//! validators run exactly the same rounding.

use std::rc::Rc;

use crate::core::curry::{curry, Curried, Function};
use crate::core::format::NumberFormatter;
use crate::core::types::{parse_finite, ModelValue, Precision, Value};

/// Converts a candidate into a model value
///
/// - Text: grouping separators are stripped, the number is parsed, rounded
///   to `precision` through the formatter and parsed back.
/// - Numbers: rounded the same way.
/// - Anything else, unparsable text and non-finite numbers: absent.
pub fn to_model(formatter: &dyn NumberFormatter, precision: Precision, candidate: &Value) -> ModelValue {
    let number = match candidate {
        Value::Number(n) => *n,
        Value::Text(text) => match parse_finite(&formatter.unformat(text)) {
            Some(n) => n,
            None => return ModelValue::ABSENT,
        },
        _ => return ModelValue::ABSENT,
    };

    if !number.is_finite() {
        return ModelValue::ABSENT;
    }

    let formatted = formatter.format(number, precision);
    let model = parse_finite(&formatter.unformat(&formatted))
        .map(ModelValue::new)
        .unwrap_or_default();

    log::trace!("to_model({:?}, p={}) = {}", candidate, precision, model);
    model
}

/// Converts a model value into display text
///
/// With no model number the current view text is formatted instead, when it
/// holds a number. If neither yields anything displayable, `previous` comes
/// back unchanged: the field is never blanked by formatting.
pub fn to_view(formatter: &dyn NumberFormatter, precision: Precision, model: ModelValue, previous: &str) -> String {
    let number = model
        .get()
        .or_else(|| parse_finite(&formatter.unformat(previous)));

    match number.map(|n| formatter.format(n, precision)) {
        Some(view) if !view.is_empty() => view,
        _ => previous.to_string(),
    }
}

/// Curried [`to_model`]: `(precision, candidate) -> number | null`
pub fn model_parser(formatter: Rc<dyn NumberFormatter>) -> Curried<Value, Value> {
    curry(Function::binary(move |precision: Value, candidate: Value| {
        Value::from(to_model(formatter.as_ref(), Precision::resolve(&precision), &candidate))
    }))
}

/// Curried [`to_view`]: `(precision, previous view, model) -> text`
pub fn view_formatter(formatter: Rc<dyn NumberFormatter>) -> Curried<Value, Value> {
    curry(Function::ternary(
        move |precision: Value, previous: Value, model: Value| {
            let previous = match previous {
                Value::Text(text) => text,
                Value::Null => String::new(),
                other => other.to_text(),
            };
            Value::Text(to_view(
                formatter.as_ref(),
                Precision::resolve(&precision),
                ModelValue::from(&model),
                &previous,
            ))
        },
    ))
}
