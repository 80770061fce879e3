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

//! Mediator tests
//!
//! Focus/blur/input scenarios against an in-memory form control

use std::rc::Rc;

use crate::config::Attributes;
use crate::core::format::{GroupedFormatter, Separators};
use crate::core::host::{Attr, FormControl, MemoryControl};
use crate::core::mediator::NumberInput;
use crate::core::types::{FocusState, ModelValue, Value};

/// Helper: price input bound to 930000 with min 0 and max 1000000
fn price_input() -> NumberInput<MemoryControl, Attributes> {
    let control = MemoryControl::new(ModelValue::new(930000.0)).with_required(true);
    let attributes = Attributes::new()
        .with(Attr::Min, "0")
        .with(Attr::Max, "1000000");
    NumberInput::bind(control, attributes, Rc::new(GroupedFormatter::default()))
}

fn plain_input(model: f64, attributes: Attributes) -> NumberInput<MemoryControl, Attributes> {
    NumberInput::bind(
        MemoryControl::new(ModelValue::new(model)),
        attributes,
        Rc::new(GroupedFormatter::default()),
    )
}

fn validity(input: &NumberInput<MemoryControl, Attributes>, rule: &str) -> Option<bool> {
    input.host().validity().get(rule)
}

#[test]
fn test_initial_view_is_formatted() {
    let input = price_input();

    assert_eq!(input.host().model_value(), ModelValue::new(930000.0));
    assert_eq!(input.host().view_value(), "930,000");
    assert_eq!(input.host().rendered(), "930,000");
    assert_eq!(input.focus_state(), Some(FocusState::Unfocused));
}

#[test]
fn test_bind_stamps_bounds() {
    let input = plain_input(5000.0, Attributes::new().with(Attr::Max, 4242.0));

    assert_eq!(validity(&input, "max"), Some(false));
    assert_eq!(validity(&input, "min"), Some(true));
}

#[test]
fn test_focus_blur_cycle() {
    let mut input = price_input();

    let deferred = input.gain_focus();
    assert!(deferred.is_some());
    assert_eq!(input.host().rendered(), "930000");
    assert_eq!(input.focus_state(), Some(FocusState::Focused));

    input.input_changed("93000");
    assert_eq!(input.host().model_value(), ModelValue::new(93000.0));
    assert_eq!(input.host().view_value(), "93000", "No formatting while typing");

    input.lose_focus();
    assert_eq!(input.host().rendered(), "93,000");
    assert_eq!(input.host().model_value(), ModelValue::new(93000.0));
    assert_eq!(input.focus_state(), Some(FocusState::Unfocused));
}

#[test]
fn test_focus_does_not_touch_model() {
    let mut input = plain_input(12.5, Attributes::new().with(Attr::Precision, 2.0));

    assert_eq!(input.host().rendered(), "12.50");
    input.gain_focus();
    assert_eq!(input.host().rendered(), "12.5");
    assert_eq!(input.host().model_value(), ModelValue::new(12.5));
}

#[test]
fn test_focus_on_absent_model_shows_empty_field() {
    let mut input = NumberInput::bind(
        MemoryControl::default(),
        Attributes::new(),
        Rc::new(GroupedFormatter::default()),
    );

    input.gain_focus();
    assert_eq!(input.host().rendered(), "");
}

#[test]
fn test_invalid_input_clears_model() {
    let mut input = price_input();
    input.gain_focus();

    for raw in ["", "-=", "!@#!%%", "David"] {
        input.input_changed("500");
        assert_eq!(input.host().model_value(), ModelValue::new(500.0));

        input.input_changed(raw);
        assert!(
            input.host().model_value().is_absent(),
            "'{}' should leave the model absent, not stale",
            raw
        );
        assert_eq!(input.host().view_value(), raw, "Typed text stays for correction");
    }
}

#[test]
fn test_non_numeric_input_fails_number_rule() {
    let mut input = price_input();
    input.gain_focus();

    input.input_changed("David");
    assert_eq!(validity(&input, "number"), Some(false));

    input.input_changed("42");
    assert_eq!(validity(&input, "number"), Some(true));
}

#[test]
fn test_min_violation_keeps_number() {
    let mut input = price_input();
    input.gain_focus();

    input.input_changed("1");
    assert_eq!(validity(&input, "min"), Some(true));

    input.input_changed("-1");
    assert_eq!(validity(&input, "min"), Some(false));
    assert_eq!(validity(&input, "number"), Some(true), "Out of range is not a number error");
    assert_eq!(input.host().model_value(), ModelValue::new(-1.0));
}

#[test]
fn test_max_violation() {
    let mut input = price_input();
    input.gain_focus();

    input.input_changed("2000000");
    assert_eq!(validity(&input, "max"), Some(false));
    assert_eq!(input.host().model_value(), ModelValue::new(2000000.0));

    input.input_changed("1");
    assert_eq!(validity(&input, "max"), Some(true));
}

#[test]
fn test_cleared_field_only_fails_required() {
    let mut input = price_input();
    input.gain_focus();

    input.input_changed("");
    assert_eq!(validity(&input, "required"), Some(false));
    assert_eq!(validity(&input, "number"), Some(true));
    assert_eq!(validity(&input, "min"), Some(true));
    assert_eq!(validity(&input, "max"), Some(true));

    input.input_changed("123");
    assert_eq!(validity(&input, "required"), Some(true));
}

#[test]
fn test_blur_keeps_invalid_text() {
    let mut input = price_input();
    input.gain_focus();
    input.input_changed("David");

    input.lose_focus();
    assert_eq!(input.host().rendered(), "David", "Never blanked");
    assert!(input.host().model_value().is_absent());
    assert_eq!(validity(&input, "number"), Some(false));
}

#[test]
fn test_blur_renormalises_external_model_change() {
    let mut input = plain_input(1.0, Attributes::new().with(Attr::Precision, 1.0));
    input.gain_focus();

    // Application writes an unrounded value while the field is focused
    input.host_mut().set_model_value(ModelValue::new(2.25));
    input.lose_focus();

    assert_eq!(input.host().model_value(), ModelValue::new(2.3));
    assert_eq!(input.host().rendered(), "2.3");
}

#[test]
fn test_blur_without_focus_keeps_number_rule() {
    let mut input = price_input();

    input.lose_focus();
    assert_eq!(input.host().rendered(), "930,000");
    assert_eq!(validity(&input, "number"), None, "Formatted text is not re-checked");
}

#[test]
fn test_max_change_revalidates_without_touching_view() {
    let mut input = price_input();
    assert_eq!(validity(&input, "max"), Some(true));

    input.scope_mut().set(Attr::Max, Value::from(1000.0));
    input.config_changed(Attr::Max);
    assert_eq!(validity(&input, "max"), Some(false));
    assert_eq!(input.host().rendered(), "930,000");

    input.scope_mut().set(Attr::Max, Value::from("not a number"));
    input.config_changed(Attr::Max);
    assert_eq!(validity(&input, "max"), Some(true), "Unresolvable bound disables the check");
}

#[test]
fn test_min_change_revalidates() {
    let mut input = price_input();

    input.scope_mut().set(Attr::Min, Value::from(1e6));
    input.config_changed(Attr::Min);
    assert_eq!(validity(&input, "min"), Some(false));

    input.scope_mut().set(Attr::Min, Value::Null);
    input.config_changed(Attr::Min);
    assert_eq!(validity(&input, "min"), Some(true));
}

#[test]
fn test_bounds_are_evaluated_on_every_check() {
    let mut input = price_input();
    input.gain_focus();

    input.scope_mut().set(Attr::Min, Value::from(100.0));
    input.input_changed("50");
    assert_eq!(validity(&input, "min"), Some(false));
}

#[test]
fn test_precision_change_applies_on_next_blur() {
    let mut input = plain_input(1234.5678, Attributes::new());
    assert_eq!(input.host().rendered(), "1,235");

    input.scope_mut().set(Attr::Precision, Value::from(2.0));
    input.config_changed(Attr::Precision);
    assert_eq!(input.host().rendered(), "1,235", "Config changes leave the view alone");

    input.gain_focus();
    input.lose_focus();
    assert_eq!(input.host().rendered(), "1,234.57");
}

#[test]
fn test_destroy_is_terminal() {
    let mut input = price_input();
    input.destroy();
    assert!(input.is_destroyed());
    assert_eq!(input.focus_state(), None);

    let renders = input.host().render_count();
    assert!(input.gain_focus().is_none());
    input.input_changed("42");
    input.lose_focus();
    input.config_changed(Attr::Max);
    input.destroy();

    assert_eq!(input.host().model_value(), ModelValue::new(930000.0));
    assert_eq!(input.host().render_count(), renders);
}

#[test]
fn test_deferred_selection() {
    let mut input = price_input();
    let deferred = input.gain_focus().unwrap();

    assert!(input.select_contents(&deferred));
    assert_eq!(input.host().selection(), Some(0..6));
    assert!(input.pending_selection().is_none());

    // Spent, a second run is a no-op
    assert!(!input.select_contents(&deferred));
}

#[test]
fn test_blur_cancels_deferred_selection() {
    let mut input = price_input();
    let deferred = input.gain_focus().unwrap();

    input.lose_focus();
    assert!(deferred.is_cancelled());
    assert!(!input.select_contents(&deferred));
    assert_eq!(input.host().selection(), None);
}

#[test]
fn test_refocus_cancels_previous_selection() {
    let mut input = price_input();
    let first = input.gain_focus().unwrap();
    let second = input.gain_focus().unwrap();

    assert!(first.is_cancelled());
    assert!(!second.is_cancelled());
    assert!(!input.select_contents(&first));
    assert!(input.select_contents(&second));
}

#[test]
fn test_destroy_cancels_deferred_selection() {
    let mut input = price_input();
    let deferred = input.gain_focus().unwrap();

    input.destroy();
    assert!(deferred.is_cancelled());
    assert!(!input.select_contents(&deferred));
    assert_eq!(input.host().selection(), None);
}

#[test]
fn test_model_is_never_non_finite() {
    let mut input = price_input();
    input.gain_focus();

    for raw in ["Infinity", "-Infinity", "NaN", "1e999"] {
        input.input_changed(raw);
        let model = input.host().model_value();
        assert!(model.get().is_none_or(f64::is_finite), "'{}' produced {}", raw, model);
    }
}

/// Helper: input using `.` for grouping and `,` as decimal mark
fn german_input(model: f64, precision: f64) -> NumberInput<MemoryControl, Attributes> {
    NumberInput::bind(
        MemoryControl::new(ModelValue::new(model)),
        Attributes::new().with(Attr::Precision, precision),
        Rc::new(GroupedFormatter::new(Separators { group: '.', decimal: ',' })),
    )
}

#[test]
fn test_locale_focus_retype_blur() {
    let mut input = german_input(12.5, 1.0);
    assert_eq!(input.host().rendered(), "12,5");

    input.gain_focus();
    let shown = input.host().rendered().to_string();
    assert_eq!(shown, "12,5", "Editable text uses the decimal mark");

    // Retyping exactly what is shown keeps the number
    input.input_changed(&shown);
    assert_eq!(input.host().model_value(), ModelValue::new(12.5));
    assert_eq!(validity(&input, "number"), Some(true));

    input.input_changed("1234,56");
    assert_eq!(input.host().model_value(), ModelValue::new(1234.6));

    input.lose_focus();
    assert_eq!(input.host().rendered(), "1.234,6");
    assert_eq!(input.host().model_value(), ModelValue::new(1234.6));
    assert_eq!(validity(&input, "number"), Some(true));
}

#[test]
fn test_locale_rejects_group_marks_while_typing() {
    let mut input = german_input(1000.0, 0.0);
    input.gain_focus();
    assert_eq!(input.host().rendered(), "1000");

    // "12.5" is grouped text here, the same as "1,000" in the default locale
    input.input_changed("12.5");
    assert_eq!(validity(&input, "number"), Some(false));
    assert!(input.host().model_value().is_absent());

    input.lose_focus();
    assert_eq!(validity(&input, "number"), Some(false));
    assert!(input.host().model_value().is_absent());
    // The view falls back to the typed text, read with this locale's marks
    assert_eq!(input.host().rendered(), "125");
}

#[test]
fn test_overflowing_literal_leaves_model_absent() {
    let mut input = price_input();
    input.gain_focus();

    // Matches the grammar, but is no finite f64
    input.input_changed(&"9".repeat(400));

    assert!(input.host().model_value().is_absent());
    assert_eq!(validity(&input, "number"), Some(true));
    assert_eq!(validity(&input, "min"), Some(true));
    assert_eq!(validity(&input, "max"), Some(true));
}
