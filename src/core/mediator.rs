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

//! Focus/blur mediator
//!
//! [`NumberInput`] decides, per transition, which conversion and which
//! validators run and writes the resulting view/model pair back to its
//! [`FormControl`].
//!
//! ```text
//!             gain_focus
//!  Unfocused ─────────────▶ Focused ──┐ input_changed
//!      ▲                       │  ◀───┘
//!      └───────────────────────┘
//!             lose_focus
//!
//!  destroy: from either state to Destroyed (terminal, later calls no-op)
//! ```
//!
//! The model is written on input and on blur only, never by focusing, and
//! is always a finite number or absent.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::core::convert::{model_parser, view_formatter};
use crate::core::curry::Curried;
use crate::core::format::NumberFormatter;
use crate::core::host::{Attr, FormControl, Scope};
use crate::core::types::{FocusState, ModelValue, Precision, Rule, Value};
use crate::core::validator::{max_rule, min_rule, number_rule, Verdict};

/// Default delay before the content gets selected after focusing
pub const SELECT_DELAY: Duration = Duration::from_millis(10);

/// Shared cancellation flag for a deferred action
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// "Select all" request handed out by [`NumberInput::gain_focus`]
///
/// The host schedules it after `delay` and then passes it back to
/// [`NumberInput::select_contents`]. Blurring, refocusing or destroying the
/// input cancels it.
#[derive(Clone, Debug)]
pub struct DeferredSelection {
    pub token: CancellationToken,
    pub delay: Duration,
}

impl DeferredSelection {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    Live(FocusState),
    Destroyed,
}

/// One bound number input
pub struct NumberInput<H, S> {
    host: H,
    scope: S,
    phase: Phase,
    pending_selection: Option<CancellationToken>,
    select_delay: Duration,
    formatter: Rc<dyn NumberFormatter>,
    to_model: Curried<Value, Value>,
    to_view: Curried<Value, Value>,
    number_rule: Curried<Value, Verdict>,
    min_rule: Curried<Value, Verdict>,
    max_rule: Curried<Value, Verdict>,
}

impl<H: FormControl, S: Scope> NumberInput<H, S> {
    /// Binds an input to its host
    ///
    /// Formats the current model into the view, renders, and stamps the
    /// min/max rules once, the same as an initial attribute evaluation.
    pub fn bind(host: H, scope: S, formatter: Rc<dyn NumberFormatter>) -> Self {
        let is_empty = host.emptiness();
        let to_model = model_parser(Rc::clone(&formatter));

        let mut input = Self {
            host,
            scope,
            phase: Phase::Live(FocusState::Unfocused),
            pending_selection: None,
            select_delay: SELECT_DELAY,
            to_view: view_formatter(Rc::clone(&formatter)),
            formatter,
            number_rule: number_rule(is_empty),
            min_rule: min_rule(to_model.clone(), is_empty),
            max_rule: max_rule(to_model.clone(), is_empty),
            to_model,
        };

        let precision = input.precision();
        let model = input.host.model_value();
        let view = input.format_view(precision, model);
        input.host.set_view_value(view);
        input.host.render();
        input.validate_bounds();

        log::debug!("Bound number input, model {}", model);
        input
    }

    /// Overrides the delay of the deferred selection
    pub fn with_select_delay(mut self, delay: Duration) -> Self {
        self.select_delay = delay;
        self
    }

    /// Focus transition: show the raw number for editing
    ///
    /// Returns the deferred selection to schedule, or `None` after teardown.
    pub fn gain_focus(&mut self) -> Option<DeferredSelection> {
        if self.is_destroyed() {
            log::warn!("Focus on destroyed number input ignored");
            return None;
        }

        let precision = self.precision();
        let model = self.coerce(precision, Value::from(self.host.model_value()));
        let view = model
            .get()
            .map(|n| self.formatter.editable(n))
            .unwrap_or_default();
        self.host.set_view_value(view);
        self.host.render();
        self.phase = Phase::Live(FocusState::Focused);

        self.cancel_selection();
        let token = CancellationToken::new();
        self.pending_selection = Some(token.clone());

        log::debug!("Focused, editing '{}'", self.host.view_value());
        Some(DeferredSelection {
            token,
            delay: self.select_delay,
        })
    }

    /// Runs a deferred selection if it is still current
    ///
    /// Returns whether the content was selected.
    pub fn select_contents(&mut self, deferred: &DeferredSelection) -> bool {
        if deferred.is_cancelled() || self.focus_state() != Some(FocusState::Focused) {
            log::trace!("Deferred selection skipped");
            return false;
        }

        self.host.select_all();
        deferred.token.cancel();
        self.pending_selection = None;
        true
    }

    /// Keystroke: the view follows the raw input, the model is re-parsed
    ///
    /// The raw text runs through the number check, then the bound checks,
    /// then the model conversion. Invalid text leaves the model absent;
    /// out-of-range numbers are kept.
    ///
    /// The number check sees the text respelled with `.` as decimal mark, so
    /// the configured decimal mark is accepted and group marks are not.
    ///
    /// Text that passes the grammar but overflows `f64` (hundreds of digits)
    /// also leaves the model absent while every rule stays valid.
    pub fn input_changed(&mut self, raw: &str) {
        if self.is_destroyed() {
            log::warn!("Input on destroyed number input ignored");
            return;
        }

        self.host.set_view_value(raw.to_string());

        let precision = self.precision();
        let mut value = Value::from(raw);
        if let Some(verdict) = self.number_rule.call([self.canonical(raw)]).complete() {
            self.stamp(&verdict);
            if !verdict.valid {
                value = verdict.value;
            }
        }

        let settings = Value::from(precision);
        for rule in [Rule::Min, Rule::Max] {
            let stage = self.bound_rule(rule, &settings);
            if let Some(verdict) = stage.call([value.clone()]).complete() {
                self.stamp(&verdict);
                value = verdict.value;
            }
        }

        let model = self.coerce(precision, value);
        self.host.set_model_value(model);
        log::debug!("Input '{}' -> model {}", raw, model);
    }

    /// Blur transition: show the formatted number again
    ///
    /// The model is re-normalised in case it was changed from outside while
    /// focused, then min/max are re-checked against it. The number rule is
    /// re-checked against the text that was being edited.
    pub fn lose_focus(&mut self) {
        if self.is_destroyed() {
            log::warn!("Blur on destroyed number input ignored");
            return;
        }

        self.cancel_selection();

        let was_focused = self.focus_state() == Some(FocusState::Focused);
        let precision = self.precision();
        let previous = self.host.view_value().to_string();
        let model = self.host.model_value();

        let view = self.format_view(precision, model);
        let model = self.coerce(precision, Value::from(model));

        if was_focused {
            if let Some(verdict) = self.number_rule.call([self.canonical(&previous)]).complete() {
                self.stamp(&verdict);
            }
        }

        self.host.set_view_value(view);
        self.host.set_model_value(model);
        self.validate_bounds();
        self.host.render();
        self.phase = Phase::Live(FocusState::Unfocused);

        log::debug!("Blurred, showing '{}'", self.host.view_value());
    }

    /// An attribute re-evaluated: re-run the affected rules against the
    /// current model, leaving the view alone
    pub fn config_changed(&mut self, attr: Attr) {
        if self.is_destroyed() {
            log::warn!("Change of '{}' on destroyed number input ignored", attr.name());
            return;
        }

        let precision = Value::from(self.precision());
        let model = Value::from(self.host.model_value());
        let rules = match attr {
            Attr::Min => vec![self.bound_rule(Rule::Min, &precision)],
            Attr::Max => vec![self.bound_rule(Rule::Max, &precision)],
            Attr::Precision => vec![
                self.bound_rule(Rule::Min, &precision),
                self.bound_rule(Rule::Max, &precision),
            ],
        };

        for rule in rules {
            if let Some(verdict) = rule.call([model.clone()]).complete() {
                self.stamp(&verdict);
            }
        }
        log::debug!("Attribute '{}' changed, re-validated", attr.name());
    }

    /// Teardown: cancels any pending selection; everything after is a no-op
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.cancel_selection();
        self.phase = Phase::Destroyed;
        log::debug!("Number input destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == Phase::Destroyed
    }

    /// Current focus state, `None` once destroyed
    pub fn focus_state(&self) -> Option<FocusState> {
        match self.phase {
            Phase::Live(state) => Some(state),
            Phase::Destroyed => None,
        }
    }

    /// Token of the selection waiting to run, if any
    pub fn pending_selection(&self) -> Option<&CancellationToken> {
        self.pending_selection.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scope(&self) -> &S {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut S {
        &mut self.scope
    }

    fn precision(&self) -> Precision {
        Precision::resolve(&self.scope.eval(Attr::Precision))
    }

    fn bound(&self, attr: Attr) -> Value {
        let bound = self.scope.eval(attr);
        if bound != Value::Null && bound.as_number().is_none() {
            log::warn!("Ignoring non-numeric {} bound {:?}", attr.name(), bound);
        }
        bound
    }

    /// Typed text in the spelling the number grammar expects
    fn canonical(&self, text: &str) -> Value {
        Value::from(self.formatter.canonical(text))
    }

    fn bound_rule(&self, rule: Rule, precision: &Value) -> Curried<Value, Verdict> {
        match rule {
            Rule::Max => self.max_rule.bind([precision.clone(), self.bound(Attr::Max)]),
            _ => self.min_rule.bind([precision.clone(), self.bound(Attr::Min)]),
        }
    }

    fn validate_bounds(&mut self) {
        let precision = Value::from(self.precision());
        let model = Value::from(self.host.model_value());
        for rule in [Rule::Min, Rule::Max] {
            let stage = self.bound_rule(rule, &precision);
            if let Some(verdict) = stage.call([model.clone()]).complete() {
                self.stamp(&verdict);
            }
        }
    }

    fn coerce(&self, precision: Precision, value: Value) -> ModelValue {
        self.to_model
            .call([Value::from(precision), value])
            .complete()
            .map(|model| ModelValue::from(&model))
            .unwrap_or_default()
    }

    fn format_view(&self, precision: Precision, model: ModelValue) -> String {
        let previous = Value::from(self.host.view_value());
        match self.to_view.call([Value::from(precision), previous, Value::from(model)]).complete() {
            Some(Value::Text(view)) => view,
            _ => self.host.view_value().to_string(),
        }
    }

    fn stamp(&mut self, verdict: &Verdict) {
        self.host.set_validity(verdict.rule.name(), verdict.valid);
    }

    fn cancel_selection(&mut self) {
        if let Some(token) = self.pending_selection.take() {
            token.cancel();
        }
    }
}
