//! Host collaborators
//!
//! The number input never owns a widget. It talks to two host objects:
//! - [`FormControl`]: the bound control (view text, model value, validity,
//!   re-render, selection)
//! - [`Scope`]: evaluates the `min`/`max`/`precision` attributes, possibly
//!   to a different value on every call
//!
//! [`MemoryControl`] is an in-memory `FormControl` for toolkit-free use.

use std::ops::Range;

use crate::core::types::{ModelValue, ValidityRecord, Value};
use crate::core::validator::Emptiness;

/// Name under which [`MemoryControl`] records its `required` rule
pub const REQUIRED_RULE: &str = "required";

/// Host emptiness predicate: null, empty text and NaN are empty
///
/// Whitespace-only text is not empty; it simply fails the number grammar.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(text) => text.is_empty(),
        Value::Number(n) => n.is_nan(),
        _ => false,
    }
}

/// Form-control side of one bound input
pub trait FormControl {
    /// Text currently in the widget
    fn view_value(&self) -> &str;

    fn set_view_value(&mut self, view: String);

    /// Number bound to the application
    fn model_value(&self) -> ModelValue;

    fn set_model_value(&mut self, model: ModelValue);

    /// Re-renders the widget from the current view/model pair
    fn render(&mut self);

    /// Records whether `rule` currently passes
    fn set_validity(&mut self, rule: &str, valid: bool);

    /// Selects the whole content of the widget
    fn select_all(&mut self);

    /// Predicate deciding which candidates count as empty
    fn emptiness(&self) -> Emptiness {
        is_empty_value
    }
}

/// Attributes the number input reads from its host
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Attr {
    Min,
    Max,
    Precision,
}

impl Attr {
    pub fn name(self) -> &'static str {
        match self {
            Attr::Min => "min",
            Attr::Max => "max",
            Attr::Precision => "precision",
        }
    }
}

impl std::str::FromStr for Attr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Attr::Min),
            "max" => Ok(Attr::Max),
            "precision" => Ok(Attr::Precision),
            other => Err(format!("Unknown attribute '{}'", other)),
        }
    }
}

/// Attribute evaluation
pub trait Scope {
    /// Current value of `attr`; `Value::Null` when it is not set
    fn eval(&self, attr: Attr) -> Value;
}

impl<F: Fn(Attr) -> Value> Scope for F {
    fn eval(&self, attr: Attr) -> Value {
        self(attr)
    }
}

/// In-memory form control
///
/// Keeps what a widget would show in `rendered` (updated only by
/// [`FormControl::render`]) and optionally carries a host-side `required`
/// rule that is re-checked whenever the view value changes.
#[derive(Clone, Debug, Default)]
pub struct MemoryControl {
    view: String,
    model: ModelValue,
    rendered: String,
    render_count: usize,
    validity: ValidityRecord,
    selection: Option<Range<usize>>,
    required: bool,
}

impl MemoryControl {
    pub fn new(model: ModelValue) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    /// Enables the host-side `required` rule
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self.check_required();
        self
    }

    /// Text last pushed to the screen
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn validity(&self) -> &ValidityRecord {
        &self.validity
    }

    /// Selected byte range, if the content was selected
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    fn check_required(&mut self) {
        if self.required {
            let filled = !is_empty_value(&Value::Text(self.view.clone()));
            self.validity.set(REQUIRED_RULE, filled);
        }
    }
}

impl FormControl for MemoryControl {
    fn view_value(&self) -> &str {
        &self.view
    }

    fn set_view_value(&mut self, view: String) {
        if view != self.view {
            self.selection = None;
        }
        self.view = view;
        self.check_required();
    }

    fn model_value(&self) -> ModelValue {
        self.model
    }

    fn set_model_value(&mut self, model: ModelValue) {
        self.model = model;
    }

    fn render(&mut self) {
        self.rendered = self.view.clone();
        self.render_count += 1;
    }

    fn set_validity(&mut self, rule: &str, valid: bool) {
        self.validity.set(rule, valid);
    }

    fn select_all(&mut self) {
        self.selection = Some(0..self.view.len());
    }
}
