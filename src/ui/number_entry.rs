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

//! GTK4 number entry
//!
//! [`NumberEntry`] binds a [`NumberInput`] to a `gtk4::Entry`:
//!
//! ```text
//! EventControllerFocus::enter → gain_focus  (+ glib timeout → select_contents)
//! EventControllerFocus::leave → lose_focus
//! Editable::changed           → input_changed
//! Widget::destroy             → destroy
//! ```
//!
//! Validity is shown with the theme's `error` style class.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use glib::SignalHandlerId;
use gtk4::prelude::*;
use gtk4::{Entry, EventControllerFocus, InputPurpose};

use crate::config::{Attributes, InputConfig};
use crate::core::host::{Attr, FormControl};
use crate::core::mediator::NumberInput;
use crate::core::types::{ModelValue, ValidityRecord, Value};

/// `FormControl` backed by a `gtk4::Entry`
///
/// The entry's text is only written on [`FormControl::render`]; while the
/// user types, the view value follows the entry instead.
pub struct EntryControl {
    entry: Entry,
    view: String,
    model: ModelValue,
    validity: ValidityRecord,
    /// Set while the entry's text is written from code
    syncing: Rc<Cell<bool>>,
}

impl EntryControl {
    fn new(entry: Entry, model: ModelValue, syncing: Rc<Cell<bool>>) -> Self {
        Self {
            entry,
            view: String::new(),
            model,
            validity: ValidityRecord::new(),
            syncing,
        }
    }

    pub fn validity(&self) -> &ValidityRecord {
        &self.validity
    }

    fn show_validity(&self) {
        if self.validity.all_valid() {
            self.entry.remove_css_class("error");
        } else {
            self.entry.add_css_class("error");
        }
    }
}

impl FormControl for EntryControl {
    fn view_value(&self) -> &str {
        &self.view
    }

    fn set_view_value(&mut self, view: String) {
        self.view = view;
    }

    fn model_value(&self) -> ModelValue {
        self.model
    }

    fn set_model_value(&mut self, model: ModelValue) {
        self.model = model;
    }

    fn render(&mut self) {
        if self.entry.text().as_str() != self.view.as_str() {
            self.syncing.set(true);
            self.entry.set_text(&self.view);
            self.syncing.set(false);
        }
        self.show_validity();
    }

    fn set_validity(&mut self, rule: &str, valid: bool) {
        self.validity.set(rule, valid);
        self.show_validity();
    }

    fn select_all(&mut self) {
        self.entry.select_region(0, -1);
    }
}

type SharedInput = Rc<RefCell<NumberInput<EntryControl, Attributes>>>;
type ChangeCallback = Rc<RefCell<Option<Box<dyn Fn(ModelValue, &ValidityRecord)>>>>;

/// A `gtk4::Entry` showing a formatted number
pub struct NumberEntry {
    /// Root widget
    entry: Entry,
    input: SharedInput,
    focus: EventControllerFocus,
    /// Handlers connected on the entry itself
    handlers: RefCell<Vec<SignalHandlerId>>,
    on_change: ChangeCallback,
}

impl NumberEntry {
    /// Creates an entry bound to the model and attributes of `config`
    ///
    /// # Example
    /// ```no_run
    /// use number_input::config::InputConfig;
    /// use number_input::ui::NumberEntry;
    ///
    /// let config = InputConfig::from_json(r#"{ "model": 930000, "max": 1000000 }"#)?;
    /// let entry = NumberEntry::new(&config);
    /// // container.append(entry.widget());
    /// # Ok::<(), number_input::config::ConfigError>(())
    /// ```
    pub fn new(config: &InputConfig) -> Self {
        let entry = Entry::builder().input_purpose(InputPurpose::Number).build();
        entry.set_alignment(1.0);

        let syncing = Rc::new(Cell::new(false));
        let control = EntryControl::new(entry.clone(), ModelValue::from(config.model), Rc::clone(&syncing));
        let input = Rc::new(RefCell::new(
            NumberInput::bind(control, config.attributes(), config.formatter())
                .with_select_delay(config.select_delay()),
        ));

        let on_change: ChangeCallback = Rc::new(RefCell::new(None));
        let focus = EventControllerFocus::new();

        // Focus: raw number, then select it once GTK has placed the cursor
        let enter_input = Rc::downgrade(&input);
        let enter_change = Rc::clone(&on_change);
        focus.connect_enter(move |_| {
            let Some(input) = enter_input.upgrade() else { return };
            let deferred = input.borrow_mut().gain_focus();
            notify(&input, &enter_change);

            if let Some(deferred) = deferred {
                let select_input = Rc::downgrade(&input);
                glib::timeout_add_local_once(deferred.delay, move || {
                    if let Some(input) = select_input.upgrade() {
                        input.borrow_mut().select_contents(&deferred);
                    }
                });
            }
        });

        let leave_input = Rc::downgrade(&input);
        let leave_change = Rc::clone(&on_change);
        focus.connect_leave(move |_| {
            if let Some(input) = leave_input.upgrade() {
                input.borrow_mut().lose_focus();
                notify(&input, &leave_change);
            }
        });
        entry.add_controller(focus.clone());

        let changed_input = Rc::downgrade(&input);
        let changed_change = Rc::clone(&on_change);
        let changed = entry.connect_changed(move |entry| {
            // Our own set_text from render(); the input is borrowed right now
            if syncing.get() {
                return;
            }
            if let Some(input) = changed_input.upgrade() {
                input.borrow_mut().input_changed(entry.text().as_str());
                notify(&input, &changed_change);
            }
        });

        let destroy_input: Weak<_> = Rc::downgrade(&input);
        let destroyed = entry.connect_destroy(move |_| {
            if let Some(input) = destroy_input.upgrade() {
                input.borrow_mut().destroy();
            }
        });

        Self {
            entry,
            input,
            focus,
            handlers: RefCell::new(vec![changed, destroyed]),
            on_change,
        }
    }

    /// Returns the root widget for adding to parent container
    pub fn widget(&self) -> &Entry {
        &self.entry
    }

    pub fn model(&self) -> ModelValue {
        self.input.borrow().host().model_value()
    }

    pub fn validity(&self) -> ValidityRecord {
        self.input.borrow().host().validity().clone()
    }

    /// Calls `callback` with the model and validity after every transition
    pub fn connect_change<F>(&self, callback: F)
    where
        F: Fn(ModelValue, &ValidityRecord) + 'static,
    {
        *self.on_change.borrow_mut() = Some(Box::new(callback));
    }

    /// Replaces an attribute value and re-validates if it changed
    pub fn set_attribute(&self, attr: Attr, value: Value) {
        let mut input = self.input.borrow_mut();
        if input.scope_mut().set(attr, value) {
            input.config_changed(attr);
        }
        drop(input);
        notify(&self.input, &self.on_change);
    }

    /// Disconnects every handler and tears the input down
    ///
    /// Safe to call more than once.
    pub fn dispose(&self) {
        let handlers: Vec<SignalHandlerId> = self.handlers.borrow_mut().drain(..).collect();
        if handlers.is_empty() {
            return;
        }
        for handler in handlers {
            self.entry.disconnect(handler);
        }
        self.entry.remove_controller(&self.focus);
        self.input.borrow_mut().destroy();
        log::debug!("Number entry disposed");
    }
}

fn notify(input: &SharedInput, on_change: &ChangeCallback) {
    if let Some(callback) = on_change.borrow().as_ref() {
        let input = input.borrow();
        callback(input.host().model_value(), input.host().validity());
    }
}
