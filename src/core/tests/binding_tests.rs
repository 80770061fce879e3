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

//! Event wiring tests
//!
//! Drives a number input through an `EventBus`, including the deferred
//! "select all" racing blur and teardown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::config::Attributes;
use crate::core::binding::{bind_input, Event, EventBus, Trigger};
use crate::core::format::GroupedFormatter;
use crate::core::host::{Attr, FormControl, MemoryControl};
use crate::core::mediator::{CancellationToken, NumberInput};
use crate::core::types::{ModelValue, Value};

type Input = Rc<RefCell<NumberInput<MemoryControl, Attributes>>>;

fn bound_price(bus: &EventBus) -> (Input, crate::core::binding::Binding) {
    let control = MemoryControl::new(ModelValue::new(930000.0));
    let attributes = Attributes::new().with(Attr::Min, 0.0).with(Attr::Max, 1000000.0);
    let input = Rc::new(RefCell::new(NumberInput::bind(
        control,
        attributes,
        Rc::new(GroupedFormatter::default()),
    )));
    let binding = bind_input(bus, &input);
    (input, binding)
}

const TICK: Duration = Duration::from_millis(10);

#[test]
fn test_subscribe_and_emit() {
    let bus = EventBus::new();
    let seen = Rc::new(Cell::new(0));
    let counter = Rc::clone(&seen);

    let id = bus.subscribe(Trigger::Focus, move |_| counter.set(counter.get() + 1));
    assert_eq!(bus.emit(Event::Focus), 1);
    assert_eq!(bus.emit(Event::Blur), 0);
    assert_eq!(seen.get(), 1);

    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));
    assert_eq!(bus.emit(Event::Focus), 0);
}

#[test]
fn test_deferred_tasks_run_when_due() {
    let bus = EventBus::new();
    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);

    bus.defer(TICK, CancellationToken::new(), move || flag.set(true));
    assert_eq!(bus.advance(Duration::from_millis(5)), 0);
    assert!(!ran.get());

    assert_eq!(bus.advance(Duration::from_millis(5)), 1);
    assert!(ran.get());
    assert_eq!(bus.pending_tasks(), 0);
    assert_eq!(bus.now(), TICK);
}

#[test]
fn test_cancelled_tasks_never_run() {
    let bus = EventBus::new();
    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);
    let token = CancellationToken::new();

    bus.defer(TICK, token.clone(), move || flag.set(true));
    token.cancel();

    assert_eq!(bus.advance(TICK), 0);
    assert!(!ran.get());
    assert_eq!(bus.pending_tasks(), 0);
}

#[test]
fn test_focus_type_blur_through_bus() {
    let bus = EventBus::new();
    let (input, _binding) = bound_price(&bus);

    bus.emit(Event::Focus);
    assert_eq!(input.borrow().host().rendered(), "930000");

    bus.emit(Event::Input("93000".to_string()));
    assert_eq!(input.borrow().host().model_value(), ModelValue::new(93000.0));

    bus.emit(Event::Blur);
    assert_eq!(input.borrow().host().rendered(), "93,000");
}

#[test]
fn test_focus_selects_after_delay() {
    let bus = EventBus::new();
    let (input, _binding) = bound_price(&bus);

    bus.emit(Event::Focus);
    assert_eq!(input.borrow().host().selection(), None, "Selection is deferred");

    assert_eq!(bus.advance(TICK), 1);
    assert_eq!(input.borrow().host().selection(), Some(0..6));
}

#[test]
fn test_blur_before_selection_fires() {
    let bus = EventBus::new();
    let (input, _binding) = bound_price(&bus);

    bus.emit(Event::Focus);
    bus.emit(Event::Blur);

    assert_eq!(bus.advance(TICK), 0);
    assert_eq!(input.borrow().host().selection(), None);
}

#[test]
fn test_destroy_before_selection_fires() {
    let bus = EventBus::new();
    let (input, binding) = bound_price(&bus);

    bus.emit(Event::Focus);
    bus.emit(Event::Destroy);

    assert_eq!(bus.advance(TICK), 0);
    assert_eq!(input.borrow().host().selection(), None);
    assert!(input.borrow().is_destroyed());
    assert!(binding.is_disposed(), "Destroy releases every subscription");
    assert_eq!(bus.handler_count(), 0);
}

#[test]
fn test_selection_after_input_dropped() {
    let bus = EventBus::new();
    let (input, _binding) = bound_price(&bus);

    bus.emit(Event::Focus);
    drop(input);

    // The task still runs, but finds nothing to act on
    assert_eq!(bus.advance(TICK), 1);
}

#[test]
fn test_events_after_destroy_are_ignored() {
    let bus = EventBus::new();
    let (input, _binding) = bound_price(&bus);

    bus.emit(Event::Destroy);
    assert_eq!(bus.emit(Event::Focus), 0);
    assert_eq!(bus.emit(Event::Input("1".to_string())), 0);
    assert_eq!(input.borrow().host().rendered(), "930,000");
}

#[test]
fn test_attribute_change_through_bus() {
    let bus = EventBus::new();
    let (input, _binding) = bound_price(&bus);

    input.borrow_mut().scope_mut().set(Attr::Max, Value::from(10.0));
    bus.emit(Event::AttributeChanged(Attr::Max));

    assert_eq!(input.borrow().host().validity().get("max"), Some(false));
    assert_eq!(input.borrow().host().rendered(), "930,000");
}

#[test]
fn test_dispose_releases_handlers() {
    let bus = EventBus::new();
    let (input, binding) = bound_price(&bus);
    assert_eq!(bus.handler_count(), 5);

    binding.dispose();
    binding.dispose();
    assert!(binding.is_disposed());
    assert_eq!(bus.handler_count(), 0);

    bus.emit(Event::Focus);
    assert_eq!(input.borrow().host().rendered(), "930,000");
}

#[test]
fn test_dropping_binding_releases_handlers() {
    let bus = EventBus::new();
    let (_input, binding) = bound_price(&bus);

    drop(binding);
    assert_eq!(bus.handler_count(), 0);
}

#[test]
fn test_instances_do_not_collide() {
    let bus = EventBus::new();
    let (first, first_binding) = bound_price(&bus);
    let (second, _second_binding) = bound_price(&bus);
    assert_eq!(bus.handler_count(), 10);

    first_binding.dispose();
    assert_eq!(bus.handler_count(), 5);

    bus.emit(Event::Focus);
    assert_eq!(first.borrow().host().rendered(), "930,000");
    assert_eq!(second.borrow().host().rendered(), "930000");
}
