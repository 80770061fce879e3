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

//! Event wiring
//!
//! [`EventBus`] is a single-threaded event source with a virtual clock: it
//! dispatches widget events to subscribed handlers and runs deferred tasks
//! when the clock is advanced. [`bind_input`] subscribes a
//! [`NumberInput`] to it and returns a [`Binding`], the handle that owns the
//! subscriptions and releases all of them on [`Binding::dispose`] (or drop).
//!
//! Handlers run to completion one after another; a deferred task is the only
//! thing that runs later, and it checks its cancellation token first.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::core::host::{Attr, FormControl, Scope};
use crate::core::mediator::{CancellationToken, NumberInput};

/// Kinds of events a handler can subscribe to
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Trigger {
    Focus,
    Blur,
    Input,
    AttributeChanged,
    Destroy,
}

/// Events emitted by a widget
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Focus,
    Blur,
    /// Raw text after a keystroke
    Input(String),
    /// An attribute re-evaluated to a new value
    AttributeChanged(Attr),
    Destroy,
}

impl Event {
    pub fn trigger(&self) -> Trigger {
        match self {
            Event::Focus => Trigger::Focus,
            Event::Blur => Trigger::Blur,
            Event::Input(_) => Trigger::Input,
            Event::AttributeChanged(_) => Trigger::AttributeChanged,
            Event::Destroy => Trigger::Destroy,
        }
    }
}

/// Identifies one subscription on an [`EventBus`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&Event)>;

struct Timer {
    due: Duration,
    token: CancellationToken,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct BusState {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Trigger, Handler)>,
    timers: Vec<Timer>,
    now: Duration,
}

/// Single-threaded event source with a virtual clock
///
/// Cloning yields another handle to the same bus.
#[derive(Clone, Default)]
pub struct EventBus {
    state: Rc<RefCell<BusState>>,
}

/// Non-owning handle to an [`EventBus`], used inside handlers
#[derive(Clone, Default)]
pub struct WeakBus {
    state: Weak<RefCell<BusState>>,
}

impl WeakBus {
    pub fn upgrade(&self) -> Option<EventBus> {
        self.state.upgrade().map(|state| EventBus { state })
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downgrade(&self) -> WeakBus {
        WeakBus {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Registers `handler` for events of kind `trigger`
    pub fn subscribe(&self, trigger: Trigger, handler: impl Fn(&Event) + 'static) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);
        state.handlers.push((id, trigger, Rc::new(handler)));
        id
    }

    /// Removes a subscription, returns whether it existed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.handlers.len();
        state.handlers.retain(|(handler_id, _, _)| *handler_id != id);
        state.handlers.len() != before
    }

    /// Dispatches an event, returns how many handlers saw it
    ///
    /// Handlers may subscribe, unsubscribe or emit while being dispatched.
    pub fn emit(&self, event: Event) -> usize {
        let trigger = event.trigger();
        let handlers: Vec<Handler> = self
            .state
            .borrow()
            .handlers
            .iter()
            .filter(|(_, handler_trigger, _)| *handler_trigger == trigger)
            .map(|(_, _, handler)| Rc::clone(handler))
            .collect();

        log::trace!("Dispatching {:?} to {} handler(s)", event, handlers.len());
        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    /// Schedules `task` to run `delay` after the current virtual time
    ///
    /// The task is dropped without running if `token` is cancelled first.
    pub fn defer(&self, delay: Duration, token: CancellationToken, task: impl FnOnce() + 'static) {
        let mut state = self.state.borrow_mut();
        let due = state.now + delay;
        state.timers.push(Timer {
            due,
            token,
            task: Box::new(task),
        });
    }

    /// Advances the virtual clock, runs due tasks in due order and returns
    /// how many of them actually ran
    pub fn advance(&self, by: Duration) -> usize {
        let due = {
            let mut state = self.state.borrow_mut();
            state.now += by;
            let now = state.now;
            let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
                state.timers.drain(..).partition(|timer| timer.due <= now);
            state.timers = pending;
            due.sort_by_key(|timer| timer.due);
            due
        };

        let mut ran = 0;
        for timer in due {
            if timer.token.is_cancelled() {
                log::trace!("Skipping cancelled deferred task");
                continue;
            }
            (timer.task)();
            ran += 1;
        }
        ran
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn handler_count(&self) -> usize {
        self.state.borrow().handlers.len()
    }

    /// Deferred tasks not yet run or dropped
    pub fn pending_tasks(&self) -> usize {
        self.state.borrow().timers.len()
    }
}

/// Subscriptions owned by one bound input
///
/// Releasing is idempotent and also happens when the input receives
/// [`Event::Destroy`].
pub struct Binding {
    bus: WeakBus,
    subscriptions: Rc<RefCell<Vec<SubscriptionId>>>,
}

impl Binding {
    /// Releases every subscription of this binding
    pub fn dispose(&self) {
        release(&self.bus, &self.subscriptions);
    }

    pub fn is_disposed(&self) -> bool {
        self.subscriptions.borrow().is_empty()
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn release(bus: &WeakBus, subscriptions: &RefCell<Vec<SubscriptionId>>) {
    let ids: Vec<SubscriptionId> = subscriptions.borrow_mut().drain(..).collect();
    if ids.is_empty() {
        return;
    }
    if let Some(bus) = bus.upgrade() {
        for id in &ids {
            bus.unsubscribe(*id);
        }
    }
    log::debug!("Released {} subscription(s)", ids.len());
}

/// Wires a number input to `bus`
///
/// - focus → [`NumberInput::gain_focus`], plus the deferred selection
/// - blur → [`NumberInput::lose_focus`]
/// - input → [`NumberInput::input_changed`]
/// - attribute change → [`NumberInput::config_changed`]
/// - destroy → [`NumberInput::destroy`], then every subscription is released
///
/// Handlers hold the input weakly; dropping the input silences them.
pub fn bind_input<H, S>(bus: &EventBus, input: &Rc<RefCell<NumberInput<H, S>>>) -> Binding
where
    H: FormControl + 'static,
    S: Scope + 'static,
{
    let subscriptions = Rc::new(RefCell::new(Vec::new()));
    let weak_bus = bus.downgrade();

    let focus_input = Rc::downgrade(input);
    let focus_bus = weak_bus.clone();
    let focus = bus.subscribe(Trigger::Focus, move |_| {
        let Some(input) = focus_input.upgrade() else { return };
        let Some(deferred) = input.borrow_mut().gain_focus() else { return };
        let Some(bus) = focus_bus.upgrade() else { return };

        let select_input = Rc::downgrade(&input);
        bus.defer(deferred.delay, deferred.token.clone(), move || {
            if let Some(input) = select_input.upgrade() {
                input.borrow_mut().select_contents(&deferred);
            }
        });
    });

    let blur_input = Rc::downgrade(input);
    let blur = bus.subscribe(Trigger::Blur, move |_| {
        if let Some(input) = blur_input.upgrade() {
            input.borrow_mut().lose_focus();
        }
    });

    let keystroke_input = Rc::downgrade(input);
    let keystroke = bus.subscribe(Trigger::Input, move |event| {
        if let (Event::Input(raw), Some(input)) = (event, keystroke_input.upgrade()) {
            input.borrow_mut().input_changed(raw);
        }
    });

    let attribute_input = Rc::downgrade(input);
    let attribute = bus.subscribe(Trigger::AttributeChanged, move |event| {
        if let (Event::AttributeChanged(attr), Some(input)) = (event, attribute_input.upgrade()) {
            input.borrow_mut().config_changed(*attr);
        }
    });

    let destroy_input = Rc::downgrade(input);
    let destroy_bus = weak_bus.clone();
    let destroy_subscriptions = Rc::downgrade(&subscriptions);
    let destroy = bus.subscribe(Trigger::Destroy, move |_| {
        if let Some(input) = destroy_input.upgrade() {
            input.borrow_mut().destroy();
        }
        if let Some(subscriptions) = destroy_subscriptions.upgrade() {
            release(&destroy_bus, &subscriptions);
        }
    });

    subscriptions
        .borrow_mut()
        .extend([focus, blur, keystroke, attribute, destroy]);

    Binding {
        bus: weak_bus,
        subscriptions,
    }
}
