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

//! src/core/mod.rs
//!
//! Core number input logic
//!
//! This module contains everything between a widget's raw text and the
//! number bound to the application:
//! - Type definitions (values, model values, precision, bounds, validity)
//! - Partial application used to assemble conversion/validation stages
//! - Thousand-separator formatting
//! - View/model conversion
//! - Number, minimum and maximum validation
//! - The focus/blur mediator and its event wiring
//!
//! Nothing here depends on a UI toolkit, so all of it is unit tested
//! without a display server.

pub mod binding;
pub mod convert;
pub mod curry;
pub mod format;
pub mod host;
pub mod mediator;
pub mod types;
pub mod validator;

pub use binding::{bind_input, Binding, Event, EventBus, Trigger};
pub use format::{GroupedFormatter, NumberFormatter, Separators};
pub use host::{Attr, FormControl, MemoryControl, Scope};
pub use mediator::{CancellationToken, DeferredSelection, NumberInput};
pub use types::*;
pub use validator::{is_number, meets_maximum, meets_minimum, Verdict};

#[cfg(test)]
mod tests;
