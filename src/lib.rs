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

//! Number Input
//!
//! A form-field number input: thousand-separated text while the field is
//! idle, the raw number while it is being edited, and number/minimum/maximum
//! validation on every keystroke.
//!
//! # Features
//!
//! - **Formatting:** `930000` shows as `930,000` and edits as `930000`
//! - **Validation:** HTML5 number grammar, live min/max bounds, precision
//! - **Currying:** every conversion and check is a partially applicable stage
//! - **Host traits:** works with any widget through `FormControl` and `Scope`
//! - **GTK4 Entry:** optional `gtk` feature binding a `gtk4::Entry`
//!
//! # Architecture
//!
//! - **`core`:** Pure logic (types, currying, formatting, conversion,
//!   validation, focus/blur mediator, event wiring)
//! - **`config`:** JSON input configuration and attribute values
//! - **`ui`:** GTK4 number entry (feature `gtk`)
//!
//! # Examples
//!
//! ## Formatting and parsing
//!
//! ```
//! use number_input::core::convert::to_model;
//! use number_input::core::{GroupedFormatter, NumberFormatter, Precision, Value};
//!
//! let formatter = GroupedFormatter::default();
//! assert_eq!(formatter.format(1234567.891, Precision::new(2)), "1,234,567.89");
//!
//! let model = to_model(&formatter, Precision::new(0), &Value::from("93,000"));
//! assert_eq!(model.get(), Some(93000.0));
//! ```
//!
//! ## Driving an input
//!
//! ```
//! use number_input::config::InputConfig;
//!
//! let config = InputConfig::from_json(r#"{ "model": 930000, "max": 1000000 }"#)?;
//! let mut input = config.build_input()?;
//!
//! input.gain_focus();
//! assert_eq!(input.host().rendered(), "930000");
//!
//! input.input_changed("93000");
//! input.lose_focus();
//! assert_eq!(input.host().rendered(), "93,000");
//! # Ok::<(), number_input::config::ConfigError>(())
//! ```

pub mod config;
pub mod core;
#[cfg(feature = "gtk")]
pub mod ui;

// Re-export commonly used types for convenience
pub use config::{Attributes, ConfigError, InputConfig};
pub use crate::core::{FormControl, ModelValue, NumberInput, Precision, Scope, Value};
