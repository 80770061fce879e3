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

//! GTK4 user interface
//!
//! # Module Structure
//!
//! ```text
//! ui/
//! ├── mod.rs           // This file - exports
//! ├── app.rs           // GTK4 Application setup
//! └── number_entry.rs  // gtk4::Entry bound to a NumberInput
//! ```
//!
//! Only built with the `gtk` feature.

pub mod app;
pub mod number_entry;

pub use {app::App, number_entry::{EntryControl, NumberEntry}};
