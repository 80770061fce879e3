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

//! GTK4 Application wrapper
//!
//! Opens a window with one [`NumberEntry`] and a status line showing the
//! bound model and any failing rules.
//!
//! ```text
//! App (GTK4 Application)
//!   ├─ Builds main window
//!   ├─ Creates NumberEntry from the InputConfig
//!   └─ Keeps the status line in sync with the entry
//! ```

use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Application, ApplicationWindow, Button, Label, Orientation};

use crate::config::InputConfig;
use crate::ui::NumberEntry;

/// GTK4 Application hosting one number entry
pub struct App {
    /// GTK4 Application instance
    app: Application,
    /// Configuration of the entry
    config: Rc<InputConfig>,
}

impl App {
    /// Creates a new App for the given input configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use number_input::config::InputConfig;
    /// use number_input::ui::App;
    ///
    /// let app = App::new(InputConfig::default());
    /// app.run();
    /// ```
    pub fn new(config: InputConfig) -> Self {
        let app = Application::builder()
            .application_id("com.tidynest.number-input")
            .build();

        Self {
            app,
            config: Rc::new(config),
        }
    }

    /// Runs the GTK4 application
    ///
    /// Blocks until the window closes.
    pub fn run(self) {
        let config = Rc::clone(&self.config);

        self.app.connect_activate(move |app| {
            Self::build_ui(app, &config);
        });

        self.app.run_with_args::<&str>(&[]);
    }

    fn build_ui(app: &Application, config: &InputConfig) {
        let window = ApplicationWindow::builder()
            .application(app)
            .title("Number Input")
            .default_width(360)
            .build();

        let content = gtk4::Box::new(Orientation::Vertical, 8);
        content.set_margin_top(16);
        content.set_margin_bottom(16);
        content.set_margin_start(16);
        content.set_margin_end(16);

        let title = Label::builder().label("Amount").halign(Align::Start).build();
        let number_entry = Rc::new(NumberEntry::new(config));
        let status = Label::builder().halign(Align::Start).build();
        status.add_css_class("dim-label");

        // A second focusable widget, so focus can leave the entry
        let done = Button::with_label("Done");
        done.set_halign(Align::End);

        let status_label = status.clone();
        number_entry.connect_change(move |model, validity| {
            let failing = validity.failing();
            let text = if failing.is_empty() {
                format!("Model: {}", model)
            } else {
                format!("Model: {} (invalid: {})", model, failing.join(", "))
            };
            status_label.set_text(&text);
        });
        status.set_text(&format!("Model: {}", number_entry.model()));

        content.append(&title);
        content.append(number_entry.widget());
        content.append(&status);
        content.append(&done);

        let dispose_entry = Rc::clone(&number_entry);
        window.connect_close_request(move |_| {
            dispose_entry.dispose();
            glib::Propagation::Proceed
        });

        window.set_child(Some(&content));
        window.present();
    }
}
