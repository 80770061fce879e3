//! CLI entry point for number-input
//!
//! Provides command-line access to formatting, parsing and validation,
//! a step-by-step simulator of a bound input, and the GTK demo window.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use colored::*;
use number_input::config::{Attributes, InputConfig};
use number_input::core::convert::to_model;
use number_input::core::host::is_empty_value;
use number_input::core::{
    bind_input, is_number, meets_maximum, meets_minimum, Attr, Bound, Event, EventBus, FormControl,
    GroupedFormatter, MemoryControl, NumberFormatter, NumberInput, Precision, Value, Verdict,
};

#[derive(Parser)]
#[command(name = "number-input")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every transition (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a number for display
    Format {
        #[arg(allow_hyphen_values = true)]
        number: f64,

        /// Fractional digits
        #[arg(short, long, default_value_t = 0)]
        precision: u32,
    },

    /// Parse typed text into a model value
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Fractional digits
        #[arg(short, long, default_value_t = 0)]
        precision: u32,
    },

    /// Run the number, min and max rules against typed text
    Validate {
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Minimum bound
        #[arg(long, allow_hyphen_values = true)]
        min: Option<String>,

        /// Maximum bound
        #[arg(long, allow_hyphen_values = true)]
        max: Option<String>,

        /// Fractional digits
        #[arg(short, long, default_value_t = 0)]
        precision: u32,
    },

    /// Drive a bound input through a sequence of events
    ///
    /// Events: focus, blur, type:<text>, min:<v>, max:<v>, precision:<v>,
    /// tick (runs the deferred selection), destroy
    Simulate {
        /// JSON input configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Initial model value
        #[arg(long, allow_hyphen_values = true)]
        model: Option<f64>,

        /// Minimum bound
        #[arg(long, allow_hyphen_values = true)]
        min: Option<String>,

        /// Maximum bound
        #[arg(long, allow_hyphen_values = true)]
        max: Option<String>,

        /// Fractional digits
        #[arg(short, long)]
        precision: Option<String>,

        /// Print one JSON object per event
        #[arg(long)]
        json: bool,

        #[arg(required = true, allow_hyphen_values = true)]
        events: Vec<Step>,
    },

    /// Launch GUI with one bound number entry
    #[cfg(feature = "gtk")]
    Gui {
        /// JSON input configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// One simulator step
#[derive(Clone, Debug)]
enum Step {
    Focus,
    Blur,
    Type(String),
    Set(Attr, Value),
    Tick,
    Destroy,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => return Ok(Step::Focus),
            "blur" => return Ok(Step::Blur),
            "tick" => return Ok(Step::Tick),
            "destroy" => return Ok(Step::Destroy),
            _ => {}
        }

        let (name, arg) = s
            .split_once(':')
            .ok_or_else(|| format!("Unknown event '{}'", s))?;
        match name {
            "type" => Ok(Step::Type(arg.to_string())),
            other => Ok(Step::Set(Attr::from_str(other)?, attribute_value(arg))),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Focus => write!(f, "focus"),
            Step::Blur => write!(f, "blur"),
            Step::Type(text) => write!(f, "type:{}", text),
            Step::Set(attr, value) => write!(f, "{}:{}", attr.name(), value.to_text()),
            Step::Tick => write!(f, "tick"),
            Step::Destroy => write!(f, "destroy"),
        }
    }
}

/// Attribute text as a host would hand it over; empty means unset
fn attribute_value(raw: &str) -> Value {
    if raw.is_empty() {
        Value::Null
    } else {
        Value::Text(raw.to_string())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Commands::Format { number, precision } => {
            let view = GroupedFormatter::default().format(number, Precision::new(precision));
            println!("{}", view);
        }
        Commands::Parse { text, precision } => {
            let model = to_model(&GroupedFormatter::default(), Precision::new(precision), &Value::from(text));
            println!("{}", model);
        }
        Commands::Validate {
            text,
            min,
            max,
            precision,
        } => validate_text(&text, min, max, Precision::new(precision)),
        Commands::Simulate {
            config,
            model,
            min,
            max,
            precision,
            json,
            events,
        } => {
            let mut config = load_config(config)?;
            if model.is_some() {
                config.model = model;
            }
            if let Some(min) = min {
                config.min = attribute_value(&min);
            }
            if let Some(max) = max {
                config.max = attribute_value(&max);
            }
            if let Some(precision) = precision {
                config.precision = attribute_value(&precision);
            }
            simulate(&config, &events, json)?;
        }
        #[cfg(feature = "gtk")]
        Commands::Gui { config } => {
            let config = load_config(config)?;
            number_input::ui::App::new(config).run();
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<InputConfig> {
    match path {
        Some(path) => InputConfig::load(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e)),
        None => Ok(InputConfig::default()),
    }
}

/// Runs the three rules against `text` and prints a rule table
fn validate_text(text: &str, min: Option<String>, max: Option<String>, precision: Precision) {
    let formatter = GroupedFormatter::default();
    let coerce = |value: &Value| to_model(&formatter, precision, value);
    let candidate = Value::from(text);

    let number = is_number(&candidate, is_empty_value);
    let min_bound = min.as_deref().map(attribute_value).and_then(|v| Bound::resolve(&v));
    let max_bound = max.as_deref().map(attribute_value).and_then(|v| Bound::resolve(&v));
    let verdicts = [
        number.clone(),
        meets_minimum(min_bound, &number.value, coerce, is_empty_value),
        meets_maximum(max_bound, &number.value, coerce, is_empty_value),
    ];

    println!("{} Validating '{}'\n", "→".cyan(), text);
    for Verdict { rule, valid, .. } in &verdicts {
        let mark = if *valid { "✓".green() } else { "✗".red() };
        println!("  {} {}", mark, rule.name());
    }

    let model = coerce(&number.value);
    println!("\n{} {}", "Model:".bold(), model);

    if verdicts.iter().any(|verdict| !verdict.valid) {
        std::process::exit(1);
    }
}

type SimulatedInput = Rc<RefCell<NumberInput<MemoryControl, Attributes>>>;

/// Replays `steps` against an in-memory input bound to an event bus
fn simulate(config: &InputConfig, steps: &[Step], json: bool) -> anyhow::Result<()> {
    let input: SimulatedInput = Rc::new(RefCell::new(config.build_input()?));
    let bus = EventBus::new();
    let _binding = bind_input(&bus, &input);

    report("bind", &input, json)?;
    for step in steps {
        match step {
            Step::Focus => {
                bus.emit(Event::Focus);
            }
            Step::Blur => {
                bus.emit(Event::Blur);
            }
            Step::Type(text) => {
                bus.emit(Event::Input(text.clone()));
            }
            Step::Set(attr, value) => {
                input.borrow_mut().scope_mut().set(*attr, value.clone());
                bus.emit(Event::AttributeChanged(*attr));
            }
            Step::Tick => {
                bus.advance(config.select_delay());
            }
            Step::Destroy => {
                bus.emit(Event::Destroy);
            }
        }
        report(&step.to_string(), &input, json)?;
    }

    Ok(())
}

fn report(step: &str, input: &SimulatedInput, json: bool) -> anyhow::Result<()> {
    let input = input.borrow();
    let host = input.host();
    let focus = input
        .focus_state()
        .map(|state| state.to_string())
        .unwrap_or_else(|| "destroyed".to_string());

    if json {
        let line = serde_json::json!({
            "event": step,
            "view": host.view_value(),
            "rendered": host.rendered(),
            "model": host.model_value(),
            "focus": focus,
            "validity": host.validity(),
            "selected": host.selection().is_some(),
        });
        println!("{}", serde_json::to_string(&line)?);
        return Ok(());
    }

    let failing = host.validity().failing();
    let validity = if failing.is_empty() {
        "valid".green()
    } else {
        format!("invalid: {}", failing.join(", ")).red()
    };
    let selected = if host.selection().is_some() { " [selected]" } else { "" };

    println!(
        "{:<16} {} {} {} {}{}",
        step.cyan().bold(),
        format!("'{}'", host.rendered()).bold(),
        format!("model {}", host.model_value()).magenta(),
        focus.dimmed(),
        validity,
        selected.yellow(),
    );
    Ok(())
}
