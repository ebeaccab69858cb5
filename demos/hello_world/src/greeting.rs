//! Greeting records and rendering.

use std::io::{self, Write};

use record_args::Record;
use serde::{Deserialize, Serialize};

use crate::error::{HelloWorldError, ValidationError};

/// How the greeting is delivered.
#[derive(Debug, Clone, Deserialize, Serialize, Record, PartialEq, Eq)]
pub struct Style {
    /// Delivery mode.
    #[record(choices("standard", "excited", "quiet"), default = "standard")]
    pub mode: String,
    /// Closing punctuation for standard and excited greetings.
    #[record(default = "!")]
    pub punctuation: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            mode: "standard".to_owned(),
            punctuation: "!".to_owned(),
        }
    }
}

/// Everything needed to greet someone.
#[derive(Debug, Clone, Deserialize, Record)]
pub struct Greeting {
    /// Who to greet.
    #[record(default = "World")]
    pub recipient: String,
    /// Words placed before the recipient.
    #[record(default = vec!["Hello".to_owned()])]
    pub salutations: Vec<String>,
    /// Line printed before the greeting.
    pub preamble: Option<String>,
    /// Delivery style.
    #[record(default = Style::default())]
    pub style: Style,
}

/// A rendered greeting ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingPlan {
    preamble: Option<String>,
    message: String,
    times: u8,
}

impl GreetingPlan {
    /// The greeting line.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The optional line preceding the greeting.
    #[must_use]
    pub fn preamble(&self) -> Option<&str> {
        self.preamble.as_deref()
    }
}

/// Render `greeting`, repeating the message `times` times when printed.
///
/// # Errors
///
/// Returns [`ValidationError`] when no salutation or recipient remains after
/// trimming, or `times` is zero.
///
/// # Examples
///
/// ```rust
/// use hello_world::greeting::{Greeting, Style, build_plan};
///
/// let greeting = Greeting {
///     recipient: "Ada".to_owned(),
///     salutations: vec!["Hello".to_owned(), "there".to_owned()],
///     preamble: None,
///     style: Style::default(),
/// };
/// let plan = build_plan(&greeting, 1)?;
/// assert_eq!(plan.message(), "Hello there, Ada!");
/// # Ok::<(), hello_world::error::HelloWorldError>(())
/// ```
pub fn build_plan(greeting: &Greeting, times: u8) -> Result<GreetingPlan, HelloWorldError> {
    if times == 0 {
        return Err(ValidationError::ZeroRepeat.into());
    }
    let words: Vec<&str> = greeting
        .salutations
        .iter()
        .map(|word| word.trim())
        .filter(|word| !word.is_empty())
        .collect();
    if words.is_empty() {
        return Err(ValidationError::MissingSalutation.into());
    }
    let recipient = greeting.recipient.trim();
    if recipient.is_empty() {
        return Err(ValidationError::BlankRecipient.into());
    }
    let base = format!("{}, {recipient}", words.join(" "));
    let punctuation = greeting.style.punctuation.trim();
    let message = match greeting.style.mode.as_str() {
        "excited" => format!("{}{punctuation}", base.to_uppercase()),
        "quiet" => format!("{base}..."),
        _ => format!("{base}{punctuation}"),
    };
    let preamble = greeting
        .preamble
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned);
    Ok(GreetingPlan {
        preamble,
        message,
        times,
    })
}

/// Write `plan` to standard output.
///
/// # Errors
///
/// Returns [`HelloWorldError::Io`] when standard output cannot be written.
pub fn print_plan(plan: &GreetingPlan) -> Result<(), HelloWorldError> {
    let mut out = io::stdout().lock();
    write_plan(&mut out, plan)?;
    Ok(())
}

fn write_plan(out: &mut impl Write, plan: &GreetingPlan) -> io::Result<()> {
    if let Some(preamble) = plan.preamble() {
        writeln!(out, "{preamble}")?;
    }
    for _ in 0..plan.times {
        writeln!(out, "{}", plan.message)?;
    }
    out.flush()
}
