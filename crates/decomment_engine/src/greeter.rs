use std::fmt;

use decomment_base::{PalHandle, RealPal};
use tracing::warn;

/// A greeting derived from a name: `Hello, {name}!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingMessage(String);

impl GreetingMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GreetingMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the greeting for `name`. The name is used verbatim.
pub fn greeting_message(name: &str) -> GreetingMessage {
    GreetingMessage(format!("Hello, {name}!"))
}

/// Writes greetings to the standard output of a PAL.
#[derive(Debug, Clone)]
pub struct Greeter {
    pal: PalHandle,
}

impl Greeter {
    pub fn new(pal: PalHandle) -> Self {
        Self { pal }
    }

    /// Emits `Hello, {name}!` followed by a newline.
    ///
    /// Never fails: a broken stdout is logged and otherwise ignored.
    pub fn greet(&self, name: &str) {
        let line = format!("{}\n", greeting_message(name));
        if let Err(e) = self.pal.write_stdout(&line) {
            warn!(error = %e, "failed to write greeting");
        }
    }
}

/// Greets `name` on the process' standard output.
pub fn greet(name: &str) {
    Greeter::new(PalHandle::new(RealPal::new(".".into()))).greet(name);
}
