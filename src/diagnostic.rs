//! Non-fatal warnings raised while registering types and validating data.

use std::fmt;
use std::sync::Mutex;

/// A recoverable event worth telling someone about. Never aborts the operation that raised it.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// A type was registered under a name that was already taken, replacing the old entry.
    Override { name: String },
    /// An object carried keys its type doesn't declare, and no wildcard field absorbed them.
    ExtraFields { context: String, fields: Vec<String> },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Diagnostic::Override { ref name } => {
                write!(f, "Overriding schema for key '{}'", name)
            }
            Diagnostic::ExtraFields {
                ref context,
                ref fields,
            } => write!(
                f,
                "Extra field{} present: '{}' [context: {}]",
                if fields.len() > 1 { "s" } else { "" },
                fields.join(","),
                context
            ),
        }
    }
}

/// Somewhere to send diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Sends every diagnostic to the `log` facade at warn level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        log::warn!("{}", diagnostic);
    }
}

/// Keeps every diagnostic in memory, for callers that want to inspect or report them later.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every diagnostic collected so far.
    pub fn drain(&self) -> Vec<Diagnostic> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match self.events.lock() {
            Ok(mut events) => events.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}
