//! Run diagnostics collected as data.
//!
//! Pipeline stages record what they skipped or recovered from instead of
//! printing as they go. Callers decide how to surface the events: the CLI
//! prints them to stderr, tests assert on them directly.

/// Severity of a run event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
}

/// One diagnostic record, optionally tied to a region.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub level: Level,
    pub region: Option<String>,
    pub message: String,
}

/// Ordered collection of run events.
#[derive(Debug, Default)]
pub struct Report {
    pub events: Vec<Event>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an informational event.
    pub fn info(&mut self, region: Option<&str>, message: impl Into<String>) {
        self.push(Level::Info, region, message.into());
    }

    /// Record a warning.
    pub fn warn(&mut self, region: Option<&str>, message: impl Into<String>) {
        self.push(Level::Warning, region, message.into());
    }

    fn push(&mut self, level: Level, region: Option<&str>, message: String) {
        self.events.push(Event {
            level,
            region: region.map(str::to_string),
            message,
        });
    }

    /// All warning events in order.
    pub fn warnings(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.level == Level::Warning)
    }

    pub fn has_warnings(&self) -> bool {
        self.events.iter().any(|e| e.level == Level::Warning)
    }
}
