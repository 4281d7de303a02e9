//! Status reporting for conversion runs
//!
//! Failures never abort the host; they are collected here as status messages
//! and handed to whatever surface triggered the conversion.

use std::fmt;

use tracing::{error, info, warn};

use crate::application::error::ConversionError;

/// Level of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// One message emitted during a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

/// How the conversion ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Ran to completion, possibly with per-element warnings or errors
    #[default]
    Finished,
    /// Aborted (nothing to do or top-level failure)
    Cancelled,
}

/// Counters describing what a conversion changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub anchors_created: usize,
    pub items_rehomed: usize,
    pub containers_removed: usize,
    pub containers_created: usize,
    pub objects_moved: usize,
}

/// Aggregated result of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub outcome: Outcome,
    pub messages: Vec<StatusMessage>,
    pub stats: ConversionStats,
}

impl ConversionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message and mirror it to the log.
    pub fn push(&mut self, severity: Severity, text: impl Into<String>) {
        let text = text.into();
        match severity {
            Severity::Info => info!("{}", text),
            Severity::Warning => warn!("{}", text),
            Severity::Error => error!("{}", text),
        }
        self.messages.push(StatusMessage { severity, text });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(Severity::Info, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(Severity::Warning, text);
    }

    /// Record a failure at its own severity.
    pub fn failure(&mut self, err: &ConversionError) {
        self.push(err.severity(), err.to_string());
    }

    /// Record a failure that ends the run.
    pub fn cancel(&mut self, err: &ConversionError) {
        self.failure(err);
        self.outcome = Outcome::Cancelled;
    }

    pub fn is_finished(&self) -> bool {
        self.outcome == Outcome::Finished
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &StatusMessage> {
        self.with_severity(Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &StatusMessage> {
        self.with_severity(Severity::Error)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &StatusMessage> {
        self.messages.iter().filter(move |m| m.severity == severity)
    }
}
