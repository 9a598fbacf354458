//! Diagnostic channel.
//!
//! Translation failures never reach the caller as errors; they land here
//! instead, tagged with the rule that broke when there is one. Every
//! diagnostic is echoed to stderr (stdout carries scripts) and sent to
//! subscribers, so the CLI, an embedding editor or a test can watch it.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::TranslateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Rule the diagnostic is about, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self { severity: Severity::Info, message: message.into(), rule: None }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, message: message.into(), rule: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, message: message.into(), rule: None }
    }

    pub fn for_rule(mut self, rule: &str) -> Self {
        self.rule = Some(rule.to_string());
        self
    }

    /// Error diagnostic for a pass that fell back to its source
    pub fn translation_failed(err: &TranslateError) -> Self {
        let diagnostic = Self::error(format!("Translation failed: {}", err));
        match err.rule() {
            Some(rule) => diagnostic.for_rule(rule),
            None => diagnostic,
        }
    }

    fn render(&self) -> String {
        let marker = match self.severity {
            Severity::Info => " ",
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
        };
        match &self.rule {
            Some(rule) => format!("{} [{}] {}", marker, rule, self.message),
            None => format!("{} {}", marker, self.message),
        }
    }
}

/// Process-wide channel the translator reports to
pub static DIAGNOSTICS: Lazy<DiagnosticChannel> = Lazy::new(DiagnosticChannel::new);

pub struct DiagnosticChannel {
    sender: broadcast::Sender<Diagnostic>,
}

impl DiagnosticChannel {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Print to stderr and send to all subscribers
    pub fn emit(&self, diagnostic: Diagnostic) {
        eprintln!("{}", diagnostic.render());
        // No subscribers is fine
        let _ = self.sender.send(diagnostic);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Diagnostic> {
        self.sender.subscribe()
    }
}

impl Default for DiagnosticChannel {
    fn default() -> Self {
        Self::new()
    }
}

pub fn report(diagnostic: Diagnostic) {
    DIAGNOSTICS.emit(diagnostic);
}

pub fn report_info(msg: impl Into<String>) {
    report(Diagnostic::info(msg));
}

pub fn report_warning(msg: impl Into<String>) {
    report(Diagnostic::warning(msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_receives_diagnostic() {
        let channel = DiagnosticChannel::new();
        let mut rx = channel.subscribe();

        channel.emit(Diagnostic::warning("rule set is empty"));

        let received = rx.try_recv().unwrap();
        assert_eq!(received.severity, Severity::Warning);
        assert_eq!(received.message, "rule set is empty");
        assert!(received.rule.is_none());
    }

    #[test]
    fn test_emit_without_subscribers() {
        DiagnosticChannel::new().emit(Diagnostic::info("nobody listening"));
    }

    #[test]
    fn test_translation_failed_carries_rule() {
        let err = TranslateError::UnknownCapture {
            rule: "env-set".into(),
            reference: "3".into(),
        };
        let diagnostic = Diagnostic::translation_failed(&err);

        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.rule.as_deref(), Some("env-set"));
        assert!(diagnostic.render().starts_with("❌ [env-set] Translation failed:"));
    }

    #[test]
    fn test_serialized_form() {
        let json = serde_json::to_value(Diagnostic::info("ok")).unwrap();
        assert_eq!(json["severity"], "info");
        assert!(json.get("rule").is_none());

        let json = serde_json::to_value(Diagnostic::info("2 matches").for_rule("json-body")).unwrap();
        assert_eq!(json["rule"], "json-body");
    }
}
