use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

/// A diagnostic message from the linter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,

    /// Name of the rule that fired
    pub rule: String,

    pub message: String,

    /// Where in the design the issue was found, e.g. `row 0 column 1 content 2`
    pub location: String,

    /// How to fix it, when the rule knows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    fn new(
        level: DiagnosticLevel,
        rule: impl Into<String>,
        message: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            level,
            rule: rule.into(),
            message: message.into(),
            location: location.into(),
            suggestion: None,
        }
    }

    pub fn error(rule: impl Into<String>, message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, rule, message, location)
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, rule, message, location)
    }

    pub fn info(rule: impl Into<String>, message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, rule, message, location)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
