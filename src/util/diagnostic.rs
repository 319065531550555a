//! User-facing diagnostic messages.
//!
//! A diagnostic carries the failure, the facts that led to it, and a
//! numbered list of things the user can try.

use std::fmt;
use std::fmt::Write as _;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    fn colored(&self) -> &'static str {
        match self {
            Severity::Error => "\x1b[1;31merror\x1b[0m",
            Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// Stable error code (`slipway::graph::cycle`)
    pub code: Option<String>,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Warning, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            code: None,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity = if color {
            self.severity.colored()
        } else {
            self.severity.as_str()
        };
        let _ = writeln!(output, "{}: {}", severity, self.message);

        if let Some(code) = &self.code {
            let _ = writeln!(output, "  = code: {}", code);
        }

        for ctx in &self.context {
            let _ = writeln!(output, "  → {}", ctx);
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
            let _ = writeln!(output, "{}: consider:", help);
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                let _ = writeln!(output, "  {}. {}", i + 1, suggestion);
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("`ogre` cannot be built in this configuration")
            .with_code("slipway::resolve::unsupported_configuration")
            .with_context("gcc 11 is not supported for version 1.10.2")
            .with_suggestion("Pick a different compiler")
            .with_suggestion("Run `slipway list`");

        let output = diag.format(false);
        assert!(output.starts_with("error: `ogre` cannot be built"));
        assert!(output.contains("  = code: slipway::resolve::unsupported_configuration\n"));
        assert!(output.contains("  → gcc 11"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("  2. Run `slipway list`"));
    }

    #[test]
    fn test_warning_without_suggestions() {
        let output = Diagnostic::warning("option `foo` is not declared").format(false);
        assert_eq!(output, "warning: option `foo` is not declared\n");
    }
}
