//! Diagnostics as the checker reports them.

use serde::Serialize;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl DiagnosticCategory {
    /// The category's name as the checker spells it.
    pub fn name(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "Warning",
            DiagnosticCategory::Error => "Error",
            DiagnosticCategory::Suggestion => "Suggestion",
            DiagnosticCategory::Message => "Message",
        }
    }
}

/// A possibly nested diagnostic message.
///
/// Elaborated errors ("Type 'A' is not assignable to type 'B'. Property 'x'
/// is missing ...") arrive as a chain whose children explain their parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageChain {
    pub message_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next: Vec<MessageChain>,
}

impl MessageChain {
    /// A single-part message.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message_text: message.into(),
            next: Vec::new(),
        }
    }

    /// Attach an elaboration below this message.
    #[must_use]
    pub fn with_next(mut self, next: MessageChain) -> Self {
        self.next.push(next);
        self
    }
}

/// A pre-emission diagnostic for one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OracleDiagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    /// File the diagnostic is anchored to, if any
    pub file: Option<String>,
    /// Start offset in `file` (UTF-16), if anchored
    pub start: Option<u32>,
    pub length: Option<u32>,
    pub message: MessageChain,
}

impl OracleDiagnostic {
    /// Create an error diagnostic anchored at `start`.
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            file: Some(file.into()),
            start: Some(start),
            length: Some(length),
            message: MessageChain::text(message),
        }
    }

    /// Create a diagnostic that is not tied to a location (options errors,
    /// missing lib files, ...).
    pub fn global(category: DiagnosticCategory, message: impl Into<String>, code: u32) -> Self {
        Self {
            category,
            code,
            file: None,
            start: None,
            length: None,
            message: MessageChain::text(message),
        }
    }
}
