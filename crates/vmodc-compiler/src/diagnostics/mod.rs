mod message;
mod printer;


pub use message::{DiagnosticKind, DiagnosticMessage, Notice, Severity};
pub use printer::DiagnosticsPrinter;

/// Byte range into the interface description.
pub type Span = std::ops::Range<usize>;

/// Warnings, errors and deprecation notices collected during one run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
    notices: Vec<Notice>,
    /// Strict mode: warnings are reported as errors.
    promote_warnings: bool,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection that reports every warning-class defect as an error.
    pub fn strict() -> Self {
        Self {
            promote_warnings: true,
            ..Self::default()
        }
    }

    /// Severity a diagnostic of `kind` gets in this collection.
    pub fn severity_of(&self, kind: DiagnosticKind) -> Severity {
        match kind.default_severity() {
            Severity::Warning if self.promote_warnings => Severity::Error,
            severity => severity,
        }
    }

    /// Create a diagnostic with the given kind and span.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(&mut self, kind: DiagnosticKind, range: Span) -> DiagnosticBuilder<'_> {
        let severity = self.severity_of(kind);
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::new(kind, severity, range, kind.fallback_message()),
        }
    }

    /// Record a deprecation notice. Repeated keys are dropped.
    pub fn notice(&mut self, key: &'static str, message: impl Into<String>) {
        if self.notices.iter().any(|n| n.key == key) {
            return;
        }
        self.notices.push(Notice {
            key,
            message: message.into(),
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    pub fn printer<'d, 's>(&'d self) -> DiagnosticsPrinter<'d, 's> {
        DiagnosticsPrinter::new(self)
    }

    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn render_colored(&self, source: &str, colored: bool) -> String {
        self.printer().source(source).colored(colored).render()
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    /// Record the diagnostic and return the severity it was recorded with.
    pub fn emit(self) -> Severity {
        let severity = self.message.severity;
        self.diagnostics.messages.push(self.message);
        severity
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
