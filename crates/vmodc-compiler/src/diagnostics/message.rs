use super::Span;

/// Every defect the front end can report.
///
/// Grouped roughly by the stage that detects them. Only the warning-class
/// kinds (see [`DiagnosticKind::default_severity`]) are subject to strict-mode
/// promotion; everything else aborts the run unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Declaration structure
    UnterminatedString,
    ExpectedKeyword,
    UnknownStanza,
    MissingModule,
    StanzaSyntax,

    // Names
    IllegalName,
    IllegalNativeName,

    // Signatures
    ExpectedType,
    EnumSpecNotAllowed,
    ExpectedToken,
    UnexpectedEnd,
    DuplicateArgument,
    UnnamedOptional,
    VoidArgument,

    // Module settings
    InvalidAbi,
    InvalidSynopsis,
    DuplicatePrefix,
    DuplicateAbi,
    LateSetting,

    // Objects and aliases
    MethodOutsideObject,
    MethodName,
    UnresolvedSymbol,
    DuplicateSymbol,

    // Recoverable
    DuplicateModule,
    EventDocumentation,
    DuplicateEnumValue,
}

impl DiagnosticKind {
    /// Default severity for this kind. Strict mode promotes warnings.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::DuplicateModule | Self::EventDocumentation | Self::DuplicateEnumValue => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated string literal",
            Self::ExpectedKeyword => "expected a declaration keyword after `$`",
            Self::UnknownStanza => "unknown declaration",
            Self::MissingModule => "`$Module` must be the first declaration",
            Self::StanzaSyntax => "syntax error",

            Self::IllegalName => "illegal name",
            Self::IllegalNativeName => "illegal native name",

            Self::ExpectedType => "expected a type",
            Self::EnumSpecNotAllowed => "only ENUMs take `{...}` specs",
            Self::ExpectedToken => "unexpected token",
            Self::UnexpectedEnd => "unexpected end of declaration",
            Self::DuplicateArgument => "duplicate argument name",
            Self::UnnamedOptional => "optional arguments must have names",
            Self::VoidArgument => "arguments cannot be of type VOID",

            Self::InvalidAbi => "valid ABI types are `strict` or `vrt`",
            Self::InvalidSynopsis => "valid Synopsis values are `auto` or `manual`",
            Self::DuplicatePrefix => "`$Prefix` may only be declared once",
            Self::DuplicateAbi => "`$ABI` may only be declared once",
            Self::LateSetting => "module settings must precede functions, objects, events and aliases",

            Self::MethodOutsideObject => "`$Method` must follow an `$Object` or another `$Method`",
            Self::MethodName => "method names need to start with `.`",
            Self::UnresolvedSymbol => "symbol not found",
            Self::DuplicateSymbol => "name already defined",

            Self::DuplicateModule => "`$Module` declared more than once",
            Self::EventDocumentation => "documentation on `$Event` is not rendered",
            Self::DuplicateEnumValue => "duplicate ENUM value",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownStanza => "unknown declaration `${}`".to_string(),
            Self::IllegalName => "`{}()`: illegal name".to_string(),
            Self::IllegalNativeName => "`{}()`: illegal native name".to_string(),
            Self::ExpectedType => "expected a type, got `{}`".to_string(),
            Self::DuplicateArgument => "duplicate argument name `{}`".to_string(),
            Self::UnresolvedSymbol => "symbol `{}` not found".to_string(),
            Self::DuplicateSymbol => "`{}` is already defined".to_string(),
            Self::DuplicateEnumValue => "duplicate ENUM value `{}`".to_string(),
            Self::EventDocumentation => "documentation on `$Event {}` is not rendered".to_string(),
            Self::MethodName => "`$Method {}`: method names need to start with `.`".to_string(),
            Self::InvalidAbi => format!("{}, got `{{}}`", self.fallback_message()),
            Self::InvalidSynopsis => format!("{}, got `{{}}`", self.fallback_message()),

            // Standard pattern: fallback + context
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One-time notice about a legacy form that still works but is going away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub key: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Severity after strict-mode promotion.
    pub(crate) severity: Severity,
    /// The declaration span shown to the user.
    pub(crate) range: Span,
    pub(crate) message: String,
}

impl DiagnosticMessage {
    pub(crate) fn new(
        kind: DiagnosticKind,
        severity: Severity,
        range: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            range,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn range(&self) -> Span {
        self.range.clone()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether strict mode raised this diagnostic above its default severity.
    pub fn is_promoted(&self) -> bool {
        self.severity != self.kind.default_severity()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity, self.range.start, self.range.end, self.message
        )
    }
}
