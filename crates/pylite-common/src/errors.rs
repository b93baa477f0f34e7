use crate::span::Span;

/// Pipeline stage that produced a diagnostic.
///
/// The stage selects the message template used when the diagnostic is
/// rendered into a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

/// A reported condition carrying a source location and a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(stage: Stage, message: impl Into<String>, span: Span) -> Self {
        Self {
            stage,
            message: message.into(),
            span,
        }
    }

    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::new(Stage::Lexical, message, span)
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(Stage::Syntax, message, span)
    }

    pub fn semantic(message: impl Into<String>, span: Span) -> Self {
        Self::new(Stage::Semantic, message, span)
    }

    /// Line the diagnostic points at.
    pub fn line(&self) -> u32 {
        self.span.line()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stage {
            Stage::Lexical => write!(
                f,
                "{} at line {}, column {}",
                self.message, self.span.start.line, self.span.start.column
            ),
            Stage::Syntax => write!(f, "error at line {}: {}", self.line(), self.message),
            Stage::Semantic => {
                write!(f, "semantic error at line {}: {}", self.line(), self.message)
            }
        }
    }
}

/// Ordered collector for diagnostics produced by one stage.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Render every diagnostic with its stage template, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// Line of the first diagnostic, if any.
    pub fn first_line(&self) -> Option<u32> {
        self.diagnostics.first().map(Diagnostic::line)
    }
}
