//! Three-stage analyzer for a small indentation-insensitive Python subset.
//!
//! [`analyze`] runs the scanner, the recursive descent parser and the
//! semantic checker in sequence and folds their results into one
//! [`AnalysisReport`]. Every stage runs regardless of earlier failures;
//! malformed input only ever produces diagnostics.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod report;
pub mod semantic;

use pylite_common::Limits;

pub use report::{AnalysisReport, SyntaxReport};

/// Analyze `source` with the default limits.
pub fn analyze(source: &str) -> AnalysisReport {
    analyze_with_limits(source, &Limits::default())
}

/// Analyze `source`, applying `limits.max_depth` to both the parser and
/// the checker.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn analyze_with_limits(source: &str, limits: &Limits) -> AnalysisReport {
    let lexical = lexer::scan(source);

    let (ast, syntax_diags) = parser::Parser::new(lexical.significant_tokens())
        .with_max_depth(limits.max_depth)
        .parse();

    let semantic = semantic::Checker::new()
        .with_max_depth(limits.max_depth)
        .check(Some(&ast));

    let report = AnalysisReport::new(lexical, SyntaxReport::new(ast, syntax_diags), semantic);
    tracing::debug!(success = report.success, "analysis finished");
    report
}
