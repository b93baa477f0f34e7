use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pylite_common::config::{self, ConfigError};
use pylite_common::{AnalyzerConfig, Diagnostic, Stage};

/// pylite analyzer.
///
/// Scans, parses and checks a source file and prints the JSON report.
#[derive(Parser)]
#[command(
    name = "pylitec",
    version,
    about,
    long_about = "pylite analyzer.\n\nRuns the scanner, parser and semantic checker over a source file\nand prints the combined report as JSON.\n\nExamples:\n  pylitec app.py               Print the JSON report\n  pylitec app.py --pretty      Pretty-print the JSON report\n  pylitec app.py --check       Render diagnostics, exit 1 on errors\n  cat app.py | pylitec -       Read the source from stdin"
)]
struct Cli {
    /// Input source file, or `-` for stdin.
    input: PathBuf,

    /// Configuration file (default: nearest pylite.toml above the input).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(short, long)]
    pretty: bool,

    /// Render diagnostics instead of printing the report.
    #[arg(long)]
    check: bool,

    /// Emit token stream to stdout (debug).
    #[arg(long = "emit-tokens")]
    emit_tokens: bool,

    /// Emit the syntax tree as JSON to stdout (debug).
    #[arg(long = "emit-ast")]
    emit_ast: bool,

    /// Log pipeline progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let from_stdin = cli.input.as_os_str() == "-";
    let file_name = if from_stdin {
        "<stdin>".to_string()
    } else {
        cli.input
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    };

    // === Configuration ===
    let config = match load_config(&cli, from_stdin) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    if let Some(path) = &config.source {
        tracing::debug!(config = %path.display(), "loaded configuration");
    }

    // === Source ===
    let source = match read_source(&cli.input, from_stdin) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: could not read '{}': {}", cli.input.display(), e);
            process::exit(1);
        }
    };
    if source.len() > config.limits.max_source_bytes {
        eprintln!(
            "error: '{}' is {} bytes, over the limit of {} bytes",
            file_name,
            source.len(),
            config.limits.max_source_bytes
        );
        process::exit(1);
    }

    // === Analysis ===
    let report = pylite_analyzer::analyze_with_limits(&source, &config.limits);

    if cli.emit_tokens {
        for token in &report.lexical.tokens {
            println!(
                "{:>4}:{:<3} {:<10} {:?}",
                token.line(),
                token.column(),
                token.kind.name(),
                token.lexeme,
            );
        }
        return;
    }

    if cli.emit_ast {
        let ast = &report.syntax.ast;
        print_json(if cli.pretty {
            serde_json::to_string_pretty(ast)
        } else {
            serde_json::to_string(ast)
        });
        return;
    }

    if cli.check {
        for diag in report.diagnostics() {
            print_diagnostic(diag, &source, &file_name);
        }
        if !report.success {
            process::exit(1);
        }
        println!("No errors found.");
        return;
    }

    print_json(if cli.pretty {
        report.to_json_pretty()
    } else {
        report.to_json()
    });
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Explicit `--config`, else the nearest `pylite.toml`, else defaults.
fn load_config(cli: &Cli, from_stdin: bool) -> Result<AnalyzerConfig, ConfigError> {
    if let Some(path) = &cli.config {
        return config::load_config(path);
    }

    let found = if from_stdin {
        let cwd = std::env::current_dir()?;
        config::find_config(&cwd).map(|path| config::load_config(&path))
    } else {
        let abs_input = fs::canonicalize(&cli.input).unwrap_or_else(|_| cli.input.clone());
        match config::find_and_load_config(&abs_input) {
            Err(ConfigError::NotFound(_)) => None,
            other => Some(other),
        }
    };
    found.unwrap_or_else(|| Ok(AnalyzerConfig::default()))
}

fn read_source(input: &Path, from_stdin: bool) -> io::Result<String> {
    if from_stdin {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(input)
    }
}

fn print_json(json: serde_json::Result<String>) {
    match json {
        Ok(j) => println!("{}", j),
        Err(e) => {
            eprintln!("error: failed to serialize output: {}", e);
            process::exit(1);
        }
    }
}

fn print_diagnostic(diag: &Diagnostic, source: &str, file_name: &str) {
    // Lexical errors do not fail the run.
    let (kind, color) = match diag.stage {
        Stage::Lexical => (ReportKind::Warning, Color::Yellow),
        Stage::Syntax | Stage::Semantic => (ReportKind::Error, Color::Red),
    };

    // Spans carry byte offsets; ariadne counts characters.
    let bytes = diag.span.byte_range();
    let start = char_index(source, bytes.start);
    let end = char_index(source, bytes.end).max(start + 1);

    let result = Report::build(kind, file_name, start)
        .with_message(diag.to_string())
        .with_label(
            Label::new((file_name, start..end))
                .with_message(&diag.message)
                .with_color(color),
        )
        .finish()
        .eprint((file_name, Source::from(source)));

    if let Err(e) = result {
        eprintln!("error: {}", diag);
        tracing::warn!(error = %e, "failed to render diagnostic");
    }
}

fn char_index(source: &str, byte: usize) -> usize {
    match source.get(..byte) {
        Some(prefix) => prefix.chars().count(),
        None => source.chars().count(),
    }
}
