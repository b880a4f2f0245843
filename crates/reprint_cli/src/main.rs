//! reprint: Parse TypeScript files and print them back from their syntax trees.
//!
//! Usage:
//!   reprint [options] [file...]
//!
//! By default the reprinted text goes to stdout. `--check` only verifies
//! that every file comes back byte for byte; `--out-dir` writes the output
//! to a directory instead.

mod config;
mod logging;

use bumpalo::Bump;
use clap::Parser as ClapParser;
use config::{ConfigError, Project};
use miette::{Diagnostic, NamedSource, SourceSpan};
use rayon::prelude::*;
use reprint_core::text::LineMap;
use reprint_diagnostics::Diagnostic as ParseDiagnostic;
use reprint_parser::Parser;
use reprint_printer::{reprint, reprint_with_trace, CommentAttachment, Reprint, ReprintError};
use reprint_scanner::SourceText;
use rustc_hash::FxHashSet;
use std::io::{self, IsTerminal, Write};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

#[derive(ClapParser, Debug)]
#[command(
    name = "reprint",
    about = "reprint - lossless TypeScript reprinter",
    disable_version_flag = true
)]
struct Cli {
    /// Files to reprint.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path to a reprint.json project file.
    #[arg(short = 'p', long = "project")]
    project: Option<PathBuf>,

    /// Verify that every file reprints unchanged; print nothing else.
    #[arg(long)]
    check: bool,

    /// Write reprinted files under this directory.
    #[arg(long = "out-dir", value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Summarize claimed comments and cursor marks per file.
    #[arg(long)]
    trace: bool,

    /// Print the resolved input files.
    #[arg(long = "list-files")]
    list_files: bool,

    /// Reprint files even when the parser reported errors.
    #[arg(long = "allow-parse-errors")]
    allow_parse_errors: bool,

    /// Worker threads (defaults to one per core).
    #[arg(short = 'j', long, value_name = "N")]
    jobs: Option<usize>,

    /// Print the version.
    #[arg(short = 'v', long)]
    version: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Deep expression nesting recurses deeply in both parser and printer.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("no input files found")]
    #[diagnostic(code(reprint::no_input), help("pass files, or a project file with -p"))]
    NoInput,

    #[error("failed to read '{path}'")]
    #[diagnostic(code(reprint::read))]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("'{path}' is not valid UTF-8")]
    #[diagnostic(code(reprint::encoding))]
    Encoding { path: String },

    #[error("'{path}' has {count} syntax error(s)")]
    #[diagnostic(
        code(reprint::parse),
        help("pass --allow-parse-errors to reprint the recovered tree anyway")
    )]
    Parse { path: String, count: usize },

    #[error("cannot reprint '{path}'")]
    #[diagnostic(code(reprint::reprint))]
    Reprint {
        path: String,
        #[source]
        source: ReprintError,
        #[source_code]
        text: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("reprinted '{path}' differs from the source at byte {offset}")]
    #[diagnostic(code(reprint::mismatch))]
    Mismatch { path: String, offset: usize },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(reprint::write))]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to start worker threads")]
    #[diagnostic(code(reprint::threads))]
    ThreadPool(#[source] rayon::ThreadPoolBuildError),

    #[error("{failed} of {total} file(s) failed")]
    #[diagnostic(code(reprint::failed))]
    Failed { failed: usize, total: usize },
}

/// What to do with each reprinted file.
#[derive(Debug, Clone)]
struct Settings {
    check: bool,
    out_dir: Option<PathBuf>,
    trace: bool,
    allow_parse_errors: bool,
}

impl Settings {
    fn writes_stdout(&self) -> bool {
        !self.check && self.out_dir.is_none()
    }
}

struct FileReport {
    path: PathBuf,
    diagnostics: Vec<ParseDiagnostic>,
    line_map: Option<LineMap>,
    outcome: Result<Reprint, CliError>,
}

fn main() -> miette::Result<()> {
    logging::init();
    let cli = Cli::parse();

    if cli.version {
        println!("reprint Version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    run(&cli).map_err(miette::Report::new)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let start = Instant::now();
    let (files, settings) = resolve_inputs(cli)?;
    if files.is_empty() {
        return Err(CliError::NoInput);
    }
    if cli.list_files {
        for file in &files {
            println!("{}", file.display());
        }
    }
    info!(files = files.len(), check = settings.check, "reprinting");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.jobs.unwrap_or(0))
        .stack_size(WORKER_STACK_SIZE)
        .build()
        .map_err(CliError::ThreadPool)?;
    let reports: Vec<FileReport> =
        pool.install(|| files.par_iter().map(|path| process_file(path, &settings)).collect());

    let use_color = io::stderr().is_terminal();
    let mut stdout = io::stdout().lock();
    let mut failed = 0;
    for report in reports {
        for diagnostic in &report.diagnostics {
            print_diagnostic(diagnostic, report.line_map.as_ref(), use_color);
        }
        match report.outcome {
            Ok(reprint) => {
                if settings.trace {
                    print_trace_summary(&report.path, &reprint);
                }
                if settings.writes_stdout() {
                    stdout
                        .write_all(reprint.text.as_bytes())
                        .map_err(|source| CliError::Write {
                            path: "<stdout>".to_string(),
                            source,
                        })?;
                }
            }
            Err(err) => {
                failed += 1;
                eprintln!("{:?}", miette::Report::new(err));
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Failed {
            failed,
            total: files.len(),
        });
    }
    if settings.check && use_color {
        eprintln!(
            "{}{} file(s) reprinted unchanged in {:.2}s.{}",
            GRAY,
            files.len(),
            start.elapsed().as_secs_f64(),
            RESET
        );
    }
    Ok(())
}

/// Input files and settings from the command line merged over the project
/// file. Flags win over file values.
fn resolve_inputs(cli: &Cli) -> Result<(Vec<PathBuf>, Settings), CliError> {
    let project_path = match &cli.project {
        Some(path) => Some(path.clone()),
        None if cli.files.is_empty() && Path::new("reprint.json").exists() => {
            Some(PathBuf::from("reprint.json"))
        }
        None => None,
    };
    let project = project_path.as_deref().map(Project::load).transpose()?;

    let mut files = cli.files.clone();
    if let Some(project) = &project {
        files.extend(project.input_files()?);
    }
    let mut seen = FxHashSet::default();
    files.retain(|file| seen.insert(normalize_path(file)));

    let settings = Settings {
        check: cli.check || project.as_ref().and_then(|p| p.config.check).unwrap_or(false),
        out_dir: cli
            .out_dir
            .clone()
            .or_else(|| project.as_ref().and_then(Project::out_dir)),
        trace: cli.trace,
        allow_parse_errors: cli.allow_parse_errors,
    };
    Ok((files, settings))
}

/// `./a.ts`, `src/./a.ts` and `a.ts` spelled the same way.
fn normalize_path(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        normalized
    }
}

fn process_file(path: &Path, settings: &Settings) -> FileReport {
    let mut diagnostics = Vec::new();
    let mut line_map = None;
    let outcome = reprint_file(path, settings, &mut diagnostics, &mut line_map);
    FileReport {
        path: path.to_path_buf(),
        diagnostics,
        line_map,
        outcome,
    }
}

fn reprint_file(
    path: &Path,
    settings: &Settings,
    diagnostics: &mut Vec<ParseDiagnostic>,
    line_map: &mut Option<LineMap>,
) -> Result<Reprint, CliError> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| CliError::Read {
        path: display.clone(),
        source,
    })?;
    let text = simdutf8::basic::from_utf8(&bytes).map_err(|_| CliError::Encoding {
        path: display.clone(),
    })?;

    let arena = Bump::new();
    let result = Parser::new(&arena, &display, text).parse();
    let error_count = result.diagnostics.error_count();
    *diagnostics = result.diagnostics.into_diagnostics();
    if !diagnostics.is_empty() {
        *line_map = Some(LineMap::new(text));
    }
    if error_count > 0 && !settings.allow_parse_errors {
        return Err(CliError::Parse {
            path: display,
            count: error_count,
        });
    }

    let source = SourceText::new(text);
    let printed = if settings.trace {
        reprint_with_trace(&result.source_file, source)
    } else {
        reprint(&result.source_file, source).map(|text| Reprint {
            text,
            trace: Default::default(),
        })
    };
    let printed = printed.map_err(|err| CliError::Reprint {
        path: display.clone(),
        span: error_span(&err, text.len()),
        source: err,
        text: NamedSource::new(display.clone(), text.to_string()),
    })?;
    let logged_path = display.as_str();
    debug!(path = %logged_path, bytes = printed.text.len(), "reprinted");

    if settings.check {
        if let Some(offset) = first_difference(text, &printed.text) {
            return Err(CliError::Mismatch { path: display, offset });
        }
    }
    if let Some(out_dir) = &settings.out_dir {
        let target = out_dir.join(output_relative_path(path));
        write_output(&target, &printed.text)?;
    }
    Ok(printed)
}

/// Where an error points in the source, clamped to the buffer.
fn error_span(err: &ReprintError, len: usize) -> SourceSpan {
    let pos = match err {
        ReprintError::UnknownNodeKind { pos, .. } | ReprintError::UnknownTypeNodeKind { pos, .. } => *pos,
        ReprintError::InconsistentSpan { expected, .. } => *expected,
    };
    let offset = (pos as usize).min(len);
    SourceSpan::from(offset..offset)
}

fn first_difference(expected: &str, actual: &str) -> Option<usize> {
    let common = expected
        .bytes()
        .zip(actual.bytes())
        .position(|(a, b)| a != b);
    match common {
        Some(offset) => Some(offset),
        None if expected.len() != actual.len() => Some(expected.len().min(actual.len())),
        None => None,
    }
}

/// The input path with root, prefix and `..` parts dropped, so that every
/// output lands under the output directory.
fn output_relative_path(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

fn write_output(target: &Path, text: &str) -> Result<(), CliError> {
    let write_error = |source| CliError::Write {
        path: target.display().to_string(),
        source,
    };
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(target, text).map_err(write_error)
}

fn print_trace_summary(path: &Path, reprint: &Reprint) {
    let trace = &reprint.trace;
    eprintln!(
        "{}: {} comment(s) ({} leading, {} same-line trailing), {} cursor mark(s)",
        path.display(),
        trace.comments.len(),
        trace.count(CommentAttachment::Leading),
        trace.count(CommentAttachment::SameLineTrailing),
        trace.cursor_marks.len()
    );
}

fn print_diagnostic(diag: &ParseDiagnostic, line_map: Option<&LineMap>, use_color: bool) {
    if !use_color {
        eprintln!("{}", diag);
        return;
    }
    let color = if diag.is_error() { RED } else { YELLOW };
    if let Some(file) = &diag.file {
        eprint!("{}{}{}", CYAN, file, RESET);
        if let (Some(span), Some(line_map)) = (diag.span, line_map) {
            let position = line_map.line_and_column_of(span.start);
            eprint!(":{}:{}", position.line + 1, position.character + 1);
        }
        eprint!(" - ");
    }
    eprintln!(
        "{}{}{}{} {}TS{}{}: {}",
        BOLD, color, diag.category, RESET, GRAY, diag.code, RESET, diag.message_text
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("abc", "abc"), None);
        assert_eq!(first_difference("abc", "abd"), Some(2));
        assert_eq!(first_difference("abc", "ab"), Some(2));
        assert_eq!(first_difference("", "x"), Some(0));
    }

    #[test]
    fn test_output_relative_path() {
        assert_eq!(output_relative_path(Path::new("./src/a.ts")), PathBuf::from("src/a.ts"));
        assert_eq!(output_relative_path(Path::new("../lib/b.ts")), PathBuf::from("lib/b.ts"));
        assert_eq!(output_relative_path(Path::new("/abs/c.ts")), PathBuf::from("abs/c.ts"));
    }

    #[test]
    fn test_error_span_is_clamped() {
        let err = ReprintError::InconsistentSpan {
            expected: 40,
            cursor: 3,
            detail: reprint_printer::SpanMismatch::EndNotReached,
        };
        assert_eq!(error_span(&err, 10), SourceSpan::from(10..10));
        let err = ReprintError::UnknownNodeKind {
            kind: reprint_ast::SyntaxKind::MissingDeclaration,
            pos: 4,
        };
        assert_eq!(error_span(&err, 10), SourceSpan::from(4..4));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["reprint", "--check", "-j", "2", "a.ts", "b.ts"]);
        assert!(cli.check);
        assert_eq!(cli.jobs, Some(2));
        assert_eq!(cli.files, vec![PathBuf::from("a.ts"), PathBuf::from("b.ts")]);
        assert!(cli.out_dir.is_none());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("./a.ts")), PathBuf::from("a.ts"));
        assert_eq!(normalize_path(Path::new("src/./b.ts")), PathBuf::from("src/b.ts"));
        assert_eq!(normalize_path(Path::new(".")), PathBuf::from("."));
    }

    #[test]
    fn test_same_file_spelled_twice_is_processed_once() {
        let cli = Cli::parse_from(["reprint", "a.ts", "./a.ts", "./b.ts", "b.ts"]);
        let (files, _) = resolve_inputs(&cli).unwrap();
        assert_eq!(files, vec![PathBuf::from("a.ts"), PathBuf::from("./b.ts")]);
    }

    #[test]
    fn test_flags_override_project_and_duplicates_drop() {
        let cli = Cli::parse_from(["reprint", "x.ts", "x.ts", "--out-dir", "out"]);
        let (files, settings) = resolve_inputs(&cli).unwrap();
        assert_eq!(files, vec![PathBuf::from("x.ts")]);
        assert_eq!(settings.out_dir, Some(PathBuf::from("out")));
        assert!(!settings.writes_stdout());
    }
}
