//! The checking run behind `upl <FILE>`.
//! `upl <FILE>` 背后的检查流程。

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use upl_common::Limits;
use upl_diagnostic::emit;
use upl_parser::{ParseOutcome, parse};

use crate::error::CliError;
use crate::output;

/// Switches collected from the command line.
pub struct Options {
    pub tokens: bool,
    pub report: bool,
    pub verbose: bool,
    pub limits: Limits,
}

/// Check a UPL file and print the verdict to stdout.
/// 检查 UPL 文件并将结论打印到标准输出。
///
/// Returns whether the run recorded no diagnostics. Trailing input after
/// `end` fails the verdict without recording one.
pub fn run(file: &Path, options: &Options) -> Result<bool, CliError> {
    let source = fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_path_buf(),
        source,
    })?;

    let outcome = parse(&source, &options.limits);

    let mut stdout = io::stdout().lock();
    if options.tokens {
        write_tokens(&mut stdout, &outcome)?;
    }
    stdout.write_all(outcome.render().as_bytes())?;
    stdout.flush()?;

    if options.report {
        let filename = file.display().to_string();
        for diag in outcome.diagnostics.iter() {
            emit(&source, &filename, diag)?;
        }
    }

    if options.verbose {
        output::info(&format!(
            "{} tokens, {} symbols, {} diagnostic(s)",
            outcome.tokens.len(),
            outcome.symbols.len(),
            outcome.diagnostics.len()
        ));
    }

    if outcome.is_success() {
        output::success("OK - No errors found");
    } else if outcome.diagnostics.is_empty() {
        output::warning("unexpected input after 'end'");
    } else {
        output::error(&format!("{} error(s) found", outcome.diagnostics.len()));
    }

    Ok(outcome.diagnostics.is_empty())
}

/// One `<line> <KIND> <lexeme>` line per token.
fn write_tokens(out: &mut impl Write, outcome: &ParseOutcome) -> io::Result<()> {
    for token in &outcome.tokens {
        let line = format!("{} {} {}", token.line, token.kind.name(), token.lexeme);
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}
