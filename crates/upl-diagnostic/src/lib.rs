//! Diagnostic and error reporting for UPL.
//! UPL 的诊断和错误报告。
//!
//! Diagnostics are collected by [`Diagnostics`] and presented either as the
//! plain line-oriented report or rendered with ariadne.
//! 诊断由 [`Diagnostics`] 收集，并以纯文本报告或 ariadne 渲染的形式呈现。

mod codes;
mod collector;
mod diagnostic;

pub use codes::ErrorCode;
pub use collector::Diagnostics;
pub use diagnostic::{Diagnostic, DiagnosticKind};

use ariadne::{Color, Label, Report, ReportKind, Source};

/// Render a diagnostic to stderr.
/// 将诊断信息渲染到标准错误输出。
pub fn emit(source: &str, filename: &str, diagnostic: &Diagnostic) -> std::io::Result<()> {
    let mut report = Report::build(ReportKind::Error, filename, diagnostic.span.start.0 as usize)
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((filename, diagnostic.span.range()))
                .with_message(format!("line {}", diagnostic.line))
                .with_color(Color::Red),
        );

    if let Some(code) = &diagnostic.code {
        report = report.with_code(code.as_str());
        report = report.with_note(code.description());
        if let Some(help) = code.suggestion() {
            report = report.with_help(help);
        }
    }

    report
        .finish()
        .eprint((filename, Source::from(source)))
}

/// Format the plain report lines: one `- Error at line N: msg` per distinct line.
/// 格式化纯文本报告：每个不同的行输出一条 `- Error at line N: msg`。
pub fn report_lines(diagnostics: &Diagnostics) -> Vec<String> {
    diagnostics
        .first_per_line()
        .into_iter()
        .map(|d| format!("- Error at line {}: {}", d.line, d.message))
        .collect()
}
