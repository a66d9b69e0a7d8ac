//! UPL CLI - syntax checker for the UPL teaching language.
//! UPL CLI - UPL 教学语言的语法检查器。

mod check;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use upl_common::Limits;

/// Main CLI structure.
/// 主 CLI 结构体。
#[derive(Parser)]
#[command(name = "upl")]
#[command(author, version, about = "UPL - check a source file and dump its syntax tree", long_about = None)]
struct Cli {
    /// The file to check. / 要检查的文件。
    file: PathBuf,

    /// Print the token stream before the verdict. / 在结论之前打印 token 流。
    #[arg(long)]
    tokens: bool,

    /// Render diagnostics with source snippets on stderr. / 在标准错误输出上渲染带源码片段的诊断。
    #[arg(long)]
    report: bool,

    /// Enable verbose output. / 启用详细输出。
    #[arg(short, long)]
    verbose: bool,

    /// Maximum diagnostics recorded. / 记录的最大诊断数。
    #[arg(long, value_name = "N")]
    max_errors: Option<usize>,

    /// Maximum declared variables. / 最大声明变量数。
    #[arg(long, value_name = "N")]
    max_symbols: Option<usize>,

    /// Maximum statements per block. / 每个块的最大语句数。
    #[arg(long, value_name = "N")]
    max_stmts: Option<usize>,

    /// Lexeme buffer size; lexemes keep one character less. / 词素缓冲区大小。
    #[arg(long, value_name = "N")]
    max_lexeme_len: Option<usize>,

    /// Maximum nested blocks and parentheses. / 最大块与括号嵌套深度。
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,
}

impl Cli {
    fn limits(&self) -> Limits {
        let mut limits = Limits::new();
        if let Some(n) = self.max_errors {
            limits = limits.max_diagnostics(n);
        }
        if let Some(n) = self.max_symbols {
            limits = limits.max_symbols(n);
        }
        if let Some(n) = self.max_stmts {
            limits = limits.max_stmts_per_block(n);
        }
        if let Some(n) = self.max_lexeme_len {
            limits = limits.max_lexeme_len(n);
        }
        if let Some(n) = self.max_depth {
            limits = limits.max_nesting_depth(n);
        }
        limits
    }
}

fn init_logging(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

/// Main entry point.
/// 主入口点。
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            return match e.print() {
                Ok(()) if !e.use_stderr() => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_logging(cli.verbose);

    let options = check::Options {
        tokens: cli.tokens,
        report: cli.report,
        verbose: cli.verbose,
        limits: cli.limits(),
    };
    log::debug!("limits: {:?}", options.limits);

    match check::run(&cli.file, &options) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
