//! Cross-source matcher CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;
use xmatch_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;
mod progress;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_columns, run_compare, run_full_compare, run_match, run_methods};
use crate::summary::{print_columns, print_compare, print_full_compare, print_match};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    // Bars would interleave with info-level log lines on stderr.
    let quiet = log_config.log_file.is_none() && log_config.level_filter >= LevelFilter::INFO;

    let result = match &cli.command {
        Command::Columns(args) => run_columns(args).map(|result| {
            print_columns(&result);
            if result.check.valid { 0 } else { 1 }
        }),
        Command::Methods => run_methods().map(|()| 0),
        Command::Match(args) => run_match(args, quiet).map(|result| {
            print_match(&result, args.preview);
            0
        }),
        Command::Compare(args) => run_compare(args, quiet).map(|result| {
            print_compare(&result);
            0
        }),
        Command::FullCompare(args) => run_full_compare(args, quiet).map(|result| {
            print_full_compare(&result);
            0
        }),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
