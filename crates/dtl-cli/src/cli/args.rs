//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Input file (first positional).
pub fn input_path_arg(kind: &'static str) -> Arg {
    Arg::new("input")
        .value_name(kind)
        .value_parser(value_parser!(PathBuf))
        .help(format!("{kind} file to read"))
}

/// Output file (second positional).
pub fn output_path_arg(kind: &'static str) -> Arg {
    Arg::new("output")
        .value_name(kind)
        .value_parser(value_parser!(PathBuf))
        .help(format!("{kind} file to write"))
}

/// Read from standard input (--stdin).
pub fn stdin_arg() -> Arg {
    Arg::new("stdin")
        .long("stdin")
        .action(ArgAction::SetTrue)
        .help("Read input from standard input")
}

/// Write to standard output (--stdout).
pub fn stdout_arg() -> Arg {
    Arg::new("stdout")
        .long("stdout")
        .action(ArgAction::SetTrue)
        .help("Write output to standard output")
}

/// Group commands in braces (--group).
pub fn group_arg() -> Arg {
    Arg::new("group")
        .short('g')
        .long("group")
        .action(ArgAction::SetTrue)
        .help("Wrap every DTL command in { }")
}

/// Per-command tracing on stderr (--debug).
pub fn debug_arg() -> Arg {
    Arg::new("debug")
        .short('d')
        .long("debug")
        .action(ArgAction::SetTrue)
        .help("Log every command and its offsets")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the table as JSON")
}
