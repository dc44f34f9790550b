//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;
use crate::commands::convert::Direction;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("dtl")
        .about("Convert DVI files to DTL text and back")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(convert_command(Direction::DviToDtl))
        .subcommand(convert_command(Direction::DtlToDvi))
        .subcommand(opcodes_command())
}

/// `dv2dt` or `dt2dv`.
///
/// Exactly two streams must be named: positionals count one each, `--stdin`
/// stands for the input and `--stdout` for the output.
pub fn convert_command(direction: Direction) -> Command {
    let (name, about, from, to) = match direction {
        Direction::DviToDtl => ("dv2dt", "Convert DVI to DTL text", "DVI", "DTL"),
        Direction::DtlToDvi => ("dt2dv", "Convert DTL text to DVI", "DTL", "DVI"),
    };
    Command::new(name)
        .about(about)
        .override_usage(format!(
            "\
  dtl {name} <{from}> <{to}>
  dtl {name} --stdin <{to}>
  dtl {name} <{from}> --stdout
  dtl {name} --stdin --stdout"
        ))
        .after_help(format!(
            "EXAMPLES:
  dtl {name} in.{ext_in} out.{ext_out}
  dtl {name} --stdin --stdout < in.{ext_in} > out.{ext_out}
  dtl {name} --group in.{ext_in} --stdout",
            ext_in = from.to_lowercase(),
            ext_out = to.to_lowercase()
        ))
        .arg(input_path_arg(from))
        .arg(output_path_arg(to))
        .arg(stdin_arg())
        .arg(stdout_arg())
        .arg(group_arg())
        .arg(debug_arg())
        .arg(color_arg())
}

/// List all 256 opcodes.
pub fn opcodes_command() -> Command {
    Command::new("opcodes")
        .about("List DVI opcodes with their DTL names and argument widths")
        .arg(json_arg())
}
