//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{build_cli, convert_command, opcodes_command};
use crate::commands::convert::{Direction, Stream};

fn params(direction: Direction, argv: &[&str]) -> ConvertParams {
    let m = convert_command(direction)
        .try_get_matches_from(argv.iter().copied())
        .expect("arguments should parse");
    ConvertParams::from_matches(direction, &m)
}

#[test]
fn two_paths() {
    let args = params(Direction::DviToDtl, &["dv2dt", "in.dvi", "out.dtl"])
        .into_args()
        .unwrap();

    assert_eq!(args.input, Stream::Path(PathBuf::from("in.dvi")));
    assert_eq!(args.output, Stream::Path(PathBuf::from("out.dtl")));
    assert_eq!(args.direction, Direction::DviToDtl);
    assert!(!args.options.syntax.grouped);
}

#[test]
fn stdin_and_stdout() {
    let args = params(Direction::DtlToDvi, &["dt2dv", "--stdin", "--stdout"])
        .into_args()
        .unwrap();

    assert_eq!(args.input, Stream::Std);
    assert_eq!(args.output, Stream::Std);
}

#[test]
fn stdin_with_output_path() {
    let args = params(Direction::DtlToDvi, &["dt2dv", "--stdin", "out.dvi"])
        .into_args()
        .unwrap();

    assert_eq!(args.input, Stream::Std);
    assert_eq!(args.output, Stream::Path(PathBuf::from("out.dvi")));
}

#[test]
fn input_path_with_stdout() {
    let args = params(Direction::DviToDtl, &["dv2dt", "in.dvi", "--stdout"])
        .into_args()
        .unwrap();

    assert_eq!(args.input, Stream::Path(PathBuf::from("in.dvi")));
    assert_eq!(args.output, Stream::Std);
}

#[test]
fn too_few_streams() {
    let none = params(Direction::DviToDtl, &["dv2dt"]).into_args();
    let one = params(Direction::DviToDtl, &["dv2dt", "in.dvi"]).into_args();
    let flag = params(Direction::DviToDtl, &["dv2dt", "--stdout"]).into_args();

    assert_eq!(none.err(), Some(UsageError::StreamCount(0)));
    assert_eq!(one.err(), Some(UsageError::StreamCount(1)));
    assert_eq!(flag.err(), Some(UsageError::StreamCount(1)));
}

#[test]
fn too_many_streams() {
    let err = params(
        Direction::DviToDtl,
        &["dv2dt", "in.dvi", "out.dtl", "--stdin"],
    )
    .into_args()
    .err();
    assert_eq!(err, Some(UsageError::StreamCount(3)));

    let err = params(Direction::DviToDtl, &["dv2dt", "in.dvi", "--stdin", "--stdout"])
        .into_args()
        .err();
    assert_eq!(err, Some(UsageError::StreamCount(3)));
}

#[test]
fn usage_error_message() {
    let err = UsageError::StreamCount(3);
    insta::assert_snapshot!(err, @"expected an input and an output, but 3 streams were named");
}

#[test]
fn group_flag_sets_syntax() {
    let args = params(Direction::DviToDtl, &["dv2dt", "-g", "--stdin", "--stdout"])
        .into_args()
        .unwrap();
    assert!(args.options.syntax.grouped);
}

#[test]
fn debug_and_color_flags() {
    let p = params(
        Direction::DtlToDvi,
        &["dt2dv", "--debug", "--color", "never", "a.dtl", "b.dvi"],
    );
    assert!(p.debug);
    assert_eq!(p.color, ColorChoice::Never);

    let args = p.into_args().unwrap();
    assert!(!args.color);
}

#[test]
fn color_defaults_to_auto() {
    let p = params(Direction::DtlToDvi, &["dt2dv", "a.dtl", "b.dvi"]);
    assert_eq!(p.color, ColorChoice::Auto);
}

#[test]
fn rejects_unknown_color() {
    let result = convert_command(Direction::DviToDtl).try_get_matches_from([
        "dv2dt", "--color", "sometimes", "a", "b",
    ]);
    assert!(result.is_err());
}

#[test]
fn opcodes_json_flag() {
    let m = opcodes_command()
        .try_get_matches_from(["opcodes", "--json"])
        .unwrap();
    let args: crate::commands::opcodes::OpcodesArgs = OpcodesParams::from_matches(&m).into();
    assert!(args.json);
}

#[test]
fn subcommands_are_routed() {
    let m = build_cli()
        .try_get_matches_from(["dtl", "dt2dv", "--stdin", "--stdout"])
        .unwrap();
    let (name, _) = m.subcommand().unwrap();
    assert_eq!(name, "dt2dv");
}

#[test]
fn subcommand_is_required() {
    assert!(build_cli().try_get_matches_from(["dtl"]).is_err());
}

#[test]
fn usage_lists_stream_forms() {
    let usage = convert_command(Direction::DtlToDvi).render_usage().to_string();
    assert!(usage.contains("dtl dt2dv <DTL> <DVI>"));
    assert!(usage.contains("dtl dt2dv --stdin --stdout"));
}

#[test]
fn help_mentions_group() {
    let help = convert_command(Direction::DviToDtl).render_help().to_string();
    assert!(help.contains("--group"));
    assert!(help.contains("--stdin"));
}
