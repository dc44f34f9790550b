mod cli;
mod commands;
mod logging;

use clap::ArgMatches;

use cli::{ConvertParams, OpcodesParams, build_cli};
use commands::convert::Direction;

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("dv2dt", m)) => convert(Direction::DviToDtl, m),
        Some(("dt2dv", m)) => convert(Direction::DtlToDvi, m),
        Some(("opcodes", m)) => {
            let params = OpcodesParams::from_matches(m);
            commands::opcodes::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

fn convert(direction: Direction, m: &ArgMatches) {
    let params = ConvertParams::from_matches(direction, m);
    logging::init(params.debug, params.color.should_colorize());

    match params.into_args() {
        Ok(args) => commands::convert::run(args),
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!();
            eprintln!("{}", cli::convert_command(direction).render_usage());
            std::process::exit(2);
        }
    }
}
