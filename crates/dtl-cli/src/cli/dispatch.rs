//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` mirror the command `*Args` but hold what clap parsed. Conversions
//! resolve the positional and flag streams into exactly one input and one
//! output, which clap alone cannot express.

use std::path::PathBuf;

use clap::ArgMatches;
use dtl_lib::Options;

use super::ColorChoice;
use crate::commands::convert::{ConvertArgs, Direction, Stream};
use crate::commands::opcodes::OpcodesArgs;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("expected an input and an output, but {0} streams were named")]
    StreamCount(usize),
}

pub struct ConvertParams {
    pub direction: Direction,
    pub paths: Vec<PathBuf>,
    pub stdin: bool,
    pub stdout: bool,
    pub group: bool,
    pub debug: bool,
    pub color: ColorChoice,
}

impl ConvertParams {
    pub fn from_matches(direction: Direction, m: &ArgMatches) -> Self {
        let paths = ["input", "output"]
            .into_iter()
            .filter_map(|id| m.get_one::<PathBuf>(id).cloned())
            .collect();

        Self {
            direction,
            paths,
            stdin: m.get_flag("stdin"),
            stdout: m.get_flag("stdout"),
            group: m.get_flag("group"),
            debug: m.get_flag("debug"),
            color: parse_color(m),
        }
    }

    /// Pair the named streams up. A lone positional fills whichever side
    /// the flags left open.
    pub fn into_args(self) -> Result<ConvertArgs, UsageError> {
        let (input, output) = match (self.stdin, self.stdout, self.paths.as_slice()) {
            (true, true, []) => (Stream::Std, Stream::Std),
            (true, false, [output]) => (Stream::Std, Stream::Path(output.clone())),
            (false, true, [input]) => (Stream::Path(input.clone()), Stream::Std),
            (false, false, [input, output]) => {
                (Stream::Path(input.clone()), Stream::Path(output.clone()))
            }
            (stdin, stdout, paths) => {
                let named = paths.len() + usize::from(stdin) + usize::from(stdout);
                return Err(UsageError::StreamCount(named));
            }
        };

        Ok(ConvertArgs {
            direction: self.direction,
            input,
            output,
            options: Options::default().grouped(self.group),
            color: self.color.should_colorize(),
        })
    }
}

pub struct OpcodesParams {
    pub json: bool,
}

impl OpcodesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            json: m.get_flag("json"),
        }
    }
}

impl From<OpcodesParams> for OpcodesArgs {
    fn from(p: OpcodesParams) -> Self {
        Self { json: p.json }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
