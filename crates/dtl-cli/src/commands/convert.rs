use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use dtl_lib::{DtlToDvi, DviToDtl, Options, Report};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    DviToDtl,
    DtlToDvi,
}

/// One side of a conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stream {
    /// Standard input or output, depending on the side.
    Std,
    Path(PathBuf),
}

impl Stream {
    fn path(&self) -> Option<&Path> {
        match self {
            Stream::Std => None,
            Stream::Path(p) => Some(p),
        }
    }
}

#[derive(Debug)]
pub struct ConvertArgs {
    pub direction: Direction,
    pub input: Stream,
    pub output: Stream,
    pub options: Options,
    pub color: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("cannot open `{}`: {source}", path.display())]
    OpenInput { path: PathBuf, source: io::Error },
    #[error("cannot create `{}`: {source}", path.display())]
    CreateOutput { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Transcode(#[from] dtl_lib::Error),
}

pub fn run(args: ConvertArgs) {
    match convert(&args) {
        Ok(report) => info!("{report}"),
        Err(ConvertError::Transcode(e)) => {
            let label = match args.input.path() {
                Some(p) => p.display().to_string(),
                None => "<stdin>".to_owned(),
            };
            eprintln!("{}", e.printer().path(&label).colored(args.color).render());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Open both streams and transcode. Output files are created before any
/// input is read, so a failed run may leave a partial file behind.
pub fn convert(args: &ConvertArgs) -> Result<Report, ConvertError> {
    let input = open_input(&args.input)?;
    let output = create_output(&args.output)?;

    let report = match args.direction {
        Direction::DviToDtl => DviToDtl::new(args.options)?.run(input, output)?,
        Direction::DtlToDvi => DtlToDvi::new(args.options)?.run(input, output)?,
    };
    Ok(report)
}

fn open_input(stream: &Stream) -> Result<Box<dyn BufRead>, ConvertError> {
    match stream {
        Stream::Std => Ok(Box::new(io::stdin().lock())),
        Stream::Path(path) => match File::open(path) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(source) => Err(ConvertError::OpenInput {
                path: path.clone(),
                source,
            }),
        },
    }
}

fn create_output(stream: &Stream) -> Result<Box<dyn Write>, ConvertError> {
    match stream {
        Stream::Std => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        Stream::Path(path) => match File::create(path) {
            Ok(file) => Ok(Box::new(BufWriter::new(file))),
            Err(source) => Err(ConvertError::CreateOutput {
                path: path.clone(),
                source,
            }),
        },
    }
}
