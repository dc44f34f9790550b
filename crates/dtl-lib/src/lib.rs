//! DTL: a lossless text rendition of DVI files.
//!
//! Two transcoders, one per direction, each the inverse of the other on
//! well-formed input. Text to binary recomputes the page back-pointers, the
//! postamble pointer, string lengths, and the trailing padding instead of
//! trusting the text.
//!
//! # Example
//!
//! ```
//! use dtl_lib::{DtlToDvi, DviToDtl, Options};
//!
//! let dtl = b"variety sequences-6\n(Hi)\n";
//! let mut dvi = Vec::new();
//! DtlToDvi::new(Options::default())?.run(&dtl[..], &mut dvi)?;
//! assert_eq!(dvi, b"Hi");
//!
//! let mut text = Vec::new();
//! DviToDtl::new(Options::default())?.run(&dvi[..], &mut text)?;
//! assert_eq!(text, dtl);
//! # Ok::<(), dtl_lib::Error>(())
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod dt2dv;
pub mod dv2dt;
pub mod error;
pub mod options;
pub mod text;

mod binary;
mod progress;

#[cfg(test)]
mod test_utils;

pub use diagnostics::{Diagnostics, ErrorPrinter, Warning, WarningKind};
pub use dt2dv::DtlToDvi;
pub use dv2dt::DviToDtl;
pub use error::{DviPosition, Error, ErrorKind, Location, TextPosition};
pub use options::{Limits, Options, Syntax, VARIETY, VARIETY_KEYWORD};
pub use progress::Report;

/// Result type for transcoding runs.
pub type Result<T> = std::result::Result<T, Error>;
