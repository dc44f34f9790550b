//! The 256-entry DVI opcode table.
//!
//! Mnemonics are generated from prefix rules: either a single opcode, or a
//! run of opcodes sharing a prefix with a numeric suffix. Suffixes are decimal,
//! except in the set-character range where they are two-digit uppercase hex.
//! Argument signatures for the fixed-shape commands (128-170 and 235-238)
//! come from [`signature`]; the remaining commands have variable payloads
//! described by their [`CommandKind`].

use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::Serialize;

use crate::constants::{
    FNT_DEF1, FNT_NUM_FIRST, FNT_NUM_LAST, FNT1, POST, POST_POST, PRE, SET_CHAR_LAST, UNDEFINED_FIRST,
    XXX1,
};

/// Width and signedness of one command argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ArgSpec {
    pub width: u8,
    pub signed: bool,
}

impl ArgSpec {
    pub const fn unsigned(width: u8) -> Self {
        Self {
            width,
            signed: false,
        }
    }

    pub const fn signed(width: u8) -> Self {
        Self {
            width,
            signed: true,
        }
    }

    /// Byte width as a `usize`, for the codec.
    pub fn byte_width(self) -> usize {
        self.width as usize
    }
}

/// Compact form: the width, negated when signed (`1`, `-4`).
impl fmt::Display for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.signed {
            write!(f, "-{}", self.width)
        } else {
            write!(f, "{}", self.width)
        }
    }
}

const U1: ArgSpec = ArgSpec::unsigned(1);
const U2: ArgSpec = ArgSpec::unsigned(2);
const U3: ArgSpec = ArgSpec::unsigned(3);
const S1: ArgSpec = ArgSpec::signed(1);
const S2: ArgSpec = ArgSpec::signed(2);
const S3: ArgSpec = ArgSpec::signed(3);
const S4: ArgSpec = ArgSpec::signed(4);

/// Ten page counts followed by the previous-page pointer.
pub const BOP_ARGS: [ArgSpec; 11] = [S4; 11];

/// Signatures of opcodes 128 through 170, in opcode order.
const FIXED_ARGS: [&[ArgSpec]; 43] = [
    &[U1],       // s1
    &[U2],       // s2
    &[U3],       // s3
    &[S4],       // s4
    &[S4, S4],   // sr
    &[U1],       // p1
    &[U2],       // p2
    &[U3],       // p3
    &[S4],       // p4
    &[S4, S4],   // pr
    &[],         // nop
    &BOP_ARGS,   // bop
    &[],         // eop
    &[],         // [
    &[],         // ]
    &[S1],       // r1
    &[S2],       // r2
    &[S3],       // r3
    &[S4],       // r4
    &[],         // w0
    &[S1],       // w1
    &[S2],       // w2
    &[S3],       // w3
    &[S4],       // w4
    &[],         // x0
    &[S1],       // x1
    &[S2],       // x2
    &[S3],       // x3
    &[S4],       // x4
    &[S1],       // d1
    &[S2],       // d2
    &[S3],       // d3
    &[S4],       // d4
    &[],         // y0
    &[S1],       // y1
    &[S2],       // y2
    &[S3],       // y3
    &[S4],       // y4
    &[],         // z0
    &[S1],       // z1
    &[S2],       // z2
    &[S3],       // z3
    &[S4],       // z4
];

/// Signatures of opcodes 235 through 238.
const FONT_ARGS: [&[ArgSpec]; 4] = [&[U1], &[U2], &[U3], &[S4]];

/// Fixed argument signature of an opcode; empty for variable-payload commands.
pub fn signature(opcode: u8) -> &'static [ArgSpec] {
    match opcode {
        128..=170 => FIXED_ARGS[(opcode - 128) as usize],
        FNT1..=238 => FONT_ARGS[(opcode - FNT1) as usize],
        _ => &[],
    }
}

/// How a command's payload is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Typeset the character with this code; no payload.
    SetChar(u8),
    /// Payload given entirely by the fixed signature.
    Fixed,
    /// Select this font number; no payload.
    FontNum(u8),
    /// Length field of this width followed by that many raw bytes.
    Special(u8),
    /// Font number field of this width followed by the font definition.
    FontDef(u8),
    Pre,
    Post,
    PostPost,
    /// Opcodes 250-255; no payload.
    Undefined,
}

impl CommandKind {
    pub fn of(opcode: u8) -> Self {
        match opcode {
            0..=SET_CHAR_LAST => Self::SetChar(opcode),
            FNT_NUM_FIRST..=FNT_NUM_LAST => Self::FontNum(opcode - FNT_NUM_FIRST),
            XXX1..=242 => Self::Special(opcode - XXX1 + 1),
            FNT_DEF1..=246 => Self::FontDef(opcode - FNT_DEF1 + 1),
            PRE => Self::Pre,
            POST => Self::Post,
            POST_POST => Self::PostPost,
            UNDEFINED_FIRST..=u8::MAX => Self::Undefined,
            _ => Self::Fixed,
        }
    }
}

/// One row of the opcode table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OpcodeDescriptor {
    pub opcode: u8,
    pub name: String,
    pub kind: CommandKind,
    pub args: &'static [ArgSpec],
}

impl OpcodeDescriptor {
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

/// A mnemonic rule: one opcode, or a run with a numeric suffix range.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Prefix {
    pub first: u8,
    pub name: &'static str,
    pub suffixes: Option<(u8, u8)>,
}

const fn single(first: u8, name: &'static str) -> Prefix {
    Prefix {
        first,
        name,
        suffixes: None,
    }
}

const fn run(first: u8, name: &'static str, lo: u8, hi: u8) -> Prefix {
    Prefix {
        first,
        name,
        suffixes: Some((lo, hi)),
    }
}

pub(crate) const PREFIXES: &[Prefix] = &[
    run(0, "\\", 0x00, 0x7F),
    run(128, "s", 1, 4),
    single(132, "sr"),
    run(133, "p", 1, 4),
    single(137, "pr"),
    single(138, "nop"),
    single(139, "bop"),
    single(140, "eop"),
    single(141, "["),
    single(142, "]"),
    run(143, "r", 1, 4),
    run(147, "w", 0, 4),
    run(152, "x", 0, 4),
    run(157, "d", 1, 4),
    run(161, "y", 0, 4),
    run(166, "z", 0, 4),
    run(171, "fn", 0, 63),
    run(235, "f", 1, 4),
    run(239, "special", 1, 4),
    run(243, "fd", 1, 4),
    single(247, "pre"),
    single(248, "post"),
    single(249, "post_post"),
    run(250, "opcode", 250, 255),
];

/// Inconsistent prefix rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("prefix `{name}` has a reversed suffix range {lo}..={hi}")]
    ReversedSuffixes { name: String, lo: u8, hi: u8 },
    #[error("prefix `{name}` runs past opcode 255")]
    Overflow { name: String },
    #[error("opcode {opcode} is named twice (`{first}` and `{second}`)")]
    Duplicate {
        opcode: u8,
        first: String,
        second: String,
    },
    #[error("opcode {0} has no mnemonic")]
    Missing(u8),
}

/// All 256 opcodes, indexed by opcode and by mnemonic.
#[derive(Debug)]
pub struct OpcodeTable {
    descriptors: Vec<OpcodeDescriptor>,
    by_name: IndexMap<String, u8>,
}

impl OpcodeTable {
    /// The process-wide table, built on first use.
    pub fn standard() -> Result<&'static OpcodeTable, TableError> {
        static STANDARD: OnceLock<Result<OpcodeTable, TableError>> = OnceLock::new();
        STANDARD
            .get_or_init(|| Self::from_prefixes(PREFIXES))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub(crate) fn from_prefixes(prefixes: &[Prefix]) -> Result<Self, TableError> {
        let mut names: [Option<String>; 256] = std::array::from_fn(|_| None);

        for prefix in prefixes {
            let Some((lo, hi)) = prefix.suffixes else {
                assign(&mut names, prefix.first as usize, prefix.name.to_string())?;
                continue;
            };
            if hi < lo {
                return Err(TableError::ReversedSuffixes {
                    name: prefix.name.to_string(),
                    lo,
                    hi,
                });
            }
            for (i, suffix) in (lo..=hi).enumerate() {
                let opcode = prefix.first as usize + i;
                if opcode > u8::MAX as usize {
                    return Err(TableError::Overflow {
                        name: prefix.name.to_string(),
                    });
                }
                let name = if prefix.first <= SET_CHAR_LAST {
                    format!("{}{suffix:02X}", prefix.name)
                } else {
                    format!("{}{suffix}", prefix.name)
                };
                assign(&mut names, opcode, name)?;
            }
        }

        let mut descriptors = Vec::with_capacity(names.len());
        let mut by_name = IndexMap::with_capacity(names.len());
        for (opcode, name) in names.into_iter().enumerate() {
            let opcode = opcode as u8;
            let name = name.ok_or(TableError::Missing(opcode))?;
            by_name.entry(name.clone()).or_insert(opcode);
            descriptors.push(OpcodeDescriptor {
                opcode,
                name,
                kind: CommandKind::of(opcode),
                args: signature(opcode),
            });
        }

        Ok(Self {
            descriptors,
            by_name,
        })
    }

    pub fn get(&self, opcode: u8) -> &OpcodeDescriptor {
        &self.descriptors[opcode as usize]
    }

    pub fn name(&self, opcode: u8) -> &str {
        &self.get(opcode).name
    }

    /// Exact, case-sensitive mnemonic lookup.
    pub fn lookup(&self, name: &str) -> Option<u8> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpcodeDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

fn assign(names: &mut [Option<String>; 256], opcode: usize, name: String) -> Result<(), TableError> {
    match &names[opcode] {
        Some(first) => Err(TableError::Duplicate {
            opcode: opcode as u8,
            first: first.clone(),
            second: name,
        }),
        None => {
            names[opcode] = Some(name);
            Ok(())
        }
    }
}
