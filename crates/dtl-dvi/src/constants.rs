//! DVI format constants (driver standard, level 0).

/// Last opcode of the set-character range (`set_char_127`).
pub const SET_CHAR_LAST: u8 = 127;
/// `set1`: typeset a character code given as a one-byte argument.
pub const SET1: u8 = 128;
/// Begin of page.
pub const BOP: u8 = 139;
/// End of page.
pub const EOP: u8 = 140;
/// `fnt_num_0`; the run ends at 234.
pub const FNT_NUM_FIRST: u8 = 171;
pub const FNT_NUM_LAST: u8 = 234;
/// `fnt1`; the run ends at 238.
pub const FNT1: u8 = 235;
/// `xxx1`; the run ends at 242.
pub const XXX1: u8 = 239;
/// `fnt_def1`; the run ends at 246.
pub const FNT_DEF1: u8 = 243;
/// Preamble.
pub const PRE: u8 = 247;
/// Postamble.
pub const POST: u8 = 248;
/// Post-postamble.
pub const POST_POST: u8 = 249;
/// First opcode with no meaning in the format.
pub const UNDEFINED_FIRST: u8 = 250;

/// Trailing filler byte after the post-postamble.
pub const PADDING: u8 = 223;
/// Minimum number of trailing filler bytes.
pub const MIN_PADDING: usize = 4;
/// The file length is padded to a multiple of this.
pub const FILE_ALIGN: u64 = 4;

/// Back-pointer value meaning "no such command yet".
pub const NO_ADDRESS: i32 = -1;
