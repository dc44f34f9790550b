//! Shared helpers for transcoder tests.

use indoc::indoc;

use crate::dt2dv::DtlToDvi;
use crate::dv2dt::DviToDtl;
use crate::error::Error;
use crate::options::Options;
use crate::progress::Report;

/// Hand assembler for DVI test input.
#[derive(Default)]
pub(crate) struct DviWriter {
    pub bytes: Vec<u8>,
}

impl DviWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn op(&mut self, opcode: u8) -> &mut Self {
        self.bytes.push(opcode);
        self
    }

    pub fn u(&mut self, n: usize, value: u32) -> &mut Self {
        dtl_dvi::write_unsigned(n, value, &mut self.bytes).unwrap();
        self
    }

    pub fn s(&mut self, n: usize, value: i32) -> &mut Self {
        dtl_dvi::write_signed(n, value, &mut self.bytes).unwrap();
        self
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn offset(&self) -> i32 {
        self.bytes.len() as i32
    }

    pub fn bop(&mut self, page: i32, previous: i32) -> &mut Self {
        self.op(139).s(4, page);
        for _ in 0..9 {
            self.s(4, 0);
        }
        self.s(4, previous)
    }

    pub fn font_def(&mut self) -> &mut Self {
        self.op(243)
            .u(1, 0)
            .u(4, 0x4BF1_6079)
            .u(4, 655_360)
            .u(4, 655_360)
            .u(1, 0)
            .u(1, 5)
            .raw(b"cmr10")
    }

    pub fn pre(&mut self) -> &mut Self {
        self.op(247)
            .u(1, 2)
            .u(4, 25_400_000)
            .u(4, 473_628_672)
            .u(4, 1000)
            .u(1, 11)
            .raw(b" TeX output")
    }

    pub fn post(&mut self, last_bop: i32) -> &mut Self {
        self.op(248)
            .s(4, last_bop)
            .u(4, 25_400_000)
            .u(4, 473_628_672)
            .u(4, 1000)
            .u(4, 43_725_786)
            .u(4, 30_785_863)
            .u(2, 2)
            .u(2, 2)
    }

    pub fn post_post(&mut self, post: i32, padding: usize) -> &mut Self {
        self.op(249).s(4, post).u(1, 2);
        for _ in 0..padding {
            self.op(223);
        }
        self
    }
}

/// A two-page file touching every command class.
pub(crate) fn sample_dvi() -> Vec<u8> {
    let mut w = DviWriter::new();
    w.pre();
    let bop1 = w.offset();
    w.bop(1, -1)
        .font_def()
        .op(171)
        .raw(b"Hi!")
        .op(128)
        .u(1, 200)
        .op(141)
        .op(145)
        .s(3, -1000)
        .op(147)
        .op(154)
        .s(2, 300)
        .op(142)
        .op(239)
        .u(1, 5)
        .raw(b"color")
        .op(132)
        .s(4, 65_536)
        .s(4, 13_107)
        .op(0x1B)
        .op(140);
    let bop2 = w.offset();
    w.bop(2, bop1).raw(br"(a)\").op(140);
    let post = w.offset();
    w.post(bop2).font_def();
    let pad = 4 + (4 - (w.bytes.len() + 6) % 4) % 4;
    w.post_post(post, pad);
    w.bytes
}

pub(crate) const SAMPLE_DTL: &str = indoc! {r"
    variety sequences-6
    pre 2 25400000 473628672 1000 11 ' TeX output'
    bop 1 0 0 0 0 0 0 0 0 0 -1
    fd1 0 11374260171 655360 655360 0 5 '' 'cmr10'
    fn0
    (Hi!)
    s1 200
    [
    r3 -1000
    w0
    x2 300
    ]
    special1 5 'color'
    sr 65536 13107
    \1B
    eop
    bop 2 0 0 0 0 0 0 0 0 0 26
    (\(a\)\\)
    eop
    post 126 25400000 473628672 1000 43725786 30785863 2 2
    fd1 0 11374260171 655360 655360 0 5 '' 'cmr10'
    post_post 176 2 223 223 223 223
"};

pub(crate) fn dv2dt(dvi: &[u8], options: Options) -> Result<(String, Report), Error> {
    let (out, report) = dv2dt_raw(dvi, options)?;
    Ok((String::from_utf8(out).unwrap(), report))
}

/// DTL output as bytes; quoted strings may carry non-UTF-8 data.
pub(crate) fn dv2dt_raw(dvi: &[u8], options: Options) -> Result<(Vec<u8>, Report), Error> {
    let mut out = Vec::new();
    let report = DviToDtl::new(options)?.run(dvi, &mut out)?;
    Ok((out, report))
}

pub(crate) fn dt2dv(dtl: &str, options: Options) -> Result<(Vec<u8>, Report), Error> {
    dt2dv_raw(dtl.as_bytes(), options)
}

pub(crate) fn dt2dv_raw(dtl: &[u8], options: Options) -> Result<(Vec<u8>, Report), Error> {
    let mut out = Vec::new();
    let report = DtlToDvi::new(options)?.run(dtl, &mut out)?;
    Ok((out, report))
}
