use crate::codec::{
    CodecError, max_unsigned, read_signed, read_unsigned, write_signed, write_unsigned,
};

fn encode_unsigned(n: usize, value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    write_unsigned(n, value, &mut out).unwrap();
    out
}

fn encode_signed(n: usize, value: i32) -> Vec<u8> {
    let mut out = Vec::new();
    write_signed(n, value, &mut out).unwrap();
    out
}

#[test]
fn reads_big_endian() {
    let mut input: &[u8] = &[0x12, 0x34, 0x56, 0x78];
    assert_eq!(read_unsigned(4, &mut input).unwrap(), 0x1234_5678);
    assert!(input.is_empty());

    let mut input: &[u8] = &[0x01, 0x00, 0xFF];
    assert_eq!(read_unsigned(2, &mut input).unwrap(), 256);
    assert_eq!(input, &[0xFF]);
}

#[test]
fn signed_takes_sign_from_first_byte() {
    assert_eq!(read_signed(1, &mut &[0xFF][..]).unwrap(), -1);
    assert_eq!(read_signed(1, &mut &[0x80][..]).unwrap(), -128);
    assert_eq!(read_signed(1, &mut &[0x7F][..]).unwrap(), 127);
    assert_eq!(read_signed(2, &mut &[0xFF, 0xFE][..]).unwrap(), -2);
    assert_eq!(read_signed(3, &mut &[0x80, 0x00, 0x00][..]).unwrap(), -8_388_608);
    assert_eq!(read_signed(4, &mut &[0xFF, 0xFF, 0xFF, 0xFF][..]).unwrap(), -1);
    assert_eq!(
        read_signed(4, &mut &[0x80, 0x00, 0x00, 0x00][..]).unwrap(),
        i32::MIN
    );
    assert_eq!(
        read_signed(4, &mut &[0x7F, 0xFF, 0xFF, 0xFF][..]).unwrap(),
        i32::MAX
    );
}

#[test]
fn writes_low_bytes() {
    assert_eq!(encode_unsigned(1, 0x1FF), vec![0xFF]);
    assert_eq!(encode_unsigned(2, 258), vec![0x01, 0x02]);
    assert_eq!(encode_unsigned(3, 0xAABBCCDD), vec![0xBB, 0xCC, 0xDD]);
    assert_eq!(encode_signed(4, -1), vec![0xFF; 4]);
    assert_eq!(encode_signed(3, -2), vec![0xFF, 0xFF, 0xFE]);
}

#[test]
fn unsigned_law_exhaustive_for_short_fields() {
    for n in 1..=2usize {
        for value in 0..(1u32 << (8 * n)) {
            let bytes = encode_unsigned(n, value);
            assert_eq!(bytes.len(), n);
            assert_eq!(read_unsigned(n, &mut bytes.as_slice()).unwrap(), value);
        }
    }
}

#[test]
fn unsigned_law_for_wide_fields() {
    let samples = [0u32, 1, 127, 128, 255, 256, 65_535, 65_536, 0xFF_FFFF];
    for value in samples {
        let bytes = encode_unsigned(3, value);
        assert_eq!(read_unsigned(3, &mut bytes.as_slice()).unwrap(), value);
    }
    for value in samples.into_iter().chain([0x1000_0000, u32::MAX]) {
        let bytes = encode_unsigned(4, value);
        assert_eq!(read_unsigned(4, &mut bytes.as_slice()).unwrap(), value);
    }
}

#[test]
fn signed_law_exhaustive_for_short_fields() {
    for n in 1..=2usize {
        let half = 1i32 << (8 * n - 1);
        for value in -half..half {
            let bytes = encode_signed(n, value);
            assert_eq!(read_signed(n, &mut bytes.as_slice()).unwrap(), value);
        }
    }
}

#[test]
fn signed_law_at_boundaries() {
    for value in [-8_388_608, -1, 0, 1, 8_388_607] {
        let bytes = encode_signed(3, value);
        assert_eq!(read_signed(3, &mut bytes.as_slice()).unwrap(), value);
    }
    for value in [i32::MIN, -65_536, -1, 0, 1, 65_536, i32::MAX] {
        let bytes = encode_signed(4, value);
        assert_eq!(read_signed(4, &mut bytes.as_slice()).unwrap(), value);
    }
}

#[test]
fn four_byte_patterns_agree_across_signedness() {
    for value in [0u32, 1, 0x7FFF_FFFF, 0x8000_0000, 0xDEAD_BEEF, u32::MAX] {
        let bytes = encode_unsigned(4, value);
        let signed = read_signed(4, &mut bytes.as_slice()).unwrap();
        assert_eq!(signed as u32, value);
    }
}

#[test]
fn rejects_bad_width() {
    assert!(matches!(
        read_unsigned(0, &mut &[1u8][..]),
        Err(CodecError::InvalidWidth(0))
    ));
    assert!(matches!(
        read_signed(5, &mut &[1u8; 5][..]),
        Err(CodecError::InvalidWidth(5))
    ));
    assert!(matches!(
        write_unsigned(5, 1, &mut Vec::new()),
        Err(CodecError::InvalidWidth(5))
    ));
    assert!(matches!(max_unsigned(0), Err(CodecError::InvalidWidth(0))));
}

#[test]
fn short_input_is_an_error() {
    let err = read_unsigned(4, &mut &[1u8, 2][..]).unwrap_err();
    assert!(matches!(err, CodecError::UnexpectedEof { needed: 4, got: 2 }));
    insta::assert_snapshot!(err, @"unexpected end of input: got 2 of 4 bytes");
}

#[test]
fn max_unsigned_per_width() {
    assert_eq!(max_unsigned(1).unwrap(), 0xFF);
    assert_eq!(max_unsigned(2).unwrap(), 0xFFFF);
    assert_eq!(max_unsigned(3).unwrap(), 0xFF_FFFF);
    assert_eq!(max_unsigned(4).unwrap(), u32::MAX);
}
