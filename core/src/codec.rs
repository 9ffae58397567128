// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Slice-level encode / decode helpers for variable length integers.
//!
//! These operate on plain slices and return the number of bytes consumed or
//! written, [Buffer][crate::Buffer] wraps them with offset tracking.

/// Continuation-bit little-endian base-128 (LEB128) unsigned integers
pub mod varint {
    use crate::Error;

    /// Maximum encoded length of a u64 varint
    pub const MAX_LEN: usize = 10;

    /// Compute the encoded length of `v`
    pub const fn enc_len(v: u64) -> usize {
        let bits = 64 - v.leading_zeros() as usize;
        if bits == 0 {
            1
        } else {
            (bits + 6) / 7
        }
    }

    /// Encode `v` into the start of `buff`
    pub fn enc(v: u64, buff: &mut [u8]) -> Result<usize, Error> {
        let n = enc_len(v);

        if buff.len() < n {
            return Err(Error::OutOfBounds);
        }

        let mut v = v;
        for b in buff[..n].iter_mut() {
            *b = (v & 0x7f) as u8;
            v >>= 7;

            if v != 0 {
                *b |= 0x80;
            }
        }

        Ok(n)
    }

    /// Decode a varint from the start of `buff`
    pub fn dec(buff: &[u8]) -> Result<(u64, usize), Error> {
        let mut value = 0u64;

        for (i, b) in buff.iter().enumerate() {
            if i >= MAX_LEN {
                return Err(Error::Overflow);
            }

            let bits = (b & 0x7f) as u64;

            // Final byte may only carry bit 63, and never continues
            if i == MAX_LEN - 1 && (bits > 1 || b & 0x80 != 0) {
                return Err(Error::Overflow);
            }

            value |= bits << (7 * i);

            if b & 0x80 == 0 {
                return Ok((value, i + 1));
            }
        }

        Err(Error::OutOfBounds)
    }
}

/// Bitcoin-style CompactSize integers
///
/// ## Encoding:
/// ```text
///  value < 0xfd          [ value ]
///  value <= 0xffff       [ 0xfd | u16 LE ]
///  value <= 0xffffffff   [ 0xfe | u32 LE ]
///  otherwise             [ 0xff | u64 LE ]
/// ```
pub mod compact {
    use byteorder::{ByteOrder, LittleEndian};
    use num_enum::TryFromPrimitive;

    use crate::Error;

    /// Prefix bytes introducing a wider integer
    #[derive(Copy, Clone, PartialEq, Debug, TryFromPrimitive)]
    #[repr(u8)]
    pub enum Prefix {
        U16 = 0xfd,
        U32 = 0xfe,
        U64 = 0xff,
    }

    impl Prefix {
        /// Width of the integer following this prefix
        pub const fn width(&self) -> usize {
            match self {
                Prefix::U16 => 2,
                Prefix::U32 => 4,
                Prefix::U64 => 8,
            }
        }
    }

    /// Compute the encoded length of `v`
    pub const fn enc_len(v: u64) -> usize {
        if v < Prefix::U16 as u64 {
            1
        } else if v <= u16::MAX as u64 {
            3
        } else if v <= u32::MAX as u64 {
            5
        } else {
            9
        }
    }

    /// Encode `v` into the start of `buff` using the smallest form
    pub fn enc(v: u64, buff: &mut [u8]) -> Result<usize, Error> {
        let n = enc_len(v);

        if buff.len() < n {
            return Err(Error::OutOfBounds);
        }

        match n {
            1 => buff[0] = v as u8,
            3 => {
                buff[0] = Prefix::U16 as u8;
                LittleEndian::write_u16(&mut buff[1..3], v as u16);
            }
            5 => {
                buff[0] = Prefix::U32 as u8;
                LittleEndian::write_u32(&mut buff[1..5], v as u32);
            }
            _ => {
                buff[0] = Prefix::U64 as u8;
                LittleEndian::write_u64(&mut buff[1..9], v);
            }
        }

        Ok(n)
    }

    /// Decode a CompactSize integer from the start of `buff`
    pub fn dec(buff: &[u8]) -> Result<(u64, usize), Error> {
        let p = match buff.first() {
            Some(p) => *p,
            None => return Err(Error::OutOfBounds),
        };

        let prefix = match Prefix::try_from(p) {
            Ok(v) => v,
            Err(_) => return Ok((p as u64, 1)),
        };

        let n = 1 + prefix.width();
        if buff.len() < n {
            return Err(Error::OutOfBounds);
        }

        let d = &buff[1..n];
        let v = match prefix {
            Prefix::U16 => LittleEndian::read_u16(d) as u64,
            Prefix::U32 => LittleEndian::read_u32(d) as u64,
            Prefix::U64 => LittleEndian::read_u64(d),
        };

        Ok((v, n))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;

    #[test]
    fn varint_lengths() {
        let tests = &[
            (0, 1),
            (127, 1),
            (128, 2),
            (16383, 2),
            (16384, 3),
            (u32::MAX as u64, 5),
            (u64::MAX, 10),
        ];

        for (v, n) in tests {
            assert_eq!(varint::enc_len(*v), *n, "length mismatch for {v}");
        }
    }

    #[test]
    fn varint_known_encodings() {
        let mut buff = [0u8; 10];

        let n = varint::enc(300, &mut buff).unwrap();
        assert_eq!(&buff[..n], &[0xac, 0x02]);

        let n = varint::enc(u64::MAX, &mut buff).unwrap();
        assert_eq!(
            &buff[..n],
            &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
        );
    }

    #[test]
    fn varint_overflow() {
        // Final byte carries more than bit 63
        let d = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02];
        assert_eq!(varint::dec(&d), Err(Error::Overflow));

        // Continuation past the maximum length
        let d = [0x80; 11];
        assert_eq!(varint::dec(&d), Err(Error::Overflow));

        // Continuation on the final byte, with no more input
        let d = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x81];
        assert_eq!(varint::dec(&d), Err(Error::Overflow));

        let d = [0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80];
        assert_eq!(varint::dec(&d), Err(Error::Overflow));
    }

    #[test]
    fn varint_truncated() {
        assert_eq!(varint::dec(&[]), Err(Error::OutOfBounds));
        assert_eq!(varint::dec(&[0x80, 0x80]), Err(Error::OutOfBounds));
    }

    #[test]
    fn varint_enc_short_buffer() {
        let mut buff = [0u8; 1];
        assert_eq!(varint::enc(128, &mut buff), Err(Error::OutOfBounds));
    }

    #[test]
    fn compact_known_encodings() {
        let tests: &[(u64, &[u8])] = &[
            (0xfc, &[0xfc]),
            (0xfd, &[0xfd, 0xfd, 0x00]),
            (0x0100, &[0xfd, 0x00, 0x01]),
            (0x03020100, &[0xfe, 0x00, 0x01, 0x02, 0x03]),
            (
                0x0706050403020100,
                &[0xff, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07],
            ),
        ];

        let mut buff = [0u8; 9];

        for (v, e) in tests {
            let n = compact::enc(*v, &mut buff).unwrap();
            assert_eq!(&buff[..n], *e);

            assert_eq!(compact::dec(e), Ok((*v, e.len())));
        }
    }

    #[test]
    fn compact_truncated() {
        assert_eq!(compact::dec(&[]), Err(Error::OutOfBounds));
        assert_eq!(compact::dec(&[0xfd, 0x00]), Err(Error::OutOfBounds));
        assert_eq!(compact::dec(&[0xff, 0x00, 0x01]), Err(Error::OutOfBounds));
    }
}
