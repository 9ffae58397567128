// Copyright (c) 2022-2023 The MobileCoin Foundation

/// [Buffer][crate::Buffer] errors
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Read, write or seek outside the buffer bounds
    #[cfg_attr(feature = "thiserror", error("out of bounds"))]
    OutOfBounds = 0x00,

    /// Encoded count or length exceeds destination capacity
    #[cfg_attr(feature = "thiserror", error("invalid length"))]
    InvalidLength = 0x01,

    /// Variable length integer exceeds 64 bits
    #[cfg_attr(feature = "thiserror", error("varint overflow"))]
    Overflow = 0x02,

    /// Malformed value
    #[cfg_attr(feature = "thiserror", error("invalid encoding"))]
    InvalidEncoding = 0x03,
}

impl Error {
    /// Fetch the numeric code for this error
    pub const fn code(&self) -> u8 {
        *self as u8
    }
}

impl From<encdec::Error> for Error {
    fn from(e: encdec::Error) -> Self {
        match e {
            encdec::Error::Length => Error::OutOfBounds,
            #[allow(unreachable_patterns)]
            _ => Error::InvalidEncoding,
        }
    }
}
