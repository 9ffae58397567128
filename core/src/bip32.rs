// Copyright (c) 2022-2023 The MobileCoin Foundation

//! BIP32 derivation paths
//!
//! A [Bip32Path] holds up to [MAX_BIP32_PATH] derivation indices, with
//! hardened indices carrying the [HARDENED] bit.

use core::{fmt, fmt::Write as _, str::FromStr};

use byteorder::{BigEndian, ByteOrder};
use encdec::{DecodeOwned, Encode};
use heapless::{String, Vec};

use crate::Error;

/// Maximum number of derivation levels in a path
pub const MAX_BIP32_PATH: usize = 10;

/// Hardened derivation bit
pub const HARDENED: u32 = 0x8000_0000;

/// Set the hardened bit on a derivation index
pub const fn harden(index: u32) -> u32 {
    index | HARDENED
}

/// Check whether a derivation index is hardened
pub const fn is_hardened(index: u32) -> bool {
    index & HARDENED != 0
}

/// Read exactly `out.len()` big-endian indices from `buff`, with no count prefix.
///
/// Fails with [Error::InvalidLength] for an empty or over-long destination,
/// and [Error::OutOfBounds] where `buff` is too short.
pub fn read_indices(buff: &[u8], out: &mut [u32]) -> Result<usize, Error> {
    if out.is_empty() || out.len() > MAX_BIP32_PATH {
        return Err(Error::InvalidLength);
    }

    let n = out.len() * 4;
    if buff.len() < n {
        return Err(Error::OutOfBounds);
    }

    BigEndian::read_u32_into(&buff[..n], out);

    Ok(n)
}

/// BIP32 derivation path
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     COUNT     |                INDEX_0 (u32 BE)...            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      ...      |                INDEX_N...                     /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Bip32Path(Vec<u32, MAX_BIP32_PATH>);

impl Bip32Path {
    /// Create a new (empty) path
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a path from a slice of indices
    pub fn from_slice(indices: &[u32]) -> Result<Self, Error> {
        Vec::from_slice(indices)
            .map(Self)
            .map_err(|_| Error::InvalidLength)
    }

    /// Append a derivation index
    pub fn push(&mut self, index: u32) -> Result<(), Error> {
        self.0.push(index).map_err(|_| Error::InvalidLength)
    }

    /// Fetch path indices
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Number of derivation levels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether this is the (empty) master path
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the path into a fixed capacity string
    pub fn format<const N: usize>(&self) -> Result<String<N>, Error> {
        let mut s = String::new();
        write!(&mut s, "{self}").map_err(|_| Error::InvalidLength)?;
        Ok(s)
    }
}

impl AsRef<[u32]> for Bip32Path {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

/// Display paths as `44'/0'/0'/0/0`, the empty path as `m`
impl fmt::Display for Bip32Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "m");
        }

        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }

            match is_hardened(*v) {
                true => write!(f, "{}'", v & !HARDENED)?,
                false => write!(f, "{v}")?,
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Bip32Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bip32Path({self})")
    }
}

impl FromStr for Bip32Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let s = match s {
            "m" | "M" => return Ok(Self::new()),
            _ => s
                .strip_prefix("m/")
                .or_else(|| s.strip_prefix("M/"))
                .unwrap_or(s),
        };

        let mut p = Self::new();

        for c in s.split('/') {
            let (c, hardened) = match c.strip_suffix(['\'', 'h', 'H']) {
                Some(v) => (v, true),
                None => (c, false),
            };

            let i = u32::from_str(c).map_err(|_| Error::InvalidEncoding)?;
            if is_hardened(i) {
                return Err(Error::InvalidEncoding);
            }

            p.push(if hardened { harden(i) } else { i })?;
        }

        Ok(p)
    }
}

impl Encode for Bip32Path {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(1 + self.0.len() * 4)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        let n = self.encode_len()?;
        if buff.len() < n {
            return Err(Error::OutOfBounds);
        }

        buff[0] = self.0.len() as u8;
        BigEndian::write_u32_into(&self.0, &mut buff[1..n]);

        Ok(n)
    }
}

impl DecodeOwned for Bip32Path {
    type Output = Self;
    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        let count = match buff.first() {
            Some(c) => *c as usize,
            None => return Err(Error::OutOfBounds),
        };

        if count > MAX_BIP32_PATH {
            return Err(Error::InvalidLength);
        }

        let mut d = [0u32; MAX_BIP32_PATH];
        let mut n = 1;

        if count > 0 {
            n += read_indices(&buff[1..], &mut d[..count])?;
        }

        Ok((Self::from_slice(&d[..count])?, n))
    }
}
