// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Bounds-checked cursor over a borrowed byte region.
//!
//! A [Buffer] tracks an `offset` and a `length` over a region of fixed
//! capacity, with `offset <= length <= capacity` holding at all times.
//! Failed operations leave both offset and region untouched.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::{
    bip32::{self, Bip32Path, MAX_BIP32_PATH},
    codec::{compact, varint},
    Endianness, Error,
};

/// Cursor buffer, reading from `T: AsRef<[u8]>` and writing to `T: AsMut<[u8]>`
#[derive(Clone, PartialEq, Debug)]
pub struct Buffer<T> {
    data: T,
    length: usize,
    offset: usize,
}

impl<T: AsRef<[u8]>> Buffer<T> {
    /// Create a new buffer spanning the whole region
    pub fn new(data: T) -> Self {
        let length = data.as_ref().len();

        Self {
            data,
            length,
            offset: 0,
        }
    }

    /// Create a new buffer over the first `length` bytes of the region
    pub fn with_length(data: T, length: usize) -> Result<Self, Error> {
        if length > data.as_ref().len() {
            #[cfg(feature = "log")]
            log::debug!(
                "buffer length {} exceeds capacity {}",
                length,
                data.as_ref().len()
            );

            return Err(Error::InvalidLength);
        }

        Ok(Self {
            data,
            length,
            offset: 0,
        })
    }

    /// Current cursor offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total readable length, independent of the offset
    pub fn length(&self) -> usize {
        self.length
    }

    /// Capacity of the underlying region
    pub fn capacity(&self) -> usize {
        self.data.as_ref().len()
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.length - self.offset
    }

    /// Check whether the offset has reached the length
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Unread bytes between offset and length
    pub fn get_cur(&self) -> &[u8] {
        &self.data.as_ref()[self.offset..self.length]
    }

    /// Check whether at least `n` bytes remain
    pub fn can_read(&self, n: usize) -> bool {
        n <= self.remaining()
    }

    /// Seek to an absolute offset
    pub fn seek_set(&mut self, offset: usize) -> Result<(), Error> {
        if offset > self.length {
            return Err(Error::OutOfBounds);
        }

        self.offset = offset;
        Ok(())
    }

    /// Seek relative to the current offset
    pub fn seek_cur(&mut self, offset: isize) -> Result<(), Error> {
        match self.offset.checked_add_signed(offset) {
            Some(v) => self.seek_set(v),
            None => Err(Error::OutOfBounds),
        }
    }

    /// Seek to `offset` bytes before the end
    pub fn seek_end(&mut self, offset: usize) -> Result<(), Error> {
        match self.length.checked_sub(offset) {
            Some(v) => self.seek_set(v),
            None => Err(Error::OutOfBounds),
        }
    }

    /// Fetch the next byte without advancing
    pub fn peek(&self) -> Result<u8, Error> {
        self.peek_n(0)
    }

    /// Fetch the byte `n` positions past the offset without advancing
    pub fn peek_n(&self, n: usize) -> Result<u8, Error> {
        match self.get_cur().get(n) {
            Some(v) => Ok(*v),
            None => Err(Error::OutOfBounds),
        }
    }

    /// Borrow the next `n` bytes, without advancing
    fn take(&self, n: usize) -> Result<&[u8], Error> {
        if !self.can_read(n) {
            #[cfg(feature = "log")]
            log::debug!(
                "read of {} bytes at offset {} exceeds length {}",
                n,
                self.offset,
                self.length
            );

            return Err(Error::OutOfBounds);
        }

        Ok(&self.get_cur()[..n])
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let v = self.take(1)?[0];
        self.offset += 1;
        Ok(v)
    }

    /// Read a u16 with the provided byte order
    pub fn read_u16(&mut self, endianness: Endianness) -> Result<u16, Error> {
        let d = self.take(2)?;
        let v = match endianness {
            Endianness::Big => BigEndian::read_u16(d),
            Endianness::Little => LittleEndian::read_u16(d),
        };
        self.offset += 2;
        Ok(v)
    }

    /// Read a u32 with the provided byte order
    pub fn read_u32(&mut self, endianness: Endianness) -> Result<u32, Error> {
        let d = self.take(4)?;
        let v = match endianness {
            Endianness::Big => BigEndian::read_u32(d),
            Endianness::Little => LittleEndian::read_u32(d),
        };
        self.offset += 4;
        Ok(v)
    }

    /// Read a u64 with the provided byte order
    pub fn read_u64(&mut self, endianness: Endianness) -> Result<u64, Error> {
        let d = self.take(8)?;
        let v = match endianness {
            Endianness::Big => BigEndian::read_u64(d),
            Endianness::Little => LittleEndian::read_u64(d),
        };
        self.offset += 8;
        Ok(v)
    }

    /// Read a LEB128 variable length integer
    pub fn read_varint(&mut self) -> Result<u64, Error> {
        let (v, n) = varint::dec(self.get_cur())?;
        self.offset += n;
        Ok(v)
    }

    /// Read a CompactSize variable length integer
    pub fn read_compact_size(&mut self) -> Result<u64, Error> {
        let (v, n) = compact::dec(self.get_cur())?;
        self.offset += n;
        Ok(v)
    }

    /// Read exactly `out.len()` bytes
    pub fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), Error> {
        let d = self.take(out.len())?;
        out.copy_from_slice(d);
        self.offset += out.len();
        Ok(())
    }

    /// Read a count prefixed BIP32 path into `out`, returning the number of levels.
    ///
    /// Fails with [Error::InvalidLength] where the count exceeds `out.len()`
    /// or [MAX_BIP32_PATH].
    pub fn read_bip32_path(&mut self, out: &mut [u32]) -> Result<usize, Error> {
        let count = self.peek()? as usize;

        if count > out.len() || count > MAX_BIP32_PATH {
            #[cfg(feature = "log")]
            log::debug!(
                "bip32 path count {} exceeds capacity {}",
                count,
                out.len().min(MAX_BIP32_PATH)
            );

            return Err(Error::InvalidLength);
        }

        let mut n = 1;
        if count > 0 {
            n += bip32::read_indices(&self.get_cur()[1..], &mut out[..count])?;
        }

        self.offset += n;
        Ok(count)
    }

    /// Read exactly `out.len()` BIP32 indices, with the count supplied by the caller
    pub fn read_bip32_indices(&mut self, out: &mut [u32]) -> Result<(), Error> {
        let n = bip32::read_indices(self.get_cur(), out)?;
        self.offset += n;
        Ok(())
    }

    /// Read a count prefixed BIP32 path
    pub fn read_path(&mut self) -> Result<Bip32Path, Error> {
        let mut d = [0u32; MAX_BIP32_PATH];
        let n = self.read_bip32_path(&mut d)?;

        Bip32Path::from_slice(&d[..n])
    }

    /// Copy all unread bytes into `out` without advancing, returning the number copied
    pub fn copy_remaining(&self, out: &mut [u8]) -> Result<usize, Error> {
        let d = self.get_cur();

        if out.len() < d.len() {
            return Err(Error::OutOfBounds);
        }

        out[..d.len()].copy_from_slice(d);
        Ok(d.len())
    }

    /// Copy all unread bytes into `out` and advance to the end
    pub fn move_remaining(&mut self, out: &mut [u8]) -> Result<usize, Error> {
        let n = self.copy_remaining(out)?;
        self.offset = self.length;
        Ok(n)
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Buffer<T> {
    /// Bytes written so far, from the start of the region to the offset
    pub fn written(&self) -> &[u8] {
        &self.data.as_ref()[..self.offset]
    }

    /// Borrow the next `n` writable bytes, without advancing
    fn take_mut(&mut self, n: usize) -> Result<&mut [u8], Error> {
        if !self.can_read(n) {
            #[cfg(feature = "log")]
            log::debug!(
                "write of {} bytes at offset {} exceeds length {}",
                n,
                self.offset,
                self.length
            );

            return Err(Error::OutOfBounds);
        }

        let o = self.offset;
        Ok(&mut self.data.as_mut()[o..][..n])
    }

    /// Unwritten bytes between offset and length
    fn get_cur_mut(&mut self) -> &mut [u8] {
        let (o, l) = (self.offset, self.length);
        &mut self.data.as_mut()[o..l]
    }

    /// Write a single byte
    pub fn write_u8(&mut self, v: u8) -> Result<(), Error> {
        self.take_mut(1)?[0] = v;
        self.offset += 1;
        Ok(())
    }

    /// Write a u16 with the provided byte order
    pub fn write_u16(&mut self, v: u16, endianness: Endianness) -> Result<(), Error> {
        let d = self.take_mut(2)?;
        match endianness {
            Endianness::Big => BigEndian::write_u16(d, v),
            Endianness::Little => LittleEndian::write_u16(d, v),
        }
        self.offset += 2;
        Ok(())
    }

    /// Write a u32 with the provided byte order
    pub fn write_u32(&mut self, v: u32, endianness: Endianness) -> Result<(), Error> {
        let d = self.take_mut(4)?;
        match endianness {
            Endianness::Big => BigEndian::write_u32(d, v),
            Endianness::Little => LittleEndian::write_u32(d, v),
        }
        self.offset += 4;
        Ok(())
    }

    /// Write a u64 with the provided byte order
    pub fn write_u64(&mut self, v: u64, endianness: Endianness) -> Result<(), Error> {
        let d = self.take_mut(8)?;
        match endianness {
            Endianness::Big => BigEndian::write_u64(d, v),
            Endianness::Little => LittleEndian::write_u64(d, v),
        }
        self.offset += 8;
        Ok(())
    }

    /// Write all of `src`
    pub fn write_bytes(&mut self, src: &[u8]) -> Result<(), Error> {
        self.take_mut(src.len())?.copy_from_slice(src);
        self.offset += src.len();
        Ok(())
    }

    /// Write a LEB128 variable length integer
    pub fn write_varint(&mut self, v: u64) -> Result<(), Error> {
        let n = varint::enc(v, self.get_cur_mut())?;
        self.offset += n;
        Ok(())
    }

    /// Write a CompactSize variable length integer
    pub fn write_compact_size(&mut self, v: u64) -> Result<(), Error> {
        let n = compact::enc(v, self.get_cur_mut())?;
        self.offset += n;
        Ok(())
    }

    /// Write a count prefixed BIP32 path
    pub fn write_bip32_path(&mut self, path: &[u32]) -> Result<(), Error> {
        let p = Bip32Path::from_slice(path)?;
        let n = encdec::Encode::encode(&p, self.get_cur_mut())?;
        self.offset += n;
        Ok(())
    }
}

impl<'a> From<&'a [u8]> for Buffer<&'a [u8]> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a> From<&'a mut [u8]> for Buffer<&'a mut [u8]> {
    fn from(data: &'a mut [u8]) -> Self {
        Self::new(data)
    }
}
