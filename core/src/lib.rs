// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Bounds-checked cursor buffer for hardware wallet message parsing
//!
//! This provides a [Buffer] for reading (and writing) APDU payloads on
//! constrained devices, where every access is checked against the payload
//! length and failures never leave the cursor partially advanced.
//!
//! ## Operations
//!
//! - Fixed width integers via [`Buffer::read_u8`], [`Buffer::read_u16`],
//!   [`Buffer::read_u32`] and [`Buffer::read_u64`], with the byte order
//!   selected per field via [Endianness].
//! - Variable length integers, either LEB128 ([`Buffer::read_varint`]) or
//!   Bitcoin CompactSize ([`Buffer::read_compact_size`]).
//! - BIP32 derivation paths ([`Buffer::read_bip32_path`], [`Buffer::read_path`]),
//!   encoded as a count byte followed by big-endian `u32` indices.
//! - Seeks ([`Buffer::seek_set`], [`Buffer::seek_cur`], [`Buffer::seek_end`])
//!   and bulk copies ([`Buffer::copy_remaining`], [`Buffer::move_remaining`]).
//!
//! ```
//! use ledger_cursor_core::{Buffer, Endianness};
//!
//! let d = [0x01, 0x00, 0x02, 0xac, 0x02];
//! let mut b = Buffer::new(&d[..]);
//!
//! assert_eq!(b.read_u8(), Ok(0x01));
//! assert_eq!(b.read_u16(Endianness::Little), Ok(0x0200));
//! assert_eq!(b.read_varint(), Ok(300));
//! assert!(b.is_exhausted());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod buffer;
pub use buffer::Buffer;

mod endian;
pub use endian::Endianness;

mod error;
pub use error::Error;

pub mod bip32;
pub use bip32::{Bip32Path, HARDENED, MAX_BIP32_PATH};

pub mod codec;
