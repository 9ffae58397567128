// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Ledger cursor host library (and CLI)
//!
//! Walks hex payloads through a [Buffer][cursor::Buffer] according to a
//! [Layout], for inspecting APDU payloads outside of the device.

/// Re-export `ledger-cursor-core` for consumers
pub use ledger_cursor_core::{self as cursor};

mod error;
pub use error::Error;

pub mod layout;
pub use layout::{Field, Layout};

mod decode;
pub use decode::{decode, decode_path, encode_path, Decoded, Value};
