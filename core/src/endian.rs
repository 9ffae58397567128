// Copyright (c) 2022-2023 The MobileCoin Foundation

use strum::{Display, EnumString, EnumVariantNames};

/// Byte order for multi-byte integer fields.
///
/// Selected per call so a single message may mix field encodings.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumString, EnumVariantNames)]
pub enum Endianness {
    /// Most significant byte first (network order)
    #[strum(to_string = "be", serialize = "big")]
    Big,

    /// Least significant byte first
    #[strum(to_string = "le", serialize = "little")]
    Little,
}
