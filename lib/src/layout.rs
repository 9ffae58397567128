// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Payload layouts, describing the sequence of wire fields in a message

use std::{fmt::Display, str::FromStr};

use strum::{EnumString, EnumVariantNames, VariantNames};

use ledger_cursor_core::Endianness;

use crate::Error;

/// Wire field kinds
#[derive(Copy, Clone, PartialEq, Debug, EnumString, EnumVariantNames)]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum Field {
    U8,
    U16Be,
    U16Le,
    U32Be,
    U32Le,
    U64Be,
    U64Le,
    /// LEB128 variable length integer
    Varint,
    /// Bitcoin CompactSize integer
    Compact,
    /// Count prefixed BIP32 path
    Path,
    /// Fixed length byte string, written as `bytes:N`
    #[strum(disabled)]
    Bytes(usize),
    /// All remaining bytes
    Rest,
}

impl Field {
    /// Fetch byte order for fixed width integer fields
    pub fn endianness(&self) -> Option<Endianness> {
        match self {
            Field::U16Be | Field::U32Be | Field::U64Be => Some(Endianness::Big),
            Field::U16Le | Field::U32Le | Field::U64Le => Some(Endianness::Little),
            _ => None,
        }
    }

    /// Parse a single field, including `bytes:N`
    pub fn parse(s: &str) -> Result<Self, Error> {
        let s = s.trim();

        if let Some(n) = s.strip_prefix("bytes:") {
            return usize::from_str(n)
                .map(Field::Bytes)
                .map_err(|_| Error::InvalidField(s.to_string()));
        }

        Field::from_str(s).map_err(|_| Error::InvalidField(s.to_string()))
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Field::U8 => "u8",
            Field::U16Be => "u16be",
            Field::U16Le => "u16le",
            Field::U32Be => "u32be",
            Field::U32Le => "u32le",
            Field::U64Be => "u64be",
            Field::U64Le => "u64le",
            Field::Varint => "varint",
            Field::Compact => "compact",
            Field::Path => "path",
            Field::Bytes(n) => return write!(f, "bytes:{n}"),
            Field::Rest => "rest",
        };

        write!(f, "{s}")
    }
}

/// Ordered list of fields, parsed from a comma separated string
/// such as `u8,u32be,path,rest`
#[derive(Clone, PartialEq, Debug)]
pub struct Layout(pub Vec<Field>);

impl Layout {
    /// Fetch layout fields
    pub fn fields(&self) -> &[Field] {
        &self.0
    }

    /// Names of supported fields, for help output
    pub fn field_names() -> impl Iterator<Item = &'static str> {
        Field::VARIANTS
            .iter()
            .copied()
            .filter(|v| *v != "bytes")
            .chain(["bytes:N"])
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s
            .split(',')
            .filter(|v| !v.trim().is_empty())
            .map(Field::parse)
            .collect::<Result<Vec<_>, _>>()?;

        if fields.is_empty() {
            return Err(Error::EmptyLayout);
        }

        Ok(Self(fields))
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
