// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Layout driven payload decoding

use encdec::{DecodeOwned, Encode};
use log::{debug, trace};
use serde::Serialize;

use ledger_cursor_core::{Bip32Path, Buffer, Endianness, Error as CursorError};

use crate::{
    layout::{Field, Layout},
    Error,
};

/// Decoded field value
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Value {
    /// Integer fields
    Int(u64),
    /// BIP32 path, in display form
    Path(String),
    /// Hex encoded bytes
    Bytes(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v} (0x{v:x})"),
            Value::Path(p) => write!(f, "{p}"),
            Value::Bytes(b) => write!(f, "{b}"),
        }
    }
}

/// Decoded field with position information
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Decoded {
    /// Index of field in layout
    pub index: usize,
    /// Field kind
    pub field: String,
    /// Offset of field in payload
    pub offset: usize,
    /// Encoded field length
    pub len: usize,
    /// Decoded value
    pub value: Value,
}

/// Decode a single field at the buffer's current offset
fn decode_field(b: &mut Buffer<&[u8]>, field: &Field) -> Result<Value, CursorError> {
    // Fixed width integers default to network order
    let e = field.endianness().unwrap_or(Endianness::Big);

    let v = match field {
        Field::U8 => Value::Int(b.read_u8()? as u64),
        Field::U16Be | Field::U16Le => Value::Int(b.read_u16(e)? as u64),
        Field::U32Be | Field::U32Le => Value::Int(b.read_u32(e)? as u64),
        Field::U64Be | Field::U64Le => Value::Int(b.read_u64(e)?),
        Field::Varint => Value::Int(b.read_varint()?),
        Field::Compact => Value::Int(b.read_compact_size()?),
        Field::Path => Value::Path(b.read_path()?.to_string()),
        Field::Bytes(n) => {
            // Check against the payload before sizing the output
            if !b.can_read(*n) {
                return Err(CursorError::OutOfBounds);
            }

            let mut d = vec![0u8; *n];
            b.read_bytes(&mut d)?;
            Value::Bytes(hex::encode(d))
        }
        Field::Rest => {
            let mut d = vec![0u8; b.remaining()];
            b.move_remaining(&mut d)?;
            Value::Bytes(hex::encode(d))
        }
    };

    Ok(v)
}

/// Decode `payload` according to `layout`.
///
/// Fails on the first field that cannot be decoded, and where bytes remain
/// after the final field unless `allow_trailing` is set.
pub fn decode(
    layout: &Layout,
    payload: &[u8],
    allow_trailing: bool,
) -> Result<Vec<Decoded>, Error> {
    let mut b = Buffer::new(payload);
    let mut decoded = Vec::with_capacity(layout.fields().len());

    debug!("Decoding {} bytes with layout: {}", payload.len(), layout);

    for (index, field) in layout.fields().iter().enumerate() {
        let offset = b.offset();

        let value = decode_field(&mut b, field).map_err(|err| Error::Field {
            index,
            field: *field,
            offset,
            err,
        })?;

        trace!("{index}: {field} @ {offset}: {value:?}");

        decoded.push(Decoded {
            index,
            field: field.to_string(),
            offset,
            len: b.offset() - offset,
            value,
        });
    }

    if !b.is_exhausted() && !allow_trailing {
        return Err(Error::TrailingBytes(b.remaining()));
    }

    Ok(decoded)
}

/// Encode a textual BIP32 path to wire format
pub fn encode_path(path: &str) -> Result<Vec<u8>, Error> {
    let p: Bip32Path = path.parse().map_err(Error::Path)?;

    let mut buff = vec![0u8; p.encode_len().map_err(Error::Path)?];
    let n = p.encode(&mut buff).map_err(Error::Path)?;
    buff.truncate(n);

    Ok(buff)
}

/// Decode a wire format BIP32 path, rejecting trailing bytes
pub fn decode_path(d: &[u8]) -> Result<Bip32Path, Error> {
    let (p, n) = Bip32Path::decode_owned(d).map_err(Error::Path)?;

    if n != d.len() {
        return Err(Error::TrailingBytes(d.len() - n));
    }

    Ok(p)
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn decode_fields() {
        let d = hex::decode("ab0102030405060708fd0001ac02028000000000000001deadbeef").unwrap();
        let l = Layout::from_str("u8,u16be,u16le,u32le,compact,varint,path,rest").unwrap();

        let r = decode(&l, &d, false).unwrap();

        let values: Vec<_> = r.iter().map(|v| v.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                Value::Int(0xab),
                Value::Int(0x0102),
                Value::Int(0x0403),
                Value::Int(0x08070605),
                Value::Int(0x0100),
                Value::Int(300),
                Value::Path("0'/1".to_string()),
                Value::Bytes("deadbeef".to_string()),
            ]
        );

        assert_eq!(r[6].offset, 14);
        assert_eq!(r[6].len, 9);
    }

    #[test]
    fn decode_failure_reports_field() {
        let d = [0x01, 0x02, 0x03];
        let l = Layout::from_str("u8,u32be").unwrap();

        match decode(&l, &d, false) {
            Err(Error::Field {
                index,
                field,
                offset,
                err,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(field, Field::U32Be);
                assert_eq!(offset, 1);
                assert_eq!(err, CursorError::OutOfBounds);
            }
            r => panic!("unexpected result: {r:?}"),
        }
    }

    #[test]
    fn decode_oversized_bytes_field() {
        let d = [0x01, 0x02];

        for l in ["bytes:3".to_string(), format!("u8,bytes:{}", usize::MAX)] {
            let l = Layout::from_str(&l).unwrap();

            assert!(
                matches!(
                    decode(&l, &d, false),
                    Err(Error::Field {
                        err: CursorError::OutOfBounds,
                        ..
                    })
                ),
                "expected out of bounds for layout {l}"
            );
        }

        let l = Layout::from_str("bytes:2").unwrap();
        let r = decode(&l, &d, false).unwrap();
        assert_eq!(r[0].value, Value::Bytes("0102".to_string()));
    }

    #[test]
    fn decode_trailing() {
        let d = [0x01, 0x02, 0x03];
        let l = Layout::from_str("u8").unwrap();

        assert!(matches!(
            decode(&l, &d, false),
            Err(Error::TrailingBytes(2))
        ));
        assert_eq!(decode(&l, &d, true).unwrap().len(), 1);
    }

    #[test]
    fn path_helpers() {
        let d = encode_path("m/44'/535348'/0'").unwrap();
        assert_eq!(hex::encode(&d), "038000002c80082b3480000000");

        let p = decode_path(&d).unwrap();
        assert_eq!(p.to_string(), "44'/535348'/0'");

        let mut t = d.clone();
        t.push(0x00);
        assert!(matches!(decode_path(&t), Err(Error::TrailingBytes(1))));

        assert!(matches!(
            encode_path("44'/abc"),
            Err(Error::Path(CursorError::InvalidEncoding))
        ));
    }
}
