// Copyright (c) 2022-2023 The MobileCoin Foundation

use ledger_cursor_core::Error as CursorError;

use crate::layout::Field;

/// Ledger cursor API Error Type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unrecognised layout field
    #[error("Invalid layout field '{0}'")]
    InvalidField(String),

    /// Layout contains no fields
    #[error("Empty layout")]
    EmptyLayout,

    /// Decoding a field failed
    #[error("Field {index} ({field}) at offset {offset}: {err}")]
    Field {
        index: usize,
        field: Field,
        offset: usize,
        err: CursorError,
    },

    /// Payload contains bytes not covered by the layout
    #[error("{0} trailing bytes")]
    TrailingBytes(usize),

    /// Invalid BIP32 path
    #[error("Invalid path: {0}")]
    Path(CursorError),

    /// Invalid hex input
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}
