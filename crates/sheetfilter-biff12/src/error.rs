use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Biff12Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid XLSB: unexpected end of record (need {needed} bytes at offset {offset}, record has {len})")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        len: usize,
    },
    #[error("invalid XLSB: record header truncated after id 0x{0:04X}")]
    TruncatedHeader(u32),
}
