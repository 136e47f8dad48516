use std::io::{self, Read, Write};

const MAX_RECORD_ID_BYTES: usize = 4;
const MAX_RECORD_LEN_BYTES: usize = 4;
const MAX_VARINT_VALUE: u32 = 0x0FFF_FFFF;

fn unexpected_eof(context: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, context)
}

/// Read a 7-bit little-endian varint of at most 4 bytes.
///
/// Returns `Ok(None)` when `r` is at EOF before reading any bytes.
fn read_varint(
    r: &mut impl Read,
    max_bytes: usize,
    eof_context: &'static str,
    overlong_context: &'static str,
) -> io::Result<Option<u32>> {
    let mut v: u32 = 0;
    for i in 0..max_bytes {
        let mut buf = [0u8; 1];
        match r.read(&mut buf)? {
            0 if i == 0 => return Ok(None),
            0 => return Err(unexpected_eof(eof_context)),
            _ => {}
        }

        let byte = buf[0];
        v |= ((byte & 0x7F) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(Some(v));
        }
    }

    Err(io::Error::new(io::ErrorKind::InvalidData, overlong_context))
}

fn write_varint(w: &mut impl Write, mut value: u32, too_large: &'static str) -> io::Result<()> {
    if value > MAX_VARINT_VALUE {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, too_large));
    }

    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        w.write_all(&[byte])?;
        if value == 0 {
            return Ok(());
        }
    }
}

/// Read a BIFF12 record id from `r`.
///
/// Record ids use the same 7-bit continuation scheme as record lengths, so
/// `BrtBeginAFilter` (`0x00A1`) is stored as the bytes `A1 01`.
pub fn read_record_id(r: &mut impl Read) -> io::Result<Option<u32>> {
    read_varint(
        r,
        MAX_RECORD_ID_BYTES,
        "unexpected EOF while reading BIFF12 record id",
        "invalid BIFF12 record id (more than 4 bytes)",
    )
}

pub fn write_record_id(w: &mut impl Write, id: u32) -> io::Result<()> {
    write_varint(w, id, "BIFF12 record id exceeds 28-bit varint encoding")
}

/// Read a BIFF12 record payload length from `r`.
///
/// Returns `Ok(None)` when `r` is at EOF before reading any bytes.
pub fn read_record_len(r: &mut impl Read) -> io::Result<Option<u32>> {
    read_varint(
        r,
        MAX_RECORD_LEN_BYTES,
        "unexpected EOF while reading BIFF12 record length",
        "invalid BIFF12 record length (more than 4 bytes)",
    )
}

pub fn write_record_len(w: &mut impl Write, len: u32) -> io::Result<()> {
    write_varint(w, len, "BIFF12 record length exceeds 28-bit varint encoding")
}
