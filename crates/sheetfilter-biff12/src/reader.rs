use std::io::{BufReader, Read, Write};

use crate::varint;
use crate::Biff12Error;

/// Streaming reader over the records of a BIFF12 part (e.g. `xl/worksheets/sheet1.bin`).
pub struct Biff12Reader<R: Read> {
    inner: BufReader<R>,
    position: u64,
}

/// One record borrowed from the reader's scratch buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Biff12Record<'a> {
    pub id: u32,
    pub data: &'a [u8],
    /// Byte offset of the record header within the part.
    pub offset: u64,
}

impl<R: Read> Biff12Reader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
            position: 0,
        }
    }

    /// Read the next record into `buf`. Returns `Ok(None)` at a clean end of stream.
    pub fn read_record<'a>(
        &mut self,
        buf: &'a mut Vec<u8>,
    ) -> Result<Option<Biff12Record<'a>>, Biff12Error> {
        let offset = self.position;
        let mut counting = CountingRead {
            inner: &mut self.inner,
            count: 0,
        };
        let Some(id) = varint::read_record_id(&mut counting)? else {
            return Ok(None);
        };
        let Some(len) = varint::read_record_len(&mut counting)? else {
            return Err(Biff12Error::TruncatedHeader(id));
        };
        let header_len = counting.count;

        let len = len as usize;
        buf.clear();
        buf.resize(len, 0);
        self.inner.read_exact(buf)?;
        self.position += header_len + len as u64;
        Ok(Some(Biff12Record {
            id,
            data: buf,
            offset,
        }))
    }
}

struct CountingRead<'r, R> {
    inner: &'r mut R,
    count: u64,
}

impl<R: Read> Read for CountingRead<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

/// Writes framed BIFF12 records. Used to build sheet streams in tests and tools.
pub struct Biff12Writer<W: Write> {
    inner: W,
}

impl<W: Write> Biff12Writer<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_record(&mut self, id: u32, payload: &[u8]) -> Result<(), Biff12Error> {
        varint::write_record_id(&mut self.inner, id)?;
        let len = u32::try_from(payload.len()).map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "BIFF12 record payload too large",
            )
        })?;
        varint::write_record_len(&mut self.inner, len)?;
        self.inner.write_all(payload)?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
