use crate::Biff12Error;

/// Forward-only cursor over one record payload.
///
/// Every read is bounds-checked; running past the payload yields
/// [`Biff12Error::UnexpectedEof`] and leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct SequenceInputStream<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> SequenceInputStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], Biff12Error> {
        let raw = self
            .offset
            .checked_add(n)
            .and_then(|end| self.data.get(self.offset..end))
            .ok_or(Biff12Error::UnexpectedEof {
                offset: self.offset,
                needed: n,
                len: self.data.len(),
            })?;
        self.offset += n;
        Ok(raw)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], Biff12Error> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), Biff12Error> {
        self.take(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, Biff12Error> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, Biff12Error> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, Biff12Error> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, Biff12Error> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, Biff12Error> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    /// BIFF RK-encoded number.
    pub fn read_rk_number(&mut self) -> Result<f64, Biff12Error> {
        Ok(decode_rk_number(self.read_u32()?))
    }

    /// `XLWideString`: a `u32` character count followed by UTF-16LE code units.
    ///
    /// The null-string marker (`0xFFFFFFFF`) reads as an empty string.
    pub fn read_xl_wide_string(&mut self) -> Result<String, Biff12Error> {
        let len_chars = self.read_u32()?;
        if len_chars == u32::MAX {
            return Ok(String::new());
        }
        let byte_len = (len_chars as usize)
            .checked_mul(2)
            .ok_or(Biff12Error::UnexpectedEof {
                offset: self.offset,
                needed: usize::MAX,
                len: self.data.len(),
            })?;
        let raw = self.take(byte_len)?;
        let units: Vec<u16> = raw
            .chunks_exact(2)
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .collect();
        Ok(String::from_utf16_lossy(&units))
    }
}

/// Decode a BIFF RK number (30-bit integer or truncated IEEE754 double, optionally /100).
pub fn decode_rk_number(rk: u32) -> f64 {
    let mut value = if rk & 0x02 != 0 {
        ((rk as i32) >> 2) as f64
    } else {
        f64::from_bits(((rk & 0xFFFF_FFFC) as u64) << 32)
    };
    if rk & 0x01 != 0 {
        value /= 100.0;
    }
    value
}
