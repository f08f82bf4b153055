//! Length-prefixed wire format reader.
//!
//! Public key blobs are a sequence of fields, each prefixed by a 4-byte
//! big-endian length: the algorithm tag string first, then algorithm-specific
//! integer/byte-string parameters.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WireError {
    /// A length prefix or field body ran past the end of the buffer.
    #[error("truncated wire field at offset {0}")]
    Truncated(usize),

    /// A string field was not valid UTF-8.
    #[error("wire string field is not valid UTF-8")]
    NotUtf8,
}

/// Cursor over a wire blob.  Borrows the buffer; fields are returned as
/// sub-slices.
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Read one length-prefixed field.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], WireError> {
        let start = self.pos;
        let len_bytes = self
            .buf
            .get(self.pos..self.pos + 4)
            .ok_or(WireError::Truncated(start))?;
        let len =
            u32::from_be_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]) as usize;
        self.pos += 4;
        let field = self
            .buf
            .get(self.pos..self.pos + len)
            .ok_or(WireError::Truncated(start))?;
        self.pos += len;
        Ok(field)
    }

    /// Read one length-prefixed field as a UTF-8 string.
    pub fn read_str(&mut self) -> Result<&'a str, WireError> {
        std::str::from_utf8(self.read_bytes()?).map_err(|_| WireError::NotUtf8)
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

/// Encode one length-prefixed field (test fixtures and fingerprint inputs).
pub fn put_field(out: &mut Vec<u8>, field: &[u8]) {
    out.extend_from_slice(&(field.len() as u32).to_be_bytes());
    out.extend_from_slice(field);
}
