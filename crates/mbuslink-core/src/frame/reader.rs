use super::error::FormatError;
use super::layout;

pub struct FrameReader<'a> {
    frame: &'a [u8],
}

impl<'a> FrameReader<'a> {
    /// Restrict `buffer` to its first `length` bytes.
    pub fn new(buffer: &'a [u8], length: usize) -> Result<Self, FormatError> {
        let frame = buffer.get(..length).ok_or(FormatError::TooShort {
            needed: length,
            actual: buffer.len(),
        })?;
        Ok(Self { frame })
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.frame
    }

    pub fn require_len(&self, needed: usize) -> Result<(), FormatError> {
        if self.frame.len() < needed {
            return Err(FormatError::TooShort {
                needed,
                actual: self.frame.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FormatError> {
        self.frame
            .get(offset)
            .copied()
            .ok_or(FormatError::TooShort {
                needed: offset + 1,
                actual: self.frame.len(),
            })
    }

    pub fn start_byte(&self) -> Result<u8, FormatError> {
        self.read_u8(layout::START_BYTE_OFFSET)
    }

    /// Bytes following the fixed long-frame header.
    pub fn body(&self) -> Result<&'a [u8], FormatError> {
        self.require_len(layout::LONG_FRAME_HEADER_LEN)?;
        Ok(&self.frame[layout::LONG_FRAME_HEADER_LEN..])
    }
}
