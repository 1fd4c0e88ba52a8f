//! Core buffer types shared by every Category 048 item codec

use byteorder::{BigEndian, ByteOrder};

use crate::error::{CodecError, Result};

/// Default cap on the number of extension octets accepted for one item
pub const DEFAULT_MAX_EXTENSION_OCTETS: usize = 8;

/// Bounds-checked big-endian reader over an immutable input buffer
///
/// Every read checks the remaining length first and fails with
/// [`CodecError::TruncatedInput`] instead of reading past the end.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
    max_extension_octets: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `buf`
    pub fn new(buf: &'a [u8]) -> Self {
        ByteReader {
            buf,
            pos: 0,
            max_extension_octets: DEFAULT_MAX_EXTENSION_OCTETS,
        }
    }

    /// Override the extension octet cap
    pub fn with_max_extension_octets(mut self, limit: usize) -> Self {
        self.max_extension_octets = limit;
        self
    }

    /// Cap on extension octets for a single item
    pub fn max_extension_octets(&self) -> usize {
        self.max_extension_octets
    }

    /// Number of octets consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of octets left to read
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Whether the whole buffer has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume `n` octets, labelling a failure with `context`
    pub fn take(&mut self, n: usize, context: &'static str) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::truncated(context, n, self.remaining()));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Consume exactly `N` octets into an array
    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, context)?);
        Ok(out)
    }

    /// Read one octet
    pub fn read_u8(&mut self, context: &'static str) -> Result<u8> {
        Ok(self.take(1, context)?[0])
    }

    /// Read one octet as two's complement
    pub fn read_i8(&mut self, context: &'static str) -> Result<i8> {
        Ok(self.read_u8(context)? as i8)
    }

    /// Read a big-endian u16
    pub fn read_u16(&mut self, context: &'static str) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2, context)?))
    }

    /// Read a big-endian i16
    pub fn read_i16(&mut self, context: &'static str) -> Result<i16> {
        Ok(BigEndian::read_i16(self.take(2, context)?))
    }

    /// Read a big-endian 24-bit unsigned value
    pub fn read_u24(&mut self, context: &'static str) -> Result<u32> {
        Ok(BigEndian::read_u24(self.take(3, context)?))
    }

    /// Read a big-endian u32
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32> {
        Ok(BigEndian::read_u32(self.take(4, context)?))
    }
}

/// Big-endian writer accumulating an owned output buffer
///
/// Carries the same extension octet cap as [`ByteReader`], so an item that
/// encodes successfully also decodes under the same limit.
#[derive(Debug, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
    max_extension_octets: usize,
}

impl ByteWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a writer with preallocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
            max_extension_octets: DEFAULT_MAX_EXTENSION_OCTETS,
        }
    }

    /// Override the extension octet cap
    pub fn with_max_extension_octets(mut self, limit: usize) -> Self {
        self.max_extension_octets = limit;
        self
    }

    /// Cap on extension octets for a single item
    pub fn max_extension_octets(&self) -> usize {
        self.max_extension_octets
    }

    /// Number of octets written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append one octet
    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Append one two's-complement octet
    pub fn put_i8(&mut self, value: i8) {
        self.buf.push(value as u8);
    }

    /// Append a big-endian u16
    pub fn put_u16(&mut self, value: u16) {
        let mut tmp = [0u8; 2];
        BigEndian::write_u16(&mut tmp, value);
        self.buf.extend_from_slice(&tmp);
    }

    /// Append a big-endian i16
    pub fn put_i16(&mut self, value: i16) {
        let mut tmp = [0u8; 2];
        BigEndian::write_i16(&mut tmp, value);
        self.buf.extend_from_slice(&tmp);
    }

    /// Write the low 24 bits of `value`
    pub fn put_u24(&mut self, value: u32) {
        let mut tmp = [0u8; 3];
        BigEndian::write_u24(&mut tmp, value & 0x00FF_FFFF);
        self.buf.extend_from_slice(&tmp);
    }

    /// Append a big-endian u32
    pub fn put_u32(&mut self, value: u32) {
        let mut tmp = [0u8; 4];
        BigEndian::write_u32(&mut tmp, value);
        self.buf.extend_from_slice(&tmp);
    }

    /// Append raw octets
    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Overwrite two octets at `offset` with `value`, big-endian
    ///
    /// The range must already have been written.
    pub fn patch_u16(&mut self, offset: usize, value: u16) {
        BigEndian::write_u16(&mut self.buf[offset..offset + 2], value);
    }

    /// Consume the writer and return the written octets
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Octets written so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// A catalog item that knows its own wire layout
pub trait DataItem: Sized {
    /// Item identifier, e.g. `I048/010`
    const ID: &'static str;

    /// Decode the item from the reader's current position
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self>;

    /// Append the item's octets to the writer
    fn encode(&self, writer: &mut ByteWriter) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_big_endian() -> Result<()> {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u16("a")?, 0x0102);
        assert_eq!(reader.read_u24("b")?, 0x030405);
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.read_u8("c")?, 0x06);
        assert!(reader.is_empty());
        Ok(())
    }

    #[test]
    fn test_reader_truncation_does_not_advance() {
        let data = [0xAA];
        let mut reader = ByteReader::new(&data);
        let err = reader.read_u16("I048/161").unwrap_err();
        assert_eq!(err, CodecError::truncated("I048/161", 2, 1));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_reader_signed() -> Result<()> {
        let data = [0xFF, 0xFE, 0x80];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_i16("x")?, -2);
        assert_eq!(reader.read_i8("y")?, -128);
        Ok(())
    }

    #[test]
    fn test_writer_and_patch() {
        let mut writer = ByteWriter::new();
        writer.put_u8(48);
        writer.put_u16(0);
        writer.put_u24(0x12_3456);
        writer.put_i16(-1);
        writer.patch_u16(1, writer.len() as u16);
        assert_eq!(
            writer.into_inner(),
            vec![0x30, 0x00, 0x08, 0x12, 0x34, 0x56, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_writer_extension_cap_matches_reader() {
        assert_eq!(
            ByteWriter::default().max_extension_octets(),
            ByteReader::new(&[]).max_extension_octets()
        );
        let writer = ByteWriter::with_capacity(4).with_max_extension_octets(2);
        assert_eq!(writer.max_extension_octets(), 2);
        assert!(writer.is_empty());
    }
}
