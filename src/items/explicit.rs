//! Length-prefixed opaque fields: Special Purpose and Reserved Expansion
//!
//! The two fields count their length octet differently. SP's length
//! includes the length octet itself, RE's covers the payload only.

use crate::core::{ByteReader, ByteWriter, DataItem};
use crate::error::{CodecError, Result};

/// Special Purpose field (FRN 27)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialPurposeField(pub Vec<u8>);

impl SpecialPurposeField {
    /// Largest payload whose length still fits the length octet
    pub const MAX_PAYLOAD: usize = u8::MAX as usize - 1;
}

impl DataItem for SpecialPurposeField {
    const ID: &'static str = "SP";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let len = reader.read_u8(Self::ID)? as usize;
        if len == 0 {
            return Err(CodecError::invalid_value(
                "SP: length octet is zero but must count itself",
            ));
        }
        Ok(SpecialPurposeField(reader.take(len - 1, Self::ID)?.to_vec()))
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        if self.0.len() > Self::MAX_PAYLOAD {
            return Err(CodecError::invalid_value(format!(
                "SP: {} payload octets exceed {}",
                self.0.len(),
                Self::MAX_PAYLOAD
            )));
        }
        writer.put_u8(self.0.len() as u8 + 1);
        writer.put_slice(&self.0);
        Ok(())
    }
}

/// Reserved Expansion field (FRN 28)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReservedExpansionField(pub Vec<u8>);

impl ReservedExpansionField {
    pub const MAX_PAYLOAD: usize = u8::MAX as usize;
}

impl DataItem for ReservedExpansionField {
    const ID: &'static str = "RE";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let len = reader.read_u8(Self::ID)? as usize;
        Ok(ReservedExpansionField(reader.take(len, Self::ID)?.to_vec()))
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        if self.0.len() > Self::MAX_PAYLOAD {
            return Err(CodecError::invalid_value(format!(
                "RE: {} payload octets exceed {}",
                self.0.len(),
                Self::MAX_PAYLOAD
            )));
        }
        writer.put_u8(self.0.len() as u8);
        writer.put_slice(&self.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_purpose_counts_itself() -> Result<()> {
        let bytes = [0x03, 0xAA, 0xBB];
        let mut reader = ByteReader::new(&bytes);
        let sp = SpecialPurposeField::decode(&mut reader)?;
        assert_eq!(sp.0, vec![0xAA, 0xBB]);

        let mut writer = ByteWriter::new();
        sp.encode(&mut writer)?;
        assert_eq!(writer.into_inner(), bytes.to_vec());
        Ok(())
    }

    #[test]
    fn test_special_purpose_zero_length() {
        let mut reader = ByteReader::new(&[0x00]);
        assert!(matches!(
            SpecialPurposeField::decode(&mut reader),
            Err(CodecError::InvalidFieldValue(_))
        ));
    }

    #[test]
    fn test_special_purpose_too_long() {
        let sp = SpecialPurposeField(vec![0; 255]);
        let mut writer = ByteWriter::new();
        assert!(sp.encode(&mut writer).is_err());
        assert!(writer.is_empty());
    }

    #[test]
    fn test_reserved_expansion_payload_only() -> Result<()> {
        let bytes = [0x02, 0x01, 0x02];
        let mut reader = ByteReader::new(&bytes);
        let re = ReservedExpansionField::decode(&mut reader)?;
        assert_eq!(re.0, vec![0x01, 0x02]);

        let mut writer = ByteWriter::new();
        re.encode(&mut writer)?;
        assert_eq!(writer.into_inner(), bytes.to_vec());

        let mut reader = ByteReader::new(&[0x00]);
        assert!(ReservedExpansionField::decode(&mut reader)?.0.is_empty());
        Ok(())
    }

    #[test]
    fn test_reserved_expansion_truncated() {
        let mut reader = ByteReader::new(&[0x04, 0x01]);
        assert_eq!(
            ReservedExpansionField::decode(&mut reader),
            Err(CodecError::truncated("RE", 4, 1))
        );
    }
}
