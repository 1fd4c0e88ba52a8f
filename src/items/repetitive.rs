//! I048/250 Mode S MB data, a count-prefixed list of BDS registers

use crate::core::{ByteReader, ByteWriter, DataItem};
use crate::error::{CodecError, Result};

/// One Comm-B register reply with its BDS address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BdsRegister {
    /// 56-bit MB message
    pub data: [u8; 7],
    /// BDS register address, first part
    pub bds1: u8,
    /// BDS register address, second part
    pub bds2: u8,
}

impl BdsRegister {
    /// Octets per record on the wire
    pub const SIZE: usize = 9;
}

/// I048/250 Mode S MB Data
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeSMbData {
    pub registers: Vec<BdsRegister>,
}

impl DataItem for ModeSMbData {
    const ID: &'static str = "I048/250";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let count = reader.read_u8(Self::ID)? as usize;
        // Fail before allocating for a count the input can't back.
        if count * BdsRegister::SIZE > reader.remaining() {
            return Err(CodecError::truncated(
                Self::ID,
                count * BdsRegister::SIZE,
                reader.remaining(),
            ));
        }
        let mut registers = Vec::with_capacity(count);
        for _ in 0..count {
            registers.push(BdsRegister {
                data: reader.read_array::<7>(Self::ID)?,
                bds1: reader.read_u8(Self::ID)?,
                bds2: reader.read_u8(Self::ID)?,
            });
        }
        Ok(ModeSMbData { registers })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        let count = u8::try_from(self.registers.len()).map_err(|_| {
            CodecError::invalid_value(format!(
                "{}: {} registers exceed the 255 repetition limit",
                Self::ID,
                self.registers.len()
            ))
        })?;
        writer.put_u8(count);
        for register in &self.registers {
            writer.put_slice(&register.data);
            writer.put_u8(register.bds1);
            writer.put_u8(register.bds2);
        }
        Ok(())
    }
}
