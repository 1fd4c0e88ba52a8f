//! Identification items: data source, aircraft address and callsign, track number

use crate::core::{ByteReader, ByteWriter, DataItem};
use crate::error::{CodecError, Result};

/// I048/010 Data Source Identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataSourceIdentifier {
    /// System Area Code
    pub sac: u8,
    /// System Identification Code
    pub sic: u8,
}

impl DataSourceIdentifier {
    pub fn new(sac: u8, sic: u8) -> Self {
        DataSourceIdentifier { sac, sic }
    }
}

impl DataItem for DataSourceIdentifier {
    const ID: &'static str = "I048/010";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let [sac, sic] = reader.read_array::<2>(Self::ID)?;
        Ok(DataSourceIdentifier { sac, sic })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_u8(self.sac);
        writer.put_u8(self.sic);
        Ok(())
    }
}

impl std::fmt::Display for DataSourceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SAC={} SIC={}", self.sac, self.sic)
    }
}

/// I048/220 Aircraft Address, the 24-bit ICAO Mode-S address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AircraftAddress(u32);

impl AircraftAddress {
    /// Largest 24-bit address
    pub const MAX: u32 = 0x00FF_FFFF;

    /// Create an address, validating it fits in 24 bits
    pub fn new(address: u32) -> Result<Self> {
        if address > Self::MAX {
            return Err(CodecError::invalid_value(format!(
                "aircraft address {address:#X} exceeds 24 bits"
            )));
        }
        Ok(AircraftAddress(address))
    }

    /// Get the raw 24-bit address
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl DataItem for AircraftAddress {
    const ID: &'static str = "I048/220";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(AircraftAddress(reader.read_u24(Self::ID)?))
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        if self.0 > Self::MAX {
            return Err(CodecError::invalid_value(format!(
                "{}: address {:#X} exceeds 24 bits",
                Self::ID,
                self.0
            )));
        }
        writer.put_u24(self.0);
        Ok(())
    }
}

impl std::fmt::Display for AircraftAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

/// ICAO 6-bit character set used by aircraft identification
const CALLSIGN_CHARSET: &[u8; 64] =
    b"#ABCDEFGHIJKLMNOPQRSTUVWXYZ##### ###############0123456789######";

/// I048/240 Aircraft Identification: eight 6-bit characters in six octets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AircraftIdentification(pub [u8; 6]);

impl AircraftIdentification {
    /// Number of characters carried
    pub const CHARS: usize = 8;

    /// Pack a callsign of up to eight characters (A-Z, 0-9, space)
    ///
    /// Shorter callsigns are padded with spaces.
    pub fn from_callsign(callsign: &str) -> Result<Self> {
        if callsign.len() > Self::CHARS {
            return Err(CodecError::invalid_value(format!(
                "callsign {callsign:?} longer than {} characters",
                Self::CHARS
            )));
        }
        let mut bits = 0u64;
        for ch in callsign.bytes().chain(std::iter::repeat(b' ')).take(Self::CHARS) {
            let code = match ch {
                b'A'..=b'Z' => ch - b'A' + 1,
                b'0'..=b'9' => ch - b'0' + 48,
                b' ' => 32,
                _ => {
                    return Err(CodecError::invalid_value(format!(
                        "callsign {callsign:?} has unsupported character {:?}",
                        ch as char
                    )))
                }
            };
            bits = (bits << 6) | code as u64;
        }
        let mut octets = [0u8; 6];
        octets.copy_from_slice(&bits.to_be_bytes()[2..]);
        Ok(AircraftIdentification(octets))
    }

    /// Decode the callsign, trimming trailing spaces
    pub fn callsign(&self) -> String {
        let mut buf = [0u8; 8];
        buf[2..].copy_from_slice(&self.0);
        let bits = u64::from_be_bytes(buf);

        let mut callsign = String::with_capacity(Self::CHARS);
        for i in 0..Self::CHARS {
            let idx = ((bits >> (42 - i * 6)) & 0x3F) as usize;
            callsign.push(CALLSIGN_CHARSET[idx] as char);
        }
        callsign.trim_end().to_string()
    }
}

impl DataItem for AircraftIdentification {
    const ID: &'static str = "I048/240";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(AircraftIdentification(reader.read_array::<6>(Self::ID)?))
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_slice(&self.0);
        Ok(())
    }
}

/// I048/161 Track Number, 12 bits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackNumber(u16);

impl TrackNumber {
    /// Largest track number
    pub const MAX: u16 = 0x0FFF;

    /// Create a track number, validating it's within [0, 4095]
    pub fn new(number: u16) -> Result<Self> {
        if number > Self::MAX {
            return Err(CodecError::invalid_value(format!(
                "track number {number} out of range [0, {}]",
                Self::MAX
            )));
        }
        Ok(TrackNumber(number))
    }

    /// The 12-bit track number
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl DataItem for TrackNumber {
    const ID: &'static str = "I048/161";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(TrackNumber(reader.read_u16(Self::ID)? & Self::MAX))
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        super::check_width(self.0 as u32, 12, Self::ID)?;
        writer.put_u16(self.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: DataItem>(item: &T) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        item.encode(&mut writer).unwrap();
        writer.into_inner()
    }

    #[test]
    fn test_data_source_identifier() -> Result<()> {
        let mut reader = ByteReader::new(&[0x00, 0x01]);
        let dsi = DataSourceIdentifier::decode(&mut reader)?;
        assert_eq!(dsi, DataSourceIdentifier::new(0, 1));
        assert_eq!(encode(&dsi), vec![0x00, 0x01]);
        assert_eq!(dsi.to_string(), "SAC=0 SIC=1");
        Ok(())
    }

    #[test]
    fn test_aircraft_address() -> Result<()> {
        let mut reader = ByteReader::new(&[0x3C, 0x65, 0xAC]);
        let address = AircraftAddress::decode(&mut reader)?;
        assert_eq!(address.value(), 0x3C65AC);
        assert_eq!(address.to_string(), "3C65AC");
        assert_eq!(encode(&address), vec![0x3C, 0x65, 0xAC]);
        assert!(AircraftAddress::new(0x0100_0000).is_err());
        Ok(())
    }

    #[test]
    fn test_callsign_round_trip() -> Result<()> {
        let id = AircraftIdentification::from_callsign("KLM1023")?;
        assert_eq!(id.callsign(), "KLM1023");

        let mut reader = ByteReader::new(&id.0);
        assert_eq!(AircraftIdentification::decode(&mut reader)?, id);
        Ok(())
    }

    #[test]
    fn test_callsign_known_octets() -> Result<()> {
        // "ABC     ": 1, 2, 3, then five spaces (32)
        let id = AircraftIdentification::from_callsign("ABC")?;
        assert_eq!(id.0, [0x04, 0x20, 0xE0, 0x82, 0x08, 0x20]);
        Ok(())
    }

    #[test]
    fn test_callsign_rejects() {
        assert!(AircraftIdentification::from_callsign("TOOLONG12").is_err());
        assert!(AircraftIdentification::from_callsign("ab").is_err());
    }

    #[test]
    fn test_track_number() -> Result<()> {
        let mut reader = ByteReader::new(&[0xF1, 0x23]);
        // spare bits are ignored
        assert_eq!(TrackNumber::decode(&mut reader)?.value(), 0x123);
        assert_eq!(encode(&TrackNumber::new(4095)?), vec![0x0F, 0xFF]);
        assert!(TrackNumber::new(4096).is_err());
        Ok(())
    }
}
