//! Compound items gated by a primary subfield
//!
//! Each bit of the primary octet flags one optional subfield. Subfields are
//! always laid out in primary-bit order, whatever combination is present.

use crate::core::{ByteReader, ByteWriter, DataItem};
use crate::error::{CodecError, Result};

use super::FX;

/// Read a primary subfield octet, rejecting a set FX bit
///
/// Both compound items in this category have a single-octet primary.
fn read_primary(reader: &mut ByteReader<'_>, item: &'static str) -> Result<u8> {
    let primary = reader.read_u8(item)?;
    if primary & FX != 0 {
        return Err(CodecError::invalid_value(format!(
            "{item}: primary subfield {primary:#04X} has FX set"
        )));
    }
    Ok(primary)
}

/// I048/130 Radar Plot Characteristics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadarPlotCharacteristics {
    /// SSR plot runlength
    pub srl: Option<u8>,
    /// Number of received replies for (M)SSR
    pub srr: Option<u8>,
    /// Amplitude of (M)SSR reply, dBm
    pub sam: Option<i8>,
    /// Primary plot runlength
    pub prl: Option<u8>,
    /// Amplitude of primary plot, dBm
    pub pam: Option<i8>,
    /// Range difference PSR - SSR
    pub rpd: Option<i16>,
    /// Azimuth difference PSR - SSR
    pub apd: Option<i16>,
}

impl RadarPlotCharacteristics {
    const SRL: u8 = 0x80;
    const SRR: u8 = 0x40;
    const SAM: u8 = 0x20;
    const PRL: u8 = 0x10;
    const PAM: u8 = 0x08;
    const RPD: u8 = 0x04;
    const APD: u8 = 0x02;

    /// Primary subfield implied by the present subfields
    pub fn primary(&self) -> u8 {
        [
            (self.srl.is_some(), Self::SRL),
            (self.srr.is_some(), Self::SRR),
            (self.sam.is_some(), Self::SAM),
            (self.prl.is_some(), Self::PRL),
            (self.pam.is_some(), Self::PAM),
            (self.rpd.is_some(), Self::RPD),
            (self.apd.is_some(), Self::APD),
        ]
        .iter()
        .filter(|(present, _)| *present)
        .fold(0, |acc, (_, bit)| acc | bit)
    }
}

impl DataItem for RadarPlotCharacteristics {
    const ID: &'static str = "I048/130";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let primary = read_primary(reader, Self::ID)?;
        let mut item = RadarPlotCharacteristics::default();
        if primary & Self::SRL != 0 {
            item.srl = Some(reader.read_u8(Self::ID)?);
        }
        if primary & Self::SRR != 0 {
            item.srr = Some(reader.read_u8(Self::ID)?);
        }
        if primary & Self::SAM != 0 {
            item.sam = Some(reader.read_i8(Self::ID)?);
        }
        if primary & Self::PRL != 0 {
            item.prl = Some(reader.read_u8(Self::ID)?);
        }
        if primary & Self::PAM != 0 {
            item.pam = Some(reader.read_i8(Self::ID)?);
        }
        if primary & Self::RPD != 0 {
            item.rpd = Some(reader.read_i16(Self::ID)?);
        }
        if primary & Self::APD != 0 {
            item.apd = Some(reader.read_i16(Self::ID)?);
        }
        Ok(item)
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_u8(self.primary());
        if let Some(srl) = self.srl {
            writer.put_u8(srl);
        }
        if let Some(srr) = self.srr {
            writer.put_u8(srr);
        }
        if let Some(sam) = self.sam {
            writer.put_i8(sam);
        }
        if let Some(prl) = self.prl {
            writer.put_u8(prl);
        }
        if let Some(pam) = self.pam {
            writer.put_i8(pam);
        }
        if let Some(rpd) = self.rpd {
            writer.put_i16(rpd);
        }
        if let Some(apd) = self.apd {
            writer.put_i16(apd);
        }
        Ok(())
    }
}

/// Calculated Doppler speed subfield of I048/120
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculatedDopplerSpeed {
    /// Doppler speed is doubtful
    pub doubtful: bool,
    /// Speed in m/s
    pub speed: i16,
}

/// Raw Doppler speed subfield of I048/120
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawDopplerSpeed {
    pub repetition: u8,
    /// Doppler speed, m/s
    pub doppler_speed: u16,
    /// Ambiguity range, m/s
    pub ambiguity_range: u16,
    /// Transmitter frequency, MHz
    pub transmitter_frequency: u16,
}

/// I048/120 Radial Doppler Speed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadialDopplerSpeed {
    pub calculated: Option<CalculatedDopplerSpeed>,
    pub raw: Option<RawDopplerSpeed>,
}

impl RadialDopplerSpeed {
    const CAL: u8 = 0x80;
    const RDS: u8 = 0x40;
    const DOUBTFUL: u8 = 0x80;

    /// Primary subfield implied by the present subfields
    pub fn primary(&self) -> u8 {
        let mut primary = 0;
        if self.calculated.is_some() {
            primary |= Self::CAL;
        }
        if self.raw.is_some() {
            primary |= Self::RDS;
        }
        primary
    }
}

impl DataItem for RadialDopplerSpeed {
    const ID: &'static str = "I048/120";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let primary = read_primary(reader, Self::ID)?;
        let mut item = RadialDopplerSpeed::default();
        if primary & Self::CAL != 0 {
            let flags = reader.read_u8(Self::ID)?;
            item.calculated = Some(CalculatedDopplerSpeed {
                doubtful: flags & Self::DOUBTFUL != 0,
                speed: reader.read_i16(Self::ID)?,
            });
        }
        if primary & Self::RDS != 0 {
            item.raw = Some(RawDopplerSpeed {
                repetition: reader.read_u8(Self::ID)?,
                doppler_speed: reader.read_u16(Self::ID)?,
                ambiguity_range: reader.read_u16(Self::ID)?,
                transmitter_frequency: reader.read_u16(Self::ID)?,
            });
        }
        Ok(item)
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_u8(self.primary());
        if let Some(cal) = self.calculated {
            writer.put_u8(if cal.doubtful { Self::DOUBTFUL } else { 0 });
            writer.put_i16(cal.speed);
        }
        if let Some(raw) = self.raw {
            writer.put_u8(raw.repetition);
            writer.put_u16(raw.doppler_speed);
            writer.put_u16(raw.ambiguity_range);
            writer.put_u16(raw.transmitter_frequency);
        }
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
    fn test_plot_characteristics_partial() -> Result<()> {
        // SRL, SAM and APD present
        let bytes = [0xA2, 0x05, 0xF6, 0xFF, 0xFE];
        let mut reader = ByteReader::new(&bytes);
        let plot = RadarPlotCharacteristics::decode(&mut reader)?;
        assert!(reader.is_empty());
        assert_eq!(plot.srl, Some(5));
        assert_eq!(plot.srr, None);
        assert_eq!(plot.sam, Some(-10));
        assert_eq!(plot.apd, Some(-2));
        assert_eq!(plot.primary(), 0xA2);
        assert_eq!(encode(&plot), bytes.to_vec());
        Ok(())
    }

    #[test]
    fn test_plot_characteristics_zero_values_kept() -> Result<()> {
        let plot = RadarPlotCharacteristics {
            srr: Some(0),
            rpd: Some(0),
            ..Default::default()
        };
        let bytes = encode(&plot);
        assert_eq!(bytes, vec![0x44, 0x00, 0x00, 0x00]);
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(RadarPlotCharacteristics::decode(&mut reader)?, plot);
        Ok(())
    }

    #[test]
    fn test_plot_characteristics_rejects_fx() {
        let mut reader = ByteReader::new(&[0x81, 0x05, 0x00]);
        assert!(matches!(
            RadarPlotCharacteristics::decode(&mut reader),
            Err(CodecError::InvalidFieldValue(_))
        ));
    }

    #[test]
    fn test_plot_characteristics_truncated() {
        let mut reader = ByteReader::new(&[0x06, 0x00, 0x01, 0x00]);
        assert_eq!(
            RadarPlotCharacteristics::decode(&mut reader),
            Err(CodecError::truncated("I048/130", 2, 1))
        );
    }

    #[test]
    fn test_doppler_both_subfields() -> Result<()> {
        let bytes = [
            0xC0, // CAL, RDS
            0x80, 0xFF, 0x9C, // doubtful, -100 m/s
            0x01, 0x00, 0x64, 0x01, 0xF4, 0x0B, 0xB8,
        ];
        let mut reader = ByteReader::new(&bytes);
        let doppler = RadialDopplerSpeed::decode(&mut reader)?;
        assert!(reader.is_empty());
        assert_eq!(
            doppler.calculated,
            Some(CalculatedDopplerSpeed {
                doubtful: true,
                speed: -100
            })
        );
        assert_eq!(
            doppler.raw,
            Some(RawDopplerSpeed {
                repetition: 1,
                doppler_speed: 100,
                ambiguity_range: 500,
                transmitter_frequency: 3000,
            })
        );
        assert_eq!(encode(&doppler), bytes.to_vec());
        Ok(())
    }

    #[test]
    fn test_doppler_raw_only() -> Result<()> {
        let doppler = RadialDopplerSpeed {
            calculated: None,
            raw: Some(RawDopplerSpeed::default()),
        };
        let bytes = encode(&doppler);
        assert_eq!(bytes.len(), 8);
        assert_eq!(bytes[0], 0x40);
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(RadialDopplerSpeed::decode(&mut reader)?, doppler);
        Ok(())
    }

    #[test]
    fn test_doppler_ignores_spare_primary_bits() -> Result<()> {
        let mut reader = ByteReader::new(&[0x3E]);
        assert_eq!(
            RadialDopplerSpeed::decode(&mut reader)?,
            RadialDopplerSpeed::default()
        );
        Ok(())
    }
}
