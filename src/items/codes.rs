//! Transponder codes, altitudes and Mode-S capability items

use bitfield::bitfield;

use crate::core::{ByteReader, ByteWriter, DataItem};
use crate::encoding::{decode_i14, descale, digits_to_octal, encode_i14, octal_to_digits};
use crate::error::Result;

use super::check_width;

bitfield! {
    /// V/G/L flags followed by a 12-bit octal-packed code (I048/070, I048/050)
    struct OctalCodeWord(u16);
    not_validated, set_not_validated: 15;
    garbled, set_garbled: 14;
    local, set_local: 13;
    u16, packed, set_packed: 11, 0;
}

bitfield! {
    /// Per-pulse quality bits in A4..D1 order (I048/080, I048/060)
    struct PulseQualityWord(u16);
    qa4, set_qa4: 11;
    qa2, set_qa2: 10;
    qa1, set_qa1: 9;
    qb4, set_qb4: 8;
    qb2, set_qb2: 7;
    qb1, set_qb1: 6;
    qc4, set_qc4: 5;
    qc2, set_qc2: 4;
    qc1, set_qc1: 3;
    qd4, set_qd4: 2;
    qd2, set_qd2: 1;
    qd1, set_qd1: 0;
}

bitfield! {
    /// I048/100 layout: flags, Gray-coded Mode-C reply, interleaved pulse quality
    struct ModeCWord(u32);
    not_validated, set_not_validated: 31;
    garbled, set_garbled: 30;
    u16, code, set_code: 27, 16;
    qc1, set_qc1: 11;
    qa1, set_qa1: 10;
    qc2, set_qc2: 9;
    qa2, set_qa2: 8;
    qc4, set_qc4: 7;
    qa4, set_qa4: 6;
    qb1, set_qb1: 5;
    qd1, set_qd1: 4;
    qb2, set_qb2: 3;
    qd2, set_qd2: 2;
    qb4, set_qb4: 1;
    qd4, set_qd4: 0;
}

bitfield! {
    /// I048/230 layout
    struct CapabilityWord(u16);
    u8, com, set_com: 15, 13;
    u8, stat, set_stat: 12, 10;
    si, set_si: 9;
    mssc, set_mssc: 7;
    arc, set_arc: 6;
    aic, set_aic: 5;
    b1a, set_b1a: 4;
    u8, b1b, set_b1b: 3, 0;
}

fn decode_octal_code(raw: u16) -> (bool, bool, bool, u16) {
    let word = OctalCodeWord(raw);
    (
        word.not_validated(),
        word.garbled(),
        word.local(),
        octal_to_digits(word.packed()),
    )
}

fn encode_octal_code(not_validated: bool, garbled: bool, local: bool, code: u16) -> Result<u16> {
    let mut word = OctalCodeWord(0);
    word.set_not_validated(not_validated);
    word.set_garbled(garbled);
    word.set_local(local);
    word.set_packed(digits_to_octal(code)?);
    Ok(word.0)
}

/// I048/070 Mode-3/A Code
///
/// `code` holds the four octal digits written as a decimal number, so
/// squawk 7700 is stored as `7700`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mode3ACode {
    /// V: code not validated
    pub not_validated: bool,
    /// G: garbled code
    pub garbled: bool,
    /// L: code not extracted during the last scan
    pub local: bool,
    pub code: u16,
}

impl Mode3ACode {
    /// A validated, ungarbled code
    pub fn new(code: u16) -> Self {
        Mode3ACode {
            code,
            ..Default::default()
        }
    }
}

impl DataItem for Mode3ACode {
    const ID: &'static str = "I048/070";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let (not_validated, garbled, local, code) = decode_octal_code(reader.read_u16(Self::ID)?);
        Ok(Mode3ACode {
            not_validated,
            garbled,
            local,
            code,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_u16(encode_octal_code(
            self.not_validated,
            self.garbled,
            self.local,
            self.code,
        )?);
        Ok(())
    }
}

impl std::fmt::Display for Mode3ACode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.code)
    }
}

/// I048/050 Mode-2 Code, carried like Mode-3/A
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mode2Code {
    pub not_validated: bool,
    pub garbled: bool,
    pub local: bool,
    pub code: u16,
}

impl DataItem for Mode2Code {
    const ID: &'static str = "I048/050";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let (not_validated, garbled, local, code) = decode_octal_code(reader.read_u16(Self::ID)?);
        Ok(Mode2Code {
            not_validated,
            garbled,
            local,
            code,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_u16(encode_octal_code(
            self.not_validated,
            self.garbled,
            self.local,
            self.code,
        )?);
        Ok(())
    }
}

/// I048/055 Mode-1 Code, five bits in A4 A2 A1 B2 B1 order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mode1Code {
    pub not_validated: bool,
    pub garbled: bool,
    pub local: bool,
    pub code: u8,
}

impl DataItem for Mode1Code {
    const ID: &'static str = "I048/055";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let octet = reader.read_u8(Self::ID)?;
        Ok(Mode1Code {
            not_validated: octet & 0x80 != 0,
            garbled: octet & 0x40 != 0,
            local: octet & 0x20 != 0,
            code: octet & 0x1F,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        check_width(self.code as u32, 5, Self::ID)?;
        let mut octet = self.code;
        if self.not_validated {
            octet |= 0x80;
        }
        if self.garbled {
            octet |= 0x40;
        }
        if self.local {
            octet |= 0x20;
        }
        writer.put_u8(octet);
        Ok(())
    }
}

/// Per-pulse confidence of a 12-bit code; `true` marks a low-quality pulse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeConfidence {
    pub qa4: bool,
    pub qa2: bool,
    pub qa1: bool,
    pub qb4: bool,
    pub qb2: bool,
    pub qb1: bool,
    pub qc4: bool,
    pub qc2: bool,
    pub qc1: bool,
    pub qd4: bool,
    pub qd2: bool,
    pub qd1: bool,
}

impl CodeConfidence {
    fn from_word(raw: u16) -> Self {
        let w = PulseQualityWord(raw);
        CodeConfidence {
            qa4: w.qa4(),
            qa2: w.qa2(),
            qa1: w.qa1(),
            qb4: w.qb4(),
            qb2: w.qb2(),
            qb1: w.qb1(),
            qc4: w.qc4(),
            qc2: w.qc2(),
            qc1: w.qc1(),
            qd4: w.qd4(),
            qd2: w.qd2(),
            qd1: w.qd1(),
        }
    }

    fn to_word(self) -> u16 {
        let mut w = PulseQualityWord(0);
        w.set_qa4(self.qa4);
        w.set_qa2(self.qa2);
        w.set_qa1(self.qa1);
        w.set_qb4(self.qb4);
        w.set_qb2(self.qb2);
        w.set_qb1(self.qb1);
        w.set_qc4(self.qc4);
        w.set_qc2(self.qc2);
        w.set_qc1(self.qc1);
        w.set_qd4(self.qd4);
        w.set_qd2(self.qd2);
        w.set_qd1(self.qd1);
        w.0
    }

    /// Whether any pulse is flagged low quality
    pub fn any(&self) -> bool {
        self.to_word() != 0
    }
}

/// I048/080 Mode-3/A Code Confidence Indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mode3ACodeConfidence(pub CodeConfidence);

impl DataItem for Mode3ACodeConfidence {
    const ID: &'static str = "I048/080";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Mode3ACodeConfidence(CodeConfidence::from_word(
            reader.read_u16(Self::ID)?,
        )))
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_u16(self.0.to_word());
        Ok(())
    }
}

/// I048/060 Mode-2 Code Confidence Indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mode2CodeConfidence(pub CodeConfidence);

impl DataItem for Mode2CodeConfidence {
    const ID: &'static str = "I048/060";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Mode2CodeConfidence(CodeConfidence::from_word(
            reader.read_u16(Self::ID)?,
        )))
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_u16(self.0.to_word());
        Ok(())
    }
}

/// I048/065 Mode-1 Code Confidence Indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mode1CodeConfidence {
    pub qa4: bool,
    pub qa2: bool,
    pub qa1: bool,
    pub qb2: bool,
    pub qb1: bool,
}

impl DataItem for Mode1CodeConfidence {
    const ID: &'static str = "I048/065";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let octet = reader.read_u8(Self::ID)?;
        Ok(Mode1CodeConfidence {
            qa4: octet & 0x10 != 0,
            qa2: octet & 0x08 != 0,
            qa1: octet & 0x04 != 0,
            qb2: octet & 0x02 != 0,
            qb1: octet & 0x01 != 0,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        let bits = [self.qa4, self.qa2, self.qa1, self.qb2, self.qb1];
        let octet = bits
            .iter()
            .fold(0u8, |acc, &bit| (acc << 1) | bit as u8);
        writer.put_u8(octet);
        Ok(())
    }
}

/// I048/090 Flight Level in Binary Representation, 1/4 FL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlightLevel {
    pub not_validated: bool,
    pub garbled: bool,
    /// 14-bit two's-complement level in quarter flight levels
    pub level: i16,
}

impl FlightLevel {
    /// A validated level given in quarter flight levels
    pub fn new(level: i16) -> Self {
        FlightLevel {
            level,
            ..Default::default()
        }
    }

    /// Flight level, in units of 100 ft
    pub fn flight_level(&self) -> f64 {
        descale(self.level as f64, 0.25)
    }

    /// Pressure altitude in feet
    pub fn feet(&self) -> f64 {
        self.flight_level() * 100.0
    }
}

impl DataItem for FlightLevel {
    const ID: &'static str = "I048/090";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let raw = reader.read_u16(Self::ID)?;
        Ok(FlightLevel {
            not_validated: raw & 0x8000 != 0,
            garbled: raw & 0x4000 != 0,
            level: decode_i14(raw),
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        let mut raw = encode_i14(self.level, Self::ID)?;
        if self.not_validated {
            raw |= 0x8000;
        }
        if self.garbled {
            raw |= 0x4000;
        }
        writer.put_u16(raw);
        Ok(())
    }
}

/// I048/110 Height Measured by a 3D Radar, 25 ft units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Height3D(pub i16);

impl Height3D {
    /// Measured height in feet
    pub fn feet(&self) -> f64 {
        descale(self.0 as f64, 25.0)
    }
}

impl DataItem for Height3D {
    const ID: &'static str = "I048/110";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Height3D(decode_i14(reader.read_u16(Self::ID)?)))
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_u16(encode_i14(self.0, Self::ID)?);
        Ok(())
    }
}

/// I048/100 Mode-C Code and Code Confidence Indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeCCode {
    pub not_validated: bool,
    pub garbled: bool,
    /// Mode-C reply in Gray notation (C1 A1 C2 A2 C4 A4 B1 D1 B2 D2 B4 D4)
    pub code: u16,
    pub confidence: CodeConfidence,
}

impl DataItem for ModeCCode {
    const ID: &'static str = "I048/100";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let w = ModeCWord(reader.read_u32(Self::ID)?);
        Ok(ModeCCode {
            not_validated: w.not_validated(),
            garbled: w.garbled(),
            code: w.code(),
            confidence: CodeConfidence {
                qa4: w.qa4(),
                qa2: w.qa2(),
                qa1: w.qa1(),
                qb4: w.qb4(),
                qb2: w.qb2(),
                qb1: w.qb1(),
                qc4: w.qc4(),
                qc2: w.qc2(),
                qc1: w.qc1(),
                qd4: w.qd4(),
                qd2: w.qd2(),
                qd1: w.qd1(),
            },
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        check_width(self.code as u32, 12, Self::ID)?;
        let q = &self.confidence;
        let mut w = ModeCWord(0);
        w.set_not_validated(self.not_validated);
        w.set_garbled(self.garbled);
        w.set_code(self.code);
        w.set_qc1(q.qc1);
        w.set_qa1(q.qa1);
        w.set_qc2(q.qc2);
        w.set_qa2(q.qa2);
        w.set_qc4(q.qc4);
        w.set_qa4(q.qa4);
        w.set_qb1(q.qb1);
        w.set_qd1(q.qd1);
        w.set_qb2(q.qb2);
        w.set_qd2(q.qd2);
        w.set_qb4(q.qb4);
        w.set_qd4(q.qd4);
        writer.put_u32(w.0);
        Ok(())
    }
}

/// I048/230 Communications/ACAS Capability and Flight Status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommsAcasCapability {
    /// Communications capability (3 bits)
    pub com: u8,
    /// Flight status (3 bits)
    pub stat: u8,
    /// SI/II transponder capability
    pub si: bool,
    /// Mode-S specific service capability
    pub mssc: bool,
    /// Altitude reporting in 25 ft resolution
    pub arc: bool,
    /// Aircraft identification capability
    pub aic: bool,
    /// BDS 1,0 bit 16
    pub b1a: bool,
    /// BDS 1,0 bits 37-40
    pub b1b: u8,
}

impl DataItem for CommsAcasCapability {
    const ID: &'static str = "I048/230";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let w = CapabilityWord(reader.read_u16(Self::ID)?);
        Ok(CommsAcasCapability {
            com: w.com(),
            stat: w.stat(),
            si: w.si(),
            mssc: w.mssc(),
            arc: w.arc(),
            aic: w.aic(),
            b1a: w.b1a(),
            b1b: w.b1b(),
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        check_width(self.com as u32, 3, "I048/230 COM")?;
        check_width(self.stat as u32, 3, "I048/230 STAT")?;
        check_width(self.b1b as u32, 4, "I048/230 B1B")?;
        let mut w = CapabilityWord(0);
        w.set_com(self.com);
        w.set_stat(self.stat);
        w.set_si(self.si);
        w.set_mssc(self.mssc);
        w.set_arc(self.arc);
        w.set_aic(self.aic);
        w.set_b1a(self.b1a);
        w.set_b1b(self.b1b);
        writer.put_u16(w.0);
        Ok(())
    }
}

/// I048/260 ACAS Resolution Advisory Report, the 56-bit MB field of BDS 3,0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcasResolutionAdvisory(pub [u8; 7]);

impl DataItem for AcasResolutionAdvisory {
    const ID: &'static str = "I048/260";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(AcasResolutionAdvisory(reader.read_array::<7>(Self::ID)?))
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_slice(&self.0);
        Ok(())
    }
}
