//! Extensible items: a primary octet plus an FX-chained list of extensions
//!
//! The FX bits themselves are not stored. Decoding reads while FX is set;
//! encoding sets FX on every octet except the last one written.

use bitfield::bitfield;

use crate::core::{ByteReader, ByteWriter, DataItem};
use crate::error::Result;

use super::{check_width, read_extension_chain, write_extension_chain};

bitfield! {
    struct ReportOctet(u8);
    u8, typ, set_typ: 7, 5;
    sim, set_sim: 4;
    rdp, set_rdp: 3;
    spi, set_spi: 2;
    rab, set_rab: 1;
}

bitfield! {
    struct ReportExtensionOctet(u8);
    tst, set_tst: 7;
    err, set_err: 6;
    xpp, set_xpp: 5;
    me, set_me: 4;
    mi, set_mi: 3;
    u8, foe_fri, set_foe_fri: 2, 1;
}

bitfield! {
    struct StatusOctet(u8);
    cnf, set_cnf: 7;
    u8, rad, set_rad: 6, 5;
    dou, set_dou: 4;
    mah, set_mah: 3;
    u8, cdm, set_cdm: 2, 1;
}

bitfield! {
    struct StatusExtensionOctet(u8);
    tre, set_tre: 7;
    gho, set_gho: 6;
    sup, set_sup: 5;
    tcc, set_tcc: 4;
}

/// I048/020 Target Report Descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetReportDescriptor {
    /// Detection type (3 bits): 1 PSR, 2 SSR, 3 SSR+PSR, 4 Mode-S all-call, ...
    pub typ: u8,
    /// Simulated target report
    pub sim: bool,
    /// Report from RDP chain 2
    pub rdp: bool,
    /// Special position identification
    pub spi: bool,
    /// Report from field monitor
    pub rab: bool,
    pub extensions: Vec<TargetReportExtension>,
}

/// One extension octet of I048/020
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetReportExtension {
    /// Test target report
    pub tst: bool,
    /// Extended range present
    pub err: bool,
    /// X-pulse present
    pub xpp: bool,
    /// Military emergency
    pub me: bool,
    /// Military identification
    pub mi: bool,
    /// Foe/friend indication (2 bits)
    pub foe_fri: u8,
}

impl TargetReportExtension {
    fn from_octet(octet: u8) -> Self {
        let o = ReportExtensionOctet(octet);
        TargetReportExtension {
            tst: o.tst(),
            err: o.err(),
            xpp: o.xpp(),
            me: o.me(),
            mi: o.mi(),
            foe_fri: o.foe_fri(),
        }
    }

    fn to_octet(self) -> Result<u8> {
        check_width(self.foe_fri as u32, 2, "I048/020 FOE/FRI")?;
        let mut o = ReportExtensionOctet(0);
        o.set_tst(self.tst);
        o.set_err(self.err);
        o.set_xpp(self.xpp);
        o.set_me(self.me);
        o.set_mi(self.mi);
        o.set_foe_fri(self.foe_fri);
        Ok(o.0)
    }
}

impl DataItem for TargetReportDescriptor {
    const ID: &'static str = "I048/020";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let first = reader.read_u8(Self::ID)?;
        let o = ReportOctet(first);
        let extensions = read_extension_chain(reader, first, Self::ID)?
            .into_iter()
            .map(TargetReportExtension::from_octet)
            .collect();
        Ok(TargetReportDescriptor {
            typ: o.typ(),
            sim: o.sim(),
            rdp: o.rdp(),
            spi: o.spi(),
            rab: o.rab(),
            extensions,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        check_width(self.typ as u32, 3, "I048/020 TYP")?;
        let mut o = ReportOctet(0);
        o.set_typ(self.typ);
        o.set_sim(self.sim);
        o.set_rdp(self.rdp);
        o.set_spi(self.spi);
        o.set_rab(self.rab);
        let extensions = self
            .extensions
            .iter()
            .map(|ext| ext.to_octet())
            .collect::<Result<Vec<_>>>()?;
        write_extension_chain(writer, o.0, &extensions, Self::ID)
    }
}

/// I048/030 Warning/Error Conditions and Target Classification
///
/// Each octet carries one 7-bit condition code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarningErrorConditions {
    pub code: u8,
    pub extensions: Vec<u8>,
}

impl WarningErrorConditions {
    /// All condition codes in wire order
    pub fn codes(&self) -> impl Iterator<Item = u8> + '_ {
        std::iter::once(self.code).chain(self.extensions.iter().copied())
    }
}

impl DataItem for WarningErrorConditions {
    const ID: &'static str = "I048/030";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let first = reader.read_u8(Self::ID)?;
        let extensions = read_extension_chain(reader, first, Self::ID)?
            .into_iter()
            .map(|octet| octet >> 1)
            .collect();
        Ok(WarningErrorConditions {
            code: first >> 1,
            extensions,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        for code in self.codes() {
            check_width(code as u32, 7, Self::ID)?;
        }
        let extensions: Vec<u8> = self.extensions.iter().map(|code| code << 1).collect();
        write_extension_chain(writer, self.code << 1, &extensions, Self::ID)
    }
}

/// I048/170 Track Status
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackStatus {
    /// Tentative track
    pub cnf: bool,
    /// Type of sensor(s) maintaining the track (2 bits)
    pub rad: u8,
    /// Low confidence in plot to track association
    pub dou: bool,
    /// Horizontal manoeuvre detected
    pub mah: bool,
    /// Climbing/descending mode (2 bits)
    pub cdm: u8,
    pub extensions: Vec<TrackStatusExtension>,
}

/// One extension octet of I048/170
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackStatusExtension {
    /// Last report for this track
    pub tre: bool,
    /// Ghost target track
    pub gho: bool,
    /// Track maintained with neighbouring node information
    pub sup: bool,
    /// Slant range correction applied
    pub tcc: bool,
}

impl TrackStatusExtension {
    fn from_octet(octet: u8) -> Self {
        let o = StatusExtensionOctet(octet);
        TrackStatusExtension {
            tre: o.tre(),
            gho: o.gho(),
            sup: o.sup(),
            tcc: o.tcc(),
        }
    }

    fn to_octet(self) -> u8 {
        let mut o = StatusExtensionOctet(0);
        o.set_tre(self.tre);
        o.set_gho(self.gho);
        o.set_sup(self.sup);
        o.set_tcc(self.tcc);
        o.0
    }
}

impl DataItem for TrackStatus {
    const ID: &'static str = "I048/170";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let first = reader.read_u8(Self::ID)?;
        let o = StatusOctet(first);
        let extensions = read_extension_chain(reader, first, Self::ID)?
            .into_iter()
            .map(TrackStatusExtension::from_octet)
            .collect();
        Ok(TrackStatus {
            cnf: o.cnf(),
            rad: o.rad(),
            dou: o.dou(),
            mah: o.mah(),
            cdm: o.cdm(),
            extensions,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        check_width(self.rad as u32, 2, "I048/170 RAD")?;
        check_width(self.cdm as u32, 2, "I048/170 CDM")?;
        let mut o = StatusOctet(0);
        o.set_cnf(self.cnf);
        o.set_rad(self.rad);
        o.set_dou(self.dou);
        o.set_mah(self.mah);
        o.set_cdm(self.cdm);
        let extensions: Vec<u8> = self.extensions.iter().map(|ext| ext.to_octet()).collect();
        write_extension_chain(writer, o.0, &extensions, Self::ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    fn encode<T: DataItem>(item: &T) -> Result<Vec<u8>> {
        let mut writer = ByteWriter::new();
        item.encode(&mut writer)?;
        Ok(writer.into_inner())
    }

    #[test]
    fn test_target_report_two_extensions() -> Result<()> {
        // SSR, FX; TST|FX; ME, FOE/FRI=2
        let bytes = [0x41, 0x81, 0x14];
        let mut reader = ByteReader::new(&bytes);
        let descriptor = TargetReportDescriptor::decode(&mut reader)?;
        assert!(reader.is_empty());
        assert_eq!(descriptor.typ, 2);
        assert_eq!(descriptor.extensions.len(), 2);
        assert!(descriptor.extensions[0].tst);
        assert!(descriptor.extensions[1].me);
        assert_eq!(descriptor.extensions[1].foe_fri, 2);
        assert_eq!(encode(&descriptor)?, bytes.to_vec());
        Ok(())
    }

    #[test]
    fn test_target_report_no_extension() -> Result<()> {
        let mut reader = ByteReader::new(&[0x40]);
        let descriptor = TargetReportDescriptor::decode(&mut reader)?;
        assert_eq!(descriptor.typ, 2);
        assert!(descriptor.extensions.is_empty());
        assert_eq!(encode(&descriptor)?, vec![0x40]);
        Ok(())
    }

    #[test]
    fn test_target_report_truncated_chain() {
        let mut reader = ByteReader::new(&[0x41, 0x81]);
        assert_eq!(
            TargetReportDescriptor::decode(&mut reader),
            Err(CodecError::truncated("I048/020", 1, 0))
        );
    }

    #[test]
    fn test_target_report_rejects_wide_typ() {
        let descriptor = TargetReportDescriptor {
            typ: 8,
            ..Default::default()
        };
        assert!(encode(&descriptor).is_err());
    }

    #[test]
    fn test_warning_conditions() -> Result<()> {
        let bytes = [0x03, 0x2E];
        let mut reader = ByteReader::new(&bytes);
        let conditions = WarningErrorConditions::decode(&mut reader)?;
        assert_eq!(conditions.codes().collect::<Vec<_>>(), vec![1, 23]);
        assert_eq!(encode(&conditions)?, bytes.to_vec());
        Ok(())
    }

    #[test]
    fn test_track_status() -> Result<()> {
        // CNF, RAD=2, CDM=1, FX; TRE
        let bytes = [0xC3, 0x80];
        let mut reader = ByteReader::new(&bytes);
        let status = TrackStatus::decode(&mut reader)?;
        assert!(status.cnf);
        assert_eq!(status.rad, 2);
        assert_eq!(status.cdm, 1);
        assert!(!status.dou);
        assert_eq!(status.extensions, vec![TrackStatusExtension {
            tre: true,
            ..Default::default()
        }]);
        assert_eq!(encode(&status)?, bytes.to_vec());
        Ok(())
    }

    #[test]
    fn test_encode_respects_extension_cap() {
        let conditions = WarningErrorConditions {
            code: 1,
            extensions: vec![2; 9],
        };
        assert_eq!(
            encode(&conditions),
            Err(CodecError::extension_overflow("I048/030", 8))
        );

        let descriptor = TargetReportDescriptor {
            extensions: vec![TargetReportExtension::default(); 3],
            ..Default::default()
        };
        let mut writer = ByteWriter::new().with_max_extension_octets(2);
        assert_eq!(
            descriptor.encode(&mut writer),
            Err(CodecError::extension_overflow("I048/020", 2))
        );
    }

    #[test]
    fn test_track_status_capped_chain() {
        let bytes = [0x01; 12];
        let mut reader = ByteReader::new(&bytes).with_max_extension_octets(4);
        assert_eq!(
            TrackStatus::decode(&mut reader),
            Err(CodecError::extension_overflow("I048/170", 4))
        );
    }
}
