//! Typed Category 048 data items
//!
//! Items are grouped by wire shape:
//!
//! - [`identity`], [`kinematics`], [`codes`]: fixed-width records
//! - [`extended`]: records followed by an FX-chained list of extension octets
//! - [`compound`]: a primary subfield whose bits gate optional subfields
//! - [`repetitive`]: a count octet followed by fixed-size records
//! - [`explicit`]: length-prefixed opaque blobs

pub mod codes;
pub mod compound;
pub mod explicit;
pub mod extended;
pub mod identity;
pub mod kinematics;
pub mod repetitive;

pub use codes::{
    AcasResolutionAdvisory, CodeConfidence, CommsAcasCapability, FlightLevel, Height3D,
    Mode1Code, Mode1CodeConfidence, Mode2Code, Mode2CodeConfidence, Mode3ACode,
    Mode3ACodeConfidence, ModeCCode,
};
pub use compound::{CalculatedDopplerSpeed, RadarPlotCharacteristics, RadialDopplerSpeed, RawDopplerSpeed};
pub use explicit::{ReservedExpansionField, SpecialPurposeField};
pub use extended::{
    TargetReportDescriptor, TargetReportExtension, TrackStatus, TrackStatusExtension,
    WarningErrorConditions,
};
pub use identity::{AircraftAddress, AircraftIdentification, DataSourceIdentifier, TrackNumber};
pub use kinematics::{CartesianPosition, MeasuredPosition, TimeOfDay, TrackQuality, TrackVelocity};
pub use repetitive::{BdsRegister, ModeSMbData};

use crate::core::{ByteReader, ByteWriter};
use crate::error::{CodecError, Result};

/// FX bit terminating extensible items and compound primary subfields
pub(crate) const FX: u8 = 0x01;

/// Read the extension octets that follow `first` while FX stays set
///
/// The chain is bounded both by the input and by the reader's extension cap.
pub(crate) fn read_extension_chain(
    reader: &mut ByteReader<'_>,
    first: u8,
    item: &'static str,
) -> Result<Vec<u8>> {
    let limit = reader.max_extension_octets();
    let mut extensions = Vec::new();
    let mut more = first & FX != 0;
    while more {
        if extensions.len() >= limit {
            return Err(CodecError::extension_overflow(item, limit));
        }
        let octet = reader.read_u8(item)?;
        more = octet & FX != 0;
        extensions.push(octet);
    }
    Ok(extensions)
}

/// Write `first` followed by `extensions`, setting FX on every octet but the last
///
/// Fails without writing anything if the chain is longer than the writer's
/// extension cap.
pub(crate) fn write_extension_chain(
    writer: &mut ByteWriter,
    first: u8,
    extensions: &[u8],
    item: &'static str,
) -> Result<()> {
    let limit = writer.max_extension_octets();
    if extensions.len() > limit {
        return Err(CodecError::extension_overflow(item, limit));
    }
    let with_fx = |octet: u8, more: bool| if more { octet | FX } else { octet & !FX };
    writer.put_u8(with_fx(first, !extensions.is_empty()));
    for (i, &octet) in extensions.iter().enumerate() {
        writer.put_u8(with_fx(octet, i + 1 < extensions.len()));
    }
    Ok(())
}

/// Reject `value` if it does not fit in `bits` bits
pub(crate) fn check_width(value: u32, bits: u32, what: &str) -> Result<()> {
    if value >> bits != 0 {
        return Err(CodecError::invalid_value(format!(
            "{what}: {value} does not fit in {bits} bit(s)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_read_stops_on_clear_fx() -> Result<()> {
        let data = [0x03, 0x02, 0xFF];
        let mut reader = ByteReader::new(&data);
        let ext = read_extension_chain(&mut reader, 0x01, "I048/020")?;
        assert_eq!(ext, vec![0x03, 0x02]);
        assert_eq!(reader.remaining(), 1);
        Ok(())
    }

    #[test]
    fn test_chain_read_truncated() {
        let data = [0x01];
        let mut reader = ByteReader::new(&data);
        let err = read_extension_chain(&mut reader, 0x01, "I048/170").unwrap_err();
        assert_eq!(err, CodecError::truncated("I048/170", 1, 0));
    }

    #[test]
    fn test_chain_read_capped() {
        let data = [0x01; 16];
        let mut reader = ByteReader::new(&data).with_max_extension_octets(3);
        let err = read_extension_chain(&mut reader, 0x01, "I048/030").unwrap_err();
        assert_eq!(err, CodecError::extension_overflow("I048/030", 3));
    }

    #[test]
    fn test_chain_write_sets_fx() -> Result<()> {
        let mut writer = ByteWriter::new();
        write_extension_chain(&mut writer, 0x40, &[0x80, 0x81], "I048/020")?;
        assert_eq!(writer.into_inner(), vec![0x41, 0x81, 0x80]);

        let mut writer = ByteWriter::new();
        write_extension_chain(&mut writer, 0x41, &[], "I048/020")?;
        assert_eq!(writer.into_inner(), vec![0x40]);
        Ok(())
    }

    #[test]
    fn test_chain_write_capped() -> Result<()> {
        let mut writer = ByteWriter::new().with_max_extension_octets(2);
        let err = write_extension_chain(&mut writer, 0x00, &[0x02; 3], "I048/030").unwrap_err();
        assert_eq!(err, CodecError::extension_overflow("I048/030", 2));
        assert!(writer.is_empty());

        write_extension_chain(&mut writer, 0x00, &[0x02; 2], "I048/030")?;
        assert_eq!(writer.len(), 3);
        Ok(())
    }

    #[test]
    fn test_check_width() {
        assert!(check_width(7, 3, "TYP").is_ok());
        assert!(check_width(8, 3, "TYP").is_err());
    }
}
