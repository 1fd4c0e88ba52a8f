//! Field catalog: the User Application Profile of Category 048
//!
//! One [`CatalogEntry`] per field reference number, each holding the
//! function pointers that move that field between the wire and its slot in
//! [`Message`]. The assembler and disassembler walk this table and never
//! dispatch on an FRN themselves.

use crate::core::{ByteReader, ByteWriter, DataItem};
use crate::error::Result;
use crate::items::*;
use crate::message::Message;
use crate::uap;

/// Decode one field from `reader` into its slot in the message
pub type DecodeFn = fn(&mut ByteReader<'_>, &mut Message) -> Result<()>;

/// Encode one field from the message, returning whether it was present
pub type EncodeFn = fn(&Message, &mut ByteWriter) -> Result<bool>;

/// Presence predicate for one field
pub type PresentFn = fn(&Message) -> bool;

/// A single UAP slot
#[derive(Clone, Copy)]
pub struct CatalogEntry {
    /// Field reference number, 1-based
    pub frn: usize,
    /// Data item identifier, e.g. "I048/010"
    pub item: &'static str,
    /// Human-readable item name
    pub name: &'static str,
    /// Whether the item must be present in every encoded report
    pub mandatory: bool,
    pub decode: DecodeFn,
    pub encode: EncodeFn,
    pub present: PresentFn,
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("frn", &self.frn)
            .field("item", &self.item)
            .field("name", &self.name)
            .field("mandatory", &self.mandatory)
            .finish()
    }
}

macro_rules! entry {
    ($frn:expr, $field:ident: $ty:ty, $name:expr) => {
        entry!($frn, $field: $ty, $name, false)
    };
    ($frn:expr, $field:ident: $ty:ty, $name:expr, $mandatory:expr) => {
        CatalogEntry {
            frn: $frn,
            item: <$ty as DataItem>::ID,
            name: $name,
            mandatory: $mandatory,
            decode: |reader, message| {
                message.$field = Some(<$ty as DataItem>::decode(reader)?);
                Ok(())
            },
            encode: |message, writer| match &message.$field {
                Some(value) => {
                    value.encode(writer)?;
                    Ok(true)
                }
                None => Ok(false),
            },
            present: |message| message.$field.is_some(),
        }
    };
}

/// The Category 048 UAP, indexed by `frn - 1`
pub static CATALOG: [CatalogEntry; uap::MAX_FRN] = [
    entry!(1, data_source_identifier: DataSourceIdentifier, "Data Source Identifier", true),
    entry!(2, time_of_day: TimeOfDay, "Time of Day", true),
    entry!(3, target_report_descriptor: TargetReportDescriptor, "Target Report Descriptor"),
    entry!(4, measured_position: MeasuredPosition, "Measured Position in Polar Co-ordinates"),
    entry!(5, mode_3a_code: Mode3ACode, "Mode-3/A Code in Octal Representation"),
    entry!(6, flight_level: FlightLevel, "Flight Level in Binary Representation"),
    entry!(7, radar_plot_characteristics: RadarPlotCharacteristics, "Radar Plot Characteristics"),
    entry!(8, aircraft_address: AircraftAddress, "Aircraft Address"),
    entry!(9, aircraft_identification: AircraftIdentification, "Aircraft Identification"),
    entry!(10, mode_s_mb_data: ModeSMbData, "Mode S MB Data"),
    entry!(11, track_number: TrackNumber, "Track Number"),
    entry!(12, cartesian_position: CartesianPosition, "Calculated Position in Cartesian Co-ordinates"),
    entry!(13, track_velocity: TrackVelocity, "Calculated Track Velocity in Polar Representation"),
    entry!(14, track_status: TrackStatus, "Track Status"),
    entry!(15, track_quality: TrackQuality, "Track Quality"),
    entry!(16, warning_error_conditions: WarningErrorConditions, "Warning/Error Conditions"),
    entry!(17, mode_3a_code_confidence: Mode3ACodeConfidence, "Mode-3/A Code Confidence Indicator"),
    entry!(18, mode_c_code: ModeCCode, "Mode-C Code and Confidence Indicator"),
    entry!(19, height_3d: Height3D, "Height Measured by 3D Radar"),
    entry!(20, radial_doppler_speed: RadialDopplerSpeed, "Radial Doppler Speed"),
    entry!(21, comms_acas_capability: CommsAcasCapability, "Communications/ACAS Capability and Flight Status"),
    entry!(22, acas_resolution_advisory: AcasResolutionAdvisory, "ACAS Resolution Advisory Report"),
    entry!(23, mode_1_code: Mode1Code, "Mode-1 Code in Octal Representation"),
    entry!(24, mode_2_code: Mode2Code, "Mode-2 Code in Octal Representation"),
    entry!(25, mode_1_code_confidence: Mode1CodeConfidence, "Mode-1 Code Confidence Indicator"),
    entry!(26, mode_2_code_confidence: Mode2CodeConfidence, "Mode-2 Code Confidence Indicator"),
    entry!(27, special_purpose: SpecialPurposeField, "Special Purpose Field"),
    entry!(28, reserved_expansion: ReservedExpansionField, "Reserved Expansion Field"),
];

/// Find the catalog entry for `frn`, if the UAP defines one
pub fn lookup(frn: usize) -> Option<&'static CatalogEntry> {
    frn.checked_sub(1).and_then(|index| CATALOG.get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_indexed_by_frn() {
        for (index, entry) in CATALOG.iter().enumerate() {
            assert_eq!(entry.frn, index + 1);
        }
    }

    #[test]
    fn test_only_source_and_time_are_mandatory() {
        let mandatory: Vec<&str> = CATALOG
            .iter()
            .filter(|entry| entry.mandatory)
            .map(|entry| entry.item)
            .collect();
        assert_eq!(mandatory, vec!["I048/010", "I048/140"]);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(4).map(|entry| entry.item), Some("I048/040"));
        assert_eq!(lookup(28).map(|entry| entry.item), Some("RE"));
        assert!(lookup(0).is_none());
        assert!(lookup(29).is_none());
    }

    #[test]
    fn test_entry_moves_field_through_message() -> Result<()> {
        let entry = lookup(11).unwrap();
        let mut message = Message::default();
        let mut reader = ByteReader::new(&[0x01, 0x23]);
        (entry.decode)(&mut reader, &mut message)?;
        assert_eq!(message.track_number, Some(TrackNumber::new(0x123)?));
        assert!((entry.present)(&message));

        let mut writer = ByteWriter::new();
        assert!((entry.encode)(&message, &mut writer)?);
        assert_eq!(writer.into_inner(), vec![0x01, 0x23]);

        let mut writer = ByteWriter::new();
        assert!(!(lookup(12).unwrap().encode)(&message, &mut writer)?);
        assert!(writer.is_empty());
        Ok(())
    }
}
