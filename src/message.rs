//! The Category 048 target report record

use crate::catalog::CATALOG;
use crate::items::*;
use crate::uap;

/// A single Category 048 target report
///
/// Every data item is an explicit `Option`: `Some` means the item is on the
/// wire, whatever its value. `category`, `length`, `fspec` and `frns`
/// describe the data block a message was decoded from and are ignored when
/// encoding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub category: u8,
    /// Header-inclusive length of the decoded data block
    pub length: u16,
    /// Raw FSPEC octets as received
    pub fspec: Vec<u8>,
    /// Field reference numbers in wire order
    pub frns: Vec<usize>,

    pub data_source_identifier: Option<DataSourceIdentifier>,
    pub time_of_day: Option<TimeOfDay>,
    pub target_report_descriptor: Option<TargetReportDescriptor>,
    pub measured_position: Option<MeasuredPosition>,
    pub mode_3a_code: Option<Mode3ACode>,
    pub flight_level: Option<FlightLevel>,
    pub radar_plot_characteristics: Option<RadarPlotCharacteristics>,
    pub aircraft_address: Option<AircraftAddress>,
    pub aircraft_identification: Option<AircraftIdentification>,
    pub mode_s_mb_data: Option<ModeSMbData>,
    pub track_number: Option<TrackNumber>,
    pub cartesian_position: Option<CartesianPosition>,
    pub track_velocity: Option<TrackVelocity>,
    pub track_status: Option<TrackStatus>,
    pub track_quality: Option<TrackQuality>,
    pub warning_error_conditions: Option<WarningErrorConditions>,
    pub mode_3a_code_confidence: Option<Mode3ACodeConfidence>,
    pub mode_c_code: Option<ModeCCode>,
    pub height_3d: Option<Height3D>,
    pub radial_doppler_speed: Option<RadialDopplerSpeed>,
    pub comms_acas_capability: Option<CommsAcasCapability>,
    pub acas_resolution_advisory: Option<AcasResolutionAdvisory>,
    pub mode_1_code: Option<Mode1Code>,
    pub mode_2_code: Option<Mode2Code>,
    pub mode_1_code_confidence: Option<Mode1CodeConfidence>,
    pub mode_2_code_confidence: Option<Mode2CodeConfidence>,
    pub special_purpose: Option<SpecialPurposeField>,
    pub reserved_expansion: Option<ReservedExpansionField>,
}

impl Message {
    /// Create a report carrying only the two mandatory items
    pub fn new(source: DataSourceIdentifier, time: TimeOfDay) -> Self {
        Message {
            data_source_identifier: Some(source),
            time_of_day: Some(time),
            ..Default::default()
        }
    }

    /// FRNs that encoding this message would mark in its FSPEC, ascending
    pub fn present_frns(&self) -> Vec<usize> {
        CATALOG
            .iter()
            .filter(|entry| (entry.present)(self))
            .map(|entry| entry.frn)
            .collect()
    }

    /// Whether the item at `frn` is present
    pub fn is_present(&self, frn: usize) -> bool {
        crate::catalog::lookup(frn).map_or(false, |entry| (entry.present)(self))
    }
}

impl Default for Message {
    fn default() -> Self {
        Message {
            category: uap::CATEGORY,
            length: 0,
            fspec: Vec::new(),
            frns: Vec::new(),
            data_source_identifier: None,
            time_of_day: None,
            target_report_descriptor: None,
            measured_position: None,
            mode_3a_code: None,
            flight_level: None,
            radar_plot_characteristics: None,
            aircraft_address: None,
            aircraft_identification: None,
            mode_s_mb_data: None,
            track_number: None,
            cartesian_position: None,
            track_velocity: None,
            track_status: None,
            track_quality: None,
            warning_error_conditions: None,
            mode_3a_code_confidence: None,
            mode_c_code: None,
            height_3d: None,
            radial_doppler_speed: None,
            comms_acas_capability: None,
            acas_resolution_advisory: None,
            mode_1_code: None,
            mode_2_code: None,
            mode_1_code_confidence: None,
            mode_2_code_confidence: None,
            special_purpose: None,
            reserved_expansion: None,
        }
    }
}
