//! Time and kinematic items
//!
//! The raw integers are kept exactly as carried on the wire; the accessor
//! methods descale them to engineering units and the `from_*` constructors
//! scale back, rounding to the nearest representable value.

use crate::core::{ByteReader, ByteWriter, DataItem};
use crate::encoding::{bams_to_degrees, degrees_to_bams, descale, scale};
use crate::error::{CodecError, Result};

/// I048/140 Time of Day, seconds since midnight UTC in 1/128 s units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Resolution in seconds
    pub const LSB: f64 = 1.0 / 128.0;
    /// Largest raw value carried in 24 bits
    pub const MAX_RAW: u32 = 0x00FF_FFFF;

    /// Create from the raw 24-bit count
    pub fn new(raw: u32) -> Result<Self> {
        if raw > Self::MAX_RAW {
            return Err(CodecError::invalid_value(format!(
                "time of day {raw} exceeds 24 bits"
            )));
        }
        Ok(TimeOfDay(raw))
    }

    /// Create from seconds since midnight
    pub fn from_seconds(seconds: f64) -> Result<Self> {
        let raw = scale(seconds, Self::LSB, 0, Self::MAX_RAW as i64, Self::ID)?;
        Ok(TimeOfDay(raw as u32))
    }

    /// Raw count of 1/128 s
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Seconds since midnight
    pub fn seconds(&self) -> f64 {
        descale(self.0 as f64, Self::LSB)
    }
}

impl DataItem for TimeOfDay {
    const ID: &'static str = "I048/140";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(TimeOfDay(reader.read_u24(Self::ID)?))
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        super::check_width(self.0, 24, Self::ID)?;
        writer.put_u24(self.0);
        Ok(())
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / 128;
        let millis = (self.0 % 128) * 1000 / 128;
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            whole / 3600,
            (whole / 60) % 60,
            whole % 60,
            millis
        )
    }
}

/// I048/040 Measured Position in Polar Co-ordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasuredPosition {
    /// Slant range, 1/256 NM
    pub rho: u16,
    /// Azimuth, 360/2^16 degrees
    pub theta: u16,
}

impl MeasuredPosition {
    /// Range resolution in NM
    pub const RHO_LSB: f64 = 1.0 / 256.0;

    /// Create from a range in NM and an azimuth in degrees
    pub fn from_nm_deg(range_nm: f64, azimuth_deg: f64) -> Result<Self> {
        let rho = scale(range_nm, Self::RHO_LSB, 0, u16::MAX as i64, Self::ID)? as u16;
        Ok(MeasuredPosition {
            rho,
            theta: degrees_to_bams(azimuth_deg),
        })
    }

    /// Slant range in NM
    pub fn range_nm(&self) -> f64 {
        descale(self.rho as f64, Self::RHO_LSB)
    }

    /// Azimuth in degrees, clockwise from north
    pub fn azimuth_deg(&self) -> f64 {
        bams_to_degrees(self.theta)
    }
}

impl DataItem for MeasuredPosition {
    const ID: &'static str = "I048/040";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let rho = reader.read_u16(Self::ID)?;
        let theta = reader.read_u16(Self::ID)?;
        Ok(MeasuredPosition { rho, theta })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_u16(self.rho);
        writer.put_u16(self.theta);
        Ok(())
    }
}

/// I048/042 Calculated Position in Cartesian Co-ordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartesianPosition {
    /// X component, 1/128 NM
    pub x: i16,
    /// Y component, 1/128 NM
    pub y: i16,
}

impl CartesianPosition {
    /// Resolution in NM
    pub const LSB: f64 = 1.0 / 128.0;

    /// Create from components in NM
    pub fn from_nm(x_nm: f64, y_nm: f64) -> Result<Self> {
        let min = i16::MIN as i64;
        let max = i16::MAX as i64;
        Ok(CartesianPosition {
            x: scale(x_nm, Self::LSB, min, max, Self::ID)? as i16,
            y: scale(y_nm, Self::LSB, min, max, Self::ID)? as i16,
        })
    }

    /// X component in NM
    pub fn x_nm(&self) -> f64 {
        descale(self.x as f64, Self::LSB)
    }

    /// Y component in NM
    pub fn y_nm(&self) -> f64 {
        descale(self.y as f64, Self::LSB)
    }
}

impl DataItem for CartesianPosition {
    const ID: &'static str = "I048/042";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let x = reader.read_i16(Self::ID)?;
        let y = reader.read_i16(Self::ID)?;
        Ok(CartesianPosition { x, y })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_i16(self.x);
        writer.put_i16(self.y);
        Ok(())
    }
}

/// I048/200 Calculated Track Velocity in Polar Co-ordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackVelocity {
    /// Ground speed, 2^-14 NM/s
    pub ground_speed: u16,
    /// Heading, 360/2^16 degrees
    pub heading: u16,
}

impl TrackVelocity {
    /// Ground speed resolution in NM/s
    pub const SPEED_LSB: f64 = 1.0 / 16384.0;

    /// Create from a ground speed in NM/s and a heading in degrees
    pub fn from_nm_s_deg(speed_nm_s: f64, heading_deg: f64) -> Result<Self> {
        let ground_speed = scale(speed_nm_s, Self::SPEED_LSB, 0, u16::MAX as i64, Self::ID)?;
        Ok(TrackVelocity {
            ground_speed: ground_speed as u16,
            heading: degrees_to_bams(heading_deg),
        })
    }

    /// Ground speed in NM/s
    pub fn ground_speed_nm_s(&self) -> f64 {
        descale(self.ground_speed as f64, Self::SPEED_LSB)
    }

    /// Ground speed in knots
    pub fn ground_speed_kt(&self) -> f64 {
        self.ground_speed_nm_s() * 3600.0
    }

    /// Heading in degrees
    pub fn heading_deg(&self) -> f64 {
        bams_to_degrees(self.heading)
    }
}

impl DataItem for TrackVelocity {
    const ID: &'static str = "I048/200";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let ground_speed = reader.read_u16(Self::ID)?;
        let heading = reader.read_u16(Self::ID)?;
        Ok(TrackVelocity {
            ground_speed,
            heading,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_u16(self.ground_speed);
        writer.put_u16(self.heading);
        Ok(())
    }
}

/// I048/210 Track Quality, standard deviations of the track state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackQuality {
    /// Horizontal X component, 1/128 NM
    pub sigma_x: u8,
    /// Horizontal Y component, 1/128 NM
    pub sigma_y: u8,
    /// Groundspeed, 2^-14 NM/s
    pub sigma_v: u8,
    /// Heading, 360/2^12 degrees
    pub sigma_h: u8,
}

impl TrackQuality {
    /// Standard deviation of X in NM
    pub fn sigma_x_nm(&self) -> f64 {
        descale(self.sigma_x as f64, 1.0 / 128.0)
    }

    /// Standard deviation of Y in NM
    pub fn sigma_y_nm(&self) -> f64 {
        descale(self.sigma_y as f64, 1.0 / 128.0)
    }

    /// Standard deviation of ground speed in NM/s
    pub fn sigma_v_nm_s(&self) -> f64 {
        descale(self.sigma_v as f64, 1.0 / 16384.0)
    }

    /// Standard deviation of heading in degrees
    pub fn sigma_h_deg(&self) -> f64 {
        descale(self.sigma_h as f64, 360.0 / 4096.0)
    }
}

impl DataItem for TrackQuality {
    const ID: &'static str = "I048/210";

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let [sigma_x, sigma_y, sigma_v, sigma_h] = reader.read_array::<4>(Self::ID)?;
        Ok(TrackQuality {
            sigma_x,
            sigma_y,
            sigma_v,
            sigma_h,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_slice(&[self.sigma_x, self.sigma_y, self.sigma_v, self.sigma_h]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day() -> Result<()> {
        let mut reader = ByteReader::new(&[0x83, 0x76, 0x66]);
        let time = TimeOfDay::decode(&mut reader)?;
        assert_eq!(time.raw(), 8_615_526);
        assert_eq!(time.seconds(), 67308.796875);
        assert_eq!(time.to_string(), "18:41:48.796");
        assert_eq!(TimeOfDay::from_seconds(67308.796875)?, time);
        assert!(TimeOfDay::new(0x0100_0000).is_err());
        Ok(())
    }

    #[test]
    fn test_time_of_day_truncated() {
        let mut reader = ByteReader::new(&[0x83, 0x76]);
        assert_eq!(
            TimeOfDay::decode(&mut reader),
            Err(CodecError::truncated("I048/140", 3, 2))
        );
    }

    #[test]
    fn test_measured_position() -> Result<()> {
        let mut reader = ByteReader::new(&[0x03, 0x5B, 0xC2, 0x88]);
        let pos = MeasuredPosition::decode(&mut reader)?;
        assert_eq!(pos.rho, 0x035B);
        assert_eq!(pos.theta, 0xC288);
        assert!((pos.range_nm() - 3.35546875).abs() < 1e-9);
        assert!((pos.azimuth_deg() - 273.5595703125).abs() < 1e-9);

        let built = MeasuredPosition::from_nm_deg(10.0, 90.0)?;
        assert_eq!(built.rho, 2560);
        assert_eq!(built.theta, 0x4000);
        assert!(MeasuredPosition::from_nm_deg(300.0, 0.0).is_err());
        Ok(())
    }

    #[test]
    fn test_cartesian_position_signed() -> Result<()> {
        let mut reader = ByteReader::new(&[0xFF, 0x80, 0x01, 0x00]);
        let pos = CartesianPosition::decode(&mut reader)?;
        assert_eq!(pos.x, -128);
        assert_eq!(pos.y, 256);
        assert_eq!(pos.x_nm(), -1.0);
        assert_eq!(CartesianPosition::from_nm(-1.0, 2.0)?, pos);

        let mut writer = ByteWriter::new();
        pos.encode(&mut writer)?;
        assert_eq!(writer.into_inner(), vec![0xFF, 0x80, 0x01, 0x00]);
        Ok(())
    }

    #[test]
    fn test_track_velocity() -> Result<()> {
        let mut reader = ByteReader::new(&[0x08, 0xA4, 0xC2, 0x88]);
        let vel = TrackVelocity::decode(&mut reader)?;
        assert_eq!(vel.ground_speed, 0x08A4);
        assert!((vel.ground_speed_kt() - 486.03515625).abs() < 1e-6);
        assert_eq!(TrackVelocity::from_nm_s_deg(0.125, 180.0)?.heading, 0x8000);
        Ok(())
    }

    #[test]
    fn test_track_quality() -> Result<()> {
        let mut reader = ByteReader::new(&[0x80, 0x40, 0x00, 0x10]);
        let quality = TrackQuality::decode(&mut reader)?;
        assert_eq!(quality.sigma_x_nm(), 1.0);
        assert_eq!(quality.sigma_y_nm(), 0.5);
        assert!((quality.sigma_h_deg() - 1.40625).abs() < 1e-9);
        Ok(())
    }
}
