//! Numeric encodings used inside Category 048 items
//!
//! - two's-complement sign extension of narrow fields
//! - 14-bit truncation for height and flight level
//! - digit-weighted conversion between decimal-digit transponder codes and
//!   their 12-bit octal-packed wire form
//! - fixed-point scaling between raw integers and engineering units

use crate::error::{CodecError, Result};

/// Largest value representable by a 14-bit two's-complement field
pub const I14_MAX: i16 = 0x1FFF;
/// Smallest value representable by a 14-bit two's-complement field
pub const I14_MIN: i16 = -0x2000;

const MASK_14: u16 = 0x3FFF;

/// Sign-extend the low `bits` bits of `raw` to a full `i32`
///
/// `bits` must be in `1..=32`.
pub fn sign_extend(raw: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((raw << shift) as i32) >> shift
}

/// Interpret the low 14 bits of `raw` as a signed quantity
///
/// Bit 13 is copied across bits 14 and 15 before the cast, so any V/G
/// flags carried above the value are discarded.
pub fn decode_i14(raw: u16) -> i16 {
    sign_extend((raw & MASK_14) as u32, 14) as i16
}

/// Truncate a signed value to its 14-bit wire form
pub fn encode_i14(value: i16, context: &str) -> Result<u16> {
    if !(I14_MIN..=I14_MAX).contains(&value) {
        return Err(CodecError::invalid_value(format!(
            "{context}: {value} outside 14-bit range [{I14_MIN}, {I14_MAX}]"
        )));
    }
    Ok((value as u16) & MASK_14)
}

/// Pack a decimal-digit transponder code into 12 octal-packed bits
///
/// The code is read as four independent decimal digits (e.g. `1200` is
/// digits 1, 2, 0, 0), each of which must be an octal digit. Digit `A`
/// lands in bits 11-9, `B` in 8-6, `C` in 5-3 and `D` in 2-0.
pub fn digits_to_octal(code: u16) -> Result<u16> {
    if code > 7777 {
        return Err(CodecError::invalid_value(format!(
            "transponder code {code} exceeds 7777"
        )));
    }
    let mut packed = 0u16;
    let mut remaining = code;
    for shift in [0u16, 3, 6, 9] {
        let digit = remaining % 10;
        if digit > 7 {
            return Err(CodecError::invalid_value(format!(
                "transponder code {code:04} has non-octal digit {digit}"
            )));
        }
        packed |= digit << shift;
        remaining /= 10;
    }
    Ok(packed)
}

/// Unpack 12 octal-packed bits into the decimal-digit transponder code
pub fn octal_to_digits(packed: u16) -> u16 {
    let mut code = 0u16;
    let mut weight = 1u16;
    for shift in [0u16, 3, 6, 9] {
        code += ((packed >> shift) & 0x7) * weight;
        weight *= 10;
    }
    code
}

/// Convert a raw fixed-point integer to engineering units
pub fn descale(raw: f64, lsb: f64) -> f64 {
    raw * lsb
}

/// Convert engineering units to the nearest raw fixed-point integer,
/// rejecting results outside `[min, max]`
pub fn scale(value: f64, lsb: f64, min: i64, max: i64, context: &str) -> Result<i64> {
    let raw = (value / lsb).round();
    if !raw.is_finite() || raw < min as f64 || raw > max as f64 {
        return Err(CodecError::invalid_value(format!(
            "{context}: {value} does not fit [{min}, {max}] at resolution {lsb}"
        )));
    }
    Ok(raw as i64)
}

/// Map an angle in degrees onto the 16-bit binary angle used by ASTERIX
///
/// Angles wrap, so any finite input is accepted.
pub fn degrees_to_bams(degrees: f64) -> u16 {
    let turns = degrees.rem_euclid(360.0) / 360.0;
    ((turns * 65536.0).round() as u32 & 0xFFFF) as u16
}

/// Map a 16-bit binary angle to degrees in `[0, 360)`
pub fn bams_to_degrees(bams: u16) -> f64 {
    bams as f64 * 360.0 / 65536.0
}
