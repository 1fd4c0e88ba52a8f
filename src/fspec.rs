//! Field specification (FSPEC) presence bitmap
//!
//! Each FSPEC octet carries seven presence flags in bits 7..1 followed by
//! an FX continuation flag in bit 0. Flag bit 7 of the first octet marks
//! FRN 1, bit 1 marks FRN 7, bit 7 of the second octet marks FRN 8, and so
//! on. The last octet of a well-formed FSPEC has FX clear.

use crate::core::ByteReader;
use crate::error::{CodecError, Result};
use crate::uap;

/// Presence flags carried per FSPEC octet
pub const FLAGS_PER_OCTET: usize = 7;

/// Continuation (FX) bit of an FSPEC octet
pub const FX_BIT: u8 = 0x01;

/// Read FSPEC octets until one with a clear FX bit
///
/// Returns the raw octets; the reader advances past them.
pub fn decode_fspec(reader: &mut ByteReader<'_>) -> Result<Vec<u8>> {
    let mut octets = Vec::with_capacity(4);
    loop {
        if reader.is_empty() {
            return Err(CodecError::UnterminatedFspec {
                octets: octets.len(),
            });
        }
        let octet = reader.read_u8("FSPEC")?;
        octets.push(octet);
        if octet & FX_BIT == 0 {
            return Ok(octets);
        }
    }
}

/// Derive the ordered field reference numbers flagged in `fspec`
///
/// The FRN counter advances for every flag bit examined, set or not.
/// Scanning stops after the first octet whose FX bit is clear; all seven
/// flag bits of that octet are still examined.
pub fn derive_frn_sequence(fspec: &[u8]) -> Vec<usize> {
    let mut frns = Vec::new();
    let mut frn = 1usize;
    for &octet in fspec {
        for bit in (1..=7).rev() {
            if octet & (1 << bit) != 0 {
                frns.push(frn);
            }
            frn += 1;
        }
        if octet & FX_BIT == 0 {
            break;
        }
    }
    frns
}

/// Build the minimal FSPEC marking every FRN in `frns` as present
///
/// An empty set yields a single zero octet. An FRN outside
/// `1..=uap::MAX_FRN` is `UnsupportedFieldNumber`.
pub fn encode_fspec(frns: &[usize]) -> Result<Vec<u8>> {
    let mut builder = FspecBuilder::new();
    for &frn in frns {
        builder.mark(frn)?;
    }
    Ok(builder.finish())
}

/// Incremental FSPEC construction, one presence decision at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FspecBuilder {
    octets: Vec<u8>,
}

impl FspecBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        FspecBuilder { octets: Vec::new() }
    }

    /// Mark `frn` (1-based) as present
    pub fn mark(&mut self, frn: usize) -> Result<()> {
        if frn == 0 || frn > uap::MAX_FRN {
            return Err(CodecError::UnsupportedFieldNumber(frn));
        }
        let index = (frn - 1) / FLAGS_PER_OCTET;
        let bit = 7 - (frn - 1) % FLAGS_PER_OCTET;
        if self.octets.len() <= index {
            self.octets.resize(index + 1, 0);
        }
        self.octets[index] |= 1 << bit;
        Ok(())
    }

    /// Whether `frn` has been marked
    pub fn is_marked(&self, frn: usize) -> bool {
        if frn == 0 {
            return false;
        }
        let index = (frn - 1) / FLAGS_PER_OCTET;
        let bit = 7 - (frn - 1) % FLAGS_PER_OCTET;
        self.octets
            .get(index)
            .map_or(false, |octet| octet & (1 << bit) != 0)
    }

    /// Produce the FSPEC octets: exactly ceil(max FRN / 7) of them, FX set
    /// on all but the last
    pub fn finish(mut self) -> Vec<u8> {
        if self.octets.is_empty() {
            return vec![0];
        }
        let last = self.octets.len() - 1;
        for octet in &mut self.octets[..last] {
            *octet |= FX_BIT;
        }
        self.octets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_decode_single_octet() -> Result<()> {
        let data = [0xFE, 0xAA];
        let mut reader = ByteReader::new(&data);
        assert_eq!(decode_fspec(&mut reader)?, vec![0xFE]);
        assert_eq!(reader.position(), 1);
        Ok(())
    }

    #[test]
    fn test_decode_chained_octets() -> Result<()> {
        let data = [0xFD, 0x17, 0x81, 0x44, 0x00];
        let mut reader = ByteReader::new(&data);
        assert_eq!(decode_fspec(&mut reader)?, vec![0xFD, 0x17, 0x81, 0x44]);
        Ok(())
    }

    #[test]
    fn test_decode_unterminated() {
        let data = [0xFF, 0x01];
        let mut reader = ByteReader::new(&data);
        assert_eq!(
            decode_fspec(&mut reader),
            Err(CodecError::UnterminatedFspec { octets: 2 })
        );

        let mut empty = ByteReader::new(&[]);
        assert_eq!(
            decode_fspec(&mut empty),
            Err(CodecError::UnterminatedFspec { octets: 0 })
        );
    }

    #[test]
    fn test_derive_frns() {
        assert_eq!(derive_frn_sequence(&[0x80]), vec![1]);
        assert_eq!(derive_frn_sequence(&[0xFE]), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(derive_frn_sequence(&[0x01, 0x80]), vec![8]);
        assert_eq!(
            derive_frn_sequence(&[0xFD, 0x17, 0x81, 0x44]),
            vec![1, 2, 3, 4, 5, 6, 11, 13, 14, 15, 23, 27]
        );
    }

    #[test]
    fn test_derive_stops_at_clear_fx() {
        // octets past the terminating one are not part of the FSPEC
        assert_eq!(derive_frn_sequence(&[0x40, 0xFE]), vec![2]);
    }

    #[test]
    fn test_encode_minimal_length() -> Result<()> {
        assert_eq!(encode_fspec(&[])?, vec![0x00]);
        assert_eq!(encode_fspec(&[1, 2])?, vec![0xC0]);
        assert_eq!(encode_fspec(&[7])?, vec![0x02]);
        assert_eq!(encode_fspec(&[8])?, vec![0x01, 0x80]);
        assert_eq!(encode_fspec(&[1, 28])?, vec![0x81, 0x01, 0x01, 0x02]);
        Ok(())
    }

    #[test]
    fn test_encode_rejects_frn_outside_uap() {
        assert_eq!(
            encode_fspec(&[1, usize::MAX]),
            Err(CodecError::UnsupportedFieldNumber(usize::MAX))
        );
        assert_eq!(
            encode_fspec(&[29]),
            Err(CodecError::UnsupportedFieldNumber(29))
        );
        assert_eq!(encode_fspec(&[0]), Err(CodecError::UnsupportedFieldNumber(0)));
    }

    #[test]
    fn test_builder_marks() -> Result<()> {
        let mut builder = FspecBuilder::new();
        builder.mark(3)?;
        builder.mark(15)?;
        assert!(builder.mark(usize::MAX).is_err());
        assert!(builder.is_marked(3));
        assert!(builder.is_marked(15));
        assert!(!builder.is_marked(4));
        assert!(!builder.is_marked(0));
        assert!(!builder.is_marked(usize::MAX));
        assert_eq!(builder.finish(), vec![0x21, 0x01, 0x80]);
        Ok(())
    }

    #[test]
    fn prop_fspec_round_trip() {
        fn prop(raw: Vec<u8>) -> bool {
            let mut frns: Vec<usize> = raw.iter().map(|&b| (b as usize % 28) + 1).collect();
            let fspec = match encode_fspec(&frns) {
                Ok(fspec) => fspec,
                Err(_) => return false,
            };
            frns.sort_unstable();
            frns.dedup();
            let last_fx_clear = fspec.last().map_or(false, |o| o & FX_BIT == 0);
            let expected_len = frns.last().map_or(1, |max| (max + 6) / 7);
            derive_frn_sequence(&fspec) == frns && last_fx_clear && fspec.len() == expected_len
        }
        quickcheck(prop as fn(Vec<u8>) -> bool);
    }
}
