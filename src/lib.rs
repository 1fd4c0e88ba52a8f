//! # ASTERIX Category 048 Codec
//!
//! A Rust library for decoding and encoding ASTERIX Category 048 monoradar
//! target reports.
//!
//! A Category 048 data block is a one-octet category, a two-octet
//! big-endian length and an FSPEC presence bitmap, followed by the data
//! items the FSPEC marks. This library provides:
//!
//! - FSPEC decoding, encoding and FRN derivation
//! - Typed data items for every FRN of the Category 048 UAP
//! - The numeric codecs used inside items (14-bit signed values, octal
//!   transponder codes, fixed-point scaling)
//! - A configurable [`Codec`] plus the free [`decode`] and [`encode`]
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```
//! use asterix_cat048::items::{DataSourceIdentifier, Mode3ACode, TimeOfDay};
//! use asterix_cat048::Message;
//!
//! let mut report = Message::new(DataSourceIdentifier::new(0, 1), TimeOfDay::from_seconds(3600.0)?);
//! report.mode_3a_code = Some(Mode3ACode::new(7700));
//!
//! let bytes = asterix_cat048::encode(&report)?;
//! let decoded = asterix_cat048::decode(&bytes)?;
//! assert_eq!(decoded.frns, vec![1, 2, 5]);
//! assert_eq!(decoded.mode_3a_code, report.mode_3a_code);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod core;
pub mod encoding;
pub mod error;
pub mod fspec;
pub mod items;
pub mod message;
pub mod parser;

pub use catalog::{lookup, CatalogEntry, CATALOG};
pub use error::{CodecError, Result};
pub use message::Message;
pub use parser::{Codec, CodecBuilder, CodecConfig};

/// Category 048 User Application Profile constants
pub mod uap {
    /// Category number carried in the first header octet
    pub const CATEGORY: u8 = 48;

    /// Category plus two-octet length
    pub const HEADER_LEN: usize = 3;

    /// Highest field reference number in the UAP
    pub const MAX_FRN: usize = 28;

    /// FSPEC octets needed to cover every FRN
    pub const MAX_FSPEC_OCTETS: usize = (MAX_FRN + 6) / 7;
}

/// Decode one data block with the default configuration
pub fn decode(data: &[u8]) -> Result<Message> {
    Codec::default().decode(data)
}

/// Encode one data block with the default configuration
pub fn encode(message: &Message) -> Result<Vec<u8>> {
    Codec::default().encode(message)
}
