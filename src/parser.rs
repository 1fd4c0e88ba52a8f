//! Data block assembler and disassembler for Category 048

use tracing::{debug, trace};

use crate::catalog::{self, CATALOG};
use crate::core::{ByteReader, ByteWriter, DEFAULT_MAX_EXTENSION_OCTETS};
use crate::error::{CodecError, Result};
use crate::fspec::{decode_fspec, derive_frn_sequence, FspecBuilder};
use crate::message::Message;
use crate::uap;

/// Tunables for a [`Codec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Cap on extension octets read for any one extensible item
    pub max_extension_octets: usize,
    /// Require the header length to equal the octets actually decoded
    pub strict_length: bool,
    /// Reject data blocks whose category is not 48
    pub check_category: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            max_extension_octets: DEFAULT_MAX_EXTENSION_OCTETS,
            strict_length: true,
            check_category: true,
        }
    }
}

/// Category 048 codec
///
/// Stateless apart from its configuration, so one codec can be shared
/// freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a codec with the given configuration
    pub fn new(config: CodecConfig) -> Self {
        Codec { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode the data block at the start of `data`
    ///
    /// Only the octets covered by the header length are examined; anything
    /// after them is left alone. No partially decoded message is returned on
    /// failure.
    pub fn decode(&self, data: &[u8]) -> Result<Message> {
        let mut header = ByteReader::new(data);
        let category = header.read_u8("header category")?;
        if self.config.check_category && category != uap::CATEGORY {
            debug!("Rejecting data block of category {}", category);
            return Err(CodecError::UnexpectedCategory(category));
        }
        let length = header.read_u16("header length")?;
        let declared = length as usize;
        trace!("Header: category {} length {}", category, declared);

        if declared > data.len() {
            debug!("Declared length {} exceeds {} available octets", declared, data.len());
            return Err(CodecError::truncated("data block", declared, data.len()));
        }
        if declared < uap::HEADER_LEN {
            return Err(CodecError::LengthMismatch {
                declared,
                actual: uap::HEADER_LEN,
            });
        }

        let mut reader = ByteReader::new(&data[uap::HEADER_LEN..declared])
            .with_max_extension_octets(self.config.max_extension_octets);
        let fspec = decode_fspec(&mut reader)?;
        let frns = derive_frn_sequence(&fspec);
        trace!("FSPEC {:02X?} -> FRNs {:?}", fspec, frns);

        let mut message = Message {
            category,
            length,
            ..Default::default()
        };
        for &frn in &frns {
            let entry = catalog::lookup(frn).ok_or_else(|| {
                debug!("FRN {} has no catalog entry", frn);
                CodecError::UnsupportedFieldNumber(frn)
            })?;
            let start = reader.position();
            (entry.decode)(&mut reader, &mut message).map_err(|e| {
                debug!("Failed to decode {} (FRN {}): {}", entry.item, frn, e);
                e
            })?;
            trace!("Decoded {} from {} octet(s)", entry.item, reader.position() - start);
        }

        let consumed = uap::HEADER_LEN + reader.position();
        if self.config.strict_length && consumed != declared {
            debug!("Header declares {} octets but {} were decoded", declared, consumed);
            return Err(CodecError::LengthMismatch {
                declared,
                actual: consumed,
            });
        }

        message.fspec = fspec;
        message.frns = frns;
        Ok(message)
    }

    /// Decode every data block in a buffer of back-to-back blocks
    pub fn decode_blocks(&self, data: &[u8]) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        let mut offset = 0;
        while offset < data.len() {
            let message = self.decode(&data[offset..])?;
            trace!("Block at offset {}: {} octet(s)", offset, message.length);
            offset += message.length as usize;
            messages.push(message);
        }
        debug!("Decoded {} data block(s)", messages.len());
        Ok(messages)
    }

    /// Encode `message` as a single data block
    ///
    /// Items are written in FRN order and only `Some` items are emitted.
    /// The header category is always 48 and the length is computed here;
    /// the decode-side `category`, `length`, `fspec` and `frns` of the
    /// message are ignored.
    pub fn encode(&self, message: &Message) -> Result<Vec<u8>> {
        let mut body =
            ByteWriter::new().with_max_extension_octets(self.config.max_extension_octets);
        let mut fspec = FspecBuilder::new();

        for entry in CATALOG.iter() {
            let written = (entry.encode)(message, &mut body).map_err(|e| {
                debug!("Failed to encode {} (FRN {}): {}", entry.item, entry.frn, e);
                e
            })?;
            if written {
                fspec.mark(entry.frn)?;
                trace!("Encoded {} (FRN {})", entry.item, entry.frn);
            } else if entry.mandatory {
                debug!("Mandatory item {} is absent", entry.item);
                return Err(CodecError::missing_mandatory(entry.frn, entry.item));
            }
        }

        let fspec = fspec.finish();
        let total = uap::HEADER_LEN + fspec.len() + body.len();
        let length = u16::try_from(total).map_err(|_| CodecError::MessageTooLong(total))?;

        let mut out = ByteWriter::with_capacity(total);
        out.put_u8(uap::CATEGORY);
        out.put_u16(0);
        out.put_slice(&fspec);
        out.put_slice(body.as_slice());
        out.patch_u16(1, length);
        trace!("Encoded data block of {} octet(s), FSPEC {:02X?}", total, fspec);
        Ok(out.into_inner())
    }
}

/// Builder for a [`Codec`]
#[derive(Debug, Clone, Default)]
pub struct CodecBuilder {
    config: CodecConfig,
}

impl CodecBuilder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        CodecBuilder {
            config: CodecConfig::default(),
        }
    }

    /// Set the cap on extension octets per extensible item
    pub fn with_max_extension_octets(mut self, limit: usize) -> Self {
        self.config.max_extension_octets = limit;
        self
    }

    /// Require (or stop requiring) the header length to match the decoded octets
    pub fn with_strict_length(mut self, strict: bool) -> Self {
        self.config.strict_length = strict;
        self
    }

    /// Enable or disable the category check on decode
    pub fn with_category_check(mut self, check: bool) -> Self {
        self.config.check_category = check;
        self
    }

    /// Build the codec
    pub fn build(self) -> Codec {
        Codec::new(self.config)
    }
}
