//! Minimal DER reader for SubjectPublicKeyInfo.
//!
//! Only the shape X.509 SPKI structures actually take is accepted:
//!
//! ```text
//! SEQUENCE {
//!     SEQUENCE { ... }      -- AlgorithmIdentifier, skipped
//!     BIT STRING            -- unused-bits byte (must be 0) || key bytes
//! }
//! ```
//!
//! Anything else is rejected with a [`DerError`]. This is not an ASN.1
//! library: the two node kinds are a closed set ([`Tag`]) and lengths are
//! bounded to [`MAX_LENGTH_BYTES`] subsequent bytes.

use std::fmt;

/// Maximum number of subsequent length bytes in the long length form.
pub const MAX_LENGTH_BYTES: u8 = 3;

/// Node kinds understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Sequence,
    BitString,
}

impl Tag {
    /// DER identifier octet.
    pub const fn byte(self) -> u8 {
        match self {
            Self::Sequence => 0x30,
            Self::BitString => 0x03,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => f.write_str("SEQUENCE"),
            Self::BitString => f.write_str("BIT STRING"),
        }
    }
}

/// Where unconsumed bytes were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Inside the outer SEQUENCE, after the BIT STRING.
    Sequence,
    /// After the outer SEQUENCE.
    Spki,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => f.write_str("SEQUENCE"),
            Self::Spki => f.write_str("SPKI"),
        }
    }
}

/// SPKI decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DerError {
    #[error("unexpected tag: expected {expected}, found 0x{found:02x}")]
    TagMismatch { expected: Tag, found: u8 },

    /// Long length form with zero or more than [`MAX_LENGTH_BYTES`] bytes.
    #[error("length form too long: {length_bytes} length bytes")]
    LengthUnsupported { length_bytes: u8 },

    #[error("trailing data after {location}: {remaining} bytes")]
    TrailingData { location: Location, remaining: usize },

    #[error("non-zero unused bits unsupported: {unused}")]
    NonZeroUnusedBits { unused: u8 },

    #[error("truncated input: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
}

/// Extract the raw public key bytes from a DER SubjectPublicKeyInfo.
///
/// The returned bytes are the BIT STRING payload, e.g. the uncompressed
/// EC point (`04 || X || Y`) or the DER `RSAPublicKey`.
pub fn raw_public_key(spki: &[u8]) -> Result<Vec<u8>, DerError> {
    let mut input = Reader::new(spki);
    let mut body = input.take_sequence()?;
    input.finish(Location::Spki)?;

    // AlgorithmIdentifier: must be a well-formed SEQUENCE, contents unused.
    let _algorithm = body.take_sequence()?;
    let key = body.take_bit_string()?;
    body.finish(Location::Sequence)?;

    Ok(key.to_vec())
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DerError> {
        if n > self.bytes.len() {
            return Err(DerError::Truncated {
                needed: n,
                available: self.bytes.len(),
            });
        }
        let (head, rest) = self.bytes.split_at(n);
        self.bytes = rest;
        Ok(head)
    }

    fn take_byte(&mut self) -> Result<u8, DerError> {
        Ok(self.take(1)?[0])
    }

    fn take_length(&mut self) -> Result<usize, DerError> {
        let first = self.take_byte()?;
        if first & 0x80 == 0 {
            return Ok(usize::from(first));
        }

        let length_bytes = first & 0x7f;
        if length_bytes == 0 || length_bytes > MAX_LENGTH_BYTES {
            return Err(DerError::LengthUnsupported { length_bytes });
        }

        let mut length = 0usize;
        for &b in self.take(usize::from(length_bytes))? {
            length = (length << 8) | usize::from(b);
        }
        Ok(length)
    }

    /// Read one tag-length-value node and return its contents.
    fn take_node(&mut self, tag: Tag) -> Result<&'a [u8], DerError> {
        let found = self.take_byte()?;
        if found != tag.byte() {
            return Err(DerError::TagMismatch {
                expected: tag,
                found,
            });
        }
        let length = self.take_length()?;
        self.take(length)
    }

    fn take_sequence(&mut self) -> Result<Reader<'a>, DerError> {
        self.take_node(Tag::Sequence).map(Reader::new)
    }

    fn take_bit_string(&mut self) -> Result<&'a [u8], DerError> {
        let mut contents = Reader::new(self.take_node(Tag::BitString)?);
        let unused = contents.take_byte()?;
        if unused != 0 {
            return Err(DerError::NonZeroUnusedBits { unused });
        }
        Ok(contents.bytes)
    }

    fn finish(self, location: Location) -> Result<(), DerError> {
        if self.bytes.is_empty() {
            Ok(())
        } else {
            Err(DerError::TrailingData {
                location,
                remaining: self.bytes.len(),
            })
        }
    }
}
