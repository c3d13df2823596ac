//! DER Signature Encoding
//!
//! ```text
//! 30 len
//!    02 len_r r
//!    02 len_s s
//! ```
//!
//! INTEGERs are minimal big-endian two's complement. A 0x00 byte is
//! prepended when the magnitude's top bit is set so the value reads as
//! non-negative. Decoding is strict: any other shape is malformed.

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// ASN.1 SEQUENCE tag
pub const TAG_SEQUENCE: u8 = 0x30;

/// ASN.1 INTEGER tag
pub const TAG_INTEGER: u8 = 0x02;

/// Encode a definite length (short form below 128)
fn encode_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

/// Encode an unsigned INTEGER
pub fn encode_integer(value: &BigUint, out: &mut Vec<u8>) {
    // to_bytes_be of zero is [0], already minimal
    let magnitude = value.to_bytes_be();
    let pad = magnitude[0] & 0x80 != 0;

    out.push(TAG_INTEGER);
    encode_length(magnitude.len() + pad as usize, out);
    if pad {
        out.push(0x00);
    }
    out.extend_from_slice(&magnitude);
}

/// Encode `SEQUENCE { INTEGER r, INTEGER s }`
pub fn encode_signature(r: &BigUint, s: &BigUint) -> Vec<u8> {
    let mut body = Vec::with_capacity(70);
    encode_integer(r, &mut body);
    encode_integer(s, &mut body);

    let mut out = Vec::with_capacity(body.len() + 4);
    out.push(TAG_SEQUENCE);
    encode_length(body.len(), &mut out);
    out.extend_from_slice(&body);
    out
}

/// Byte cursor over DER input
struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes }
    }

    fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn byte(&mut self) -> Result<u8> {
        let (&b, rest) = self
            .bytes
            .split_first()
            .ok_or(Error::MalformedSignature("unexpected end of input"))?;
        self.bytes = rest;
        Ok(b)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.bytes.len() {
            return Err(Error::MalformedSignature("length exceeds input"));
        }
        let (head, rest) = self.bytes.split_at(len);
        self.bytes = rest;
        Ok(head)
    }

    fn expect_tag(&mut self, tag: u8) -> Result<()> {
        if self.byte()? != tag {
            return Err(Error::MalformedSignature("unexpected tag"));
        }
        Ok(())
    }

    fn length(&mut self) -> Result<usize> {
        let first = self.byte()?;
        if first < 0x80 {
            return Ok(first as usize);
        }

        let count = (first & 0x7f) as usize;
        if count == 0 || count > std::mem::size_of::<usize>() {
            return Err(Error::MalformedSignature("unsupported length form"));
        }
        let bytes = self.take(count)?;
        if bytes[0] == 0 {
            return Err(Error::MalformedSignature("non-minimal length"));
        }
        let len = bytes.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
        if len < 0x80 {
            return Err(Error::MalformedSignature("non-minimal length"));
        }
        Ok(len)
    }

    fn integer(&mut self) -> Result<BigUint> {
        self.expect_tag(TAG_INTEGER)?;
        let len = self.length()?;
        let content = self.take(len)?;

        match content {
            [] => Err(Error::MalformedSignature("empty integer")),
            [first, ..] if first & 0x80 != 0 => {
                Err(Error::MalformedSignature("negative integer"))
            }
            [0x00, second, ..] if second & 0x80 == 0 => {
                Err(Error::MalformedSignature("non-minimal integer"))
            }
            _ => Ok(BigUint::from_bytes_be(content)),
        }
    }
}

/// Decode `SEQUENCE { INTEGER r, INTEGER s }`, rejecting trailing data
pub fn decode_signature(bytes: &[u8]) -> Result<(BigUint, BigUint)> {
    let mut outer = Reader::new(bytes);
    outer.expect_tag(TAG_SEQUENCE)?;
    let len = outer.length()?;
    let body = outer.take(len)?;
    if !outer.is_empty() {
        return Err(Error::MalformedSignature("trailing bytes after sequence"));
    }

    let mut inner = Reader::new(body);
    let r = inner.integer()?;
    let s = inner.integer()?;
    if !inner.is_empty() {
        return Err(Error::MalformedSignature("sequence length mismatch"));
    }

    Ok((r, s))
}
