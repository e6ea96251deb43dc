//! # Wire Format Primitives
//!
//! Cursor-based readers and writers over raw DNS message bytes. All multi-byte
//! integers are big-endian (network byte order), as required by RFC 1035 §2.3.2.
//!
//! [`WireReader`] never indexes past the end of its buffer: every read checks
//! the remaining length first and fails with [`DnsError::Truncated`] (or
//! [`DnsError::MalformedName`] while walking a name) instead of panicking.
//! This is what makes the decoder total on truncated or hostile input.
//!
//! Writing goes through [`WireWrite`], a small extension trait over `Vec<u8>`.
//! Domain names are written by [`write_labels`](crate::dns::name::write_labels).
use crate::dns::error::DnsError;

/// Size of the fixed DNS header.
pub const HEADER_LEN: usize = 12;

/// Highest two bits set: the byte starts a compression pointer.
const POINTER_MASK: u8 = 0b1100_0000;

/// Owner name of every answer this crate writes: a pointer to offset 12,
/// where the single question name starts.
pub const QUESTION_POINTER: u16 = 0xC000 | HEADER_LEN as u16;

/// Longest name allowed on the wire, terminator included (RFC 1035 §3.1).
pub const MAX_NAME_LEN: usize = 255;

/// Longest single label.
pub const MAX_LABEL_LEN: usize = 63;

/// The NAME field of a resource record, as found on the wire.
///
/// Pointers are recorded, never followed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "tokio-dep", derive(serde::Serialize))]
pub enum RecordName {
    /// The whole name is a 2-byte pointer to this message offset.
    Pointer(u16),
    /// Literal labels joined with `.`, optionally ending in a pointer to a
    /// shared suffix elsewhere in the message.
    Labels { name: String, suffix: Option<u16> },
}

/// A read cursor over a DNS message.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Starts reading at `pos`. A position past the end simply leaves nothing to read.
    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self {
            buf,
            pos: pos.min(buf.len()),
        }
    }

    /// Current offset from the start of the message.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Fails with `Truncated` unless `needed` more bytes are available.
    fn require(&self, needed: usize, field: &'static str) -> Result<(), DnsError> {
        let available = self.remaining();
        if available < needed {
            return Err(DnsError::Truncated {
                field,
                offset: self.pos,
                needed,
                available,
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, DnsError> {
        self.require(1, field)?;
        let value = self.buf[self.pos];
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, DnsError> {
        let bytes = self.read_bytes(2, field)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, DnsError> {
        let bytes = self.read_bytes(4, field)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads exactly `len` bytes, borrowing them from the underlying buffer.
    pub fn read_bytes(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], DnsError> {
        self.require(len, field)?;
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Reads a NAME field: a bare pointer, or a label sequence ending either
    /// in the root label or in a pointer.
    ///
    /// Each iteration consumes at least one byte, so the walk is bounded by the
    /// buffer length. Names longer than 255 bytes, reserved label types
    /// (`01`/`10` prefixes) and sequences that run off the buffer all fail with
    /// `MalformedName` at the offset where the name started.
    pub fn read_name(&mut self) -> Result<RecordName, DnsError> {
        let start = self.pos;
        let malformed = DnsError::MalformedName { offset: start };
        let mut labels: Vec<String> = Vec::new();
        let mut wire_len = 0usize;

        loop {
            let len = self.read_u8("NAME").map_err(|_| malformed.clone())?;

            if len & POINTER_MASK == POINTER_MASK {
                let low = self.read_u8("NAME").map_err(|_| malformed.clone())?;
                let offset = u16::from_be_bytes([len & !POINTER_MASK, low]);
                if labels.is_empty() {
                    return Ok(RecordName::Pointer(offset));
                }
                return Ok(RecordName::Labels {
                    name: labels.join("."),
                    suffix: Some(offset),
                });
            }
            if len & POINTER_MASK != 0 {
                return Err(malformed);
            }

            wire_len += 1 + len as usize;
            if wire_len > MAX_NAME_LEN {
                return Err(malformed);
            }
            if len == 0 {
                return Ok(RecordName::Labels {
                    name: labels.join("."),
                    suffix: None,
                });
            }

            let label = self
                .read_bytes(len as usize, "NAME")
                .map_err(|_| malformed.clone())?;
            labels.push(String::from_utf8_lossy(label).into_owned());
        }
    }
}

/// Big-endian append helpers for building messages.
pub trait WireWrite {
    fn put_u16(&mut self, value: u16);
    fn put_u32(&mut self, value: u32);
}

impl WireWrite for Vec<u8> {
    fn put_u16(&mut self, value: u16) {
        self.extend_from_slice(&value.to_be_bytes());
    }

    fn put_u32(&mut self, value: u32) {
        self.extend_from_slice(&value.to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_reads_big_endian() {
        let buf = [0x12, 0x34, 0x00, 0x00, 0x01, 0x04, 0xff];
        let mut r = WireReader::new(&buf);

        assert_eq!(r.read_u16("ID").unwrap(), 0x1234);
        assert_eq!(r.read_u32("TTL").unwrap(), 260);
        assert_eq!(r.read_u8("X").unwrap(), 0xff);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_reader_fails_instead_of_overrunning() {
        let buf = [0x00, 0x01, 0x02];
        let mut r = WireReader::at(&buf, 2);

        let err = r.read_u16("TYPE").unwrap_err();
        assert_eq!(
            err,
            DnsError::Truncated {
                field: "TYPE",
                offset: 2,
                needed: 2,
                available: 1,
            }
        );
        // a failed read does not move the cursor
        assert_eq!(r.position(), 2);
    }

    #[test]
    fn test_reader_position_past_end() {
        let buf = [0u8; 4];
        let mut r = WireReader::at(&buf, 10);
        assert_eq!(r.remaining(), 0);
        assert!(r.read_u8("X").is_err());
    }

    #[test]
    fn test_read_name_pointer() {
        let buf = [0xc0, 0x0c, 0x00, 0x01];
        let mut r = WireReader::new(&buf);

        assert_eq!(r.read_name().unwrap(), RecordName::Pointer(12));
        assert_eq!(r.position(), 2);
    }

    #[test]
    fn test_read_name_literal_labels() {
        let buf = [
            3, b'w', b'w', b'w', 7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm',
            0, 0xaa,
        ];
        let mut r = WireReader::new(&buf);

        assert_eq!(
            r.read_name().unwrap(),
            RecordName::Labels {
                name: "www.example.com".to_string(),
                suffix: None,
            }
        );
        assert_eq!(r.position(), 17);
    }

    #[test]
    fn test_read_name_labels_then_pointer() {
        let buf = [4, b'm', b'a', b'i', b'l', 0xc0, 0x10];
        let mut r = WireReader::new(&buf);

        assert_eq!(
            r.read_name().unwrap(),
            RecordName::Labels {
                name: "mail".to_string(),
                suffix: Some(16),
            }
        );
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_read_name_without_terminator_is_malformed() {
        let buf = [0u8, 0, 6, b'g', b'o', b'o', b'g', b'l', b'e'];
        let mut r = WireReader::at(&buf, 2);

        assert_eq!(r.read_name(), Err(DnsError::MalformedName { offset: 2 }));
    }

    #[test]
    fn test_read_name_rejects_reserved_label_type() {
        let buf = [0b0100_0001, b'a', 0];
        let mut r = WireReader::new(&buf);
        assert_eq!(r.read_name(), Err(DnsError::MalformedName { offset: 0 }));
    }

    #[test]
    fn test_writer_appends_big_endian() {
        let mut out: Vec<u8> = Vec::new();
        out.put_u16(0x8400);
        out.put_u32(260);
        assert_eq!(out, vec![0x84, 0x00, 0x00, 0x00, 0x01, 0x04]);
    }
}
