//! DNS header section (RFC 1035 §4.1.1).
//!
//! ```text
//!                                 1  1  1  1  1  1
//!   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      ID                       |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |          QDCOUNT / ANCOUNT / NSCOUNT / ARCOUNT |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```
use crate::dns::error::DnsError;
use crate::dns::wire::{HEADER_LEN, WireReader};

/// The fixed 12-byte header of a DNS message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "tokio-dep", derive(serde::Serialize))]
pub struct HeaderSection {
    /// Identifier to match requests and responses.
    pub id: u16,
    /// Flags and control bits for the DNS message.
    /// Use [`DnsHeaderFlags`]
    pub flags: u16,
    /// Number of entries in the question section.
    pub qd_count: u16,
    /// Number of resource records in the answer section.
    pub an_count: u16,
    /// Number of name server records in the authority section.
    pub ns_count: u16,
    /// Number of resource records in the additional section.
    pub ar_count: u16,
}

impl HeaderSection {
    /// Converts the header into a 12-byte array suitable for network transmission.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..2].copy_from_slice(&self.id.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.flags.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.qd_count.to_be_bytes());
        bytes[6..8].copy_from_slice(&self.an_count.to_be_bytes());
        bytes[8..10].copy_from_slice(&self.ns_count.to_be_bytes());
        bytes[10..12].copy_from_slice(&self.ar_count.to_be_bytes());
        bytes
    }

    /// Reads the header from the start of `reader`.
    ///
    /// Fails with `Truncated` (field `HEADER`) if fewer than 12 bytes remain.
    pub fn read(reader: &mut WireReader<'_>) -> Result<Self, DnsError> {
        let bytes = reader.read_bytes(HEADER_LEN, "HEADER")?;
        let field = |i: usize| u16::from_be_bytes([bytes[i], bytes[i + 1]]);

        Ok(Self {
            id: field(0),
            flags: field(2),
            qd_count: field(4),
            an_count: field(6),
            ns_count: field(8),
            ar_count: field(10),
        })
    }

    /// Structured view of [`HeaderSection::flags`].
    pub fn decoded_flags(&self) -> DnsHeaderFlags {
        DnsHeaderFlags::from_u16(self.flags)
    }
}

/// Represents the 16-bit DNS flags field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DnsHeaderFlags {
    /// Query/Response flag
    pub qr: bool,
    /// Operation code, see [`OpCodeOptions`]
    pub opcode: u8,
    /// Authoritative Answer
    pub aa: bool,
    /// Truncation flag
    pub tc: bool,
    /// Recursion Desired
    pub rd: bool,
    /// Recursion Available
    pub ra: bool,
    /// Reserved bits
    pub z: u8,
    /// Response code
    pub rcode: u8,
}

// 3-15 reserved for future use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCodeOptions {
    StandardQuery = 0,
    InverseQuery = 1,
    ServerStatusRequest = 2,
}

impl DnsHeaderFlags {
    /// Flags of an outgoing standard query: only RD set (`0x0100`).
    pub const fn query() -> Self {
        Self {
            qr: false,
            opcode: OpCodeOptions::StandardQuery as u8,
            aa: false,
            tc: false,
            rd: true,
            ra: false,
            z: 0,
            rcode: 0,
        }
    }

    /// Flags of an authoritative, successful answer: QR and AA set (`0x8400`).
    pub const fn authoritative_answer() -> Self {
        Self {
            qr: true,
            opcode: OpCodeOptions::StandardQuery as u8,
            aa: true,
            tc: false,
            rd: false,
            ra: false,
            z: 0,
            rcode: 0,
        }
    }

    /// Encode the flags into a 16-bit integer.
    pub fn to_u16(self) -> u16 {
        ((self.qr as u16) << 15)
            | ((self.opcode as u16 & 0b1111) << 11)
            | ((self.aa as u16) << 10)
            | ((self.tc as u16) << 9)
            | ((self.rd as u16) << 8)
            | ((self.ra as u16) << 7)
            | ((self.z as u16 & 0b111) << 4)
            | (self.rcode as u16 & 0b1111)
    }

    /// Decode from a 16-bit integer into structured flags.
    pub fn from_u16(value: u16) -> Self {
        Self {
            qr: (value >> 15) & 1 != 0,
            opcode: ((value >> 11) & 0b1111) as u8,
            aa: (value >> 10) & 1 != 0,
            tc: (value >> 9) & 1 != 0,
            rd: (value >> 8) & 1 != 0,
            ra: (value >> 7) & 1 != 0,
            z: ((value >> 4) & 0b111) as u8,
            rcode: (value & 0b1111) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_flag_values() {
        assert_eq!(DnsHeaderFlags::query().to_u16(), 0x0100);
        assert_eq!(DnsHeaderFlags::authoritative_answer().to_u16(), 0x8400);
    }

    #[test]
    fn test_dns_header_flags_encode_decode() {
        let flags = DnsHeaderFlags {
            qr: true,
            opcode: OpCodeOptions::ServerStatusRequest as u8,
            aa: true,
            tc: false,
            rd: true,
            ra: false,
            z: 3,
            rcode: 5,
        };

        assert_eq!(DnsHeaderFlags::from_u16(flags.to_u16()), flags);
    }

    #[test]
    fn test_header_read_and_to_bytes() {
        let bytes = [
            0x26, 0x8c, 0x84, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0xff,
        ];
        let mut reader = WireReader::new(&bytes);
        let header = HeaderSection::read(&mut reader).unwrap();

        assert_eq!(header.id, 0x268c);
        assert_eq!(header.qd_count, 1);
        assert_eq!(header.an_count, 2);
        assert!(header.decoded_flags().qr);
        assert!(header.decoded_flags().aa);
        assert_eq!(reader.position(), 12);
        assert_eq!(header.to_bytes(), bytes[..12]);
    }

    #[test]
    fn test_header_read_short_buffer() {
        let bytes = [0u8; 11];
        let mut reader = WireReader::new(&bytes);
        assert!(matches!(
            HeaderSection::read(&mut reader),
            Err(DnsError::Truncated {
                field: "HEADER",
                offset: 0,
                needed: 12,
                available: 11,
            })
        ));
    }
}
