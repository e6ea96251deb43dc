//! Questions and resource records.
use crate::dns::error::DnsError;
use crate::dns::wire::{RecordName, WireReader};
use std::net::Ipv4Addr;

/// Class IN (the Internet).
pub const CLASS_IN: u16 = 1;

/// TTL written on every answer produced by this crate.
pub const DEFAULT_TTL: u32 = 260;

/// DNS record types (subset of QTYPEs from RFC 1035).
///
/// Only `A` is interpreted; the rest exist so logs and callers can name what
/// they see in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    // A host address
    A = 1,
    // An authoritative name server
    Ns = 2,
    // The Canonical name for an alias
    Cname = 5,
    // Marks the start of a zone of authority
    Soa = 6,
    // A domain name pointer
    Ptr = 12,
    // Mail exchange
    Mx = 15,
    // Text strings
    Txt = 16,
    // An IPv6 host address
    Aaaa = 28,
}

impl RecordType {
    /// Maps a wire TYPE value to a known record type.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::A),
            2 => Some(Self::Ns),
            5 => Some(Self::Cname),
            6 => Some(Self::Soa),
            12 => Some(Self::Ptr),
            15 => Some(Self::Mx),
            16 => Some(Self::Txt),
            28 => Some(Self::Aaaa),
            _ => None,
        }
    }

    /// Encode the record type as a 2-byte big-endian value.
    pub fn to_bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

/// The question section entry of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "tokio-dep", derive(serde::Serialize))]
pub struct QuestionSection {
    /// The domain name being queried.
    pub name: String,
    /// The type of DNS record being requested.
    pub record_type: u16,
    /// The class of the DNS record (usually IN).
    pub class: u16,
}

impl QuestionSection {
    /// A question for the IPv4 addresses of `name`.
    pub fn a_record(name: &str) -> Self {
        Self {
            name: name.to_string(),
            record_type: RecordType::A as u16,
            class: CLASS_IN,
        }
    }
}

/// A single resource record (RR) from the answer section.
///
/// The RDATA is kept raw; [`ResourceRecord::ipv4`] interprets it for
/// A/IN records.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "tokio-dep", derive(serde::Serialize))]
pub struct ResourceRecord {
    /// The NAME field as it appeared on the wire.
    pub owner: RecordName,
    /// The TYPE field (e.g. 1 for A, 28 for AAAA).
    pub record_type: u16,
    /// The CLASS field (usually IN).
    pub class: u16,
    /// Time-to-live of the record in seconds.
    pub ttl: u32,
    /// Length of the RDATA field.
    pub rd_length: u16,
    /// The raw resource data.
    pub r_data: Vec<u8>,
}

impl ResourceRecord {
    /// Reads one record, taking its RDATA length from the RDLENGTH field.
    pub fn read(reader: &mut WireReader<'_>) -> Result<Self, DnsError> {
        let owner = reader.read_name()?;
        let record_type = reader.read_u16("TYPE")?;
        let class = reader.read_u16("CLASS")?;
        let ttl = reader.read_u32("TTL")?;
        let rd_length = reader.read_u16("RDLENGTH")?;
        let r_data = reader.read_bytes(rd_length as usize, "RDATA")?.to_vec();

        Ok(Self {
            owner,
            record_type,
            class,
            ttl,
            rd_length,
            r_data,
        })
    }

    /// The known record type, if any.
    pub fn kind(&self) -> Option<RecordType> {
        RecordType::from_u16(self.record_type)
    }

    /// The IPv4 address carried by an A/IN record with a 4-byte RDATA.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        if self.record_type != RecordType::A as u16 || self.class != CLASS_IN {
            return None;
        }
        let octets: [u8; 4] = self.r_data.as_slice().try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }
}
