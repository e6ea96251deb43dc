//! Response decoding and encoding.
//!
//! [`decode_response`] is a single cursor-driven parser: every answer's size
//! comes from its own RDLENGTH field, and the owner name may be either a
//! compression pointer or a literal label sequence. Nothing is inferred from
//! fixed offsets past the header.
//!
//! [`encode_response`] is the server-side mirror. It echoes the query's ID and
//! question and appends one A/IN answer per address, each owned by a pointer
//! to the question name at offset 12.
use crate::dns::error::DnsError;
use crate::dns::header::{DnsHeaderFlags, HeaderSection};
use crate::dns::record::{CLASS_IN, DEFAULT_TTL, QuestionSection, RecordType, ResourceRecord};
use crate::dns::wire::{HEADER_LEN, QUESTION_POINTER, RecordName, WireReader, WireWrite};
use std::net::Ipv4Addr;

/// A decoded DNS response.
///
/// `answers` holds every record of the answer section in wire order, whatever
/// its type. `addresses` holds the IPv4 addresses of the A/IN records among
/// them, in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "tokio-dep", derive(serde::Serialize))]
pub struct DnsMessage {
    pub header: HeaderSection,
    // The question echoed back by the server
    pub question: QuestionSection,
    // RRs answering the question
    pub answers: Vec<ResourceRecord>,
    // IPv4 addresses extracted from A/IN answers
    pub addresses: Vec<Ipv4Addr>,
}

impl DnsMessage {
    /// Response code from the header flags.
    pub fn rcode(&self) -> u8 {
        self.header.decoded_flags().rcode
    }
}

/// Reads the single question that follows the header.
///
/// The name must be a literal label sequence: at offset 12 there is nothing
/// earlier for a pointer to refer to.
pub(crate) fn read_question(reader: &mut WireReader<'_>) -> Result<QuestionSection, DnsError> {
    let start = reader.position();
    let name = match reader.read_name()? {
        RecordName::Labels { name, suffix: None } => name,
        _ => return Err(DnsError::MalformedName { offset: start }),
    };
    let record_type = reader.read_u16("QTYPE")?;
    let class = reader.read_u16("QCLASS")?;

    Ok(QuestionSection {
        name,
        record_type,
        class,
    })
}

/// Reads the header and checks that it announces exactly one question.
pub(crate) fn read_single_question_header(
    reader: &mut WireReader<'_>,
) -> Result<HeaderSection, DnsError> {
    let header = HeaderSection::read(reader)?;
    if header.qd_count != 1 {
        return Err(DnsError::UnsupportedSection {
            qd_count: header.qd_count,
        });
    }
    Ok(header)
}

/// Smallest resource record on the wire: a root owner name and the fixed fields.
const MIN_RECORD_LEN: usize = 11;

/// Decodes a response into its header, question, answers and A addresses.
///
/// Unknown record types are kept in `answers` and left out of `addresses`;
/// they are never an error. Authority and additional records are walked with
/// the same bounds checks and discarded. The header counts must account for
/// the whole buffer.
///
/// # Errors
/// - [`DnsError::Truncated`] when the buffer is shorter than the header or
///   than any field or RDATA it declares.
/// - [`DnsError::MalformedName`] when a name runs past the buffer.
/// - [`DnsError::UnsupportedSection`] when QDCOUNT is not 1.
/// - [`DnsError::TrailingBytes`] when bytes remain after the counted records.
pub fn decode_response(bytes: &[u8]) -> Result<DnsMessage, DnsError> {
    let mut reader = WireReader::new(bytes);
    let header = read_single_question_header(&mut reader)?;
    let question = read_question(&mut reader)?;

    let capacity = (header.an_count as usize).min(reader.remaining() / MIN_RECORD_LEN);
    let mut answers = Vec::with_capacity(capacity);
    for _ in 0..header.an_count {
        answers.push(ResourceRecord::read(&mut reader)?);
    }

    let extra = u32::from(header.ns_count) + u32::from(header.ar_count);
    for _ in 0..extra {
        ResourceRecord::read(&mut reader)?;
    }

    if reader.remaining() != 0 {
        return Err(DnsError::TrailingBytes {
            offset: reader.position(),
            count: reader.remaining(),
        });
    }

    let addresses = answers.iter().filter_map(ResourceRecord::ipv4).collect();

    Ok(DnsMessage {
        header,
        question,
        answers,
        addresses,
    })
}

/// Builds the response to `query_bytes` carrying `answer_ips` as A records.
///
/// The header echoes the query ID with flags `0x8400` (QR and AA), QDCOUNT=1
/// and ANCOUNT equal to the number of addresses. The question section is
/// copied verbatim, whatever bytes its labels hold. Each answer is `c0 0c`,
/// TYPE=1, CLASS=1, TTL=260, RDLENGTH=4 and the address octets. An empty list
/// gives ANCOUNT=0.
///
/// # Errors
/// The query itself is validated: a short header is `Truncated`, a QDCOUNT
/// other than 1 is `UnsupportedSection`, and an unterminated question name is
/// `MalformedName`.
pub fn encode_response(query_bytes: &[u8], answer_ips: &[Ipv4Addr]) -> Result<Vec<u8>, DnsError> {
    let mut reader = WireReader::new(query_bytes);
    let query_header = read_single_question_header(&mut reader)?;
    read_question(&mut reader)?;
    let question_end = reader.position();

    let answer_ips = &answer_ips[..answer_ips.len().min(u16::MAX as usize)];
    let header = HeaderSection {
        id: query_header.id,
        flags: DnsHeaderFlags::authoritative_answer().to_u16(),
        qd_count: 1,
        an_count: answer_ips.len() as u16,
        ns_count: 0,
        ar_count: 0,
    };

    let mut message: Vec<u8> = Vec::with_capacity(question_end + answer_ips.len() * 16);
    message.extend_from_slice(&header.to_bytes());
    message.extend_from_slice(&query_bytes[HEADER_LEN..question_end]);

    for ip in answer_ips {
        message.put_u16(QUESTION_POINTER);
        message.put_u16(RecordType::A as u16);
        message.put_u16(CLASS_IN);
        message.put_u32(DEFAULT_TTL);
        message.put_u16(4);
        message.extend_from_slice(&ip.octets());
    }

    Ok(message)
}
