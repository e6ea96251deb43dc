//! Query encoding.
use crate::dns::name::write_labels;
use crate::dns::error::DnsError;
use crate::dns::header::{DnsHeaderFlags, HeaderSection};
use crate::dns::record::QuestionSection;
use crate::dns::wire::WireWrite;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Generates a random 16-bit ID for a DNS query.
///
/// The ID only correlates a response with its query; it is not a security
/// boundary, so a small non-cryptographic generator is enough.
pub fn generate_id() -> u16 {
    let mut thread_rng = rand::rng();
    let mut rng = SmallRng::from_rng(&mut thread_rng);

    rng.random::<u16>()
}

/// Encodes a standard A/IN query for `domain`.
///
/// Layout: ID, flags `0x0100` (RD only), QDCOUNT=1, ANCOUNT=NSCOUNT=ARCOUNT=0,
/// then the question name, QTYPE=1 and QCLASS=1. When `transaction_id` is
/// `None` a random one is generated with [`generate_id`].
///
/// # Errors
/// [`DnsError::InvalidDomainName`] if `domain` is empty, has an empty or
/// over-long label, or is longer than 255 bytes on the wire.
///
/// # Example
/// ```rust
/// use pocketdns::dns::encode_query;
///
/// let bytes = encode_query("google.com", Some(0x268c)).unwrap();
/// assert_eq!(&bytes[..4], &[0x26, 0x8c, 0x01, 0x00]);
/// assert_eq!(&bytes[bytes.len() - 4..], &[0x00, 0x01, 0x00, 0x01]);
/// ```
pub fn encode_query(domain: &str, transaction_id: Option<u16>) -> Result<Vec<u8>, DnsError> {
    let question = QuestionSection::a_record(domain);
    let header = HeaderSection {
        id: transaction_id.unwrap_or_else(generate_id),
        flags: DnsHeaderFlags::query().to_u16(),
        qd_count: 1,
        an_count: 0,
        ns_count: 0,
        ar_count: 0,
    };

    let mut message: Vec<u8> = Vec::with_capacity(12 + domain.len() + 6);
    message.extend_from_slice(&header.to_bytes());

    write_labels(&question.name, &mut message)?;
    message.put_u16(question.record_type);
    message.put_u16(question.class);
    Ok(message)
}
