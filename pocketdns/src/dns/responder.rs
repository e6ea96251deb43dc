//! Table-driven answering of A queries.
use crate::dns::error::DnsError;
use crate::dns::response::{encode_response, read_question, read_single_question_header};
use crate::dns::table::ResolverTable;
use crate::dns::wire::WireReader;

/// Extracts the queried name from a single-question query.
pub fn query_name(query_bytes: &[u8]) -> Result<String, DnsError> {
    let mut reader = WireReader::new(query_bytes);
    read_single_question_header(&mut reader)?;
    Ok(read_question(&mut reader)?.name)
}

/// Answers `query_bytes` from `table`.
///
/// # Errors
/// [`DnsError::UnknownDomain`] when the name has no entry, plus any error
/// [`encode_response`] raises for a malformed query.
pub fn respond(query_bytes: &[u8], table: &ResolverTable) -> Result<Vec<u8>, DnsError> {
    let name = query_name(query_bytes)?;
    let ips = table
        .lookup(&name)
        .ok_or_else(|| DnsError::UnknownDomain(name.clone()))?;

    tracing::debug!(domain = %name, answers = ips.len(), "answering from table");
    encode_response(query_bytes, ips)
}
