//! Errors raised by the DNS codec.
//!
//! Every decode failure names the field it was reading and the byte offset
//! where it happened, so a caller can log the error and drop the packet.
use thiserror::Error;

/// Errors produced while encoding or decoding DNS messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    /// The domain name given to an encoder breaks the label rules
    /// (non-empty, labels of 1-63 bytes, at most 255 bytes in total).
    #[error("Invalid domain name {name:?}: {reason}")]
    InvalidDomainName { name: String, reason: &'static str },

    /// The buffer ended before a field could be read completely.
    #[error("Truncated message: {field} at offset {offset} needs {needed} byte(s), {available} left")]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A name could not be walked without running past the buffer,
    /// or it used a label form this codec does not accept at that position.
    #[error("Malformed name at offset {offset}")]
    MalformedName { offset: usize },

    /// Bytes remain after every section the header counts has been read.
    #[error("Malformed message: {count} byte(s) past the counted sections at offset {offset}")]
    TrailingBytes { offset: usize, count: usize },

    /// The message carries a question count other than one.
    #[error("Unsupported question count {qd_count} (only single-question messages are handled)")]
    UnsupportedSection { qd_count: u16 },

    /// The responder has no entry for the queried name.
    #[error("Unknown domain: {0}")]
    UnknownDomain(String),
}
