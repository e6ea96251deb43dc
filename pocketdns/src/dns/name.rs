//! Domain name validation and label encoding (RFC 1035 §3.1).
//!
//! Names are written as length-prefixed labels ending in the root label:
//!
//! ```text
//! google.com  ->  06 67 6f 6f 67 6c 65 03 63 6f 6d 00
//! ```
//!
//! ```rust
//! use pocketdns::dns::name::write_labels;
//!
//! let mut message = Vec::new();
//! write_labels("www.example.com", &mut message).unwrap();
//! assert_eq!(message.len(), 17);
//! ```
use crate::dns::error::DnsError;
use crate::dns::wire::{MAX_LABEL_LEN, MAX_NAME_LEN};

/// Splits `name` into labels and checks them against the DNS limits.
///
/// A single trailing dot (fully-qualified form) is accepted and ignored.
/// The name must be non-empty, every label 1-63 bytes, and the encoded form
/// (length bytes plus root terminator) at most 255 bytes.
pub fn validate_domain(name: &str) -> Result<Vec<&str>, DnsError> {
    let invalid = |reason: &'static str| DnsError::InvalidDomainName {
        name: name.to_string(),
        reason,
    };

    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() {
        return Err(invalid("name is empty"));
    }

    let labels: Vec<&str> = trimmed.split('.').collect();
    let mut wire_len = 1;
    for label in &labels {
        if label.is_empty() {
            return Err(invalid("empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(invalid("label longer than 63 bytes"));
        }
        wire_len += 1 + label.len();
    }
    if wire_len > MAX_NAME_LEN {
        return Err(invalid("name longer than 255 bytes"));
    }

    Ok(labels)
}

/// Appends `name` as a length-prefixed label sequence ending in the root label.
pub fn write_labels(name: &str, message: &mut Vec<u8>) -> Result<(), DnsError> {
    for label in validate_domain(name)? {
        message.push(label.len() as u8);
        message.extend_from_slice(label.as_bytes());
    }
    message.push(0);
    Ok(())
}
