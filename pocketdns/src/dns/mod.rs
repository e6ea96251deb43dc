//! # pocketdns DNS codec
//!
//! Builds A/IN queries, answers them, and decodes the answers, for the small
//! subset of RFC 1035 a toy resolver needs: one question per message, A
//! records in the answer section, and answer owners written as a pointer
//! back at the question.
//!
//! ## Modules
//!
//! - `wire`: bounds-checked read cursor and the name reader.
//! - `header`: the 12-byte header and its flag bits.
//! - `name`: domain validation and label encoding.
//! - `record`: question entries and resource records.
//! - `query` / `response`: the three codec operations.
//! - `table` / `responder`: the name → addresses table and the query answerer.
//! - `resolver`: UDP client and server loops (`std` / `tokio-dep`).
//!
//! ## Quick Example
//!
//! ```rust
//! use pocketdns::dns::{decode_response, encode_query, encode_response};
//! use std::net::Ipv4Addr;
//!
//! let query = encode_query("google.com", Some(0x268c)).unwrap();
//! let response = encode_response(
//!     &query,
//!     &[Ipv4Addr::new(192, 165, 1, 1), Ipv4Addr::new(192, 165, 1, 10)],
//! )
//! .unwrap();
//!
//! let msg = decode_response(&response).unwrap();
//! assert_eq!(msg.header.id, 0x268c);
//! assert_eq!(msg.addresses.len(), 2);
//! ```
//!
//! Decoding never panics: short or inconsistent input yields a
//! [`DnsError`] naming the field and offset that could not be read.
pub mod error;
pub mod header;
pub mod name;
pub mod query;
pub mod record;
pub mod resolver;
pub mod responder;
pub mod response;
pub mod table;
pub mod wire;

pub use error::DnsError;
pub use header::{DnsHeaderFlags, HeaderSection};
pub use query::encode_query;
pub use record::{QuestionSection, RecordType, ResourceRecord};
pub use responder::respond;
pub use response::{DnsMessage, decode_response, encode_response};
pub use table::{ResolverTable, TableError};
pub use wire::RecordName;
