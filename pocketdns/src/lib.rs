//! # pocketdns
//!
//! A minimal DNS toolkit: a byte-exact codec for A-record queries and
//! responses, a table-driven responder, and small UDP client/server loops
//! around them.
//!
//! ## Features
//!
//! (All feature versions)
//! - **DNS codec** - `encode_query`, `encode_response` and `decode_response`
//!   over RFC 1035 wire bytes, with bounds-checked cursor decoding.
//! - **Resolver table** - case-insensitive name → IPv4 mapping with built-in
//!   defaults.
//! - **Terminal helpers** - validated prompts and hex dumps for CLI tools.
//!
//! ("std" feature)
//! - **Blocking UDP** - `UdpClient` and a blocking server loop over `std::net`.
//!
//! ("tokio-dep" feature)
//! - **Async UDP** - `lookup_async` and a cancellable server loop over `tokio::net`.
//! - **JSON** - load a resolver table from a JSON file and serialize decoded
//!   messages.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! pocketdns = { version = "0.1.0" }
//! pocketdns = { version = "0.1.0", features = ["std"] }
//! pocketdns = { version = "0.1.0", features = ["tokio-dep"] }
//! ```
//!
//! ## Usage Examples
//!
//! ### Answering a query from a table
//!
//! ```rust
//! use pocketdns::dns::{ResolverTable, decode_response, encode_query, respond};
//! use std::net::Ipv4Addr;
//!
//! let table = ResolverTable::default();
//! let query = encode_query("amazon.ca", None).unwrap();
//! let response = respond(&query, &table).unwrap();
//!
//! let msg = decode_response(&response).unwrap();
//! assert_eq!(msg.addresses, vec![Ipv4Addr::new(192, 165, 1, 5)]);
//! ```
//!
//! ### Blocking lookup (std)
//!
//! ```rust,ignore
//! use pocketdns::dns::resolver::UdpClient;
//!
//! let client = UdpClient::bind("127.0.0.1:10000".parse()?)?;
//! let msg = client.lookup("google.com")?;
//! println!("{:?}", msg.addresses);
//! ```
//!
//! ## License
//!
//! This project is licensed under the MIT License.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod dns;

pub mod utils;
