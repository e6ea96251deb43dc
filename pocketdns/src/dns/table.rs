//! # Resolver Table
//!
//! The name → addresses mapping a responder answers from. It is a plain value:
//! build it once at startup (from the defaults, from pairs, or from a JSON
//! file with `tokio-dep`) and hand it to the server loop.
//!
//! Keys are stored lowercase without a trailing dot, and lookups are
//! case-insensitive.
//!
//! ```rust
//! use pocketdns::dns::ResolverTable;
//! use std::net::Ipv4Addr;
//!
//! let table = ResolverTable::default();
//! assert_eq!(table.len(), 5);
//! assert_eq!(
//!     table.lookup("YouTube.com."),
//!     Some(&[Ipv4Addr::new(192, 165, 1, 2)][..])
//! );
//! ```
use crate::dns::name::validate_domain;
use crate::dns::error::DnsError;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Entries served when no table file is given.
static DEFAULT_ENTRIES: &[(&str, &[&str])] = &[
    ("google.com", &["192.165.1.1", "192.165.1.10"]),
    ("youtube.com", &["192.165.1.2"]),
    ("uwaterloo.ca", &["192.165.1.3"]),
    ("wikipedia.org", &["192.165.1.4"]),
    ("amazon.ca", &["192.165.1.5"]),
];

/// Errors raised while building a [`ResolverTable`].
#[derive(Error, Debug)]
pub enum TableError {
    #[error(transparent)]
    Domain(#[from] DnsError),

    #[error("Invalid IPv4 address {address:?} for {domain}")]
    InvalidAddress { domain: String, address: String },

    #[cfg(feature = "tokio-dep")]
    #[error("Invalid table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not read table file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverTable {
    entries: HashMap<String, Vec<Ipv4Addr>>,
}

/// Canonical key for `domain`: validated, lowercase, no trailing dot.
fn normalize(domain: &str) -> Result<String, DnsError> {
    Ok(validate_domain(domain)?.join(".").to_ascii_lowercase())
}

/// The built-in table used when no configuration is supplied.
impl Default for ResolverTable {
    fn default() -> Self {
        let pairs = DEFAULT_ENTRIES
            .iter()
            .map(|(domain, ips)| (*domain, ips.iter().copied()));
        // the built-in entries are known to be valid
        Self::from_pairs(pairs).unwrap_or_else(|_| Self::new())
    }
}

impl ResolverTable {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Builds a table from `(domain, [ipv4 string, ...])` pairs.
    pub fn from_pairs<'a, I, A>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (&'a str, A)>,
        A: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::new();
        for (domain, addresses) in pairs {
            let mut ips = Vec::new();
            for address in addresses {
                let ip = address
                    .trim()
                    .parse::<Ipv4Addr>()
                    .map_err(|_| TableError::InvalidAddress {
                        domain: domain.to_string(),
                        address: address.to_string(),
                    })?;
                ips.push(ip);
            }
            table.insert(domain, ips)?;
        }
        Ok(table)
    }

    /// Adds or replaces the addresses served for `domain`.
    pub fn insert(&mut self, domain: &str, ips: Vec<Ipv4Addr>) -> Result<(), DnsError> {
        self.entries.insert(normalize(domain)?, ips);
        Ok(())
    }

    /// Addresses for `domain`, if it is in the table.
    pub fn lookup(&self, domain: &str) -> Option<&[Ipv4Addr]> {
        let key = normalize(domain).ok()?;
        self.entries.get(&key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio-dep")] {
        use std::path::Path;

        impl ResolverTable {
            /// Parses a JSON object of the form `{ "google.com": ["192.165.1.1"] }`.
            #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
            pub fn from_json_str(json: &str) -> Result<Self, TableError> {
                let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
                Self::from_pairs(
                    raw.iter()
                        .map(|(domain, ips)| (domain.as_str(), ips.iter().map(String::as_str))),
                )
            }

            /// Reads and parses a JSON table file.
            #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
            pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, TableError> {
                let json = tokio::fs::read_to_string(path).await?;
                Self::from_json_str(&json)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let table = ResolverTable::default();

        assert_eq!(table.len(), 5);
        assert_eq!(
            table.lookup("google.com"),
            Some(&[Ipv4Addr::new(192, 165, 1, 1), Ipv4Addr::new(192, 165, 1, 10)][..])
        );
        assert_eq!(table.lookup("example.com"), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut table = ResolverTable::new();
        table
            .insert("Example.COM.", vec![Ipv4Addr::new(10, 0, 0, 1)])
            .unwrap();

        assert!(table.lookup("example.com").is_some());
        assert!(table.lookup("EXAMPLE.com.").is_some());
        assert!(table.lookup("").is_none());
    }

    #[test]
    fn test_from_pairs_rejects_bad_entries() {
        let bad_ip = ResolverTable::from_pairs([("a.com", ["300.1.1.1"])]);
        assert!(matches!(bad_ip, Err(TableError::InvalidAddress { .. })));

        let bad_name = ResolverTable::from_pairs([("a..com", ["1.1.1.1"])]);
        assert!(matches!(bad_name, Err(TableError::Domain(_))));
    }

    #[cfg(feature = "tokio-dep")]
    #[test]
    fn test_from_json_str() {
        let table =
            ResolverTable::from_json_str(r#"{ "intranet.local": ["10.0.0.7", "10.0.0.8"] }"#)
                .unwrap();
        assert_eq!(table.lookup("intranet.local").map(<[_]>::len), Some(2));

        assert!(matches!(
            ResolverTable::from_json_str("[1, 2]"),
            Err(TableError::Json(_))
        ));
    }
}
