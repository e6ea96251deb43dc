//! # pocketdns UDP Transport
//!
//! Thin datagram wrappers around the codec: a client that sends one A query
//! and decodes the reply, and a server loop that answers from a
//! [`ResolverTable`].
//!
//! ## Available Features
//!
//! | Feature     | Description                                                     |
//! |-------------|-----------------------------------------------------------------|
//! | `std`       | Blocking client and server loop over `std::net::UdpSocket`.     |
//! | `tokio-dep` | Async client and server loop over `tokio::net::UdpSocket`.      |
//!
//! Without either feature only the shared error type and the per-datagram
//! handler are compiled.
//!
//! ## Behaviour
//!
//! - Every datagram is handled on its own. A malformed query or an unknown
//!   name is logged and dropped: no response is sent and the loop goes on.
//! - The client checks that the response carries the transaction ID it sent.
//! - There are no timeouts or retransmissions; a lost datagram blocks the
//!   blocking client until the socket is closed.
//!
//! ## Example (Tokio)
//!
//! ```rust,ignore
//! use pocketdns::dns::{ResolverTable, resolver::serve};
//! use std::sync::Arc;
//! use tokio::net::UdpSocket;
//! use tokio_util::sync::CancellationToken;
//!
//! let socket = UdpSocket::bind("127.0.0.1:10000").await?;
//! let shutdown = CancellationToken::new();
//! serve(socket, Arc::new(ResolverTable::default()), shutdown.clone()).await?;
//! ```
use crate::dns::error::DnsError;
use crate::dns::responder::respond;
use crate::dns::response::{DnsMessage, decode_response};
use crate::dns::table::ResolverTable;
use crate::utils::hex::format_bytes;
use std::net::SocketAddr;
use thiserror::Error;
use tracing::{debug, warn};

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        mod standard;
        #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
        pub use self::standard::{UdpClient, serve_blocking, serve_one};
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio-dep")] {
        mod tokio_udp;
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        pub use self::tokio_udp::{lookup_async, serve};
    }
}

/// Largest datagram read from the socket.
pub const MAX_UDP_PAYLOAD: usize = 512;

/// Errors from sending or receiving DNS messages over UDP.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{0}")]
    SocketIo(#[from] std::io::Error),

    #[error("The DNS response ID {received} didn't match the query ID {expected}")]
    IdResponseInvalid { expected: u16, received: u16 },

    #[error(transparent)]
    Codec(#[from] DnsError),
}

/// Decodes a client's response and checks it answers query `id`.
#[cfg_attr(not(any(feature = "std", feature = "tokio-dep")), allow(dead_code))]
pub(crate) fn finish_exchange(response: &[u8], id: u16) -> Result<DnsMessage, TransportError> {
    let msg = decode_response(response)?;
    if msg.header.id != id {
        return Err(TransportError::IdResponseInvalid {
            expected: id,
            received: msg.header.id,
        });
    }
    Ok(msg)
}

/// Produces the reply to one inbound datagram, or `None` if it is dropped.
pub fn handle_datagram(query: &[u8], table: &ResolverTable, peer: SocketAddr) -> Option<Vec<u8>> {
    debug!(%peer, request = %format_bytes(query), "query received");

    match respond(query, table) {
        Ok(response) => {
            debug!(%peer, response = %format_bytes(&response), "sending response");
            Some(response)
        }
        Err(DnsError::UnknownDomain(domain)) => {
            warn!(%peer, %domain, "domain not found in table");
            None
        }
        Err(e) => {
            warn!(%peer, error = %e, "dropping malformed query");
            None
        }
    }
}
