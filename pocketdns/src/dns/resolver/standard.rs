//! Blocking UDP client and server loop (`std` feature).
use super::{MAX_UDP_PAYLOAD, TransportError, finish_exchange, handle_datagram};
use crate::dns::query::{encode_query, generate_id};
use crate::dns::response::DnsMessage;
use crate::dns::table::ResolverTable;
use std::net::{SocketAddr, UdpSocket};
use tracing::{info, warn};

/// A blocking client bound to an ephemeral local port, talking to one server.
///
/// # Example
/// ```rust,ignore
/// let client = UdpClient::bind("127.0.0.1:10000".parse()?)?;
/// let response = client.lookup("google.com")?;
/// for ip in response.addresses {
///     println!("IPv4: {ip}");
/// }
/// ```
#[derive(Debug)]
pub struct UdpClient {
    socket: UdpSocket,
    server: SocketAddr,
}

impl UdpClient {
    pub fn bind(server: SocketAddr) -> Result<Self, TransportError> {
        let local = if server.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(local)?;
        Ok(Self { socket, server })
    }

    /// Sends an A query for `domain` and waits for the matching response.
    pub fn lookup(&self, domain: &str) -> Result<DnsMessage, TransportError> {
        let id = generate_id();
        let query = encode_query(domain, Some(id))?;
        self.socket.send_to(&query, self.server)?;

        let mut buf = [0u8; MAX_UDP_PAYLOAD];
        let (len, _src) = self.socket.recv_from(&mut buf)?;
        finish_exchange(&buf[..len], id)
    }
}

/// Receives one datagram and answers it if possible.
///
/// Returns `Ok(true)` when a response was sent and `Ok(false)` when the
/// datagram was dropped.
pub fn serve_one(socket: &UdpSocket, table: &ResolverTable) -> Result<bool, TransportError> {
    let mut buf = [0u8; MAX_UDP_PAYLOAD];
    let (len, peer) = socket.recv_from(&mut buf)?;

    match handle_datagram(&buf[..len], table, peer) {
        Some(response) => {
            socket.send_to(&response, peer)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Answers queries on `socket` forever.
///
/// Socket errors are logged and the loop keeps receiving.
pub fn serve_blocking(socket: &UdpSocket, table: &ResolverTable) -> ! {
    info!(local = ?socket.local_addr().ok(), entries = table.len(), "DNS server is running");

    loop {
        if let Err(e) = serve_one(socket, table) {
            warn!(error = %e, "UDP socket error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::thread;

    #[test]
    fn test_blocking_round_trip_over_loopback() {
        let server = UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = server.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let table = ResolverTable::default();
            serve_one(&server, &table).unwrap()
        });

        let client = UdpClient::bind(addr).unwrap();
        let msg = client.lookup("google.com").unwrap();

        assert!(handle.join().unwrap());
        assert_eq!(
            msg.addresses,
            vec![Ipv4Addr::new(192, 165, 1, 1), Ipv4Addr::new(192, 165, 1, 10)]
        );
    }

    #[test]
    fn test_unknown_domain_is_dropped() {
        let server = UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = server.local_addr().unwrap();

        let client = UdpSocket::bind("127.0.0.1:0").unwrap();
        let query = encode_query("unknown.example", Some(5)).unwrap();
        client.send_to(&query, addr).unwrap();

        assert!(!serve_one(&server, &ResolverTable::default()).unwrap());
    }
}
