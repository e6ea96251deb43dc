//! Async UDP client and server loop (`tokio-dep` feature).
use super::{MAX_UDP_PAYLOAD, TransportError, finish_exchange, handle_datagram};
use crate::dns::query::{encode_query, generate_id};
use crate::dns::response::DnsMessage;
use crate::dns::table::ResolverTable;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket as TokioUdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Sends an A query for `domain` to `server` and awaits the matching response.
///
/// # Example
/// ```rust,ignore
/// let socket = tokio::net::UdpSocket::bind("0.0.0.0:0").await?;
/// let msg = lookup_async(&socket, "127.0.0.1:10000".parse()?, "google.com").await?;
/// println!("{:?}", msg.addresses);
/// ```
pub async fn lookup_async(
    socket: &TokioUdpSocket,
    server: SocketAddr,
    domain: &str,
) -> Result<DnsMessage, TransportError> {
    let id = generate_id();
    let query = encode_query(domain, Some(id))?;
    socket.send_to(&query, server).await?;

    let mut buf = [0u8; MAX_UDP_PAYLOAD];
    let (len, _src) = socket.recv_from(&mut buf).await?;
    finish_exchange(&buf[..len], id)
}

/// Answers queries on `socket` until `shutdown` is cancelled.
///
/// Datagrams are handled one at a time; the codec holds no state, so a
/// dropped packet never affects the next one.
pub async fn serve(
    socket: TokioUdpSocket,
    table: Arc<ResolverTable>,
    shutdown: CancellationToken,
) -> Result<(), TransportError> {
    info!(local = %socket.local_addr()?, entries = table.len(), "DNS server is running");

    let mut buf = [0u8; MAX_UDP_PAYLOAD];
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutting down the DNS server");
                return Ok(());
            }
            received = socket.recv_from(&mut buf) => {
                let (len, peer) = match received {
                    Ok(v) => v,
                    Err(e) => {
                        warn!(error = %e, "UDP receive failed");
                        continue;
                    }
                };

                if let Some(response) = handle_datagram(&buf[..len], &table, peer) {
                    if let Err(e) = socket.send_to(&response, peer).await {
                        warn!(%peer, error = %e, "UDP send failed");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn test_async_round_trip_and_shutdown() {
        let server = TokioUdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        let shutdown = CancellationToken::new();

        let handle = tokio::spawn(serve(
            server,
            Arc::new(ResolverTable::default()),
            shutdown.clone(),
        ));

        let client = TokioUdpSocket::bind("127.0.0.1:0").await.unwrap();
        let msg = lookup_async(&client, addr, "amazon.ca").await.unwrap();
        assert_eq!(msg.addresses, vec![Ipv4Addr::new(192, 165, 1, 5)]);

        // a garbage datagram does not stop the loop
        client.send_to(&[0xff; 3], addr).await.unwrap();
        let msg = lookup_async(&client, addr, "uwaterloo.ca").await.unwrap();
        assert_eq!(msg.addresses, vec![Ipv4Addr::new(192, 165, 1, 3)]);

        shutdown.cancel();
        assert!(handle.await.unwrap().is_ok());
    }
}
