use pinpoint_dns_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Largest request datagram accepted (EDNS(0) payload size)
const MAX_DATAGRAM_SIZE: usize = 4096;

pub async fn start_dns_server(
    bind_addr: &str,
    handler: DnsServerHandler,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", bind_addr, e))?;

    let socket = create_udp_socket(socket_addr)?;
    info!(bind_address = %socket.local_addr()?, "DNS server ready");

    serve(Arc::new(socket), Arc::new(handler), shutdown).await;
    Ok(())
}

/// Receive loop: one spawned task per datagram until `shutdown` fires.
///
/// In-flight tasks are not awaited on shutdown.
async fn serve(socket: Arc<UdpSocket>, handler: Arc<DnsServerHandler>, shutdown: CancellationToken) {
    let mut recv_buf = vec![0u8; MAX_DATAGRAM_SIZE];

    loop {
        let (n, from) = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutting down DNS server");
                break;
            }
            result = socket.recv_from(&mut recv_buf) => match result {
                Ok(received) => received,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    error!(error = %e, "UDP recv error");
                    continue;
                }
            },
        };

        let request: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = handler.clone();
        let socket = socket.clone();
        tokio::spawn(async move {
            if let Some(response) = handler.handle_datagram(&request, from).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    debug!(client = %from, error = %e, "Failed to send response");
                }
            }
        });
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
