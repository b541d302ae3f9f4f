//! UDP transport for a single DNS request/response exchange (RFC 1035 §4.2.1)
//!
//! One datagram out, one datagram back into a 512-byte buffer. There is no
//! retransmission; a lost packet surfaces as a timeout when a deadline is set.

use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use tracing::{debug, warn};

use crate::dns::{DnsHeader, parse_header};
use crate::dns_consts;
use crate::error::{DnsError, TransportError};

#[derive(Debug, Clone, Copy, Default)]
pub struct UdpTransport {
    timeout: Option<Duration>,
}

impl UdpTransport {
    /// `None` (or a zero duration) waits for the response forever.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout: timeout.filter(|t| !t.is_zero()),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Sends `query` to `server` (`host:port`) and returns exactly the bytes of
    /// the first datagram received back.
    pub fn send_query(&self, query: &[u8], server: &str) -> Result<Vec<u8>, TransportError> {
        let server_addr = resolve(server)?;

        let bind_addr: SocketAddr = if server_addr.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        // Dropped on every return path below.
        let udp_socket = UdpSocket::bind(bind_addr).map_err(|source| TransportError::Bind {
            server: server.to_string(),
            source,
        })?;

        udp_socket
            .connect(server_addr)
            .map_err(|source| TransportError::Dial {
                server: server.to_string(),
                source,
            })?;

        udp_socket
            .set_read_timeout(self.timeout)
            .and_then(|_| udp_socket.set_write_timeout(self.timeout))
            .map_err(|source| TransportError::Deadline {
                server: server.to_string(),
                source,
            })?;

        let bytes_sent = udp_socket
            .send(query)
            .map_err(|source| match source.kind() {
                ErrorKind::ConnectionRefused | ErrorKind::ConnectionReset => {
                    TransportError::Refused {
                        server: server.to_string(),
                        source,
                    }
                }
                _ => TransportError::Send {
                    server: server.to_string(),
                    source,
                },
            })?;
        if bytes_sent != query.len() {
            return Err(TransportError::ShortSend {
                server: server.to_string(),
                sent: bytes_sent,
                len: query.len(),
            });
        }

        debug!(server = %server_addr, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = [0u8; dns_consts::UDP_RECV_SIZE];
        let num_of_bytes = udp_socket
            .recv(&mut recv_buf)
            .map_err(|source| match source.kind() {
                ErrorKind::WouldBlock | ErrorKind::TimedOut => {
                    warn!(
                        server = %server_addr,
                        timeout = ?self.timeout,
                        "no UDP response before deadline"
                    );
                    TransportError::Timeout {
                        server: server.to_string(),
                    }
                }
                // ICMP port unreachable; ConnectionReset is how Windows reports it.
                ErrorKind::ConnectionRefused | ErrorKind::ConnectionReset => {
                    TransportError::Refused {
                        server: server.to_string(),
                        source,
                    }
                }
                _ => TransportError::Receive {
                    server: server.to_string(),
                    source,
                },
            })?;

        debug!(
            server = %server_addr,
            bytes_received = num_of_bytes,
            "UDP response received"
        );

        Ok(recv_buf[..num_of_bytes].to_vec())
    }

    /// Sends `query` and parses the header of the reply.
    pub fn exchange(&self, query: &[u8], server: &str) -> Result<DnsHeader, DnsError> {
        let response = self.send_query(query, server)?;
        parse_header(&response)
    }
}

/// Single exchange with no deadline.
pub fn send_query(query: &[u8], server: &str) -> Result<Vec<u8>, TransportError> {
    UdpTransport::default().send_query(query, server)
}

fn resolve(server: &str) -> Result<SocketAddr, TransportError> {
    server
        .to_socket_addrs()
        .map_err(|source| TransportError::Resolve {
            server: server.to_string(),
            source,
        })?
        .next()
        .ok_or_else(|| TransportError::NoAddress {
            server: server.to_string(),
        })
}
