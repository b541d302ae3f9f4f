pub mod cli;
pub mod config;
pub mod dns;
pub mod dns_consts;
pub mod error;
pub mod transport;
pub mod utils;

pub use dns::{
    DnsHeader, DnsQuestion, build_query, build_query_with_id, encode_name, parse_header,
};
pub use error::{DnsError, TransportError};
pub use transport::{UdpTransport, send_query};
