use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DnsError {
    #[error("failed to write {section} bytes: {source}")]
    Encode {
        section: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("response is too short: {0} bytes")]
    ResponseTooShort(usize),

    #[error("error reading {field}: {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to resolve server address {server}: {source}")]
    Resolve {
        server: String,
        #[source]
        source: io::Error,
    },

    #[error("server address {server} resolved to no usable address")]
    NoAddress { server: String },

    #[error("failed to bind local UDP socket for {server}: {source}")]
    Bind {
        server: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to dial UDP {server}: {source}")]
    Dial {
        server: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to set socket deadline for {server}: {source}")]
    Deadline {
        server: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to send query to {server}: {source}")]
    Send {
        server: String,
        #[source]
        source: io::Error,
    },

    #[error("short send to {server}: {sent} of {len} bytes")]
    ShortSend {
        server: String,
        sent: usize,
        len: usize,
    },

    #[error("failed to read response from {server}: {source}")]
    Receive {
        server: String,
        #[source]
        source: io::Error,
    },

    #[error("timed out waiting for response from {server}")]
    Timeout { server: String },

    #[error("connection refused by {server}: {source}")]
    Refused {
        server: String,
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    /// True when the resolver was never reached: the address did not resolve,
    /// the datagram could not leave this host, or nothing listens on the port.
    pub fn is_unreachable(&self) -> bool {
        !matches!(self, Self::Receive { .. } | Self::Timeout { .. })
    }
}
