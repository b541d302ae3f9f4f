//! DNS query codec (RFC 1035 §4.1)
//!
//! Encodes a header and a single question into wire format and decodes the
//! fixed 12-byte header back out of a response. Resource records in the
//! answer, authority and additional sections are never interpreted.

use std::io::{Cursor, Read, Write};

use fastrand::Rng;
use tracing::debug;

use crate::dns_consts;
use crate::error::DnsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DnsHeader {
    pub id: u16,
    pub flags: u16,
    pub num_questions: u16,
    pub num_answers: u16,
    pub num_authorities: u16,
    pub num_additionals: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    /// Already wire-encoded, see [`encode_name`].
    pub name: Vec<u8>,
    pub type_: u16,
    pub class: u16,
}

impl DnsHeader {
    pub fn to_bytes(&self) -> [u8; dns_consts::HEADER_LEN] {
        let mut out = [0u8; dns_consts::HEADER_LEN];
        let fields = [
            self.id,
            self.flags,
            self.num_questions,
            self.num_answers,
            self.num_authorities,
            self.num_additionals,
        ];
        for (chunk, field) in out.chunks_exact_mut(2).zip(fields) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }

        out
    }

    pub fn is_response(&self) -> bool {
        self.flags & dns_consts::FLAG_QR != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags & dns_consts::OPCODE_MASK) >> dns_consts::OPCODE_SHIFT) as u8
    }

    pub fn authoritative(&self) -> bool {
        self.flags & dns_consts::FLAG_AA != 0
    }

    pub fn truncated(&self) -> bool {
        self.flags & dns_consts::FLAG_TC != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & dns_consts::FLAGS_RD != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & dns_consts::FLAG_RA != 0
    }

    pub fn rcode(&self) -> u8 {
        (self.flags & dns_consts::RC_MASK) as u8
    }
}

/// Encodes a dotted name as length-prefixed labels followed by the root label.
///
/// Labels longer than 63 bytes are silently cut to their first 63 bytes, so an
/// overlong name is sent as a *different* name rather than rejected. Empty
/// labels, the 255-byte name limit and label character sets are not checked.
pub fn encode_name(name: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(name.len() + 2);

    for label in name.split('.') {
        let label = &label.as_bytes()[..label.len().min(dns_consts::MAX_LABEL_LEN)];
        buf.push(label.len() as u8);
        buf.extend_from_slice(label);
    }
    buf.push(dns_consts::ROOT);

    buf
}

/// Header for a recursive standard query with a single question.
pub fn create_dh(rng: &mut Rng) -> DnsHeader {
    DnsHeader {
        id: rng.u16(..=dns_consts::MAX_QUERY_ID),
        flags: dns_consts::FLAGS_RD,
        num_questions: dns_consts::QDCOUNT_1,
        num_answers: dns_consts::ZERO,
        num_authorities: dns_consts::ZERO,
        num_additionals: dns_consts::ZERO,
    }
}

pub fn create_dq(domain: &str, record_type: u16) -> DnsQuestion {
    DnsQuestion {
        name: encode_name(domain),
        type_: record_type,
        class: dns_consts::CLASS_IN,
    }
}

pub fn write_dh<W: Write>(out: &mut W, dns_header: &DnsHeader) -> std::io::Result<()> {
    out.write_all(&dns_header.to_bytes())
}

pub fn write_dq<W: Write>(out: &mut W, dns_question: &DnsQuestion) -> std::io::Result<()> {
    out.write_all(&dns_question.name)?;
    out.write_all(&dns_question.type_.to_be_bytes())?;
    out.write_all(&dns_question.class.to_be_bytes())
}

pub fn encode_dh(dns_header: &DnsHeader) -> Vec<u8> {
    dns_header.to_bytes().to_vec()
}

pub fn encode_dq(dns_question: &DnsQuestion) -> Result<Vec<u8>, DnsError> {
    let mut buf = Vec::with_capacity(dns_question.name.len() + 4);
    write_dq(&mut buf, dns_question).map_err(|source| DnsError::Encode {
        section: "question",
        source,
    })?;

    Ok(buf)
}

/// Builds a query for `domain`/`record_type` and returns the header id with the bytes.
pub fn build_query_with_id(
    domain: &str,
    record_type: u16,
    rng: &mut Rng,
) -> Result<(u16, Vec<u8>), DnsError> {
    let dns_header = create_dh(rng);
    let dns_question = create_dq(domain, record_type);

    let mut buf = Vec::with_capacity(dns_consts::HEADER_LEN + dns_question.name.len() + 4);
    write_dh(&mut buf, &dns_header).map_err(|source| DnsError::Encode {
        section: "header",
        source,
    })?;
    write_dq(&mut buf, &dns_question).map_err(|source| DnsError::Encode {
        section: "question",
        source,
    })?;

    debug!(
        domain = domain,
        record_type = record_type,
        id = dns_header.id,
        len = buf.len(),
        "built DNS query"
    );

    Ok((dns_header.id, buf))
}

pub fn build_query(domain: &str, record_type: u16, rng: &mut Rng) -> Result<Vec<u8>, DnsError> {
    build_query_with_id(domain, record_type, rng).map(|(_, bytes)| bytes)
}

/// Parses the fixed header at the start of `data`. Trailing bytes are ignored.
pub fn parse_header(data: &[u8]) -> Result<DnsHeader, DnsError> {
    if data.len() < dns_consts::HEADER_LEN {
        return Err(DnsError::ResponseTooShort(data.len()));
    }

    read_dh(&mut Cursor::new(data))
}

fn read_dh<R: Read>(reader: &mut R) -> Result<DnsHeader, DnsError> {
    Ok(DnsHeader {
        id: read_u16(reader, "id")?,
        flags: read_u16(reader, "flags")?,
        num_questions: read_u16(reader, "questions")?,
        num_answers: read_u16(reader, "answers")?,
        num_authorities: read_u16(reader, "authorities")?,
        num_additionals: read_u16(reader, "additionals")?,
    })
}

fn read_u16<R: Read>(reader: &mut R, field: &'static str) -> Result<u16, DnsError> {
    let mut raw = [0u8; 2];
    reader
        .read_exact(&mut raw)
        .map_err(|source| DnsError::Decode { field, source })?;

    Ok(u16::from_be_bytes(raw))
}

/// Short names for the notable bits of a response header.
pub fn parse_flags(response: &DnsHeader, request_id: u16) -> Vec<String> {
    let mut flags = Vec::new();

    if response.id == request_id {
        flags.push("MATCH".to_string());
    }
    if response.is_response() {
        flags.push("RESP".to_string());
    }
    if response.opcode() == 0 {
        flags.push("SQ".to_string());
    }
    if response.authoritative() {
        flags.push("AA".to_string());
    }
    if response.truncated() {
        flags.push("TC".to_string());
    }
    if response.recursion_desired() {
        flags.push("RD".to_string());
    }
    if response.recursion_available() {
        flags.push("REC".to_string());
    }

    flags.push(dns_consts::rcode_name(response.rcode()).to_string());

    match response.num_answers {
        0 => {}
        1 => flags.push("ONE AN".to_string()),
        _ => flags.push("MULTIPLE AN's".to_string()),
    }
    match response.num_authorities {
        0 => {}
        1 => flags.push("ONE NS".to_string()),
        _ => flags.push("MULTIPLE NS's".to_string()),
    }

    flags
}
