// DNS Header
pub const HEADER_LEN: usize = 12;
pub const FLAGS_RD: u16 = 1 << 8;
pub const QDCOUNT_1: u16 = 1;
pub const ZERO: u16 = 0;
pub const MAX_QUERY_ID: u16 = 65534;

// DNS Question
pub const MAX_LABEL_LEN: usize = 63;
pub const ROOT: u8 = 0;
pub const CLASS_IN: u16 = 1;

// DNS Flags
pub const FLAG_QR: u16 = 1 << 15;
pub const OPCODE_MASK: u16 = 0x7800; // Bits 11–14
pub const OPCODE_SHIFT: u8 = 11;
pub const FLAG_AA: u16 = 1 << 10;
pub const FLAG_TC: u16 = 1 << 9;
pub const FLAG_RA: u16 = 1 << 7;
pub const RC_MASK: u16 = 0x000F; // Bits 0-3

// Record types
pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_PTR: u16 = 12;
pub const TYPE_MX: u16 = 15;
pub const TYPE_TXT: u16 = 16;
pub const TYPE_AAAA: u16 = 28;
pub const TYPE_SRV: u16 = 33;
pub const TYPE_ANY: u16 = 255;

// UDP
pub const UDP_RECV_SIZE: usize = 512;
pub const DEFAULT_RESOLVER: &str = "8.8.8.8:53";

/// Maps a record type mnemonic (case-insensitive) or a decimal code to its numeric value.
pub fn record_type_from_str(input: &str) -> Option<u16> {
    let code = match input.to_ascii_uppercase().as_str() {
        "A" => TYPE_A,
        "NS" => TYPE_NS,
        "CNAME" => TYPE_CNAME,
        "SOA" => TYPE_SOA,
        "PTR" => TYPE_PTR,
        "MX" => TYPE_MX,
        "TXT" => TYPE_TXT,
        "AAAA" => TYPE_AAAA,
        "SRV" => TYPE_SRV,
        "ANY" => TYPE_ANY,
        other => return other.parse().ok(),
    };

    Some(code)
}

pub fn rcode_name(rcode: u8) -> &'static str {
    match rcode {
        0 => "NOERROR",
        1 => "FORMERR",
        2 => "SERVFAIL",
        3 => "NXDOMAIN",
        4 => "NOTIMP",
        5 => "REFUSED",
        _ => "RCODE?",
    }
}
