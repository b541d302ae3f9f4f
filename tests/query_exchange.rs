use std::net::UdpSocket;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use dns_probe::dns_consts::{FLAGS_RD, TYPE_A};
use dns_probe::{
    DnsError, TransportError, UdpTransport, build_query_with_id, encode_name, parse_header,
};
use fastrand::Rng;

/// Answers one query the way a recursive resolver does: echoes the id and the
/// question, sets QR/RA, and appends a single compressed A record.
fn spawn_fake_resolver() -> (String, JoinHandle<Vec<u8>>) {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    let addr = socket.local_addr().unwrap().to_string();

    let handle = thread::spawn(move || {
        let mut buf = [0u8; 512];
        let (n, peer) = socket.recv_from(&mut buf).unwrap();
        let query = buf[..n].to_vec();

        let mut response = Vec::new();
        response.extend_from_slice(&query[0..2]);
        response.extend_from_slice(&[0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);
        response.extend_from_slice(&query[12..]);
        response.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01]);
        response.extend_from_slice(&[0x00, 0x00, 0x0E, 0x10, 0x00, 0x04, 93, 184, 216, 34]);
        socket.send_to(&response, peer).unwrap();

        query
    });

    (addr, handle)
}

#[test]
fn test_end_to_end_www_example_com() {
    let (server, resolver) = spawn_fake_resolver();

    let mut rng = Rng::with_seed(2024);
    let (id, query) = build_query_with_id("www.example.com", TYPE_A, &mut rng).unwrap();
    assert_eq!(query.len(), 33);

    let transport = UdpTransport::new(Some(Duration::from_secs(5)));
    let response = transport.send_query(&query, &server).unwrap();
    let received_query = resolver.join().unwrap();
    assert_eq!(received_query, query);

    let header = parse_header(&response).unwrap();
    assert_eq!(header.id, id);
    assert_eq!(header.num_questions, 1);
    assert_eq!(header.num_answers, 1);
    assert!(header.is_response());
    assert!(header.recursion_available());
    assert_eq!(header.rcode(), 0);
}

#[test]
fn test_query_on_the_wire_matches_layout() {
    let (server, resolver) = spawn_fake_resolver();

    let mut rng = Rng::with_seed(11);
    let (id, query) = build_query_with_id("mail.example.org", 15, &mut rng).unwrap();
    UdpTransport::new(Some(Duration::from_secs(5)))
        .send_query(&query, &server)
        .unwrap();

    let wire = resolver.join().unwrap();
    let name = encode_name("mail.example.org");

    assert_eq!(u16::from_be_bytes([wire[0], wire[1]]), id);
    assert_eq!(u16::from_be_bytes([wire[2], wire[3]]), FLAGS_RD);
    assert_eq!(&wire[4..12], &[0, 1, 0, 0, 0, 0, 0, 0]);
    assert_eq!(&wire[12..12 + name.len()], name.as_slice());
    assert_eq!(&wire[12 + name.len()..], &[0x00, 0x0F, 0x00, 0x01]);
}

#[test]
fn test_short_response_is_malformed() {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    let server = socket.local_addr().unwrap().to_string();

    let resolver = thread::spawn(move || {
        let mut buf = [0u8; 512];
        let (_, peer) = socket.recv_from(&mut buf).unwrap();
        socket.send_to(&buf[..5], peer).unwrap();
    });

    let query = dns_probe::build_query("example.com", TYPE_A, &mut Rng::with_seed(1)).unwrap();
    let response = UdpTransport::new(Some(Duration::from_secs(5)))
        .send_query(&query, &server)
        .unwrap();
    resolver.join().unwrap();

    let err = parse_header(&response).unwrap_err();
    assert!(matches!(err, DnsError::ResponseTooShort(5)), "{:?}", err);
}

#[test]
fn test_unresolvable_server_is_resolve_error() {
    let query = dns_probe::build_query("example.com", TYPE_A, &mut Rng::with_seed(1)).unwrap();
    let err = dns_probe::send_query(&query, "127.0.0.1").unwrap_err();

    assert!(matches!(err, TransportError::Resolve { .. }), "{:?}", err);
    let err: DnsError = err.into();
    assert!(err.to_string().contains("127.0.0.1"));
}
