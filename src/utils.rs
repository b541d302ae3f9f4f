use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as base64_url;
use fastrand::Rng;

/// Query-id generator: seeded when reproducible ids are wanted, otherwise from OS entropy.
pub fn query_rng(seed: Option<u64>) -> Rng {
    match seed {
        Some(seed) => Rng::with_seed(seed),
        None => Rng::new(),
    }
}

/// Space-separated upper-case hex, e.g. `03 77 77 77`.
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The unpadded base64url form used by the `dns` parameter of RFC 8484 GET requests.
pub fn base64_url_bytes(bytes: &[u8]) -> String {
    base64_url.encode(bytes)
}

pub fn print_green(input_text: &str) {
    println!("\x1b[92m{}\x1b[0m", input_text);
}

pub fn print_yellow(input_text: &str) {
    println!("\x1b[93m{}\x1b[0m", input_text);
}

pub fn print_red(input_text: &str) {
    eprintln!("\x1b[91m{}\x1b[0m", input_text);
}
