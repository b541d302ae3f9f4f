use std::path::PathBuf;

use clap::Parser;

use crate::config::CliOverrides;
use crate::dns::DnsHeader;
use crate::dns_consts;

#[derive(Parser, Debug)]
#[command(name = "dns_probe")]
#[command(version)]
#[command(about = "Send one DNS query over UDP and print the response header")]
pub struct Args {
    /// Domain name to query
    #[arg(default_value = "www.example.com")]
    pub domain: String,

    /// Record type mnemonic (A, AAAA, MX, ...) or numeric code
    #[arg(short = 't', long = "type", default_value = "A", value_parser = parse_record_type)]
    pub record_type: u16,

    /// Resolver address as host:port
    #[arg(short = 's', long)]
    pub server: Option<String>,

    /// Seconds to wait for the response (0 waits forever)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for the query id generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Display decoded response flags
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print the query bytes as hex and base64url before sending
    #[arg(long)]
    pub print_query: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            resolver: self.server.clone(),
            timeout_secs: self.timeout,
            log_level: self.log_level.clone(),
        }
    }
}

fn parse_record_type(input: &str) -> Result<u16, String> {
    dns_consts::record_type_from_str(input)
        .ok_or_else(|| format!("unknown record type '{}'", input))
}

pub fn display_header(header: &DnsHeader, flags: &[String]) {
    println!("--- Response Header ---");
    println!(" {:<12} - {}", "id", header.id);
    println!(" {:<12} - 0x{:04X}", "flags", header.flags);
    println!(" {:<12} - {}", "questions", header.num_questions);
    println!(" {:<12} - {}", "answers", header.num_answers);
    println!(" {:<12} - {}", "authorities", header.num_authorities);
    println!(" {:<12} - {}", "additionals", header.num_additionals);

    if !flags.is_empty() {
        println!(" {:<12} - {}", "decoded", flags.join(", "));
    }
}
