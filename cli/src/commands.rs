pub mod bruteforce;
pub mod flood;

use clap::{Args, Parser, Subcommand};

use barrage_core::probe::flood::FloodVariant;

#[derive(Parser)]
#[command(name = "barrage")]
#[command(about = "A concurrent network probing engine for lab targets.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Saturate a target with a fixed volume of datagrams or handshakes
    #[command(alias = "f")]
    Flood(FloodArgs),
    /// Audit credential pairs against a telnet-style service
    #[command(alias = "b")]
    Bruteforce(BruteforceArgs),
}

#[derive(Args)]
pub struct FloodArgs {
    /// Target host (IPv4 literal)
    pub target: String,

    #[arg(short, long, default_value_t = 80)]
    pub port: u16,

    /// Flood variant: udp, syn or icmp
    #[arg(long, default_value = "udp")]
    pub variant: FloodVariant,

    /// Concurrent workers (clamped to the engine ceiling)
    #[arg(short, long, default_value_t = 10)]
    pub workers: usize,

    /// Packets per worker
    #[arg(long, default_value_t = 1000)]
    pub volume: u64,

    /// Overall run budget in seconds
    #[arg(long)]
    pub deadline: Option<u64>,
}

#[derive(Args)]
pub struct BruteforceArgs {
    /// Target host (IPv4 literal)
    pub target: String,

    #[arg(short, long, default_value_t = 23)]
    pub port: u16,

    /// Usernames: comma-separated list, or @path to a wordlist file
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub users: Vec<String>,

    /// Passwords: comma-separated list, or @path to a wordlist file
    #[arg(short = 'P', long, value_delimiter = ',', required = true)]
    pub passwords: Vec<String>,

    /// Concurrent workers (clamped to the engine ceiling)
    #[arg(short, long, default_value_t = 8)]
    pub workers: usize,

    /// Per-socket I/O timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,

    /// Overall run budget in seconds
    #[arg(long)]
    pub deadline: Option<u64>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
