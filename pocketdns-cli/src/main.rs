use anyhow::Context;
use clap::{Parser, Subcommand};
use pocketdns::dns::resolver::{UdpClient, serve};
use pocketdns::dns::{DnsMessage, ResolverTable, decode_response};
use pocketdns::utils::{Sanitize, Terminal, parse_hex};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:10000";

#[derive(Parser)]
#[command(name = "pocketdns")]
#[command(version)]
#[command(about = "pocketdns - a pocket-sized A-record DNS server and client")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer A queries from a resolver table
    Server {
        /// Address to listen on
        #[arg(short, long, default_value = DEFAULT_ADDR)]
        bind: SocketAddr,

        /// JSON table file: { "domain": ["a.b.c.d", ...] }
        #[arg(short, long, value_name = "FILE")]
        table: Option<PathBuf>,
    },
    /// Prompt for domain names and query them one by one
    Client {
        /// Server to query
        #[arg(short, long, default_value = DEFAULT_ADDR)]
        server: SocketAddr,
    },
    /// Query a single domain name
    Lookup {
        domain: String,

        /// Server to query
        #[arg(short, long, default_value = DEFAULT_ADDR)]
        server: SocketAddr,
    },
    /// Decode a hex-dumped DNS response
    Decode {
        /// Hex bytes, spaces allowed (e.g. 26 8c 84 00 ...)
        #[arg(required = true)]
        hex: Vec<String>,

        /// Print the decoded message as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_answers(domain: &str, msg: &DnsMessage) {
    if msg.addresses.is_empty() {
        println!("> {}: no A records (rcode {})", domain, msg.rcode());
        return;
    }
    for rr in &msg.answers {
        if let Some(ip) = rr.ipv4() {
            println!(
                "> {}: type A, class IN, TTL {}, addr ({}) {}",
                domain, rr.ttl, rr.rd_length, ip
            );
        }
    }
}

async fn run_server(bind: SocketAddr, table: Option<PathBuf>) -> anyhow::Result<()> {
    let table = match table {
        Some(path) => ResolverTable::load_json(&path)
            .await
            .with_context(|| format!("loading resolver table {}", path.display()))?,
        None => ResolverTable::default(),
    };

    let socket = UdpSocket::bind(bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    let shutdown = CancellationToken::new();

    let signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl-c");
        }
        signal.cancel();
    });

    serve(socket, Arc::new(table), shutdown).await?;
    Ok(())
}

/// Blocking prompt loop; runs on the blocking pool since stdin is blocking.
fn run_client(server: SocketAddr) -> anyhow::Result<()> {
    let client = UdpClient::bind(server)?;
    info!(%server, "Type a domain name to query it, or exit to quit");

    loop {
        let Some(input) = Terminal::ask(
            "Enter a domain name:",
            &[Sanitize::NotEmpty, Sanitize::DomainName],
        ) else {
            return Ok(());
        };

        if input.answer.eq_ignore_ascii_case("exit") {
            return Ok(());
        }

        match client.lookup(&input.answer) {
            Ok(msg) => print_answers(&input.answer, &msg),
            Err(e) => eprintln!("Lookup failed: {e}"),
        }
    }
}

fn run_decode(hex: &[String], json: bool) -> anyhow::Result<()> {
    let bytes = parse_hex(&hex.join(" "))?;
    let msg = decode_response(&bytes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&msg)?);
    } else {
        println!(
            "id {:#06x}, flags {:#06x}, {} answer(s)",
            msg.header.id,
            msg.header.flags,
            msg.answers.len()
        );
        print_answers(&msg.question.name, &msg);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Server { bind, table } => run_server(bind, table).await,
        Command::Client { server } => {
            tokio::task::spawn_blocking(move || run_client(server)).await?
        }
        Command::Lookup { domain, server } => {
            tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
                let msg = UdpClient::bind(server)?.lookup(&domain)?;
                print_answers(&domain, &msg);
                Ok(())
            })
            .await?
        }
        Command::Decode { hex, json } => run_decode(&hex, json),
    }
}
