use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use ticklist_server::{run_server, ServerConfig, DEFAULT_ADDR};

#[derive(Parser, Debug)]
#[command(
    name = "ticklist-server",
    version,
    about = "JSON-over-HTTP backend for the ticklist task list"
)]
struct Args {
    /// Address to listen on
    #[arg(long, value_name = "HOST:PORT", default_value = DEFAULT_ADDR)]
    addr: SocketAddr,

    /// Override the ticklist data directory (defaults to the same resolution as the TUI)
    #[arg(long = "data-dir", value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Serve a browser front end from this directory
    #[arg(long = "web-root", value_name = "PATH")]
    web_root: Option<PathBuf>,

    /// Insert the sample tasks when the store is empty
    #[arg(long)]
    seed: bool,

    /// Override the tracing filter (e.g. "info", "debug", or full directives)
    #[arg(long = "log", value_name = "DIRECTIVE")]
    log_filter: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run_server(ServerConfig {
        addr: args.addr,
        data_dir: args.data_dir,
        web_root: args.web_root,
        seed: args.seed,
        log_filter: args.log_filter,
    })
}
