//! Galleria - a LAN image gallery server
//!
//! Binary entry point: CLI parsing, configuration, service
//! construction, and the axum listener.

mod error;
mod query;
mod render;
mod routes;
mod state;

use anyhow::Result;
use clap::Parser;
use galleria_core::{Gallery, GalleriaConfig};
use state::AppState;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::path::PathBuf;
use std::sync::Arc;

/// Serve a folder of images to every device on the local network.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to serve; defaults to the current directory
    root: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Additional allow-listed root directories
    #[arg(long, value_name = "DIR")]
    allow: Vec<PathBuf>,

    /// Alternate configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    galleria_log::init()?;
    let args = Args::parse();

    tracing::info!("Galleria starting...");

    let config = GalleriaConfig::load(args.config.as_deref())?;
    let port = args.port.unwrap_or(config.server.port);

    // The CLI root (or the current directory) leads the allow-list
    // and becomes the active root; config and --allow entries follow.
    let mut roots: Vec<PathBuf> = Vec::new();
    match args.root {
        Some(dir) => roots.push(dir),
        None if config.server.roots.is_empty() => roots.push(std::env::current_dir()?),
        None => {}
    }
    roots.extend(config.server.roots.iter().cloned());
    roots.extend(args.allow.iter().cloned());

    let gallery = Gallery::new(&roots, config.cache.capacity)?;
    let active = gallery.active_root();
    let allowed = gallery.allowed_roots().len();

    let state = Arc::new(AppState::new(gallery, config.gallery.clone()));
    let app = routes::router(state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    println!("Serving  http://127.0.0.1:{port}");
    println!("Phone    http://{}:{port}", lan_ip());
    println!("Root     {}", active.display());
    if allowed > 1 {
        println!("Allowed  {allowed} roots (manage at /roots)");
    }
    println!("Press Ctrl+C to stop.");
    tracing::info!("listening on {}, serving {}", addr, active.display());

    axum::serve(listener, app).await?;
    Ok(())
}

/// Best-effort LAN address of this host.
///
/// Connecting a UDP socket selects the outbound interface without
/// sending a packet; offline hosts fall back to loopback.
fn lan_ip() -> IpAddr {
    fn probe() -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.connect(("8.8.8.8", 80))?;
        Ok(socket.local_addr()?.ip())
    }
    probe().unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}
