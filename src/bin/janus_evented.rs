//! Janus Evented Server Binary
//!
//! Model non-blocking: satu thread, readiness multiplexing via mio.
//!
//! Usage:
//!   cargo run --release --bin janus_evented [port] [buffer_size]
//!
//! Default: port 8080, buffer 1024 bytes.

use janus::config::ServerConfig;
use janus::network::EventedServer;

fn main() {
    let config = ServerConfig::from_env();

    let mut server = match EventedServer::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("❌ Setup failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
