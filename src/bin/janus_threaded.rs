//! Janus Threaded Server Binary
//!
//! Model blocking: satu detached thread per koneksi, tanpa batas.
//!
//! Usage:
//!   cargo run --release --bin janus_threaded [port] [buffer_size]
//!
//! Default: port 8080, buffer 1024 bytes.

use janus::config::ServerConfig;
use janus::network::ThreadedServer;

fn main() {
    let config = ServerConfig::from_env();

    let server = match ThreadedServer::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("❌ Bind failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
