//! Model A: Blocking Thread-Per-Connection Server
//!
//! Acceptor thread blocking di `accept()`; setiap koneksi dapat satu
//! thread sendiri dan langsung dilepas (detached, tidak pernah di-join).
//! Tidak ada pooling dan tidak ada batas jumlah thread - trade-off yang
//! disengaja: correctness terjaga pada volume berapapun, thread
//! exhaustion pada load ekstrem adalah limitasi yang diterima.

use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

use super::connection::{service, ServiceOutcome};
use crate::config::ServerConfig;

/// Blocking server: satu thread per koneksi
pub struct ThreadedServer {
    listener: TcpListener,
    buffer_size: usize,
}

impl ThreadedServer {
    /// Bind listener sesuai config. Kegagalan di sini fatal di caller.
    pub fn bind(config: &ServerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(config.addr())?;
        Ok(Self {
            listener,
            buffer_size: config.buffer_size,
        })
    }

    /// Address yang benar-benar ter-bind (berguna saat port 0 / ephemeral)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop. Tidak pernah return pada operasi normal; accept error
    /// dilaporkan dan loop lanjut tanpa terpengaruh.
    pub fn run(&self) -> io::Result<()> {
        println!(
            "🔌 Threaded server listening on port {} (buffer: {} bytes)",
            self.local_addr()?.port(),
            self.buffer_size
        );

        loop {
            match self.listener.accept() {
                Ok((stream, _addr)) => {
                    let buffer_size = self.buffer_size;
                    // Detached: JoinHandle dibuang, worker jalan independen
                    thread::spawn(move || handle_client(stream, buffer_size));
                }
                Err(e) => eprintln!("⚠️  Accept failed: {}", e),
            }
        }
    }
}

/// Worker per koneksi: satu read, satu best-effort write.
///
/// Stream dimiliki worker dan drop di akhir body, jadi handle tertutup
/// pada semua exit path - response sukses, empty read, maupun write gagal.
fn handle_client(mut stream: TcpStream, buffer_size: usize) {
    stream.set_nodelay(true).ok();
    #[cfg(unix)]
    {
        use std::os::unix::io::AsRawFd;
        super::connection::tune_socket(stream.as_raw_fd(), buffer_size);
    }

    if let ServiceOutcome::WriteFailed(e) = service(&mut stream, buffer_size) {
        eprintln!("⚠️  Send failed: {}", e);
    }
}
