//! Server configuration dari process arguments
//!
//! Config bersifat immutable setelah startup: dibangun sekali di `main`,
//! lalu dipass explicit ke server constructor. Tidak ada global state,
//! tidak ada environment variable, tidak ada config file.

use std::net::{Ipv4Addr, SocketAddr};

/// Default port jika argumen pertama absen
pub const DEFAULT_PORT: u16 = 8080;

/// Default ukuran satu kali read per koneksi (bytes)
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Server configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port untuk bind (0 = ephemeral, dipilih OS)
    pub port: u16,
    /// Batas atas satu kali read per koneksi
    pub buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ServerConfig {
    /// Parse dari argument slice (index 0 = nama program).
    ///
    /// Positional: `[port] [buffer_size]`, tanpa flags. Argumen yang absen
    /// atau tidak valid jatuh ke default.
    pub fn from_args(args: &[String]) -> Self {
        let mut config = Self::default();

        if let Some(port) = args.get(1) {
            config.port = port.parse().unwrap_or(DEFAULT_PORT);
        }
        if let Some(size) = args.get(2) {
            config.buffer_size = size.parse().unwrap_or(DEFAULT_BUFFER_SIZE);
        }

        config
    }

    /// Parse dari `std::env::args()`
    pub fn from_env() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_args(&args)
    }

    /// Bind address: semua interface pada port yang dikonfigurasi
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
