//! Janus - Dual-Architecture Request Server
//!
//! Satu workload, dua arsitektur concurrency:
//! - **Blocking**: satu detached thread per koneksi (`network::ThreadedServer`)
//! - **Non-blocking**: satu thread untuk semua koneksi, readiness multiplexing
//!   via mio (`network::EventedServer`)
//!
//! Response selalu fixed (lihat [`protocol::RESPONSE`]) - fokus repo ini adalah
//! lifecycle koneksi: accept, service, teardown, dan implikasi resource dari
//! masing-masing model. Tidak ada request parsing, tidak ada routing.
//!
//! Binaries:
//!   cargo run --release --bin janus_threaded [port] [buffer_size]
//!   cargo run --release --bin janus_evented  [port] [buffer_size]

pub mod config;
pub mod network;
pub mod protocol;
