//! Network Layer: Connection Lifecycle
//!
//! Dua dispatcher di atas satu service routine yang sama:
//! - [`ThreadedServer`]: blocking accept, satu detached thread per koneksi
//! - [`EventedServer`]: single thread, readiness multiplexing dengan mio
//!
//! Keduanya share kontrak yang sama: setiap koneksi yang di-accept PASTI
//! di-close tepat satu kali, apapun hasil read/write-nya, dan listening
//! socket tidak pernah dipakai untuk payload I/O.

mod connection;
mod evented;
mod threaded;

pub use connection::{service, ServiceOutcome};
pub use evented::EventedServer;
pub use threaded::ThreadedServer;
