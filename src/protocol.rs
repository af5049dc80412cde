//! Fixed Response Protocol
//!
//! Server ini tidak mem-parse request sama sekali: setiap koneksi yang
//! mengirim minimal satu byte mendapat response yang sama persis,
//! byte-for-byte. Tidak ada routing, tidak ada content negotiation.

/// Response body (12 bytes)
pub const BODY: &str = "Hello World!";

/// Panjang body - harus sinkron dengan header Content-Length
pub const BODY_LEN: usize = BODY.len();

/// Satu-satunya payload yang pernah dikirim server.
///
/// `Connection: close` karena setiap koneksi bersifat single-shot:
/// satu read, satu write, lalu close. Tidak ada keep-alive.
pub const RESPONSE: &[u8] = concat!(
    "HTTP/1.1 200 OK\r\n",
    "Content-Type: text/plain\r\n",
    "Content-Length: 12\r\n",
    "Connection: close\r\n",
    "\r\n",
    "Hello World!"
)
.as_bytes();
