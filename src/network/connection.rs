//! Single-Shot Connection Servicer
//!
//! Satu interaksi per koneksi: satu bounded read, satu best-effort write,
//! selesai. Caller yang memegang ownership stream; drop = close, jadi
//! setiap exit path melepas handle tanpa perlu close manual.

use std::io::{self, Read, Write};

use crate::protocol::RESPONSE;

/// Hasil satu kali servicing koneksi.
///
/// Dispatcher yang memutuskan mana yang dilaporkan - kontraknya hanya
/// write failure yang di-report; empty read dan read failure cukup
/// ditutup tanpa suara.
#[derive(Debug)]
pub enum ServiceOutcome {
    /// Read > 0 bytes dan response terkirim utuh
    Responded,
    /// Read 0 bytes: peer close duluan, response di-skip
    PeerClosed,
    /// Read gagal (termasuk WouldBlock pada socket non-blocking)
    ReadFailed(io::Error),
    /// Response gagal atau tidak terkirim utuh; tidak pernah di-retry
    WriteFailed(io::Error),
}

/// Service satu koneksi: read maksimal `buffer_size` bytes, dan jika ada
/// data, kirim [`RESPONSE`] selengkapnya dalam satu attempt.
///
/// Generic atas `Read + Write` supaya jalan untuk `std::net::TcpStream`
/// (blocking), `mio::net::TcpStream` (non-blocking), dan mock stream di
/// test. Bytes di luar read pertama diabaikan, bukan error.
pub fn service<S: Read + Write>(stream: &mut S, buffer_size: usize) -> ServiceOutcome {
    let mut buffer = vec![0u8; buffer_size];

    match stream.read(&mut buffer) {
        Ok(0) => ServiceOutcome::PeerClosed,
        Ok(_) => match stream.write_all(RESPONSE) {
            Ok(()) => ServiceOutcome::Responded,
            Err(e) => ServiceOutcome::WriteFailed(e),
        },
        Err(e) => ServiceOutcome::ReadFailed(e),
    }
}

/// Set SO_RCVBUF/SO_SNDBUF mengikuti buffer size yang dikonfigurasi.
///
/// Kernel menerapkan minimum dan pembulatan sendiri, jadi nilai kecil
/// tetap aman. Ignore errors - not all platforms support this.
#[cfg(unix)]
pub(crate) fn tune_socket(fd: std::os::unix::io::RawFd, buffer_size: usize) {
    let optval = buffer_size.min(libc::c_int::MAX as usize) as libc::c_int;
    unsafe {
        libc::setsockopt(
            fd,
            libc::SOL_SOCKET,
            libc::SO_RCVBUF,
            &optval as *const _ as *const libc::c_void,
            std::mem::size_of::<libc::c_int>() as libc::socklen_t,
        );
        libc::setsockopt(
            fd,
            libc::SOL_SOCKET,
            libc::SO_SNDBUF,
            &optval as *const _ as *const libc::c_void,
            std::mem::size_of::<libc::c_int>() as libc::socklen_t,
        );
    }
}
