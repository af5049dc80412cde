//! Model B: Non-blocking Event-Multiplexed Server
//!
//! Satu thread melayani semua koneksi lewat mio `Poll` (epoll/kqueue/IOCP).
//! Reactor memegang registration table secara explicit: register dan
//! deregister adalah satu-satunya operasi yang memutasi table, dan entry
//! dihapus pada pass yang sama dengan close - tidak pernah ada registrasi
//! stale yang bisa ter-poll lagi.
//!
//! State machine per koneksi: REGISTERED -> SERVICED -> CLOSED.
//! Tidak ada state WRITING: response kecil dan fixed, write dilakukan
//! sinkron setelah read dan koneksi langsung ditutup apapun hasil write.

use std::collections::HashMap;
use std::io;
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use mio::net::{TcpListener as MioTcpListener, TcpStream};
use mio::{Events, Interest, Poll, Token};

use super::connection::{service, ServiceOutcome};
use crate::config::ServerConfig;

/// Token khusus listener; client token mulai dari 1
const LISTENER: Token = Token(0);

/// Kapasitas event batch per poll cycle
const EVENTS_CAPACITY: usize = 1024;

/// Event-multiplexed server: semua koneksi dalam satu thread
pub struct EventedServer {
    poll: Poll,
    listener: MioTcpListener,
    /// Registration table: setiap entry subscribed READABLE-only
    connections: HashMap<Token, TcpStream>,
    next_token: usize,
    buffer_size: usize,
}

impl EventedServer {
    /// Buat poll facility, bind listener non-blocking, dan register
    /// listener untuk readability ("ada koneksi pending").
    ///
    /// Semua kegagalan di sini fatal di caller.
    pub fn bind(config: &ServerConfig) -> io::Result<Self> {
        let poll = Poll::new()?;

        let listener = TcpListener::bind(config.addr())?;
        listener.set_nonblocking(true)?;
        let mut listener = MioTcpListener::from_std(listener);

        poll.registry()
            .register(&mut listener, LISTENER, Interest::READABLE)?;

        Ok(Self {
            poll,
            listener,
            connections: HashMap::new(),
            next_token: 1,
            buffer_size: config.buffer_size,
        })
    }

    /// Address yang benar-benar ter-bind (berguna saat port 0 / ephemeral)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Jumlah koneksi client yang sedang terdaftar di registration table
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Event loop. Wait tanpa batas waktu; poll error dilaporkan dan loop
    /// lanjut, per-connection error ditangani di dalam dispatch.
    pub fn run(&mut self) -> io::Result<()> {
        println!(
            "⚡ Evented server listening on port {} (buffer: {} bytes)",
            self.local_addr()?.port(),
            self.buffer_size
        );

        let mut events = Events::with_capacity(EVENTS_CAPACITY);
        loop {
            if let Err(e) = self.poll_once(&mut events, None) {
                eprintln!("⚠️  Poll failed: {}", e);
            }
        }
    }

    /// Satu poll cycle: wait readiness, lalu dispatch semua event.
    ///
    /// Dipisah dari [`run`] supaya test bisa men-drive loop per-cycle
    /// dengan timeout terbatas dan mengamati registration table.
    pub fn poll_once(
        &mut self,
        events: &mut Events,
        timeout: Option<Duration>,
    ) -> io::Result<()> {
        self.poll.poll(events, timeout)?;

        for event in events.iter() {
            match event.token() {
                LISTENER => self.accept_pending(),
                token => self.service_client(token),
            }
        }

        Ok(())
    }

    /// Drain semua koneksi yang antri di backlog sampai WouldBlock.
    ///
    /// Setiap koneksi baru diregister untuk readability sebelum lanjut ke
    /// accept berikutnya. Accept error lain dilaporkan dan drain berhenti;
    /// event loop tetap jalan.
    fn accept_pending(&mut self) {
        loop {
            match self.listener.accept() {
                Ok((mut stream, _addr)) => {
                    // mio stream sudah non-blocking sejak accept
                    stream.set_nodelay(true).ok();
                    #[cfg(unix)]
                    {
                        use std::os::unix::io::AsRawFd;
                        super::connection::tune_socket(stream.as_raw_fd(), self.buffer_size);
                    }

                    let token = Token(self.next_token);
                    self.next_token += 1;

                    match self
                        .poll
                        .registry()
                        .register(&mut stream, token, Interest::READABLE)
                    {
                        Ok(()) => {
                            self.connections.insert(token, stream);
                        }
                        // Registrasi gagal: stream drop = close, koneksi
                        // dibuang tanpa pernah masuk table
                        Err(e) => eprintln!("⚠️  Register failed: {}", e),
                    }
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => {
                    eprintln!("⚠️  Accept failed: {}", e);
                    break;
                }
            }
        }
    }

    /// Single-shot servicing: satu read, satu best-effort write, lalu
    /// deregister dan close pada pass yang sama. Tidak ada keep-alive,
    /// tidak ada re-arm untuk writability.
    fn service_client(&mut self, token: Token) {
        let mut stream = match self.connections.remove(&token) {
            Some(stream) => stream,
            // Token yang sudah ditutup di cycle ini, abaikan
            None => return,
        };

        if let ServiceOutcome::WriteFailed(e) = service(&mut stream, self.buffer_size) {
            eprintln!("⚠️  Send failed: {}", e);
        }

        // Kernel melepas registrasi sendiri saat fd close, tapi deregister
        // explicit menjaga table dan poll facility tetap sinkron
        let _ = self.poll.registry().deregister(&mut stream);
        // stream drop di sini: handle tertutup pada semua path
    }
}
