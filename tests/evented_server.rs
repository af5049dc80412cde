//! Integration tests untuk EventedServer
//!
//! Dua mode: full server di background thread (black-box lewat socket),
//! dan reactor yang di-drive manual lewat `poll_once` supaya registration
//! table bisa diamati per-cycle.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

use mio::Events;

use janus::config::ServerConfig;
use janus::network::EventedServer;
use janus::protocol::RESPONSE;

/// Start full server di ephemeral port, return address yang ter-bind.
fn start_server(buffer_size: usize) -> SocketAddr {
    let config = ServerConfig {
        port: 0,
        buffer_size,
    };
    let mut server = EventedServer::bind(&config).expect("bind");
    let port = server.local_addr().expect("local_addr").port();
    thread::spawn(move || {
        let _ = server.run();
    });
    // Listener bind di 0.0.0.0; client masuk lewat loopback
    SocketAddr::from(([127, 0, 0, 1], port))
}

fn connect(addr: SocketAddr) -> TcpStream {
    let stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("read timeout");
    stream
}

fn request_once(addr: SocketAddr, payload: &[u8]) -> Vec<u8> {
    let mut stream = connect(addr);
    stream.write_all(payload).expect("send");
    stream.shutdown(Shutdown::Write).expect("shutdown write");
    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read response");
    response
}

/// Drive reactor per-cycle sampai kondisi terpenuhi (atau deadline habis).
fn drive_until(
    server: &mut EventedServer,
    events: &mut Events,
    done: impl Fn(&EventedServer) -> bool,
) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done(server) {
        assert!(
            Instant::now() < deadline,
            "reactor did not reach expected state in time"
        );
        server
            .poll_once(events, Some(Duration::from_millis(50)))
            .expect("poll_once");
    }
}

#[test]
fn test_single_byte_gets_exact_response() {
    let addr = start_server(1024);

    assert_eq!(request_once(addr, b"x"), RESPONSE);
    assert_eq!(request_once(addr, b"x"), RESPONSE);
}

#[test]
fn test_concurrent_clients_all_get_response() {
    let addr = start_server(1024);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            thread::spawn(move || {
                let payload = format!("GET /{} HTTP/1.1\r\n\r\n", i);
                request_once(addr, payload.as_bytes())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("client thread"), RESPONSE);
    }
}

#[test]
fn test_zero_byte_client_gets_no_response() {
    let addr = start_server(1024);

    let mut stream = connect(addr);
    stream.shutdown(Shutdown::Write).expect("shutdown write");
    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read");
    assert!(
        response.is_empty(),
        "empty-read connection must not get a response"
    );

    assert_eq!(request_once(addr, b"ping"), RESPONSE);
}

#[test]
fn test_oversized_payload_single_response() {
    let addr = start_server(16);

    let mut stream = connect(addr);
    stream.write_all(&[b'a'; 512]).expect("send oversized");

    let mut response = vec![0u8; RESPONSE.len()];
    stream.read_exact(&mut response).expect("read response");
    assert_eq!(response, RESPONSE);
}

#[test]
fn test_registry_never_retains_closed_connections() {
    let config = ServerConfig {
        port: 0,
        buffer_size: 1024,
    };
    let mut server = EventedServer::bind(&config).expect("bind");
    let port = server.local_addr().expect("local_addr").port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let mut events = Events::with_capacity(64);

    assert_eq!(server.connection_count(), 0);

    // K koneksi terbuka tanpa kirim data: semua harus masuk table
    let mut clients: Vec<TcpStream> = (0..3).map(|_| connect(addr)).collect();
    drive_until(&mut server, &mut events, |s| s.connection_count() == 3);

    // Satu client kirim data: single-shot service, entry-nya langsung hilang
    clients[0].write_all(b"x").expect("send");
    drive_until(&mut server, &mut events, |s| s.connection_count() == 2);

    let mut response = Vec::new();
    clients[0].read_to_end(&mut response).expect("read");
    assert_eq!(response, RESPONSE);

    // Sisanya menyusul: table kembali kosong, hanya listener yang tersisa
    // di poll facility
    for client in &mut clients[1..] {
        client.write_all(b"x").expect("send");
    }
    drive_until(&mut server, &mut events, |s| s.connection_count() == 0);

    for client in &mut clients[1..] {
        let mut response = Vec::new();
        client.read_to_end(&mut response).expect("read");
        assert_eq!(response, RESPONSE);
    }
}
