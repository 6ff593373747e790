//! One-shot HTTP stub standing in for the Figma API.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

pub const OTP_FRAME: &str = include_str!("../fixtures/otp_frame.json");

pub struct Stub {
    pub base: String,
    handle: JoinHandle<String>,
}

impl Stub {
    /// Answers the next request with `status` and `body`, then stops.
    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let base = format!("http://{}", listener.local_addr().expect("stub addr"));
        let body = body.into();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept stub connection");
            let head = read_head(&mut stream);
            send_response(&mut stream, status, body.as_bytes());
            head
        });
        Self { base, handle }
    }

    /// The request line and headers the stub received.
    pub fn request(self) -> String {
        self.handle.join().expect("stub thread panicked")
    }
}

/// A base URL nothing listens on.
pub fn dead_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind placeholder listener");
    let addr = listener.local_addr().expect("placeholder addr");
    drop(listener);
    format!("http://{addr}")
}

fn read_head(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut temp = [0u8; 4096];
    loop {
        let read = stream.read(&mut temp).expect("read request");
        if read == 0 {
            break;
        }
        buf.extend_from_slice(&temp[..read]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn send_response(stream: &mut TcpStream, status: u16, body: &[u8]) {
    let status_line = match status {
        200 => "HTTP/1.1 200 OK",
        400 => "HTTP/1.1 400 Bad Request",
        401 => "HTTP/1.1 401 Unauthorized",
        403 => "HTTP/1.1 403 Forbidden",
        404 => "HTTP/1.1 404 Not Found",
        429 => "HTTP/1.1 429 Too Many Requests",
        _ => "HTTP/1.1 500 Internal Server Error",
    };
    let headers = format!(
        "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(headers.as_bytes()).expect("write headers");
    stream.write_all(body).expect("write body");
}
