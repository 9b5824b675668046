//! Tests for the remote collector transport against a local HTTP listener.

use serde_json::Value;
use sevlog::output::HttpOutput;
use sevlog::{Dispatcher, Log, LogRecord, Output, Severity};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Serves one request with `status`, returning the request line and body.
fn serve_once(status: &'static str) -> (String, mpsc::Receiver<(String, String)>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut content_length = 0;
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            let header = header.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':')
                && name.eq_ignore_ascii_case("content-length")
            {
                content_length = value.trim().parse().unwrap();
            }
        }

        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).unwrap();

        let response =
            format!("HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        reader.get_mut().write_all(response.as_bytes()).unwrap();

        tx.send((request_line.trim_end().to_string(), String::from_utf8(body).unwrap()))
            .unwrap();
    });

    (format!("http://{addr}"), rx)
}

/// Accepts connections and never answers. Held sockets stay open until the
/// test process exits.
fn stalled_collector() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let mut held: Vec<TcpStream> = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://{addr}/v1/input/k")
}

#[test]
fn posts_record_to_collector_path() {
    let (base, rx) = serve_once("200 OK");
    let url = format!("{base}/v1/input/k3y?ddsource=rust&service=billing");

    let logger = Dispatcher::builder()
        .service("BILLING")
        .json_output(HttpOutput::new(url).unwrap().level(Severity::Warn))
        .build();

    logger.info("filtered out");
    logger.error_runtime("payment gateway down");

    let (request_line, body) = rx.recv().unwrap();
    assert_eq!(
        request_line,
        "POST /v1/input/k3y?ddsource=rust&service=billing HTTP/1.1"
    );

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["level"], "errorRuntime");
    assert_eq!(body["service"], "BILLING");
    let record: Value = serde_json::from_str(body["message"].as_str().unwrap()).unwrap();
    assert_eq!(record["text"], "payment gateway down");
}

#[test]
fn rejected_post_is_not_surfaced_to_caller() {
    let (base, rx) = serve_once("500 Internal Server Error");
    let output = HttpOutput::new(format!("{base}/v1/input/k")).unwrap();

    let record = LogRecord {
        level: Severity::Emerg,
        message: "{}",
        service: "APP",
        timestamp: chrono::Local::now(),
    };
    assert!(output.write(&record).is_ok());
    assert!(output.flush().is_ok());
    assert!(rx.recv().is_ok());
}

#[test]
fn logging_does_not_wait_for_collector() {
    let logger = Dispatcher::builder()
        .json_output(HttpOutput::new(stalled_collector()).unwrap().level(Severity::DebugEx))
        .build();

    let started = Instant::now();
    logger.info("one");
    logger.info("two");
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn full_queue_drops_instead_of_blocking() {
    let output = HttpOutput::with_capacity(stalled_collector(), 1).unwrap();
    let record = LogRecord {
        level: Severity::Warn,
        message: "{}",
        service: "APP",
        timestamp: chrono::Local::now(),
    };

    // One post in flight plus one queued at most; the rest are dropped.
    let started = Instant::now();
    let dropped = (0..4)
        .map(|_| output.write(&record))
        .filter(|r| matches!(r, Err(sevlog::Error::Delivery(_))))
        .count();
    assert!(dropped >= 2);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn body_shape() {
    let record = LogRecord {
        level: Severity::Info,
        message: r#"{"text":"x"}"#,
        service: "APP",
        timestamp: chrono::Local::now(),
    };
    let body: Value = serde_json::from_str(&HttpOutput::body(&record).unwrap()).unwrap();
    assert_eq!(body["level"], "info");
    assert_eq!(body["message"], r#"{"text":"x"}"#);
    assert_eq!(body["service"], "APP");
}
