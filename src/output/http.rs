//! Remote log collector transport: one HTTPS POST per record, sent from a
//! background worker so logging calls never wait on the network.

use super::{LogRecord, Output};
use crate::internal;
use crate::level::{DEFAULT_LEVEL, Severity};
use reqwest::blocking::Client;
use serde::Serialize;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread;
use std::time::Duration;

/// Upper bound on a single post made by the worker.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Bodies waiting for the worker. Records arriving while it is full are dropped.
pub const HTTP_QUEUE_CAPACITY: usize = 1024;

#[derive(Debug, Serialize)]
struct HttpBody<'a> {
    level: &'a str,
    message: &'a str,
    service: &'a str,
}

#[derive(Debug)]
enum Job {
    Post(String),
    /// Acknowledged once every body queued before it has been posted.
    Flush(mpsc::Sender<()>),
}

/// `write` only enqueues; the worker thread owns the blocking client, so the
/// client is never created or dropped on a caller's (possibly async) thread.
/// Dropping the last handle closes the queue and the worker exits after
/// posting what is left.
#[derive(Debug, Clone)]
pub struct HttpOutput {
    url: String,
    queue: SyncSender<Job>,
    threshold: Severity,
}

impl HttpOutput {
    /// # Errors
    /// Worker spawn or TLS backend initialization failure.
    pub fn new(url: impl Into<String>) -> Result<Self, crate::Error> {
        Self::with_capacity(url, HTTP_QUEUE_CAPACITY)
    }

    /// Like [`HttpOutput::new`] with a custom queue size (at least 1).
    ///
    /// # Errors
    /// Worker spawn or TLS backend initialization failure.
    pub fn with_capacity(url: impl Into<String>, capacity: usize) -> Result<Self, crate::Error> {
        let url = url.into();
        let (queue, jobs) = mpsc::sync_channel(capacity.max(1));
        let (ready_tx, ready_rx) = mpsc::channel();

        let worker_url = url.clone();
        thread::Builder::new()
            .name("sevlog-http".into())
            .spawn(move || {
                let client = match Client::builder().timeout(HTTP_TIMEOUT).build() {
                    Ok(client) => {
                        let _ = ready_tx.send(Ok(()));
                        client
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                run_worker(&client, &worker_url, &jobs);
            })?;

        ready_rx.recv().map_err(|_| {
            crate::Error::Delivery("http worker exited during startup".to_string())
        })??;
        internal::debug("HTTP", &format!("Worker started, queue capacity {capacity}"));

        Ok(Self {
            url,
            queue,
            threshold: DEFAULT_LEVEL,
        })
    }

    #[must_use]
    pub const fn level(mut self, level: Severity) -> Self {
        self.threshold = level;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request body for one record.
    ///
    /// # Errors
    /// Serialization failure.
    pub fn body(record: &LogRecord<'_>) -> Result<String, crate::Error> {
        let body = HttpBody {
            level: record.level.as_str(),
            message: record.message,
            service: record.service,
        };
        Ok(serde_json::to_string(&body)?)
    }
}

fn post(client: &Client, url: &str, body: String) -> Result<(), reqwest::Error> {
    client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()?
        .error_for_status()?;
    Ok(())
}

fn run_worker(client: &Client, url: &str, jobs: &Receiver<Job>) {
    while let Ok(job) = jobs.recv() {
        match job {
            Job::Post(body) => {
                if let Err(e) = post(client, url, body) {
                    internal::error_runtime("HTTP", &format!("Post to collector failed: {e}"));
                }
            }
            Job::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    internal::debug("HTTP", "Queue closed, worker exiting");
}

impl Output for HttpOutput {
    fn name(&self) -> &'static str {
        "http"
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Never waits: a full queue drops the record and reports it as an error.
    fn write(&self, record: &LogRecord<'_>) -> Result<(), crate::Error> {
        match self.queue.try_send(Job::Post(Self::body(record)?)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(crate::Error::Delivery(
                "http queue full, record dropped".to_string(),
            )),
            Err(TrySendError::Disconnected(_)) => Err(crate::Error::Delivery(
                "http worker stopped, record dropped".to_string(),
            )),
        }
    }

    /// Blocks until every record queued so far has been posted or has failed.
    fn flush(&self) -> Result<(), crate::Error> {
        let stopped = || crate::Error::Delivery("http worker stopped".to_string());
        let (done_tx, done_rx) = mpsc::channel();
        self.queue.send(Job::Flush(done_tx)).map_err(|_| stopped())?;
        done_rx.recv().map_err(|_| stopped())
    }
}
