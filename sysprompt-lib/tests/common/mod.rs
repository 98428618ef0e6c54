//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use sysprompt_lib::api::RoleApi;
use sysprompt_lib::error::ApiError;
use sysprompt_lib::error::Error;
use sysprompt_lib::model::Record;
use sysprompt_lib::model::RecordDraft;
use sysprompt_lib::model::RecordId;

// =============================================================================
// In-memory API
// =============================================================================

/// A call observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(RecordDraft),
    Update(RecordId, RecordDraft),
    Delete(RecordId),
}

/// In-memory role service.
///
/// Assigns ids on create, records every call and fails on demand.
pub struct FakeApi {
    records: Mutex<Vec<Record>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicI64,
    fail_list: AtomicBool,
    fail_writes: AtomicBool,
    list_delay: Mutex<Duration>,
    write_delay: Mutex<Duration>,
}

impl FakeApi {
    pub fn new(records: Vec<Record>) -> Arc<Self> {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            records: Mutex::new(records),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(next_id),
            fail_list: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            list_delay: Mutex::new(Duration::ZERO),
            write_delay: Mutex::new(Duration::ZERO),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn write_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| *c != Call::List)
            .collect()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub fn set_records(&self, records: Vec<Record>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_list_delay(&self, delay: Duration) {
        *self.list_delay.lock().unwrap() = delay;
    }

    pub fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = delay;
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn check_writes(&self) -> Result<(), Error> {
        let delay = *self.write_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ApiError::http(500, "boom").into());
        }
        Ok(())
    }
}

#[async_trait]
impl RoleApi for FakeApi {
    async fn list(&self) -> Result<Vec<Record>, Error> {
        self.record(Call::List);
        let delay = *self.list_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ApiError::http(503, "unavailable").into());
        }
        Ok(self.records())
    }

    async fn create(&self, draft: &RecordDraft) -> Result<(), Error> {
        self.record(Call::Create(draft.clone()));
        self.check_writes().await?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().push(Record::new(
            id,
            draft.name.clone(),
            draft.content.clone(),
            draft.content_alt.clone(),
        ));
        Ok(())
    }

    async fn update(&self, id: RecordId, draft: &RecordDraft) -> Result<(), Error> {
        self.record(Call::Update(id, draft.clone()));
        self.check_writes().await?;
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.name = draft.name.clone();
                record.content = draft.content.clone();
                record.content_alt = draft.content_alt.clone();
                Ok(())
            }
            None => Err(ApiError::http(404, "not found").into()),
        }
    }

    async fn delete(&self, id: RecordId) -> Result<(), Error> {
        self.record(Call::Delete(id));
        self.check_writes().await?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(ApiError::http(404, "not found").into());
        }
        Ok(())
    }
}

/// A handful of records with mixed-script content.
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new(1, "tutor", "你是一位耐心的老師", "You are a patient teacher"),
        Record::new(2, "translator", "請翻譯以下內容", "Translate the following"),
        Record::new(3, "critic", "請評論這篇文章", "Review this article"),
        Record::new(4, "Assistant", "一般助理", "General assistant"),
    ]
}

/// `count` records named `role-00`, `role-01`, ...
pub fn numbered_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new(
                i as RecordId + 1,
                format!("role-{:02}", i),
                format!("content {}", i),
                "",
            )
        })
        .collect()
}

// =============================================================================
// HTTP mock server
// =============================================================================

/// A request captured by [`MockServer`].
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl Captured {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Local HTTP/1 server answering every request with one canned response.
pub struct MockServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl MockServer {
    /// Starts a server that answers `status` with `body`.
    pub async fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// Like [`start`](Self::start), but waits `delay` before answering.
    pub async fn start_with_delay(status: u16, body: &str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let body = body.to_string();

        let captured = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let captured = captured.clone();
                let body = body.clone();
                let service = service_fn(move |req: Request<Incoming>| {
                    let captured = captured.clone();
                    let body = body.clone();
                    async move {
                        let method = req.method().to_string();
                        let path = req.uri().path().to_string();
                        let bytes = req.into_body().collect().await.unwrap().to_bytes();
                        captured.lock().unwrap().push(Captured {
                            method,
                            path,
                            body: String::from_utf8_lossy(&bytes).into_owned(),
                        });
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(status)
                                .header("Content-Type", "application/json")
                                .body(Full::new(Bytes::from(body)))
                                .unwrap(),
                        )
                    }
                });
                tokio::spawn(async move {
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            url: format!("http://{}/api", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Captured {
        self.requests().pop().expect("no request received")
    }
}
