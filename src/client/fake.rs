//! In-memory transport with canned behavior.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::client::{ContentTransport, Query};
use crate::error::{AppError, Result};

type Responder = dyn Fn(&Query) -> Result<serde_json::Value> + Send + Sync;

enum Behavior {
    Respond(Box<Responder>),
    Hang,
}

/// Transport that answers from a closure and counts calls.
pub struct FakeTransport {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl FakeTransport {
    /// Answer every query with `respond(query)`.
    pub fn new(
        respond: impl Fn(&Query) -> Result<serde_json::Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            behavior: Behavior::Respond(Box::new(respond)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer every query with the same payload.
    pub fn with_result(result: serde_json::Value) -> Self {
        Self::new(move |_| Ok(result.clone()))
    }

    /// Fail every query with the given status.
    pub fn failing(status: u16) -> Self {
        Self::new(move |_| Err(AppError::fetch_failed(status, "fake://content")))
    }

    /// Never answer.
    pub fn hanging() -> Self {
        Self {
            behavior: Behavior::Hang,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of queries executed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentTransport for FakeTransport {
    async fn execute(&self, query: &Query) -> Result<serde_json::Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Respond(respond) => respond(query),
            Behavior::Hang => futures::future::pending().await,
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
