//! FakeBackend - in-process image backend with call counting
//!
//! Lets session tests script outcomes and hold a call open to exercise the
//! in-flight window.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use roomcraft::{ClientError, GeneratedImage, ImageGenerator, ImageRefiner};
use tokio::sync::Notify;

/// What the next call returns
#[derive(Debug, Clone)]
pub enum Outcome {
    Image(Vec<u8>),
    Empty,
    Unconfigured,
    Upstream(u16),
    /// Never resolves
    Hang,
}

impl Outcome {
    async fn resolve(self) -> Result<GeneratedImage, ClientError> {
        match self {
            Outcome::Image(bytes) => Ok(GeneratedImage::new(bytes)),
            Outcome::Empty => Err(ClientError::EmptyResult),
            Outcome::Unconfigured => Err(ClientError::Configuration),
            Outcome::Upstream(status) => Err(ClientError::Upstream {
                status,
                body: "upstream unavailable".to_string(),
            }),
            Outcome::Hang => std::future::pending().await,
        }
    }
}

/// Arguments of one refine call
#[derive(Debug, Clone)]
pub struct RefineCall {
    pub source: Vec<u8>,
    pub instruction: String,
    pub language: String,
}

pub struct FakeBackend {
    generate_outcome: Mutex<Outcome>,
    refine_outcome: Mutex<Outcome>,
    generate_calls: AtomicUsize,
    refine_calls: Mutex<Vec<RefineCall>>,
    prompts: Mutex<Vec<String>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            generate_outcome: Mutex::new(Outcome::Image(b"generated".to_vec())),
            refine_outcome: Mutex::new(Outcome::Image(b"refined".to_vec())),
            generate_calls: AtomicUsize::new(0),
            refine_calls: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        })
    }

    pub fn set_generate(&self, outcome: Outcome) {
        *self.generate_outcome.lock() = outcome;
    }

    pub fn set_refine(&self, outcome: Outcome) {
        *self.refine_outcome.lock() = outcome;
    }

    /// Block every following call until the returned handle is notified
    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock() = Some(notify.clone());
        notify
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn refine_calls(&self) -> Vec<RefineCall> {
        self.refine_calls.lock().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    async fn wait_gate(&self) {
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl ImageGenerator for FakeBackend {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ClientError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());
        self.wait_gate().await;
        let outcome = self.generate_outcome.lock().clone();
        outcome.resolve().await
    }
}

#[async_trait]
impl ImageRefiner for FakeBackend {
    async fn refine(
        &self,
        image: &GeneratedImage,
        instruction: &str,
        language: &str,
    ) -> Result<GeneratedImage, ClientError> {
        self.refine_calls.lock().push(RefineCall {
            source: image.bytes().to_vec(),
            instruction: instruction.to_string(),
            language: language.to_string(),
        });
        self.wait_gate().await;
        let outcome = self.refine_outcome.lock().clone();
        outcome.resolve().await
    }
}
