//! Integration Test Harness
//!
//! - `MockGemini` - local HTTP stand-in for the Gemini API
//! - `FakeBackend` - scripted in-process image backend
//! - `run_cli` - runs the roomcraft binary against a mock

mod backend;
mod cli;

use std::sync::Arc;

use roomcraft::{Catalog, DesignSession};

pub use backend::{FakeBackend, Outcome};
pub use cli::run_cli;
pub use upstream::{content_reply, predict_reply, MockGemini, Reply, GENERATED, REFINED};

/// Session over the built-in catalog backed by a fresh fake
pub fn fake_session() -> (DesignSession, Arc<FakeBackend>) {
    let backend = FakeBackend::new();
    let session = DesignSession::new(Arc::new(Catalog::builtin()), backend.clone());
    (session, backend)
}

/// Select `room` and `color` from the built-in catalog
pub fn select(session: &DesignSession, room: &str, color: &str) {
    let room = session.catalog().room(room).expect("room").clone();
    let color = session.catalog().color(color).expect("color").clone();
    session.select_room(room).expect("select room");
    session.select_color(color).expect("select color");
}
