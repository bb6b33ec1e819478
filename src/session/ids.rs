//! Instance id sources for placed items

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::design::InstanceId;

/// Hands out instance ids that are never reused within a session
pub trait InstanceIdSource: Send + Sync {
    fn next_id(&self) -> InstanceId;
}

/// Monotonic counter starting at 1
#[derive(Debug)]
pub struct CounterIds {
    next: AtomicU64,
}

impl CounterIds {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl Default for CounterIds {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceIdSource for CounterIds {
    fn next_id(&self) -> InstanceId {
        InstanceId(self.next.fetch_add(1, Ordering::Relaxed) as u128)
    }
}

/// Random v4 UUIDs
#[derive(Debug, Default)]
pub struct UuidIds;

impl InstanceIdSource for UuidIds {
    fn next_id(&self) -> InstanceId {
        InstanceId(Uuid::new_v4().as_u128())
    }
}
