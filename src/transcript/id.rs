use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of document-unique segment ids.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// Produce an id that has never been handed out before.
    fn next_id(&self) -> String;
}

/// Random 128-bit ids (uuid v4). Collisions are negligible for the lifetime of
/// any document, and ids are never recycled.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Predictable `prefix-N` ids, for tests and demos.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_ids_are_unique() {
        let ids = UuidIdGenerator;
        let minted: HashSet<String> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(minted.len(), 1000);
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIdGenerator::new("dup");
        assert_eq!(ids.next_id(), "dup-1");
        assert_eq!(ids.next_id(), "dup-2");
    }
}
