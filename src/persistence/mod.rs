//! Saved wheels and decision history
//!
//! Features:
//! - Key-value record store (LocalStorage on web, in-memory on native)
//! - Named wheels, upserted by name
//! - Append-only decision log with bulk clear
//! - Unreadable records are logged and treated as empty

pub mod history;
pub mod store;
pub mod wheels;

pub use history::{Decision, DecisionLog};
pub use store::{MemoryStore, RecordStore};
#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;
pub use wheels::{SavedWheel, WheelLibrary};

/// Generates opaque record ids from the clock, strictly increasing even when
/// two records are created in the same millisecond
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn next_id(&mut self, now_ms: f64) -> String {
        let candidate = now_ms.max(0.0) as u64;
        let id = if candidate > self.last { candidate } else { self.last + 1 };
        self.last = id;
        id.to_string()
    }

    /// Never hand out an id at or below `id` (ids already in a store)
    pub fn observe(&mut self, id: &str) {
        if let Ok(value) = id.parse::<u64>() {
            self.last = self.last.max(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut ids = IdGenerator::default();
        let a = ids.next_id(1_700_000_000_000.0);
        let b = ids.next_id(1_700_000_000_000.0);
        let c = ids.next_id(1_699_999_999_999.0);
        assert_eq!(a, "1700000000000");
        assert_eq!(b, "1700000000001");
        assert_eq!(c, "1700000000002");
    }

    #[test]
    fn test_observe_skips_existing() {
        let mut ids = IdGenerator::default();
        ids.observe("500");
        ids.observe("default");
        assert_eq!(ids.next_id(100.0), "501");
    }
}
