//! Decision history

use serde::{Deserialize, Serialize};

use super::IdGenerator;
use super::store::{RecordStore, load_list, save_list};
use super::wheels::SavedWheel;
use crate::error::StoreError;
use crate::wheel::SpinOutcome;

/// Store key for the decision log
pub const DECISIONS_KEY: &str = "decision_wheel_decisions";

/// One recorded spin result. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub id: String,
    pub wheel_id: String,
    /// Wheel name at the time of the spin
    pub wheel_name: String,
    /// Winning section label
    pub result: String,
    /// Unix timestamp (ms)
    pub timestamp: f64,
}

/// Decisions for one wheel, newest first
#[derive(Debug, Clone, PartialEq)]
pub struct WheelHistory {
    pub wheel_id: String,
    pub wheel_name: String,
    pub decisions: Vec<Decision>,
}

/// Append-only decision log backed by a record store
#[derive(Debug, Clone)]
pub struct DecisionLog<S: RecordStore> {
    store: S,
    ids: IdGenerator,
}

impl<S: RecordStore> DecisionLog<S> {
    pub fn new(store: S) -> Self {
        let mut history = Self {
            store,
            ids: IdGenerator::default(),
        };
        if let Ok(decisions) = history.list() {
            for decision in &decisions {
                history.ids.observe(&decision.id);
            }
        }
        history
    }

    pub fn record(
        &mut self,
        wheel_id: &str,
        wheel_name: &str,
        result: &str,
        now_ms: f64,
    ) -> Result<Decision, StoreError> {
        let mut decisions = self.list()?;
        let decision = Decision {
            id: self.ids.next_id(now_ms),
            wheel_id: wheel_id.to_string(),
            wheel_name: wheel_name.to_string(),
            result: result.to_string(),
            timestamp: now_ms,
        };
        decisions.push(decision.clone());
        save_list(&mut self.store, DECISIONS_KEY, &decisions)?;
        log::debug!("Recorded decision {:?} for {:?}", result, wheel_name);
        Ok(decision)
    }

    /// Record the winner of a settled spin on `wheel`
    pub fn record_outcome(
        &mut self,
        wheel: &SavedWheel,
        outcome: &SpinOutcome,
        now_ms: f64,
    ) -> Result<Decision, StoreError> {
        self.record(&wheel.id, &wheel.name, &outcome.winner.label, now_ms)
    }

    /// All decisions in the order they were recorded
    pub fn list(&self) -> Result<Vec<Decision>, StoreError> {
        load_list(&self.store, DECISIONS_KEY)
    }

    pub fn newest_first(&self) -> Result<Vec<Decision>, StoreError> {
        let mut decisions = self.list()?;
        decisions.sort_by(|a, b| b.timestamp.total_cmp(&a.timestamp));
        Ok(decisions)
    }

    /// Decisions grouped per wheel; groups ordered by their latest decision
    pub fn grouped_by_wheel(&self) -> Result<Vec<WheelHistory>, StoreError> {
        let mut groups: Vec<WheelHistory> = Vec::new();
        for decision in self.newest_first()? {
            match groups.iter_mut().find(|g| g.wheel_id == decision.wheel_id) {
                Some(group) => group.decisions.push(decision),
                None => groups.push(WheelHistory {
                    wheel_id: decision.wheel_id.clone(),
                    wheel_name: decision.wheel_name.clone(),
                    decisions: vec![decision],
                }),
            }
        }
        Ok(groups)
    }

    /// Delete every decision
    pub fn clear(&mut self) -> Result<(), StoreError> {
        save_list::<Decision>(&mut self.store, DECISIONS_KEY, &[])?;
        log::info!("Decision history cleared");
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::wheel::{SpinController, WheelSection};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_record_and_list() {
        let mut history = DecisionLog::new(MemoryStore::new());
        history.record("w1", "Lunch", "Tacos", 1000.0).unwrap();
        history.record("w1", "Lunch", "Sushi", 2000.0).unwrap();

        let all = history.list().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].result, "Tacos");
        assert_ne!(all[0].id, all[1].id);

        let newest = history.newest_first().unwrap();
        assert_eq!(newest[0].result, "Sushi");
    }

    #[test]
    fn test_grouped_by_wheel() {
        let mut history = DecisionLog::new(MemoryStore::new());
        history.record("w1", "Lunch", "Tacos", 1.0).unwrap();
        history.record("w2", "Games", "Chess", 2.0).unwrap();
        history.record("w1", "Lunch", "Pasta", 3.0).unwrap();

        let groups = history.grouped_by_wheel().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].wheel_id, "w1");
        assert_eq!(groups[0].decisions[0].result, "Pasta");
        assert_eq!(groups[0].decisions[1].result, "Tacos");
        assert_eq!(groups[1].wheel_name, "Games");
    }

    #[test]
    fn test_clear() {
        let mut history = DecisionLog::new(MemoryStore::new());
        history.record("w1", "Lunch", "Tacos", 1.0).unwrap();
        history.clear().unwrap();
        assert!(history.list().unwrap().is_empty());
    }

    #[test]
    fn test_one_decision_per_settled_spin() {
        let wheel = SavedWheel::default_wheel(0.0);
        let mut controller = SpinController::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut history = DecisionLog::new(MemoryStore::new());

        for i in 0..3 {
            controller.request_spin(&wheel.sections, &mut rng).unwrap();
            let outcome = controller.advance(5000.0, &wheel.sections).unwrap();
            let decision = history.record_outcome(&wheel, &outcome, i as f64).unwrap();
            assert_eq!(decision.wheel_name, "Food Wheel");
            assert!(
                wheel
                    .sections
                    .iter()
                    .any(|s: &WheelSection| s.label == decision.result)
            );
        }
        assert_eq!(history.list().unwrap().len(), 3);
    }

    #[test]
    fn test_record_shape() {
        let mut history = DecisionLog::new(MemoryStore::new());
        let decision = history.record("w1", "Lunch", "Tacos", 1.0).unwrap();
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["wheelId"], "w1");
        assert_eq!(json["wheelName"], "Lunch");
        assert_eq!(json["result"], "Tacos");
    }
}
