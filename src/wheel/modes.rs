//! Optional play modes layered on top of the spin lifecycle
//!
//! - Elimination: each winner leaves the wheel until too few remain
//! - Countdown: spin automatically when a timer runs out

use serde::{Deserialize, Serialize};

use super::section::WheelSection;
use crate::consts::MIN_SECTIONS;

/// Tracks winners removed from the wheel in elimination mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EliminationRound {
    pub enabled: bool,
    eliminated: Vec<String>,
}

impl EliminationRound {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            eliminated: Vec::new(),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.eliminated.clear();
    }

    pub fn eliminated(&self) -> &[String] {
        &self.eliminated
    }

    /// Sections still in play. Falls back to the full wheel when fewer than
    /// two would remain (or when the mode is off).
    pub fn active_sections(&self, all: &[WheelSection]) -> Vec<WheelSection> {
        if !self.enabled {
            return all.to_vec();
        }
        let active: Vec<WheelSection> = all
            .iter()
            .filter(|s| !self.eliminated.contains(&s.id))
            .cloned()
            .collect();
        if active.len() < MIN_SECTIONS {
            all.to_vec()
        } else {
            active
        }
    }

    /// Remove a winner. Returns `true` if this emptied the round and it was
    /// reset so every section is back in play.
    pub fn record_winner(&mut self, winner_id: &str, all: &[WheelSection]) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.eliminated.iter().any(|id| id == winner_id) {
            self.eliminated.push(winner_id.to_string());
        }

        let remaining = all
            .iter()
            .filter(|s| !self.eliminated.contains(&s.id))
            .count();
        if remaining < MIN_SECTIONS {
            log::info!("All options have been picked, restarting elimination round");
            self.eliminated.clear();
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.eliminated.clear();
    }
}

/// Countdown that triggers a spin when it reaches zero
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Countdown {
    remaining_ms: Option<f64>,
}

impl Countdown {
    pub fn start(&mut self, secs: u32) {
        log::info!("Wheel will spin in {} seconds", secs);
        self.remaining_ms = Some(secs as f64 * 1000.0);
    }

    /// Stop without firing. Returns whether a countdown was running.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.remaining_ms.take().is_some();
        if was_active {
            log::info!("Countdown cancelled");
        }
        was_active
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Whole seconds left (rounded up), 0 when inactive
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_ms
            .map(|ms| (ms / 1000.0).ceil().max(0.0) as u32)
            .unwrap_or(0)
    }

    /// Returns `true` exactly once, on the step the countdown runs out
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        let Some(remaining) = self.remaining_ms.as_mut() else {
            return false;
        };
        *remaining -= dt_ms.max(0.0);
        if *remaining <= 0.0 {
            self.remaining_ms = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::COUNTDOWN_TICK_MS;
    use crate::settings::Settings;
    use crate::wheel::SpinController;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn wheel(ids: &[&str]) -> Vec<WheelSection> {
        ids.iter().map(|id| WheelSection::new(*id, *id, "#000")).collect()
    }

    #[test]
    fn test_elimination_disabled_keeps_all() {
        let all = wheel(&["a", "b", "c"]);
        let mut round = EliminationRound::default();
        assert!(!round.record_winner("a", &all));
        assert_eq!(round.active_sections(&all).len(), 3);
    }

    #[test]
    fn test_elimination_removes_winners_then_resets() {
        let all = wheel(&["a", "b", "c", "d"]);
        let mut round = EliminationRound::new(true);

        assert!(!round.record_winner("b", &all));
        let active: Vec<String> = round.active_sections(&all).into_iter().map(|s| s.id).collect();
        assert_eq!(active, vec!["a", "c", "d"]);

        assert!(!round.record_winner("d", &all));
        assert_eq!(round.active_sections(&all).len(), 2);

        // Only one would remain: round restarts
        assert!(round.record_winner("a", &all));
        assert!(round.eliminated().is_empty());
        assert_eq!(round.active_sections(&all).len(), 4);
    }

    #[test]
    fn test_elimination_ignores_duplicates() {
        let all = wheel(&["a", "b", "c"]);
        let mut round = EliminationRound::new(true);
        round.record_winner("a", &all);
        round.record_winner("a", &all);
        assert_eq!(round.eliminated(), &["a".to_string()]);
    }

    #[test]
    fn test_countdown_fires_once() {
        let mut countdown = Countdown::default();
        assert!(!countdown.advance(1000.0));

        countdown.start(3);
        assert_eq!(countdown.remaining_secs(), 3);
        assert!(!countdown.advance(1500.0));
        assert_eq!(countdown.remaining_secs(), 2);
        assert!(countdown.advance(1500.0));
        assert!(!countdown.is_active());
        assert!(!countdown.advance(1000.0));
    }

    #[test]
    fn test_countdown_from_settings_spins_once() {
        let settings = Settings::default();
        let sections = wheel(&["a", "b"]);
        let mut controller = SpinController::from_settings(&settings);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut countdown = Countdown::default();
        countdown.start(settings.countdown_secs);

        let ticks = settings.countdown_secs * 1000 / COUNTDOWN_TICK_MS;
        let mut spins = 0;
        for tick in 1..=ticks + 4 {
            if countdown.advance(COUNTDOWN_TICK_MS as f64) {
                assert_eq!(tick, ticks);
                controller.request_spin(&sections, &mut rng).unwrap();
                spins += 1;
            }
        }
        assert_eq!(spins, 1);
        assert!(controller.is_spinning());
    }

    #[test]
    fn test_countdown_cancel() {
        let mut countdown = Countdown::default();
        countdown.start(5);
        assert!(countdown.cancel());
        assert!(!countdown.cancel());
        assert!(!countdown.advance(10_000.0));
    }
}
