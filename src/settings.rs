//! Wheel settings and preferences
//!
//! Persisted separately from saved wheels in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TURNS, MIN_TURNS, SETTLE_TRANSITION_MS, SPIN_DURATION_MS};
use crate::wheel::SpinRange;

/// Spin length used when reduced motion is on
pub const REDUCED_MOTION_SPIN_MS: u32 = 1000;

/// User preferences for spinning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Spin ===
    /// Animation length before the outcome is resolved
    pub spin_duration_ms: u32,
    /// Fewest full turns a spin travels
    pub min_turns: f64,
    /// Most full turns a spin travels
    pub max_turns: f64,
    /// Snap transition onto the aligned rotation
    pub settle_transition_ms: u32,

    // === Modes ===
    /// Countdown length for timed spins
    pub countdown_secs: u32,
    /// Remove each winner from the wheel until too few remain
    pub eliminate_winners: bool,

    // === Accessibility ===
    /// Reduced motion (short spins)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            min_turns: MIN_TURNS,
            max_turns: MAX_TURNS,
            settle_transition_ms: SETTLE_TRANSITION_MS,

            countdown_secs: 5,
            eliminate_winners: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Turn range for the spin generator
    pub fn spin_range(&self) -> SpinRange {
        SpinRange::new(self.min_turns, self.max_turns)
    }

    /// Effective spin duration (respects reduced_motion)
    pub fn effective_spin_duration_ms(&self) -> u32 {
        if self.reduced_motion {
            self.spin_duration_ms.min(REDUCED_MOTION_SPIN_MS)
        } else {
            self.spin_duration_ms
        }
    }

    /// Repair values a hand-edited or older save may carry
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        if !self.min_turns.is_finite() {
            self.min_turns = defaults.min_turns;
        }
        if !self.max_turns.is_finite() {
            self.max_turns = defaults.max_turns;
        }
        let range = self.spin_range();
        self.min_turns = range.min_turns;
        self.max_turns = range.max_turns;
        if self.countdown_secs == 0 {
            self.countdown_secs = defaults.countdown_secs;
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "decision_wheel_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(mut settings) = serde_json::from_str::<Settings>(&json) {
                    settings.sanitize();
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.spin_duration_ms, 5000);
        assert_eq!(settings.spin_range(), SpinRange::new(3.0, 5.0));
        assert_eq!(settings.effective_spin_duration_ms(), 5000);
    }

    #[test]
    fn test_reduced_motion_shortens_spin() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_spin_duration_ms(), REDUCED_MOTION_SPIN_MS);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"spin_duration_ms": 3000}"#).unwrap();
        assert_eq!(settings.spin_duration_ms, 3000);
        assert_eq!(settings.max_turns, 5.0);
        assert!(!settings.eliminate_winners);
    }

    #[test]
    fn test_sanitize_repairs_range() {
        let mut settings = Settings {
            min_turns: 8.0,
            max_turns: f64::NAN,
            countdown_secs: 0,
            ..Default::default()
        };
        settings.sanitize();
        assert_eq!(settings.min_turns, 5.0);
        assert_eq!(settings.max_turns, 8.0);
        assert_eq!(settings.countdown_secs, 5);
    }
}
