//! Decision Wheel - a weighted spinning wheel for making choices
//!
//! Core modules:
//! - `wheel`: Arc geometry, spin generation, outcome resolution, spin lifecycle
//! - `editor`: Section editing (add/remove/reweight)
//! - `persistence`: Saved wheels and decision history on a key-value store
//! - `export`: Decision history export (JSON, plain text, Markdown)
//! - `platform`: Browser/native platform abstraction
//! - `settings`: User-tunable spin parameters

pub mod editor;
pub mod error;
pub mod export;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod wheel;

pub use error::{StoreError, WheelError};
pub use settings::Settings;
pub use wheel::{SectionArc, SpinController, SpinOutcome, SpinPhase, WheelSection};

use glam::DVec2;

/// Wheel configuration constants
pub mod consts {
    /// Degrees in one full turn
    pub const FULL_TURN: f64 = 360.0;
    /// Pointer position in the unrotated wheel frame (0 = top)
    pub const POINTER_ANGLE: f64 = 0.0;

    /// Spin animation length before the outcome is resolved
    pub const SPIN_DURATION_MS: u32 = 5000;
    /// Ease-out transition applied when snapping to the aligned rotation
    pub const SETTLE_TRANSITION_MS: u32 = 300;

    /// Full turns a spin travels (lower/upper bound, fractional)
    pub const MIN_TURNS: f64 = 3.0;
    pub const MAX_TURNS: f64 = 5.0;

    /// Countdown tick interval
    pub const COUNTDOWN_TICK_MS: u32 = 250;

    /// A wheel needs at least this many sections to spin
    pub const MIN_SECTIONS: usize = 2;

    /// Editor weight slider range
    pub const MIN_WEIGHT: f64 = 1.0;
    pub const MAX_WEIGHT: f64 = 10.0;

    /// Relative tolerance for arc closure at 360°
    pub const ANGLE_EPSILON: f64 = 1e-9;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    use consts::FULL_TURN;
    ((angle % FULL_TURN) + FULL_TURN) % FULL_TURN
}

/// Convert a wheel angle (degrees, 0 = top, clockwise) to a point in a
/// percent box centered on (50, 50)
#[inline]
pub fn polar_to_percent(degrees: f64, radius_pct: f64) -> DVec2 {
    let rad = (degrees - 90.0).to_radians();
    DVec2::new(50.0 + radius_pct * rad.cos(), 50.0 + radius_pct * rad.sin())
}
