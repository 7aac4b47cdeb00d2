//! Wheel engine
//!
//! Everything that decides an outcome lives here. Apart from the injected RNG
//! in `spin`, every function is pure:
//! - `arc`: weighted sections -> contiguous arcs covering [0, 360)
//! - `spin`: random total rotation for an in-flight spin
//! - `resolve`: which arc sits under the pointer, and the aligned resting rotation
//! - `controller`: the timed Idle -> Spinning -> Resolving -> Settled lifecycle
//! - `modes`: elimination rounds and countdown auto-spin

pub mod arc;
pub mod controller;
pub mod modes;
pub mod resolve;
pub mod section;
pub mod spin;

pub use arc::{SectionArc, clip_path_css, normalize_sections};
pub use controller::{
    ScheduledResolve, SpinConfig, SpinController, SpinEvent, SpinOutcome, SpinPhase, SpinStarted,
    SpinState, SpinTicket,
};
pub use modes::{Countdown, EliminationRound};
pub use resolve::{aligned_rotation, pointer_angle, resolve_winner};
pub use section::{DEFAULT_PALETTE, WheelSection, palette_color};
pub use spin::{SpinRange, random_spin_degrees};
