//! Spin lifecycle
//!
//! `Idle -> Spinning -> Resolving -> Settled`. A spin request generates the
//! raw rotation and schedules a single resolution after the animation delay.
//! The scheduled resolution can be driven two ways:
//! - `advance(dt_ms, ..)` from a fixed-step loop (native, tests)
//! - `fire(ticket, ..)` from a platform timer armed with `duration_ms`
//!
//! Either way a spin resolves exactly once: the pending task is taken when it
//! resolves, and a stale or cancelled ticket is ignored.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arc::normalize_sections;
use super::resolve::{aligned_rotation, resolve_winner};
use super::section::WheelSection;
use super::spin::{SpinRange, random_spin_degrees};
use crate::consts::{MIN_SECTIONS, SPIN_DURATION_MS};
use crate::error::WheelError;
use crate::normalize_degrees;
use crate::settings::Settings;

/// Current lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    /// Nothing spun yet (or result cleared)
    #[default]
    Idle,
    /// Animation in flight, input locked
    Spinning,
    /// Winner being computed (transient)
    Resolving,
    /// Wheel at rest on the winner. Accepts new spins like `Idle`.
    Settled,
}

impl SpinPhase {
    pub fn accepts_spin(&self) -> bool {
        matches!(self, SpinPhase::Idle | SpinPhase::Settled)
    }
}

/// Identifies one spin; used to match timer callbacks to the spin that armed them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpinTicket(u64);

impl SpinTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Pending Spinning -> Resolving transition
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledResolve {
    pub ticket: SpinTicket,
    pub delay_ms: f64,
    pub elapsed_ms: f64,
}

impl ScheduledResolve {
    pub fn remaining_ms(&self) -> f64 {
        (self.delay_ms - self.elapsed_ms).max(0.0)
    }

    fn is_due(&self) -> bool {
        self.elapsed_ms >= self.delay_ms
    }
}

/// Timing and randomness parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinConfig {
    pub duration_ms: u32,
    pub range: SpinRange,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration_ms: SPIN_DURATION_MS,
            range: SpinRange::default(),
        }
    }
}

impl From<&Settings> for SpinConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            duration_ms: settings.effective_spin_duration_ms(),
            range: settings.spin_range(),
        }
    }
}

/// Returned when a spin starts: what the UI should animate to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinStarted {
    pub ticket: SpinTicket,
    /// Where the animation restarts from: the previous resting rotation
    /// reduced to [0, 360), so the wheel always turns forward into `raw_rotation`
    pub start_rotation: f64,
    /// Rotation to animate to (degrees, clockwise)
    pub raw_rotation: f64,
    /// Animation length; the resolution fires after exactly this delay
    pub duration_ms: u32,
}

/// A completed spin
#[derive(Debug, Clone, PartialEq)]
pub struct SpinOutcome {
    pub ticket: SpinTicket,
    /// The winning section, same shape as the input
    pub winner: WheelSection,
    pub raw_rotation: f64,
    /// Final resting rotation centering the winner under the pointer
    pub aligned_rotation: f64,
}

/// Lifecycle notifications for collaborators (history, UI)
#[derive(Debug, Clone, PartialEq)]
pub enum SpinEvent {
    Started(SpinStarted),
    Settled(SpinOutcome),
    /// Resolution could not compute arcs (e.g. weights zeroed mid-spin)
    Failed { ticket: SpinTicket, error: WheelError },
    /// Pending resolution dropped by teardown/reset
    Cancelled(SpinTicket),
}

/// Transient per-wheel spin state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpinState {
    /// Total degrees of the current/last spin
    pub raw_rotation: f64,
    /// Rotation currently applied to the wheel (raw while spinning, aligned at rest)
    pub rotation: f64,
    pub is_spinning: bool,
    /// Set only once resolution completes
    pub winning_section: Option<WheelSection>,
}

/// Owns the spin state and the scheduled resolution for one wheel
#[derive(Debug, Clone, Default)]
pub struct SpinController {
    config: SpinConfig,
    phase: SpinPhase,
    state: SpinState,
    pending: Option<ScheduledResolve>,
    next_ticket: u64,
    events: Vec<SpinEvent>,
}

impl SpinController {
    pub fn new(config: SpinConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(SpinConfig::from(settings))
    }

    /// Replace timing/range; applies from the next spin on
    pub fn set_config(&mut self, config: SpinConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning
    }

    pub fn winner(&self) -> Option<&WheelSection> {
        self.state.winning_section.as_ref()
    }

    pub fn pending(&self) -> Option<&ScheduledResolve> {
        self.pending.as_ref()
    }

    /// Whether a spin request would currently be accepted
    pub fn can_spin(&self, sections: &[WheelSection]) -> bool {
        !self.state.is_spinning && self.phase.accepts_spin() && sections.len() >= MIN_SECTIONS
    }

    /// Start a spin. Rejected requests leave all state untouched.
    pub fn request_spin<R: Rng + ?Sized>(
        &mut self,
        sections: &[WheelSection],
        rng: &mut R,
    ) -> Result<SpinStarted, WheelError> {
        if self.state.is_spinning || !self.phase.accepts_spin() {
            log::warn!("Spin requested while another spin is in flight");
            return Err(WheelError::SpinInProgress);
        }
        if sections.len() < MIN_SECTIONS {
            log::warn!("Spin requested with {} section(s)", sections.len());
            return Err(WheelError::InsufficientOptions {
                count: sections.len(),
            });
        }

        let start_rotation = normalize_degrees(self.state.rotation);
        let raw_rotation = random_spin_degrees(rng, self.config.range);
        let ticket = SpinTicket(self.next_ticket);
        self.next_ticket += 1;

        self.state = SpinState {
            raw_rotation,
            rotation: raw_rotation,
            is_spinning: true,
            winning_section: None,
        };
        self.phase = SpinPhase::Spinning;
        self.pending = Some(ScheduledResolve {
            ticket,
            delay_ms: self.config.duration_ms as f64,
            elapsed_ms: 0.0,
        });

        let started = SpinStarted {
            ticket,
            start_rotation,
            raw_rotation,
            duration_ms: self.config.duration_ms,
        };
        log::debug!(
            "Spin {} started: {:.2}° over {} ms",
            ticket.0,
            raw_rotation,
            self.config.duration_ms
        );
        self.events.push(SpinEvent::Started(started));
        Ok(started)
    }

    /// Advance the scheduled resolution by `dt_ms`. Resolves against
    /// `sections` (as they are now) once the full delay has elapsed.
    pub fn advance(&mut self, dt_ms: f64, sections: &[WheelSection]) -> Option<SpinOutcome> {
        let pending = self.pending.as_mut()?;
        pending.elapsed_ms += dt_ms.max(0.0);
        if !pending.is_due() {
            return None;
        }
        self.resolve_pending(sections)
    }

    /// Step the pending resolution in `step_ms` increments until it settles.
    /// Returns the resolution error if the spin could not settle, and
    /// `NotSpinning` if nothing was pending.
    pub fn advance_until_settled(
        &mut self,
        step_ms: f64,
        sections: &[WheelSection],
    ) -> Result<SpinOutcome, WheelError> {
        let pending = self.pending.as_ref().ok_or(WheelError::NotSpinning)?;
        let ticket = pending.ticket;
        let step = if step_ms > 0.0 { step_ms } else { pending.remaining_ms() };

        while self.pending.is_some() {
            if let Some(outcome) = self.advance(step, sections) {
                return Ok(outcome);
            }
        }

        let failure = self.events.iter().rev().find_map(|event| match event {
            SpinEvent::Failed { ticket: failed, error } if *failed == ticket => Some(error.clone()),
            _ => None,
        });
        Err(failure.unwrap_or(WheelError::NotSpinning))
    }

    /// Platform timer callback for `ticket`. The timer was armed with the
    /// spin's full duration, so the delay is treated as elapsed.
    /// Stale, cancelled or repeated tickets are no-ops.
    pub fn fire(&mut self, ticket: SpinTicket, sections: &[WheelSection]) -> Option<SpinOutcome> {
        match self.pending.as_mut() {
            Some(pending) if pending.ticket == ticket => {
                pending.elapsed_ms = pending.delay_ms;
                self.resolve_pending(sections)
            }
            _ => {
                log::debug!("Ignoring timer for spin {} (not pending)", ticket.0);
                None
            }
        }
    }

    fn resolve_pending(&mut self, sections: &[WheelSection]) -> Option<SpinOutcome> {
        let scheduled = self.pending.take()?;
        self.phase = SpinPhase::Resolving;

        let raw_rotation = self.state.raw_rotation;
        let resolved = normalize_sections(sections).and_then(|arcs| {
            let winner = resolve_winner(&arcs, raw_rotation)?;
            Ok((winner.section.clone(), aligned_rotation(winner, raw_rotation)))
        });

        self.state.is_spinning = false;
        match resolved {
            Ok((winner, aligned)) => {
                self.state.rotation = aligned;
                self.state.winning_section = Some(winner.clone());
                self.phase = SpinPhase::Settled;

                log::info!(
                    "Spin {} landed on {:?} (aligned to {:.2}°)",
                    scheduled.ticket.0,
                    winner.display_label(),
                    aligned
                );
                let outcome = SpinOutcome {
                    ticket: scheduled.ticket,
                    winner,
                    raw_rotation,
                    aligned_rotation: aligned,
                };
                self.events.push(SpinEvent::Settled(outcome.clone()));
                Some(outcome)
            }
            Err(error) => {
                log::warn!("Spin {} could not resolve: {}", scheduled.ticket.0, error);
                self.phase = SpinPhase::Idle;
                self.events.push(SpinEvent::Failed {
                    ticket: scheduled.ticket,
                    error,
                });
                None
            }
        }
    }

    /// Cancel the pending resolution (component teardown). The wheel stays
    /// wherever the raw spin left it and input is unlocked.
    pub fn teardown(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::debug!("Spin {} cancelled", pending.ticket.0);
            self.state.is_spinning = false;
            self.phase = SpinPhase::Idle;
            self.events.push(SpinEvent::Cancelled(pending.ticket));
        }
    }

    /// Cancel anything pending and return the wheel to its initial position
    pub fn reset(&mut self) {
        self.teardown();
        self.state = SpinState::default();
        self.phase = SpinPhase::Idle;
    }

    /// Clear the displayed winner (external reset of the result)
    pub fn clear_result(&mut self) {
        if self.phase == SpinPhase::Settled {
            self.state.winning_section = None;
            self.phase = SpinPhase::Idle;
        }
    }

    /// Take all lifecycle events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<SpinEvent> {
        std::mem::take(&mut self.events)
    }
}
