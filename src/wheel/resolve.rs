//! Outcome resolution and alignment
//!
//! The wheel rotates clockwise by the raw rotation while the pointer stays
//! fixed at the top. In the wheel's own frame the pointer therefore sits at
//! `-rotation`, which is why resolution negates the rotation and alignment
//! subtracts the winning midpoint. The two must change together.

use super::arc::SectionArc;
use crate::consts::{FULL_TURN, POINTER_ANGLE};
use crate::error::WheelError;
use crate::normalize_degrees;

/// Pointer position in wheel-local degrees, in [0, 360)
#[inline]
pub fn pointer_angle(raw_rotation: f64) -> f64 {
    normalize_degrees(POINTER_ANGLE - raw_rotation)
}

/// Find the arc under the pointer after rotating by `raw_rotation`
///
/// A miss (only possible in the floating-point gap at the 360°/0° seam)
/// falls back to the first arc.
pub fn resolve_winner<'s, 'a>(
    arcs: &'s [SectionArc<'a>],
    raw_rotation: f64,
) -> Result<&'s SectionArc<'a>, WheelError> {
    let first = arcs.first().ok_or(WheelError::EmptyArcSet)?;
    let angle = pointer_angle(raw_rotation);

    Ok(arcs
        .iter()
        .find(|arc| arc.contains_angle(angle))
        .unwrap_or_else(|| {
            log::debug!("pointer angle {angle} fell between arcs, using first arc");
            first
        }))
}

/// Resting rotation that centers `winner` under the pointer while keeping
/// the full turns already travelled
#[inline]
pub fn aligned_rotation(winner: &SectionArc<'_>, raw_rotation: f64) -> f64 {
    let full_turns = (raw_rotation / FULL_TURN).floor() * FULL_TURN;
    full_turns - winner.midpoint()
}
