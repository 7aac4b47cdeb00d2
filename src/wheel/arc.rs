//! Arc geometry for weighted wheel sections
//!
//! Angles are in degrees, measured clockwise from the top of the unrotated
//! wheel. Each section gets an arc proportional to its weight:
//! - span: `weight / total_weight * 360`
//! - start_angle: end angle of the previous arc (first arc starts at 0)
//! - end_angle: `start_angle + span` (last arc ends at 360 up to rounding)

use glam::DVec2;

use super::section::WheelSection;
use crate::consts::FULL_TURN;
use crate::error::WheelError;
use crate::polar_to_percent;

/// Radius (percent of the wheel box) used for slice outlines. Larger than the
/// half-width so the clip polygon fully covers the circular wheel edge.
pub const OUTLINE_RADIUS_PCT: f64 = 100.0;

/// Angular extent of one section, borrowing the section it was derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionArc<'a> {
    pub section: &'a WheelSection,
    /// Start angle (degrees, inclusive)
    pub start_angle: f64,
    /// End angle (degrees, exclusive)
    pub end_angle: f64,
    /// Angular span (degrees)
    pub span: f64,
}

impl<'a> SectionArc<'a> {
    /// Angular midpoint of the arc
    #[inline]
    pub fn midpoint(&self) -> f64 {
        self.start_angle + self.span / 2.0
    }

    /// Half-open containment: an angle on a boundary belongs to the arc that
    /// starts there, never the one that ends there
    #[inline]
    pub fn contains_angle(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }

    /// Label anchor at the arc midpoint, in percent of the wheel box
    pub fn label_position(&self, radius_pct: f64) -> DVec2 {
        polar_to_percent(self.midpoint(), radius_pct)
    }

    /// Slice polygon: center, start edge, interior points every `step_deg`, end edge
    pub fn outline(&self, step_deg: f64) -> Vec<DVec2> {
        let step = if step_deg > 0.0 { step_deg } else { self.span.max(1.0) };
        let steps = (self.span / step).ceil().max(0.0) as usize;

        let mut points = Vec::with_capacity(steps + 3);
        points.push(DVec2::new(50.0, 50.0));
        points.push(polar_to_percent(self.start_angle, OUTLINE_RADIUS_PCT));
        points.extend(
            (0..steps).map(|i| polar_to_percent(self.start_angle + i as f64 * step, OUTLINE_RADIUS_PCT)),
        );
        points.push(polar_to_percent(self.end_angle, OUTLINE_RADIUS_PCT));
        points
    }

    /// Outline with the default sampling density (finer for wide slices)
    pub fn default_outline(&self) -> Vec<DVec2> {
        let step = if self.span < 180.0 { 10.0 } else { 5.0 };
        self.outline(step)
    }
}

/// Convert an ordered list of sections into contiguous arcs
///
/// Sections with a non-positive (or NaN) weight occupy a zero-length arc and
/// can never win. Fails with `InvalidWeight` when no weight is positive.
pub fn normalize_sections(sections: &[WheelSection]) -> Result<Vec<SectionArc<'_>>, WheelError> {
    let total: f64 = sections.iter().map(|s| effective_weight(s.weight)).sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(WheelError::InvalidWeight { total });
    }

    let mut last_angle = 0.0;
    Ok(sections
        .iter()
        .map(|section| {
            let span = effective_weight(section.weight) / total * FULL_TURN;
            let start_angle = last_angle;
            let end_angle = start_angle + span;
            last_angle = end_angle;
            SectionArc {
                section,
                start_angle,
                end_angle,
                span,
            }
        })
        .collect())
}

#[inline]
fn effective_weight(weight: f64) -> f64 {
    if weight > 0.0 { weight } else { 0.0 }
}

/// Render outline points as a CSS `clip-path` polygon
pub fn clip_path_css(points: &[DVec2]) -> String {
    let coords: Vec<String> = points
        .iter()
        .map(|p| format!("{:.3}% {:.3}%", p.x, p.y))
        .collect();
    format!("polygon({})", coords.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ANGLE_EPSILON;
    use proptest::prelude::*;

    fn sections(weights: &[f64]) -> Vec<WheelSection> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| WheelSection::new(format!("s{i}"), format!("Option {i}"), "#000").with_weight(w))
            .collect()
    }

    #[test]
    fn test_two_equal_sections() {
        let sections = sections(&[1.0, 1.0]);
        let arcs = normalize_sections(&sections).unwrap();
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].start_angle, 0.0);
        assert_eq!(arcs[0].end_angle, 180.0);
        assert_eq!(arcs[1].start_angle, 180.0);
        assert_eq!(arcs[1].end_angle, 360.0);
    }

    #[test]
    fn test_weighted_spans() {
        let sections = sections(&[1.0, 1.0, 2.0]);
        let arcs = normalize_sections(&sections).unwrap();
        assert_eq!(arcs[0].span, 90.0);
        assert_eq!(arcs[1].span, 90.0);
        assert_eq!(arcs[2].span, 180.0);
        assert_eq!(arcs[2].midpoint(), 270.0);
    }

    #[test]
    fn test_zero_weights_rejected() {
        let sections = sections(&[0.0, 0.0]);
        assert!(matches!(
            normalize_sections(&sections),
            Err(WheelError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_empty_sections_rejected() {
        assert!(matches!(
            normalize_sections(&[]),
            Err(WheelError::InvalidWeight { total }) if total == 0.0
        ));
    }

    #[test]
    fn test_non_positive_weight_gets_empty_arc() {
        let sections = sections(&[1.0, -3.0, 1.0]);
        let arcs = normalize_sections(&sections).unwrap();
        assert_eq!(arcs[1].span, 0.0);
        assert_eq!(arcs[1].start_angle, arcs[1].end_angle);
        assert!(!arcs[1].contains_angle(180.0));
        assert!(arcs[2].contains_angle(180.0));
    }

    #[test]
    fn test_contains_angle_half_open() {
        let sections = sections(&[1.0, 1.0]);
        let arcs = normalize_sections(&sections).unwrap();
        assert!(arcs[0].contains_angle(0.0));
        assert!(!arcs[0].contains_angle(180.0));
        assert!(arcs[1].contains_angle(180.0));
        assert!(!arcs[1].contains_angle(360.0));
    }

    #[test]
    fn test_label_position_right_and_left() {
        let sections = sections(&[1.0, 1.0]);
        let arcs = normalize_sections(&sections).unwrap();
        // First arc midpoint is 90° (right), second is 270° (left)
        let right = arcs[0].label_position(40.0);
        assert!((right.x - 90.0).abs() < 1e-9);
        assert!((right.y - 50.0).abs() < 1e-9);
        let left = arcs[1].label_position(40.0);
        assert!((left.x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_outline_shape() {
        let sections = sections(&[1.0, 3.0]);
        let arcs = normalize_sections(&sections).unwrap();
        // 90° span sampled every 10°: center + start + 9 interior + end
        let outline = arcs[0].default_outline();
        assert_eq!(outline.len(), 12);
        assert_eq!(outline[0], DVec2::new(50.0, 50.0));
        // Start edge points straight up
        assert!((outline[1].x - 50.0).abs() < 1e-9);
        assert!((outline[1].y + 50.0).abs() < 1e-9);
        // 270° span sampled every 5°
        assert_eq!(arcs[1].default_outline().len(), 3 + 54);
    }

    #[test]
    fn test_clip_path_css() {
        let css = clip_path_css(&[DVec2::new(50.0, 50.0), DVec2::new(50.0, -50.0)]);
        assert_eq!(css, "polygon(50.000% 50.000%, 50.000% -50.000%)");
    }

    proptest! {
        #[test]
        fn prop_arcs_partition_full_turn(weights in prop::collection::vec(0.001f64..1000.0, 1..24)) {
            let sections = sections(&weights);
            let arcs = normalize_sections(&sections).unwrap();

            prop_assert_eq!(arcs[0].start_angle, 0.0);
            for pair in arcs.windows(2) {
                prop_assert_eq!(pair[0].end_angle, pair[1].start_angle);
            }
            let last = arcs.last().unwrap();
            prop_assert!((last.end_angle - FULL_TURN).abs() <= FULL_TURN * ANGLE_EPSILON);

            let total_span: f64 = arcs.iter().map(|a| a.span).sum();
            prop_assert!((total_span - FULL_TURN).abs() <= FULL_TURN * ANGLE_EPSILON);
        }

        #[test]
        fn prop_arcs_preserve_order(weights in prop::collection::vec(0.001f64..1000.0, 1..24)) {
            let sections = sections(&weights);
            let arcs = normalize_sections(&sections).unwrap();
            prop_assert_eq!(arcs.len(), sections.len());
            for (arc, section) in arcs.iter().zip(&sections) {
                prop_assert_eq!(&arc.section.id, &section.id);
            }
        }
    }
}
