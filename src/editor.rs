//! Section editing
//!
//! Mirrors the editor panel: add, remove (never below two sections), relabel,
//! recolor, reweight on the 1..=10 slider, and reset all weights.

use crate::consts::{MAX_WEIGHT, MIN_SECTIONS, MIN_WEIGHT};
use crate::error::WheelError;
use crate::persistence::IdGenerator;
use crate::wheel::{WheelSection, palette_color};

/// Editable list of wheel sections
#[derive(Debug, Clone, Default)]
pub struct WheelEditor {
    sections: Vec<WheelSection>,
    ids: IdGenerator,
}

impl WheelEditor {
    pub fn new(sections: Vec<WheelSection>) -> Self {
        let mut ids = IdGenerator::default();
        for section in &sections {
            ids.observe(&section.id);
        }
        Self { sections, ids }
    }

    pub fn sections(&self) -> &[WheelSection] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<WheelSection> {
        self.sections
    }

    /// Append a section with the next palette color and weight 1
    pub fn add_section(&mut self, now_ms: f64) -> &WheelSection {
        let index = self.sections.len();
        let section = WheelSection::new(
            self.ids.next_id(now_ms),
            format!("Option {}", index + 1),
            palette_color(index),
        );
        log::debug!("Added section {:?}", section.label);
        self.sections.push(section);
        &self.sections[index]
    }

    pub fn remove_section(&mut self, id: &str) -> Result<WheelSection, WheelError> {
        let index = self.position(id)?;
        if self.sections.len() <= MIN_SECTIONS {
            return Err(WheelError::InsufficientOptions {
                count: self.sections.len(),
            });
        }
        Ok(self.sections.remove(index))
    }

    pub fn set_label(&mut self, id: &str, label: &str) -> Result<(), WheelError> {
        self.section_mut(id)?.label = label.to_string();
        Ok(())
    }

    pub fn set_color(&mut self, id: &str, color: &str) -> Result<(), WheelError> {
        self.section_mut(id)?.color = color.to_string();
        Ok(())
    }

    /// Set a weight, clamped to the slider range (NaN becomes the minimum)
    pub fn set_weight(&mut self, id: &str, weight: f64) -> Result<f64, WheelError> {
        let weight = if weight.is_nan() {
            MIN_WEIGHT
        } else {
            weight.clamp(MIN_WEIGHT, MAX_WEIGHT)
        };
        self.section_mut(id)?.weight = weight;
        Ok(weight)
    }

    /// Every section back to weight 1
    pub fn distribute_evenly(&mut self) {
        for section in &mut self.sections {
            section.weight = 1.0;
        }
    }

    fn position(&self, id: &str) -> Result<usize, WheelError> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| WheelError::UnknownSection { id: id.to_string() })
    }

    fn section_mut(&mut self, id: &str) -> Result<&mut WheelSection, WheelError> {
        let index = self.position(id)?;
        Ok(&mut self.sections[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::SavedWheel;

    fn editor() -> WheelEditor {
        WheelEditor::new(vec![
            WheelSection::new("a", "A", palette_color(0)),
            WheelSection::new("b", "B", palette_color(1)),
        ])
    }

    #[test]
    fn test_add_section_defaults() {
        let mut editor = editor();
        let added = editor.add_section(1000.0).clone();
        assert_eq!(added.label, "Option 3");
        assert_eq!(added.color, palette_color(2));
        assert_eq!(added.weight, 1.0);
        let again = editor.add_section(1000.0).clone();
        assert_ne!(added.id, again.id);
        assert_eq!(editor.sections().len(), 4);
    }

    #[test]
    fn test_remove_keeps_two() {
        let mut editor = editor();
        assert_eq!(
            editor.remove_section("a"),
            Err(WheelError::InsufficientOptions { count: 2 })
        );

        let id = editor.add_section(1.0).id.clone();
        assert_eq!(editor.remove_section(&id).unwrap().id, id);
        assert_eq!(editor.sections().len(), 2);
    }

    #[test]
    fn test_unknown_section() {
        let mut editor = WheelEditor::new(SavedWheel::default_wheel(0.0).sections);
        assert_eq!(
            editor.set_label("nope", "x"),
            Err(WheelError::UnknownSection { id: "nope".to_string() })
        );
        assert!(editor.remove_section("nope").is_err());
    }

    #[test]
    fn test_remove_unknown_on_minimal_wheel() {
        let mut editor = editor();
        assert_eq!(
            editor.remove_section("missing"),
            Err(WheelError::UnknownSection { id: "missing".to_string() })
        );
        assert_eq!(editor.sections().len(), 2);
    }

    #[test]
    fn test_edit_fields() {
        let mut editor = editor();
        editor.set_label("a", "Tacos").unwrap();
        editor.set_color("a", "#123456").unwrap();
        assert_eq!(editor.sections()[0].label, "Tacos");
        assert_eq!(editor.sections()[0].color, "#123456");
    }

    #[test]
    fn test_weight_clamped_and_reset() {
        let mut editor = editor();
        assert_eq!(editor.set_weight("a", 25.0).unwrap(), 10.0);
        assert_eq!(editor.set_weight("b", 0.0).unwrap(), 1.0);
        assert_eq!(editor.set_weight("b", f64::NAN).unwrap(), 1.0);
        editor.set_weight("b", 4.0).unwrap();

        editor.distribute_evenly();
        assert!(editor.sections().iter().all(|s| s.weight == 1.0));
    }
}
