//! Wheel sections (the user-defined options)

use serde::{Deserialize, Serialize};

/// Colors handed out to new sections, cycled by index
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#6B46C1", // purple
    "#9F7AEA", // violet
    "#ED8936", // orange
    "#38B2AC", // teal
    "#ED64A6", // pink
    "#805AD5", // indigo
    "#D53F8C", // magenta
    "#DD6B20", // dark orange
    "#38A169", // green
    "#3182CE", // blue
];

/// Palette color for the section at `index`
pub fn palette_color(index: usize) -> &'static str {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}

fn default_weight() -> f64 {
    1.0
}

/// A single option on the wheel
///
/// `color` is display-only; it never takes part in outcome resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSection {
    /// Unique within a wheel
    pub id: String,
    /// Display label (may be empty)
    #[serde(alias = "text")]
    pub label: String,
    /// CSS color string
    pub color: String,
    /// Relative weight; arc span is proportional to it
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl WheelSection {
    pub fn new(id: impl Into<String>, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: color.into(),
            weight: default_weight(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Label for notices, substituting a placeholder for empty labels
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            "Section"
        } else {
            &self.label
        }
    }
}
