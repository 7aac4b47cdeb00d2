//! Named wheels

use serde::{Deserialize, Serialize};

use super::IdGenerator;
use super::store::{RecordStore, load_list, save_list};
use crate::error::StoreError;
use crate::wheel::{WheelSection, palette_color};

/// Store key for the saved wheel list
pub const WHEELS_KEY: &str = "decision_wheel_wheels";

/// Id of the built-in starter wheel
pub const DEFAULT_WHEEL_ID: &str = "default";

/// A wheel saved under a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWheel {
    pub id: String,
    pub name: String,
    pub sections: Vec<WheelSection>,
    /// Unix timestamp (ms)
    pub created_at: f64,
    /// Unix timestamp (ms)
    pub last_modified: f64,
}

impl SavedWheel {
    /// Starter wheel shown before anything is saved
    pub fn default_wheel(now_ms: f64) -> Self {
        let options = ["Pizza", "Burger", "Tacos", "Sushi", "Pasta", "Salad"];
        let sections = options
            .iter()
            .enumerate()
            .map(|(i, label)| WheelSection::new(format!("default-{i}"), *label, palette_color(i)))
            .collect();

        Self {
            id: DEFAULT_WHEEL_ID.to_string(),
            name: "Food Wheel".to_string(),
            sections,
            created_at: now_ms,
            last_modified: now_ms,
        }
    }
}

/// Saved wheels backed by a record store
#[derive(Debug, Clone)]
pub struct WheelLibrary<S: RecordStore> {
    store: S,
    ids: IdGenerator,
}

impl<S: RecordStore> WheelLibrary<S> {
    pub fn new(store: S) -> Self {
        let mut library = Self {
            store,
            ids: IdGenerator::default(),
        };
        if let Ok(wheels) = library.list() {
            for wheel in &wheels {
                library.ids.observe(&wheel.id);
            }
        }
        library
    }

    /// All saved wheels, in save order
    pub fn list(&self) -> Result<Vec<SavedWheel>, StoreError> {
        load_list(&self.store, WHEELS_KEY)
    }

    pub fn get(&self, id: &str) -> Result<Option<SavedWheel>, StoreError> {
        Ok(self.list()?.into_iter().find(|w| w.id == id))
    }

    /// Save under `name`. An existing wheel with the same name gets the new
    /// sections and a fresh `last_modified`; otherwise a new wheel is created.
    pub fn save(
        &mut self,
        name: &str,
        sections: Vec<WheelSection>,
        now_ms: f64,
    ) -> Result<SavedWheel, StoreError> {
        let mut wheels = self.list()?;

        let saved = if let Some(existing) = wheels.iter_mut().find(|w| w.name == name) {
            existing.sections = sections;
            existing.last_modified = now_ms;
            log::info!("Updated wheel {:?}", name);
            existing.clone()
        } else {
            let wheel = SavedWheel {
                id: self.ids.next_id(now_ms),
                name: name.to_string(),
                sections,
                created_at: now_ms,
                last_modified: now_ms,
            };
            log::info!("Saved new wheel {:?}", name);
            wheels.push(wheel.clone());
            wheel
        };

        save_list(&mut self.store, WHEELS_KEY, &wheels)?;
        Ok(saved)
    }

    /// Delete by id. Returns `false` if no such wheel exists.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let wheels = self.list()?;
        let before = wheels.len();
        let remaining: Vec<SavedWheel> = wheels.into_iter().filter(|w| w.id != id).collect();
        if remaining.len() == before {
            return Ok(false);
        }
        save_list(&mut self.store, WHEELS_KEY, &remaining)?;
        log::info!("Deleted wheel {}", id);
        Ok(true)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
