//! Panel technology catalog.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// One panel technology entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelType {
    /// Display name, also used as the lookup key.
    pub name: String,
    /// Module efficiency in percent (0–100).
    pub efficiency_percent: f64,
    /// Installed cost per watt-peak (€/W).
    pub cost_per_watt: f64,
}

impl PanelType {
    /// Creates a catalog entry.
    pub fn new(name: impl Into<String>, efficiency_percent: f64, cost_per_watt: f64) -> Self {
        Self {
            name: name.into(),
            efficiency_percent,
            cost_per_watt,
        }
    }
}

/// Immutable, ordered set of panel technologies.
///
/// Order is preserved so selectors list entries the same way every run.
///
/// # Examples
///
/// ```
/// use pv_sim::catalog::PanelCatalog;
///
/// let catalog = PanelCatalog::standard();
/// assert_eq!(catalog.len(), 5);
/// assert_eq!(catalog.get("Bifacial").map(|p| p.cost_per_watt), Ok(1.4));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelCatalog {
    entries: Vec<PanelType>,
}

impl PanelCatalog {
    /// Builds a catalog from the given entries, keeping their order.
    pub fn new(entries: Vec<PanelType>) -> Self {
        Self { entries }
    }

    /// The five technologies offered by the calculator.
    pub fn standard() -> Self {
        Self::new(vec![
            PanelType::new("Monocristallin", 20.0, 1.2),
            PanelType::new("Polycristallin", 17.5, 1.0),
            PanelType::new("Amorphe", 10.0, 0.8),
            PanelType::new("Hétérojonction", 21.5, 1.5),
            PanelType::new("Bifacial", 19.5, 1.4),
        ])
    }

    /// Looks up an entry by name.
    ///
    /// Matching ignores case so `"bifacial"` resolves to `"Bifacial"`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidPanelType`] if no entry matches.
    pub fn get(&self, name: &str) -> Result<&PanelType> {
        let wanted = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
            .ok_or_else(|| SimError::InvalidPanelType {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Returns the entry at `index` in display order.
    pub fn get_index(&self, index: usize) -> Option<&PanelType> {
        self.entries.get(index)
    }

    /// Position of the named entry in display order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.entries
            .iter()
            .position(|p| p.name.to_lowercase() == wanted)
    }

    /// Entry names in display order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|p| p.name.as_str()).collect()
    }

    /// Iterates entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &PanelType> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PanelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
