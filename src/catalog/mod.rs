//! Reference catalog: the static tables every classifier reads.
//!
//! A catalog is pure data: the weighted contribution table for primary-type
//! scoring, the wing adjacency table, the growth/stress arrow table, and the
//! five-tier operating-state catalog.  It is loaded from YAML, validated
//! once, and then shared read-only for the life of the process.
//!
//! # Example YAML
//!
//! ```yaml
//! catalog:
//!   version: "1.0.0"
//!   slot_weights: [2.0, 2.0, 1.5, 1.5, 1.5, 1.5, 1.0, 1.0, 1.0]
//!   slots:
//!     - label: "center of attention"
//!       choices:
//!         - {5: 1.0, 6: 1.0, 7: 1.0}
//!         - {2: 1.0, 3: 1.0, 4: 1.0}
//!         - {8: 1.0, 9: 1.0, 1: 1.0}
//!     # ... eight more slots
//!   wings:
//!     1: [9, 2]
//!   arrows:
//!     1: {integration: 7, disintegration: 4}
//!   states:
//!     - name: "Peak"
//!       activation: 90
//!       description: "..."
//! ```

pub mod builtin;
pub mod error;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::TypeId;

pub use builtin::BUILTIN_CATALOG_YAML;
pub use error::CatalogError;

/// Number of scored slots in the foundation phase.
pub const SLOT_COUNT: usize = 9;

/// Number of choices offered per slot.
pub const CHOICES_PER_SLOT: usize = 3;

/// Number of entries in the operating-state catalog.
pub const STATE_COUNT: usize = 5;

lazy_static::lazy_static! {
    static ref BUILTIN: Arc<ContentCatalog> = Arc::new(
        ContentCatalog::from_yaml(BUILTIN_CATALOG_YAML)
            .expect("built-in catalog must parse and validate"),
    );
}

// ============================================================================
// Catalog entries
// ============================================================================

/// One forced-choice slot of the foundation phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDef {
    /// Neutral label for the slot (content, not used in scoring).
    #[serde(default)]
    pub label: String,
    /// Partial weights per choice: `choices[c][type]`.
    pub choices: Vec<BTreeMap<TypeId, f64>>,
}

/// Growth and stress directions for one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowPair {
    /// Type moved toward under growth.
    pub integration: TypeId,
    /// Type moved toward under stress.
    pub disintegration: TypeId,
}

/// One tier of the operating-state scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingState {
    pub name: String,
    /// Activation level, 0–100.
    pub activation: u8,
    pub description: String,
    /// Optional per-type replacements for `description`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_descriptions: BTreeMap<TypeId, String>,
}

impl OperatingState {
    /// The description to show for `primary`, falling back to the generic one.
    pub fn description_for(&self, primary: Option<TypeId>) -> &str {
        primary
            .and_then(|t| self.type_descriptions.get(&t))
            .map(String::as_str)
            .unwrap_or(&self.description)
    }
}

// ============================================================================
// ContentCatalog
// ============================================================================

/// The full set of reference tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCatalog {
    /// Content version string, carried through for traceability.
    #[serde(default)]
    pub version: String,
    pub slot_weights: Vec<f64>,
    pub slots: Vec<SlotDef>,
    pub wings: BTreeMap<TypeId, Vec<TypeId>>,
    pub arrows: BTreeMap<TypeId, ArrowPair>,
    pub states: Vec<OperatingState>,
}

/// Top-level `catalog:` wrapper so YAML files are self-describing.
#[derive(Serialize, Deserialize)]
struct CatalogFile {
    catalog: ContentCatalog,
}

impl ContentCatalog {
    /// The built-in catalog, parsed on first use.
    pub fn builtin() -> &'static ContentCatalog {
        &BUILTIN
    }

    /// Shared handle to the built-in catalog.
    pub fn shared() -> Arc<ContentCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Parse and validate a catalog from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        file.catalog.validate()?;
        if file.catalog.is_degenerate() {
            log::warn!(
                "Catalog {:?} has an all-zero contribution table; primary scores will be uniform",
                file.catalog.version
            );
        }
        Ok(file.catalog)
    }

    /// Parse and validate a catalog from a YAML file on disk.
    pub fn from_yaml_file(path: &str) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&content)?;
        log::info!("Loaded catalog {:?} from {}", catalog.version, path);
        Ok(catalog)
    }

    /// Serialize back to the wrapped YAML form.
    pub fn to_yaml(&self) -> Result<String, CatalogError> {
        Ok(serde_yaml::to_string(&CatalogFile {
            catalog: self.clone(),
        })?)
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Multiplier for `slot`, 0.0 if out of range.
    pub fn slot_weight(&self, slot: usize) -> f64 {
        self.slot_weights.get(slot).copied().unwrap_or(0.0)
    }

    /// `(type, partial weight)` contributions for one slot/choice pair.
    pub fn contributions(
        &self,
        slot: usize,
        choice: usize,
    ) -> impl Iterator<Item = (TypeId, f64)> + '_ {
        self.slots
            .get(slot)
            .and_then(|s| s.choices.get(choice))
            .into_iter()
            .flat_map(|m| m.iter().map(|(t, w)| (*t, *w)))
    }

    /// The two adjacent wing candidates for `primary`.
    pub fn wing_candidates(&self, primary: TypeId) -> Option<[TypeId; 2]> {
        match self.wings.get(&primary)?.as_slice() {
            [a, b] => Some([*a, *b]),
            _ => None,
        }
    }

    /// Growth/stress directions for `primary`.
    pub fn arrows(&self, primary: TypeId) -> Option<ArrowPair> {
        self.arrows.get(&primary).copied()
    }

    /// Operating state at `index`.
    pub fn state(&self, index: usize) -> Option<&OperatingState> {
        self.states.get(index)
    }

    /// True when every contribution weight is zero.
    pub fn is_degenerate(&self) -> bool {
        !(0..self.slots.len()).any(|slot| {
            let slot_weight = self.slot_weight(slot);
            (0..CHOICES_PER_SLOT)
                .any(|c| self.contributions(slot, c).any(|(_, w)| w * slot_weight > 0.0))
        })
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Check every table's shape and ranges.
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.validate_contributions()?;
        self.validate_wings()?;
        self.validate_arrows()?;
        self.validate_states()
    }

    fn validate_contributions(&self) -> Result<(), CatalogError> {
        if self.slot_weights.len() != SLOT_COUNT {
            return Err(invalid(format!(
                "slot_weights has {} entries, expected {}",
                self.slot_weights.len(),
                SLOT_COUNT
            )));
        }
        for (i, &w) in self.slot_weights.iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(invalid(format!("slot_weights[{}] = {} must be finite and >= 0", i, w)));
            }
        }
        if self.slots.len() != SLOT_COUNT {
            return Err(invalid(format!(
                "slots has {} entries, expected {}",
                self.slots.len(),
                SLOT_COUNT
            )));
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.choices.len() != CHOICES_PER_SLOT {
                return Err(invalid(format!(
                    "slots[{}] has {} choices, expected {}",
                    i,
                    slot.choices.len(),
                    CHOICES_PER_SLOT
                )));
            }
            for (c, contributions) in slot.choices.iter().enumerate() {
                for (ty, &w) in contributions {
                    if !w.is_finite() || w < 0.0 {
                        return Err(invalid(format!(
                            "slots[{}].choices[{}][{}] = {} must be finite and >= 0",
                            i, c, ty, w
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_wings(&self) -> Result<(), CatalogError> {
        for ty in TypeId::ALL {
            let candidates = self
                .wings
                .get(&ty)
                .ok_or_else(|| invalid(format!("wings is missing type {}", ty)))?;
            if candidates.len() != 2 {
                return Err(invalid(format!(
                    "wings[{}] has {} candidates, expected 2",
                    ty,
                    candidates.len()
                )));
            }
            if candidates.contains(&ty) || candidates[0] == candidates[1] {
                return Err(invalid(format!(
                    "wings[{}] must name two distinct types other than itself",
                    ty
                )));
            }
        }
        Ok(())
    }

    fn validate_arrows(&self) -> Result<(), CatalogError> {
        for ty in TypeId::ALL {
            let pair = self
                .arrows
                .get(&ty)
                .ok_or_else(|| invalid(format!("arrows is missing type {}", ty)))?;
            if pair.integration == ty || pair.disintegration == ty {
                return Err(invalid(format!("arrows[{}] maps a type to itself", ty)));
            }
            if pair.integration == pair.disintegration {
                return Err(invalid(format!(
                    "arrows[{}] has identical integration and disintegration",
                    ty
                )));
            }
        }
        Ok(())
    }

    fn validate_states(&self) -> Result<(), CatalogError> {
        if self.states.len() != STATE_COUNT {
            return Err(invalid(format!(
                "states has {} entries, expected {}",
                self.states.len(),
                STATE_COUNT
            )));
        }
        for (i, state) in self.states.iter().enumerate() {
            if state.name.trim().is_empty() {
                return Err(invalid(format!("states[{}] has an empty name", i)));
            }
            if state.activation > 100 {
                return Err(invalid(format!(
                    "states[{}].activation = {} is outside 0..100",
                    i, state.activation
                )));
            }
        }
        Ok(())
    }
}

fn invalid(msg: String) -> CatalogError {
    CatalogError::Validation(msg)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn t(n: u8) -> TypeId {
        TypeId::new(n).unwrap()
    }

    #[test]
    fn test_builtin_catalog_validates() {
        let catalog = ContentCatalog::builtin();
        assert!(catalog.validate().is_ok());
        assert!(!catalog.is_degenerate());
        assert_eq!(catalog.slot_weights.len(), SLOT_COUNT);
        assert_eq!(catalog.states.len(), STATE_COUNT);
    }

    #[test]
    fn test_builtin_state_activation_tiers() {
        let levels: Vec<u8> = ContentCatalog::builtin()
            .states
            .iter()
            .map(|s| s.activation)
            .collect();
        assert_eq!(levels, vec![90, 70, 50, 30, 10]);
    }

    #[test]
    fn test_every_type_reachable_from_contributions() {
        let catalog = ContentCatalog::builtin();
        for ty in TypeId::ALL {
            let reachable = (0..SLOT_COUNT)
                .flat_map(|s| (0..CHOICES_PER_SLOT).map(move |c| (s, c)))
                .any(|(s, c)| catalog.contributions(s, c).any(|(t, w)| t == ty && w > 0.0));
            assert!(reachable, "type {} never receives credit", ty);
        }
    }

    #[test]
    fn test_wings_are_cyclic_neighbours() {
        let catalog = ContentCatalog::builtin();
        assert_eq!(catalog.wing_candidates(t(1)), Some([t(9), t(2)]));
        assert_eq!(catalog.wing_candidates(t(9)), Some([t(8), t(1)]));
        for ty in TypeId::ALL {
            let [a, b] = catalog.wing_candidates(ty).unwrap();
            let n = ty.get();
            let prev = if n == 1 { 9 } else { n - 1 };
            let next = if n == 9 { 1 } else { n + 1 };
            assert_eq!((a.get(), b.get()), (prev, next), "wings of {}", ty);
        }
    }

    #[test]
    fn test_arrow_table_is_a_permutation_each_way() {
        let catalog = ContentCatalog::builtin();
        let mut growth: Vec<u8> = TypeId::ALL
            .iter()
            .map(|ty| catalog.arrows(*ty).unwrap().integration.get())
            .collect();
        let mut stress: Vec<u8> = TypeId::ALL
            .iter()
            .map(|ty| catalog.arrows(*ty).unwrap().disintegration.get())
            .collect();
        growth.sort_unstable();
        stress.sort_unstable();
        assert_eq!(growth, (1..=9).collect::<Vec<u8>>());
        assert_eq!(stress, (1..=9).collect::<Vec<u8>>());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let yaml = ContentCatalog::builtin().to_yaml().unwrap();
        let back = ContentCatalog::from_yaml(&yaml).unwrap();
        assert_eq!(&back, ContentCatalog::builtin());
    }

    #[test]
    fn test_rejects_short_slot_weights() {
        let mut catalog = ContentCatalog::builtin().clone();
        catalog.slot_weights.pop();
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("slot_weights"), "got: {}", err);
    }

    #[test]
    fn test_rejects_negative_partial_weight() {
        let mut catalog = ContentCatalog::builtin().clone();
        catalog.slots[3].choices[1].insert(t(4), -0.5);
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("slots[3].choices[1]"), "got: {}", err);
    }

    #[test]
    fn test_rejects_missing_choice() {
        let mut catalog = ContentCatalog::builtin().clone();
        catalog.slots[0].choices.pop();
        assert!(matches!(catalog.validate(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_rejects_self_wing() {
        let mut catalog = ContentCatalog::builtin().clone();
        catalog.wings.insert(t(4), vec![t(4), t(5)]);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_rejects_self_arrow() {
        let mut catalog = ContentCatalog::builtin().clone();
        catalog.arrows.insert(
            t(2),
            ArrowPair {
                integration: t(2),
                disintegration: t(8),
            },
        );
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_arrow_entry() {
        let mut catalog = ContentCatalog::builtin().clone();
        catalog.arrows.remove(&t(6));
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("missing type 6"), "got: {}", err);
    }

    #[test]
    fn test_rejects_wrong_state_count() {
        let mut catalog = ContentCatalog::builtin().clone();
        catalog.states.truncate(4);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_degenerate_table_loads() {
        let mut catalog = ContentCatalog::builtin().clone();
        for slot in &mut catalog.slots {
            for choice in &mut slot.choices {
                for w in choice.values_mut() {
                    *w = 0.0;
                }
            }
        }
        let yaml = catalog.to_yaml().unwrap();
        let loaded = ContentCatalog::from_yaml(&yaml).unwrap();
        assert!(loaded.is_degenerate());
    }

    #[test]
    fn test_rejects_unknown_type_key() {
        let yaml = BUILTIN_CATALOG_YAML.replace("9: [8, 1]", "10: [8, 1]");
        assert!(matches!(
            ContentCatalog::from_yaml(&yaml),
            Err(CatalogError::Yaml(_))
        ));
    }

    #[test]
    fn test_state_type_override() {
        let mut state = ContentCatalog::builtin().states[2].clone();
        state
            .type_descriptions
            .insert(t(5), "Detached observation".to_string());
        assert_eq!(state.description_for(Some(t(5))), "Detached observation");
        assert_eq!(state.description_for(Some(t(6))), state.description);
        assert_eq!(state.description_for(None), state.description);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUILTIN_CATALOG_YAML.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let catalog = ContentCatalog::from_yaml_file(&path).unwrap();
        assert_eq!(catalog.version, "1.0.0");
    }

    #[test]
    fn test_from_missing_file() {
        let err = ContentCatalog::from_yaml_file("/nonexistent/catalog.yaml").unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
