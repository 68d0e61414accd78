//! Primary type classifier: weighted accumulation over the foundation phase.
//!
//! Each of the nine forced-choice selections credits a handful of types with
//! `partial_weight * slot_weight` from the catalog's contribution table.  The
//! accumulators are normalized to a distribution, the top type wins, and the
//! confidence measures how far the winner stands above the field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::ClassifyError;
use crate::catalog::{ContentCatalog, CHOICES_PER_SLOT, SLOT_COUNT};
use crate::model::TypeId;

/// Per-type accumulated weight.
pub type TypeScores = BTreeMap<TypeId, f64>;

/// Result of primary type classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityTypeCalculation {
    /// Winning type.
    pub primary_type: TypeId,
    /// Separation of the winner from the field (0.0–1.0).
    pub confidence: f64,
    /// Up to two runner-up types, best first.
    pub alternatives: Vec<TypeId>,
    /// Normalized scores; sum to 1.0.
    pub all_scores: TypeScores,
    /// Unnormalized accumulators.
    pub raw_scores: TypeScores,
}

impl PersonalityTypeCalculation {
    /// Normalized score of the winning type.
    pub fn primary_score(&self) -> f64 {
        self.all_scores.get(&self.primary_type).copied().unwrap_or(0.0)
    }
}

/// Classify with the built-in catalog.
pub fn classify_primary_type(
    selections: &[i64],
) -> Result<PersonalityTypeCalculation, ClassifyError> {
    classify_primary_type_with(ContentCatalog::builtin(), selections)
}

/// Classify nine foundation selections (each 0, 1 or 2).
///
/// Fails without computing anything if the array has the wrong length or a
/// value is out of range.
pub fn classify_primary_type_with(
    catalog: &ContentCatalog,
    selections: &[i64],
) -> Result<PersonalityTypeCalculation, ClassifyError> {
    validate_selections(selections)?;

    let mut raw = [0.0_f64; TypeId::COUNT];
    for (slot, &choice) in selections.iter().enumerate() {
        let slot_weight = catalog.slot_weight(slot);
        // validated above: 0 <= choice < CHOICES_PER_SLOT
        for (ty, partial) in catalog.contributions(slot, choice as usize) {
            raw[ty.index()] += partial * slot_weight;
        }
    }

    let total: f64 = raw.iter().sum();
    let normalized = if total > 0.0 {
        raw.map(|v| v / total)
    } else {
        log::warn!("Contribution table produced no weight; falling back to uniform scores");
        [1.0 / TypeId::COUNT as f64; TypeId::COUNT]
    };

    // Strictly greater keeps the lowest id on ties.
    let mut primary = 0;
    for i in 1..TypeId::COUNT {
        if normalized[i] > normalized[primary] {
            primary = i;
        }
    }
    let primary_score = normalized[primary];

    let others: f64 = normalized
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != primary)
        .map(|(_, v)| v)
        .sum();
    let avg_other = others / (TypeId::COUNT - 1) as f64;

    // epsilon absorbs summation noise when every score is equal
    let confidence = if primary_score - avg_other > f64::EPSILON {
        ((primary_score - avg_other) * 2.0).min(1.0)
    } else {
        (primary_score * 0.5).max(0.0)
    };

    let mut ranked: Vec<usize> = (0..TypeId::COUNT).filter(|&i| i != primary).collect();
    ranked.sort_by(|&a, &b| {
        normalized[b]
            .partial_cmp(&normalized[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    let alternatives: Vec<TypeId> = ranked
        .into_iter()
        .take(2)
        .filter_map(TypeId::from_index)
        .collect();

    let to_map = |scores: &[f64; TypeId::COUNT]| -> TypeScores {
        TypeId::ALL.iter().map(|t| (*t, scores[t.index()])).collect()
    };

    let primary_type = TypeId::ALL[primary];
    log::debug!(
        "Primary type {} (score {:.3}, confidence {:.3}, alternatives {:?})",
        primary_type,
        primary_score,
        confidence,
        alternatives
    );

    Ok(PersonalityTypeCalculation {
        primary_type,
        confidence,
        alternatives,
        all_scores: to_map(&normalized),
        raw_scores: to_map(&raw),
    })
}

fn validate_selections(selections: &[i64]) -> Result<(), ClassifyError> {
    if selections.len() != SLOT_COUNT {
        return Err(ClassifyError::WrongLength {
            expected: SLOT_COUNT,
            actual: selections.len(),
        });
    }
    let max = CHOICES_PER_SLOT as i64 - 1;
    for (index, &value) in selections.iter().enumerate() {
        if !(0..=max).contains(&value) {
            return Err(ClassifyError::OutOfRange { index, value, max });
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
