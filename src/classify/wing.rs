//! Wing classifier.

use serde::{Deserialize, Serialize};

use super::{Agreement, BlockSelections};
use crate::catalog::ContentCatalog;
use crate::model::{TypeId, WingStrength};
use crate::narrative::{NarrativeSource, PlaceholderNarratives};

/// Confidence reported when the chosen wing is missing or not adjacent.
pub const UNRESOLVED_WING_CONFIDENCE: f64 = 0.3;

const MAX_WING_CONFIDENCE: f64 = 0.95;
const STRONG_CONSISTENCY: f64 = 0.7;

/// Result of wing classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WingCalculation {
    /// `"{type}w{wing}"`, or `"{type}w?"` when unresolved.
    pub primary_wing: String,
    /// The resolved wing type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wing: Option<TypeId>,
    pub wing_strength: WingStrength,
    /// 0.3–0.95.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WingCalculation {
    fn unresolved(primary: TypeId) -> Self {
        Self {
            primary_wing: format!("{}w?", primary),
            wing: None,
            wing_strength: WingStrength::Moderate,
            confidence: UNRESOLVED_WING_CONFIDENCE,
            description: None,
        }
    }

    /// Whether a valid adjacent wing was chosen.
    pub fn is_resolved(&self) -> bool {
        self.wing.is_some()
    }
}

/// Classify with the built-in catalog and placeholder narratives.
pub fn classify_wing(primary: Option<TypeId>, blocks: &[Option<i64>]) -> Option<WingCalculation> {
    classify_wing_with(ContentCatalog::builtin(), &PlaceholderNarratives, primary, blocks)
}

/// Resolve the wing from the first building-block choice.
///
/// `None` when the primary type is unknown or fewer than four block entries
/// are supplied.  A missing or non-adjacent wing choice yields the
/// low-confidence `"{type}w?"` fallback instead.
pub fn classify_wing_with(
    catalog: &ContentCatalog,
    narratives: &dyn NarrativeSource,
    primary: Option<TypeId>,
    blocks: &[Option<i64>],
) -> Option<WingCalculation> {
    let primary = primary?;
    let blocks = BlockSelections::from_slice(blocks)?;
    let candidates = catalog.wing_candidates(primary)?;

    let wing = blocks
        .chosen_wing
        .and_then(TypeId::from_i64)
        .filter(|w| candidates.contains(w));
    let Some(wing) = wing else {
        log::debug!(
            "Wing for type {} unresolved (choice {:?}, candidates {:?})",
            primary,
            blocks.chosen_wing,
            candidates
        );
        return Some(WingCalculation::unresolved(primary));
    };

    let consistency = match blocks.agreement() {
        Agreement::Consistent => 0.8,
        Agreement::Mixed => 0.6,
        Agreement::Partial => 0.55,
        Agreement::Absent => 0.5,
    };
    let wing_strength = if consistency >= STRONG_CONSISTENCY {
        WingStrength::Strong
    } else {
        WingStrength::Moderate
    };
    let confidence = (0.6 + consistency * 0.4).min(MAX_WING_CONFIDENCE);

    log::debug!(
        "Wing {}w{} ({:?}, confidence {:.2})",
        primary,
        wing,
        wing_strength,
        confidence
    );

    Some(WingCalculation {
        primary_wing: format!("{}w{}", primary, wing),
        wing: Some(wing),
        wing_strength,
        confidence,
        description: narratives.wing_note(primary, wing),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::SilentNarratives;

    fn t(n: u8) -> Option<TypeId> {
        TypeId::new(n)
    }

    #[test]
    fn test_missing_wing_falls_back() {
        let calc = classify_wing(t(1), &[None, Some(0), Some(1), Some(1)]).unwrap();
        assert_eq!(calc.primary_wing, "1w?");
        assert_eq!(calc.confidence, 0.3);
        assert_eq!(calc.wing_strength, WingStrength::Moderate);
        assert!(!calc.is_resolved());
    }

    #[test]
    fn test_non_adjacent_wing_falls_back() {
        let calc = classify_wing(t(1), &[Some(5), None, None, None]).unwrap();
        assert_eq!(calc.primary_wing, "1w?");
        assert_eq!(calc.confidence, 0.3);
        let calc = classify_wing(t(3), &[Some(42), None, None, None]).unwrap();
        assert_eq!(calc.primary_wing, "3w?");
    }

    #[test]
    fn test_cyclic_wings_resolve() {
        let calc = classify_wing(t(1), &[Some(9), None, None, None]).unwrap();
        assert_eq!(calc.primary_wing, "1w9");
        let calc = classify_wing(t(9), &[Some(1), None, None, None]).unwrap();
        assert_eq!(calc.primary_wing, "9w1");
        assert_eq!(calc.wing, t(1));
    }

    #[test]
    fn test_consistent_auxiliaries_are_strong() {
        let calc = classify_wing(t(4), &[Some(5), Some(0), Some(1), Some(1)]).unwrap();
        assert_eq!(calc.primary_wing, "4w5");
        assert_eq!(calc.wing_strength, WingStrength::Strong);
        assert!((calc.confidence - 0.92).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_by_agreement() {
        let cases: [([Option<i64>; 2], f64); 3] = [
            ([Some(0), Some(1)], 0.84),
            ([Some(0), None], 0.82),
            ([None, None], 0.80),
        ];
        for (aux, expected) in cases {
            let calc = classify_wing(t(2), &[Some(3), None, aux[0], aux[1]]).unwrap();
            assert_eq!(calc.wing_strength, WingStrength::Moderate);
            assert!(
                (calc.confidence - expected).abs() < 1e-9,
                "{:?} -> {}",
                aux,
                calc.confidence
            );
        }
    }

    #[test]
    fn test_confidence_bounds() {
        let values = [None, Some(0), Some(1)];
        for ty in TypeId::ALL {
            for wing in 0..=10 {
                for g in values {
                    for r in values {
                        let calc = classify_wing(Some(ty), &[Some(wing), None, g, r]).unwrap();
                        assert!((0.3..=0.95).contains(&calc.confidence));
                    }
                }
            }
        }
    }

    #[test]
    fn test_unknown_primary_or_short_blocks() {
        assert!(classify_wing(None, &[Some(2), None, None, None]).is_none());
        assert!(classify_wing(t(1), &[Some(2), None, None]).is_none());
    }

    #[test]
    fn test_description_comes_from_narratives() {
        let calc = classify_wing(t(6), &[Some(7), None, None, None]).unwrap();
        assert!(calc.description.unwrap().contains("Type 6"));
        let calc = classify_wing_with(
            ContentCatalog::builtin(),
            &SilentNarratives,
            t(6),
            &[Some(7), None, None, None],
        )
        .unwrap();
        assert!(calc.description.is_none());
    }
}
