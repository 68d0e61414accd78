//! Arrow classifier: growth and stress directions.
//!
//! The two arrow types are looked up, never scored.  Only their strengths and
//! the confidence depend on the building-block answers.

use serde::{Deserialize, Serialize};

use super::{Agreement, ArrowLead, BlockSelections};
use crate::catalog::ContentCatalog;
use crate::model::{ArrowStrength, TypeId};
use crate::narrative::{NarrativeSource, PlaceholderNarratives};

/// Confidence reported when the arrow-pair choice is missing.
pub const UNANSWERED_ARROW_CONFIDENCE: f64 = 0.3;

const MAX_ARROW_CONFIDENCE: f64 = 0.9;

/// Result of arrow classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowCalculation {
    pub integration_type: TypeId,
    pub disintegration_type: TypeId,
    pub integration_strength: ArrowStrength,
    pub disintegration_strength: ArrowStrength,
    /// 0.3–0.9.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Classify with the built-in catalog and placeholder narratives.
pub fn classify_arrows(
    primary: Option<TypeId>,
    blocks: &[Option<i64>],
) -> Option<ArrowCalculation> {
    classify_arrows_with(ContentCatalog::builtin(), &PlaceholderNarratives, primary, blocks)
}

/// Resolve growth/stress types for `primary` and grade them from the blocks.
///
/// `None` when the primary type is unknown or fewer than four block entries
/// are supplied.
pub fn classify_arrows_with(
    catalog: &ContentCatalog,
    narratives: &dyn NarrativeSource,
    primary: Option<TypeId>,
    blocks: &[Option<i64>],
) -> Option<ArrowCalculation> {
    let primary = primary?;
    let blocks = BlockSelections::from_slice(blocks)?;
    let pair = catalog.arrows(primary)?;

    let (integration_strength, disintegration_strength, confidence) = match blocks.arrow_lead() {
        None => (
            ArrowStrength::LessDeveloped,
            ArrowStrength::LessDeveloped,
            UNANSWERED_ARROW_CONFIDENCE,
        ),
        Some(lead) => {
            let (growth, stress) = match lead {
                ArrowLead::Growth => (ArrowStrength::Conscious, ArrowStrength::Developing),
                ArrowLead::Stress => (ArrowStrength::Developing, ArrowStrength::Conscious),
            };
            let confidence = match blocks.agreement() {
                Agreement::Consistent => (0.5_f64 + 0.4).min(MAX_ARROW_CONFIDENCE),
                Agreement::Mixed => (0.5_f64 + 0.2).min(MAX_ARROW_CONFIDENCE),
                Agreement::Partial => 0.6,
                Agreement::Absent => 0.5,
            };
            (growth, stress, confidence)
        }
    };

    log::debug!(
        "Arrows for type {}: growth {} ({:?}), stress {} ({:?}), confidence {:.2}",
        primary,
        pair.integration,
        integration_strength,
        pair.disintegration,
        disintegration_strength,
        confidence
    );

    Some(ArrowCalculation {
        integration_type: pair.integration,
        disintegration_type: pair.disintegration,
        integration_strength,
        disintegration_strength,
        confidence,
        description: narratives.arrow_note(primary),
    })
}
