//! Full-profile pipeline: runs every classifier whose inputs are present.
//!
//! An [`Assessment`] carries the raw answers from all four phases.  The
//! foundation phase is mandatory; the later phases are filled in as the user
//! progresses and each one lights up its section of the
//! [`PersonalityProfile`].
//!
//! ```text
//! Assessment ──► ProfileEngine::assess ──► PersonalityProfile
//!                  │ catalog (read-only)      primary
//!                  │ narratives (seam)        wing?    arrows?
//!                  │                          state?   subtype?
//! ```

pub mod cache;

use std::sync::Arc;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::catalog::ContentCatalog;
use crate::classify::{
    analyze_state_impact_with, classify_arrows_with, classify_primary_type_with,
    classify_subtype_stack_with, classify_wing_with, ArrowCalculation, ClassifyError,
    PersonalityTypeCalculation, StateAnalysis, StateDistribution, SubtypeStack,
    TokenDistribution, WingCalculation,
};
use crate::model::TypeId;
use crate::narrative::{NarrativeSource, PlaceholderNarratives};

pub use cache::ProfileCache;

// ============================================================================
// Input
// ============================================================================

/// Palette picks and time split for the operating-state phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateInput {
    pub indices: [usize; 2],
    pub distribution: StateDistribution,
}

/// Raw answers from the four assessment phases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Nine forced-choice selections, each 0–2.
    pub foundation: Vec<i64>,
    /// `[wing, arrow pair, growth focus, response pattern]`.
    #[serde(default)]
    pub blocks: Vec<Option<i64>>,
    #[serde(default)]
    pub states: Option<StateInput>,
    #[serde(default)]
    pub tokens: Option<TokenDistribution>,
}

impl Assessment {
    /// Assessment with only the foundation phase answered.
    pub fn new(foundation: Vec<i64>) -> Self {
        Self {
            foundation,
            ..Self::default()
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<Option<i64>>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn with_states(mut self, indices: [usize; 2], distribution: StateDistribution) -> Self {
        self.states = Some(StateInput {
            indices,
            distribution,
        });
        self
    }

    pub fn with_tokens(mut self, tokens: TokenDistribution) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Fingerprint of the answers (MD5 hex), stable across runs.
    pub fn key(&self) -> String {
        let foundation: Vec<String> = self.foundation.iter().map(i64::to_string).collect();
        let blocks: Vec<String> = self
            .blocks
            .iter()
            .map(|b| b.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()))
            .collect();
        let states = self
            .states
            .map(|s| {
                format!(
                    "{},{}:{},{}",
                    s.indices[0],
                    s.indices[1],
                    s.distribution.primary_percentage,
                    s.distribution.secondary_percentage
                )
            })
            .unwrap_or_else(|| "-".to_string());
        let tokens = self
            .tokens
            .map(|t| format!("{},{},{}", t.self_preservation, t.one_to_one, t.social))
            .unwrap_or_else(|| "-".to_string());

        let source = format!(
            "{}|{}|{}|{}",
            foundation.join(","),
            blocks.join(","),
            states,
            tokens
        );
        let mut hasher = Md5::new();
        hasher.update(source.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

// ============================================================================
// Output
// ============================================================================

/// Every classifier's result for one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityProfile {
    pub primary: PersonalityTypeCalculation,
    pub wing: Option<WingCalculation>,
    pub arrows: Option<ArrowCalculation>,
    pub state: Option<StateAnalysis>,
    pub subtype: Option<SubtypeStack>,
}

impl PersonalityProfile {
    /// Primary type of the profile.
    pub fn primary_type(&self) -> TypeId {
        self.primary.primary_type
    }

    /// Number of sections ready to show, 1–5.
    pub fn completed_sections(&self) -> usize {
        1 + usize::from(self.wing.is_some())
            + usize::from(self.arrows.is_some())
            + usize::from(self.state.is_some())
            + usize::from(self.subtype.is_some())
    }

    /// True when every section is ready.
    pub fn is_complete(&self) -> bool {
        self.completed_sections() == 5
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Runs the classifiers against one catalog and narrative source.
///
/// Cheap to clone; both collaborators are shared.
#[derive(Clone)]
pub struct ProfileEngine {
    catalog: Arc<ContentCatalog>,
    narratives: Arc<dyn NarrativeSource>,
}

impl Default for ProfileEngine {
    fn default() -> Self {
        Self {
            catalog: ContentCatalog::shared(),
            narratives: Arc::new(PlaceholderNarratives),
        }
    }
}

impl std::fmt::Debug for ProfileEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileEngine")
            .field("catalog_version", &self.catalog.version)
            .finish()
    }
}

impl ProfileEngine {
    /// Engine over a caller-supplied catalog with placeholder narratives.
    pub fn new(catalog: ContentCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            narratives: Arc::new(PlaceholderNarratives),
        }
    }

    /// Replace the narrative source.
    pub fn with_narratives(mut self, narratives: impl NarrativeSource + 'static) -> Self {
        self.narratives = Arc::new(narratives);
        self
    }

    /// The catalog this engine classifies against.
    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn classify_primary_type(
        &self,
        selections: &[i64],
    ) -> Result<PersonalityTypeCalculation, ClassifyError> {
        classify_primary_type_with(&self.catalog, selections)
    }

    pub fn classify_wing(
        &self,
        primary: Option<TypeId>,
        blocks: &[Option<i64>],
    ) -> Option<WingCalculation> {
        classify_wing_with(&self.catalog, self.narratives.as_ref(), primary, blocks)
    }

    pub fn classify_arrows(
        &self,
        primary: Option<TypeId>,
        blocks: &[Option<i64>],
    ) -> Option<ArrowCalculation> {
        classify_arrows_with(&self.catalog, self.narratives.as_ref(), primary, blocks)
    }

    pub fn analyze_state_impact(
        &self,
        indices: [usize; 2],
        distribution: StateDistribution,
        primary: Option<TypeId>,
    ) -> Option<StateAnalysis> {
        analyze_state_impact_with(
            &self.catalog,
            self.narratives.as_ref(),
            indices,
            distribution,
            primary,
        )
    }

    pub fn classify_subtype_stack(
        &self,
        distribution: TokenDistribution,
        primary: Option<TypeId>,
    ) -> Option<SubtypeStack> {
        classify_subtype_stack_with(self.narratives.as_ref(), distribution, primary)
    }

    /// Classify the foundation phase, then every later phase that has input.
    ///
    /// Fails only when the foundation selections are malformed.
    pub fn assess(&self, assessment: &Assessment) -> Result<PersonalityProfile, ClassifyError> {
        let primary = self.classify_primary_type(&assessment.foundation)?;
        let ty = Some(primary.primary_type);

        let wing = self.classify_wing(ty, &assessment.blocks);
        let arrows = self.classify_arrows(ty, &assessment.blocks);
        let state = assessment
            .states
            .and_then(|s| self.analyze_state_impact(s.indices, s.distribution, ty));
        let subtype = assessment
            .tokens
            .and_then(|t| self.classify_subtype_stack(t, ty));

        let profile = PersonalityProfile {
            primary,
            wing,
            arrows,
            state,
            subtype,
        };
        log::debug!(
            "Assessed type {} with {}/5 sections ready",
            profile.primary_type(),
            profile.completed_sections()
        );
        Ok(profile)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StackType, WingStrength};
    use crate::narrative::SilentNarratives;

    const TYPE_FIVE: [i64; 9] = [0, 2, 1, 2, 0, 1, 0, 1, 1];

    fn full_assessment() -> Assessment {
        Assessment::new(TYPE_FIVE.to_vec())
            .with_blocks(vec![Some(4), Some(0), Some(1), Some(1)])
            .with_states([1, 2], StateDistribution::new(80, 20))
            .with_tokens(TokenDistribution::new(6, 1, 3))
    }

    #[test]
    fn test_foundation_only() {
        let engine = ProfileEngine::default();
        let profile = engine.assess(&Assessment::new(TYPE_FIVE.to_vec())).unwrap();
        assert_eq!(profile.primary_type().get(), 5);
        assert!(profile.wing.is_none(), "no blocks supplied");
        assert!(profile.arrows.is_none());
        assert!(profile.state.is_none());
        assert!(profile.subtype.is_none());
        assert_eq!(profile.completed_sections(), 1);
    }

    #[test]
    fn test_full_assessment() {
        let engine = ProfileEngine::default();
        let profile = engine.assess(&full_assessment()).unwrap();
        assert!(profile.is_complete());

        let wing = profile.wing.as_ref().unwrap();
        assert_eq!(wing.primary_wing, "5w4");
        assert_eq!(wing.wing_strength, WingStrength::Strong);

        let arrows = profile.arrows.as_ref().unwrap();
        assert_eq!(arrows.integration_type.get(), 8);
        assert_eq!(arrows.disintegration_type.get(), 7);

        let state = profile.state.as_ref().unwrap();
        assert_eq!(state.overall_activation, 66);
        assert!(state.blended_description.contains("dominant"));

        let subtype = profile.subtype.as_ref().unwrap();
        assert_eq!(subtype.stack_type, StackType::Dominant);
        assert!(subtype.stack_description.contains("Type 5"));
    }

    #[test]
    fn test_invalid_later_phases_are_not_ready() {
        let engine = ProfileEngine::default();
        let assessment = Assessment::new(TYPE_FIVE.to_vec())
            .with_blocks(vec![Some(4)])
            .with_states([1, 1], StateDistribution::new(50, 50))
            .with_tokens(TokenDistribution::new(3, 3, 3));
        let profile = engine.assess(&assessment).unwrap();
        assert_eq!(profile.completed_sections(), 1);
    }

    #[test]
    fn test_malformed_foundation_is_an_error() {
        let engine = ProfileEngine::default();
        let err = engine.assess(&Assessment::new(vec![0, 1])).unwrap_err();
        assert!(matches!(err, ClassifyError::WrongLength { actual: 2, .. }));
    }

    #[test]
    fn test_silent_narratives() {
        let engine = ProfileEngine::default().with_narratives(SilentNarratives);
        let profile = engine.assess(&full_assessment()).unwrap();
        assert!(profile.wing.unwrap().description.is_none());
        assert!(profile.arrows.unwrap().description.is_none());
        assert_eq!(profile.state.unwrap().insights.len(), 5);
    }

    #[test]
    fn test_engine_matches_free_functions() {
        let engine = ProfileEngine::default();
        let profile = engine.assess(&full_assessment()).unwrap();
        let direct = crate::classify::classify_primary_type(&TYPE_FIVE).unwrap();
        assert_eq!(profile.primary, direct);
    }

    #[test]
    fn test_custom_catalog() {
        let mut catalog = ContentCatalog::builtin().clone();
        catalog.version = "test".to_string();
        catalog.states[1].name = "Steady".to_string();
        let engine = ProfileEngine::new(catalog);
        assert_eq!(engine.catalog().version, "test");
        let profile = engine.assess(&full_assessment()).unwrap();
        assert_eq!(profile.state.unwrap().primary_state, "Steady");
    }

    #[test]
    fn test_key_is_stable_and_sensitive() {
        let a = full_assessment();
        assert_eq!(a.key(), full_assessment().key());
        assert_eq!(a.key().len(), 32);
        let b = full_assessment().with_tokens(TokenDistribution::new(5, 2, 3));
        assert_ne!(a.key(), b.key());
        let c = Assessment::new(TYPE_FIVE.to_vec());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn test_assessment_json_roundtrip() {
        let json = r#"{
            "foundation": [0, 2, 1, 2, 0, 1, 0, 1, 1],
            "blocks": [4, null, 1, 0],
            "states": {"indices": [0, 3], "distribution": {"primaryPercentage": 60, "secondaryPercentage": 40}},
            "tokens": {"self": 2, "oneToOne": 5, "social": 3}
        }"#;
        let assessment: Assessment = serde_json::from_str(json).unwrap();
        assert_eq!(assessment.blocks, vec![Some(4), None, Some(1), Some(0)]);
        assert_eq!(assessment.tokens.unwrap().one_to_one, 5);

        let profile = ProfileEngine::default().assess(&assessment).unwrap();
        let out = serde_json::to_value(&profile).unwrap();
        assert_eq!(out["primary"]["primaryType"], "5");
        assert_eq!(out["wing"]["primaryWing"], "5w4");
        assert_eq!(out["arrows"]["integrationStrength"], "less_developed");
        assert_eq!(out["subtype"]["primary"], "oneToOne");
    }

    #[test]
    fn test_minimal_json_defaults_later_phases() {
        let assessment: Assessment =
            serde_json::from_str(r#"{"foundation": [1, 1, 1, 1, 1, 1, 1, 1, 1]}"#).unwrap();
        assert!(assessment.blocks.is_empty());
        assert!(assessment.states.is_none());
        let profile = ProfileEngine::default().assess(&assessment).unwrap();
        assert_eq!(profile.completed_sections(), 1);
    }
}
