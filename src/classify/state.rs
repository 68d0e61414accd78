//! State impact analyzer: blends two operating states by time share.

use serde::{Deserialize, Serialize};

use crate::catalog::{ContentCatalog, OperatingState};
use crate::model::TypeId;
use crate::narrative::{NarrativeSource, PlaceholderNarratives};

/// Share above which one state is described as dominant.
const DOMINANT_SHARE: u32 = 70;

/// How the user's time splits between the two chosen states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDistribution {
    pub primary_percentage: u32,
    pub secondary_percentage: u32,
}

impl StateDistribution {
    pub fn new(primary_percentage: u32, secondary_percentage: u32) -> Self {
        Self {
            primary_percentage,
            secondary_percentage,
        }
    }

    /// True when the two shares add up to exactly 100.
    pub fn is_complete(&self) -> bool {
        self.primary_percentage.checked_add(self.secondary_percentage) == Some(100)
    }
}

/// Result of state impact analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateAnalysis {
    pub primary_state: String,
    pub secondary_state: String,
    pub distribution: StateDistribution,
    pub blended_description: String,
    /// Time-weighted activation, 0–100.
    pub overall_activation: u8,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Analyze with the built-in catalog and placeholder narratives.
pub fn analyze_state_impact(
    indices: [usize; 2],
    distribution: StateDistribution,
    primary: Option<TypeId>,
) -> Option<StateAnalysis> {
    analyze_state_impact_with(
        ContentCatalog::builtin(),
        &PlaceholderNarratives,
        indices,
        distribution,
        primary,
    )
}

/// Blend the two chosen catalog states.
///
/// `None` when the indices repeat or fall outside the catalog, or when the
/// distribution does not total 100.  A known `primary` only adds the
/// type-specific lines and description overrides.
pub fn analyze_state_impact_with(
    catalog: &ContentCatalog,
    narratives: &dyn NarrativeSource,
    indices: [usize; 2],
    distribution: StateDistribution,
    primary: Option<TypeId>,
) -> Option<StateAnalysis> {
    let [first, second] = indices;
    if first == second || !distribution.is_complete() {
        return None;
    }
    let primary_state = catalog.state(first)?;
    let secondary_state = catalog.state(second)?;

    let overall = overall_activation(primary_state, secondary_state, &distribution);
    let blended_description =
        blended_description(primary_state, secondary_state, &distribution, primary);

    let mut insights = vec![
        format!("Your overall activation level is {}%.", overall),
        activation_band(overall).to_string(),
        format!(
            "You spend approximately {}% of your time in the {} state.",
            distribution.primary_percentage, primary_state.name
        ),
        format!(
            "You spend approximately {}% of your time in the {} state.",
            distribution.secondary_percentage, secondary_state.name
        ),
        activation_gap(primary_state, secondary_state).to_string(),
    ];
    insights.extend(primary.and_then(|t| narratives.state_insight(t)));

    let mut recommendations: Vec<String> =
        recommendations_for(overall).iter().map(|s| s.to_string()).collect();
    recommendations.extend(primary.and_then(|t| narratives.state_recommendation(t)));

    log::debug!(
        "State blend {} {}% / {} {}% -> activation {}",
        primary_state.name,
        distribution.primary_percentage,
        secondary_state.name,
        distribution.secondary_percentage,
        overall
    );

    Some(StateAnalysis {
        primary_state: primary_state.name.clone(),
        secondary_state: secondary_state.name.clone(),
        distribution,
        blended_description,
        overall_activation: overall,
        insights,
        recommendations,
    })
}

fn overall_activation(
    primary: &OperatingState,
    secondary: &OperatingState,
    distribution: &StateDistribution,
) -> u8 {
    let primary_part =
        f64::from(primary.activation) * f64::from(distribution.primary_percentage) / 100.0;
    let secondary_part =
        f64::from(secondary.activation) * f64::from(distribution.secondary_percentage) / 100.0;
    let weighted = primary_part + secondary_part;
    // both activations are <= 100 and the shares total 100
    weighted.round().clamp(0.0, 100.0) as u8
}

fn blended_description(
    primary: &OperatingState,
    secondary: &OperatingState,
    distribution: &StateDistribution,
    ty: Option<TypeId>,
) -> String {
    let dominant = |lead: &OperatingState, other: &OperatingState| {
        format!(
            "{} This state is dominant, though sometimes influenced by tendencies towards: {}.",
            lead.description_for(ty),
            other.name
        )
    };
    if distribution.primary_percentage > DOMINANT_SHARE {
        dominant(primary, secondary)
    } else if distribution.secondary_percentage > DOMINANT_SHARE {
        dominant(secondary, primary)
    } else {
        format!(
            "You experience a blend of two prominent states: {} ({}%) and {} ({}%). \
             Your functioning may fluctuate frequently between them.",
            primary.name,
            distribution.primary_percentage,
            secondary.name,
            distribution.secondary_percentage
        )
    }
}

fn activation_band(overall: u8) -> &'static str {
    if overall >= 70 {
        "This indicates a high level of functioning, with good access to your healthier capacities."
    } else if overall >= 50 {
        "This indicates a balanced but inconsistent level of functioning, with room to grow."
    } else {
        "This suggests you may be experiencing significant stress that limits access to your resources."
    }
}

fn activation_gap(primary: &OperatingState, secondary: &OperatingState) -> &'static str {
    let gap = primary.activation.abs_diff(secondary.activation);
    if gap > 40 {
        "There is a significant difference between your two most common states, which can feel like living in two different worlds."
    } else if gap > 20 {
        "Your two states are distinct but close enough that you experience noticeable shifts between them."
    } else {
        "Your two states are relatively close in activation, suggesting a consistent way of functioning."
    }
}

const LOW_ACTIVATION_RECOMMENDATIONS: &[&str] = &[
    "Prioritize rest and basic self-care before taking on new commitments.",
    "Notice the early signals that pull you toward your lower state and pause when they appear.",
    "Reach out to people you trust, or to a professional, for support.",
];

const MID_ACTIVATION_RECOMMENDATIONS: &[&str] = &[
    "Identify the situations that reliably lift you into your higher state and build more of them into your week.",
    "Use a brief daily check-in to catch drift between your states early.",
];

const HIGH_ACTIVATION_RECOMMENDATIONS: &[&str] = &[
    "Keep reinforcing the practices that sustain your current level of functioning.",
    "Use your stability to take on meaningful challenges and to support others.",
];

fn recommendations_for(overall: u8) -> &'static [&'static str] {
    if overall < 50 {
        LOW_ACTIVATION_RECOMMENDATIONS
    } else if overall < 75 {
        MID_ACTIVATION_RECOMMENDATIONS
    } else {
        HIGH_ACTIVATION_RECOMMENDATIONS
    }
}
