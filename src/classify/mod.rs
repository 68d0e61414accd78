//! The five classifiers.
//!
//! ```text
//! foundation selections ──► primary ──┬──► wing      (+ blocks)
//!                                     ├──► arrows    (+ blocks)
//!                                     ├──► state     (+ palette indices, split)
//!                                     └──► subtype   (+ token distribution)
//! ```
//!
//! Every classifier is a pure function of its arguments and the read-only
//! [`ContentCatalog`](crate::catalog::ContentCatalog).  The `*_with` variants
//! take the catalog and narrative source explicitly; the plain variants use
//! the built-in catalog and placeholder narratives.

pub mod arrows;
pub mod error;
pub mod primary;
pub mod state;
pub mod subtype;
pub mod wing;

use serde::{Deserialize, Serialize};

pub use arrows::{classify_arrows, classify_arrows_with, ArrowCalculation};
pub use error::ClassifyError;
pub use primary::{
    classify_primary_type, classify_primary_type_with, PersonalityTypeCalculation, TypeScores,
};
pub use state::{analyze_state_impact, analyze_state_impact_with, StateAnalysis, StateDistribution};
pub use subtype::{
    classify_subtype_stack, classify_subtype_stack_with, SubtypeStack, TokenDistribution,
};
pub use wing::{classify_wing, classify_wing_with, WingCalculation};

// ============================================================================
// Building-block selections
// ============================================================================

/// Number of building-block decisions.
pub const BLOCK_COUNT: usize = 4;

/// The four building-block decisions shared by the wing and arrow classifiers.
///
/// `chosen_wing` is a literal type number; the other three are 0/1 choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSelections {
    pub chosen_wing: Option<i64>,
    pub arrow_pair: Option<i64>,
    pub growth_focus: Option<i64>,
    pub response_pattern: Option<i64>,
}

/// Which direction the arrow-pair choice favoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowLead {
    /// Choice 0: growth direction is the consciously accessed one.
    Growth,
    /// Choice 1: stress direction is the consciously accessed one.
    Stress,
}

/// Agreement between the growth-focus and response-pattern choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agreement {
    /// Both present and equal.
    Consistent,
    /// Both present and different.
    Mixed,
    /// Exactly one present.
    Partial,
    /// Neither present.
    Absent,
}

impl BlockSelections {
    /// Read the positional form `[wing, arrow, growth, response]`.
    ///
    /// Returns `None` when fewer than four entries are supplied; extra
    /// entries are ignored.
    pub fn from_slice(blocks: &[Option<i64>]) -> Option<Self> {
        match blocks {
            [chosen_wing, arrow_pair, growth_focus, response_pattern, ..] => Some(Self {
                chosen_wing: *chosen_wing,
                arrow_pair: *arrow_pair,
                growth_focus: *growth_focus,
                response_pattern: *response_pattern,
            }),
            _ => None,
        }
    }

    /// Positional form, inverse of [`BlockSelections::from_slice`].
    pub fn to_array(&self) -> [Option<i64>; BLOCK_COUNT] {
        [
            self.chosen_wing,
            self.arrow_pair,
            self.growth_focus,
            self.response_pattern,
        ]
    }

    /// Direction favoured by the arrow-pair choice.
    ///
    /// Values other than 0/1 are treated as unanswered.
    pub fn arrow_lead(&self) -> Option<ArrowLead> {
        match self.arrow_pair? {
            0 => Some(ArrowLead::Growth),
            1 => Some(ArrowLead::Stress),
            other => {
                log::warn!("Ignoring arrow-pair choice {}; expected 0 or 1", other);
                None
            }
        }
    }

    /// How the two auxiliary choices relate to each other.
    pub fn agreement(&self) -> Agreement {
        match (self.growth_focus, self.response_pattern) {
            (Some(a), Some(b)) if a == b => Agreement::Consistent,
            (Some(_), Some(_)) => Agreement::Mixed,
            (Some(_), None) | (None, Some(_)) => Agreement::Partial,
            (None, None) => Agreement::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_requires_four_entries() {
        assert!(BlockSelections::from_slice(&[]).is_none());
        assert!(BlockSelections::from_slice(&[Some(2), Some(0), Some(1)]).is_none());
        let b = BlockSelections::from_slice(&[Some(2), Some(0), Some(1), None]).unwrap();
        assert_eq!(b.chosen_wing, Some(2));
        assert_eq!(b.response_pattern, None);
        assert_eq!(b.to_array(), [Some(2), Some(0), Some(1), None]);
    }

    #[test]
    fn test_agreement() {
        let mut b = BlockSelections::default();
        assert_eq!(b.agreement(), Agreement::Absent);
        b.growth_focus = Some(1);
        assert_eq!(b.agreement(), Agreement::Partial);
        b.response_pattern = Some(1);
        assert_eq!(b.agreement(), Agreement::Consistent);
        b.response_pattern = Some(0);
        assert_eq!(b.agreement(), Agreement::Mixed);
    }

    #[test]
    fn test_arrow_lead() {
        let mut b = BlockSelections::default();
        assert_eq!(b.arrow_lead(), None);
        b.arrow_pair = Some(0);
        assert_eq!(b.arrow_lead(), Some(ArrowLead::Growth));
        b.arrow_pair = Some(1);
        assert_eq!(b.arrow_lead(), Some(ArrowLead::Stress));
        b.arrow_pair = Some(5);
        assert_eq!(b.arrow_lead(), None);
    }
}
