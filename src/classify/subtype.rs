//! Subtype stack classifier: ranks the instinctual variants by token count.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Instinct, StackType, TypeId};
use crate::narrative::{NarrativeSource, PlaceholderNarratives};

/// Tokens a user distributes across the three instincts.
pub const TOKEN_TOTAL: u32 = 10;

const DOMINANT_COUNT: u32 = 6;
const CLARITY_SPAN: f64 = 80.0;
const MIN_CLARITY: f64 = 0.3;

/// Energy tokens allocated to each instinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDistribution {
    #[serde(rename = "self")]
    pub self_preservation: u32,
    pub one_to_one: u32,
    pub social: u32,
}

impl TokenDistribution {
    pub fn new(self_preservation: u32, one_to_one: u32, social: u32) -> Self {
        Self {
            self_preservation,
            one_to_one,
            social,
        }
    }

    /// Tokens held by `instinct`.
    pub fn count(&self, instinct: Instinct) -> u32 {
        match instinct {
            Instinct::SelfPreservation => self.self_preservation,
            Instinct::OneToOne => self.one_to_one,
            Instinct::Social => self.social,
        }
    }

    /// Total tokens, `None` on overflow.
    pub fn total(&self) -> Option<u32> {
        self.self_preservation
            .checked_add(self.one_to_one)?
            .checked_add(self.social)
    }

    /// Instincts by count descending; ties keep `Instinct::ALL` order.
    pub fn ranked(&self) -> [(Instinct, u32); 3] {
        let mut ranked = Instinct::ALL.map(|i| (i, self.count(i)));
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

/// Result of subtype stack classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtypeStack {
    pub primary: Instinct,
    pub secondary: Instinct,
    pub tertiary: Instinct,
    /// Share of tokens per instinct, in percent to two decimals.
    pub dominance: BTreeMap<Instinct, f64>,
    pub stack_type: StackType,
    pub stack_description: String,
    /// Distribution clarity, 0.3–1.0.
    pub confidence: f64,
    pub raw_distribution: TokenDistribution,
}

impl SubtypeStack {
    /// Conventional short label, e.g. `"sp/so"`.
    pub fn short_label(&self) -> String {
        format!("{}/{}", abbreviation(self.primary), abbreviation(self.secondary))
    }
}

fn abbreviation(instinct: Instinct) -> &'static str {
    match instinct {
        Instinct::SelfPreservation => "sp",
        Instinct::OneToOne => "sx",
        Instinct::Social => "so",
    }
}

/// Classify with placeholder narratives.
pub fn classify_subtype_stack(
    distribution: TokenDistribution,
    primary: Option<TypeId>,
) -> Option<SubtypeStack> {
    classify_subtype_stack_with(&PlaceholderNarratives, distribution, primary)
}

/// Rank the instincts and categorize the stack.
///
/// `None` unless the three counts total exactly ten.
pub fn classify_subtype_stack_with(
    narratives: &dyn NarrativeSource,
    distribution: TokenDistribution,
    primary: Option<TypeId>,
) -> Option<SubtypeStack> {
    if distribution.total() != Some(TOKEN_TOTAL) {
        return None;
    }

    let [(first, c1), (second, c2), (third, c3)] = distribution.ranked();
    let stack_type = stack_type(c1, c2, c3);

    let dominance: BTreeMap<Instinct, f64> = Instinct::ALL
        .iter()
        .map(|i| (*i, share(distribution.count(*i))))
        .collect();

    // ranked counts give the percentages already sorted
    let (p1, p2, p3) = (share(c1), share(c2), share(c3));
    let clarity = ((p1 - p2) + (p2 - p3)) / CLARITY_SPAN;
    let confidence = clarity.clamp(MIN_CLARITY, 1.0);

    let mut stack_description = describe(stack_type, [(first, c1), (second, c2), (third, c3)]);
    if let Some(clause) = primary.and_then(|t| narratives.subtype_clause(t, stack_type)) {
        stack_description.push(' ');
        stack_description.push_str(&clause);
    }

    log::debug!(
        "Subtype stack {}/{}/{} ({}, confidence {:.3})",
        first,
        second,
        third,
        stack_type,
        confidence
    );

    Some(SubtypeStack {
        primary: first,
        secondary: second,
        tertiary: third,
        dominance,
        stack_type,
        stack_description,
        confidence,
        raw_distribution: distribution,
    })
}

/// Percent of the ten tokens, rounded to two decimals.
fn share(count: u32) -> f64 {
    let pct = f64::from(count) / f64::from(TOKEN_TOTAL) * 100.0;
    (pct * 100.0).round() / 100.0
}

fn stack_type(primary: u32, secondary: u32, tertiary: u32) -> StackType {
    if primary >= DOMINANT_COUNT {
        StackType::Dominant
    } else if primary - secondary <= 1 && tertiary > 1 {
        StackType::Balanced
    } else if tertiary <= 1 {
        StackType::Polarized
    } else {
        StackType::Integrated
    }
}

fn describe(stack_type: StackType, ranked: [(Instinct, u32); 3]) -> String {
    let [(p, pc), (s, sc), (t, tc)] = ranked;
    match stack_type {
        StackType::Dominant => format!(
            "Your {} instinct is strongly dominant ({} of {} tokens) and shapes most of where your attention goes. \
             {} ({}) and {} ({}) play a much smaller role.",
            p, pc, TOKEN_TOTAL, s, sc, t, tc
        ),
        StackType::Balanced => format!(
            "Your instincts are closely balanced, with {} ({}) narrowly ahead of {} ({}) and {} ({}). \
             You move between these areas of focus with relative ease.",
            p, pc, s, sc, t, tc
        ),
        StackType::Polarized => format!(
            "Your energy is split between {} ({}) and {} ({}), while {} ({}) receives little attention \
             and may be a blind spot.",
            p, pc, s, sc, t, tc
        ),
        StackType::Integrated => format!(
            "{} ({}) leads your stack, supported by {} ({}), with {} ({}) still available as a resource.",
            p, pc, s, sc, t, tc
        ),
    }
}
