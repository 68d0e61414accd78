//! # Typology
//!
//! Deterministic scoring and classification for nine-type personality
//! profiles.
//!
//! Four assessment phases of forced-choice answers go in; a typed profile
//! comes out: primary type, wing, growth/stress arrows, a blended
//! operating-state analysis and an instinctual subtype stack, each with a
//! confidence score.  All classifiers are pure functions over a read-only
//! [`ContentCatalog`], so they can be called from any thread without locking.
//!
//! ```no_run
//! use typology::{Assessment, ProfileEngine, TokenDistribution};
//!
//! let engine = ProfileEngine::default();
//! let assessment = Assessment::new(vec![0, 2, 1, 2, 0, 1, 0, 1, 1])
//!     .with_blocks(vec![Some(4), Some(0), Some(1), Some(1)])
//!     .with_tokens(TokenDistribution::new(6, 1, 3));
//! let profile = engine.assess(&assessment).unwrap();
//! println!("{}", profile.primary_type());
//! ```

pub mod catalog;
pub mod classify;
pub mod model;
pub mod narrative;
pub mod profile;

pub use catalog::{CatalogError, ContentCatalog};
pub use classify::{
    analyze_state_impact, classify_arrows, classify_primary_type, classify_subtype_stack,
    classify_wing, ArrowCalculation, BlockSelections, ClassifyError, PersonalityTypeCalculation,
    StateAnalysis, StateDistribution, SubtypeStack, TokenDistribution, WingCalculation,
};
pub use model::{ArrowStrength, Instinct, StackType, TypeId, WingStrength};
pub use narrative::{NarrativeSource, PlaceholderNarratives, SilentNarratives};
pub use profile::{Assessment, PersonalityProfile, ProfileCache, ProfileEngine, StateInput};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
