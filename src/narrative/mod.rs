//! Type-specific narrative lines.
//!
//! The classifiers produce generic narrative from fixed templates.  Lines that
//! depend on the primary type are content owned by whoever curates the type
//! descriptions, so they come through [`NarrativeSource`] instead of being
//! hard-coded.  Every method is optional; `None` means "nothing to add".

use crate::model::{StackType, TypeId};

/// Supplier of optional per-type narrative lines.
pub trait NarrativeSource: Send + Sync {
    /// Note appended to a resolved wing.
    fn wing_note(&self, _primary: TypeId, _wing: TypeId) -> Option<String> {
        None
    }

    /// Note appended to the arrow relationships.
    fn arrow_note(&self, _primary: TypeId) -> Option<String> {
        None
    }

    /// Final line of the state insights.
    fn state_insight(&self, _primary: TypeId) -> Option<String> {
        None
    }

    /// Final line of the state recommendations.
    fn state_recommendation(&self, _primary: TypeId) -> Option<String> {
        None
    }

    /// Clause appended to a subtype stack description.
    fn subtype_clause(&self, _primary: TypeId, _stack: StackType) -> Option<String> {
        None
    }
}

/// Adds nothing.  Useful when only the generic narrative is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNarratives;

impl NarrativeSource for SilentNarratives {}

/// Marks where curated per-type content will go.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderNarratives;

impl NarrativeSource for PlaceholderNarratives {
    fn wing_note(&self, primary: TypeId, wing: TypeId) -> Option<String> {
        Some(format!(
            "Specific insights for Type {} with a {} wing to be added.",
            primary, wing
        ))
    }

    fn arrow_note(&self, primary: TypeId) -> Option<String> {
        Some(format!(
            "Specific growth and stress patterns for Type {} to be added.",
            primary
        ))
    }

    fn state_insight(&self, primary: TypeId) -> Option<String> {
        Some(format!(
            "Type-specific state insights for Type {} to be added.",
            primary
        ))
    }

    fn state_recommendation(&self, primary: TypeId) -> Option<String> {
        Some(format!(
            "Type-specific recommendations for Type {} to be added.",
            primary
        ))
    }

    fn subtype_clause(&self, primary: TypeId, stack: StackType) -> Option<String> {
        Some(format!(
            "How a {} stack shapes Type {} to be added.",
            stack, primary
        ))
    }
}
