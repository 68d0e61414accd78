//! Core vocabulary shared by every classifier.
//!
//! The nine personality types are addressed by a small [`TypeId`] newtype;
//! the categorical outputs (wing strength, arrow strength, stack type) are
//! plain enums that serialize to the lowercase labels downstream consumers
//! store verbatim.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Type identifiers
// ============================================================================

/// One of the nine personality types, numbered 1–9.
///
/// Serializes as the string `"1"`..`"9"`; deserializes from either the
/// string or the bare integer so YAML map keys like `1:` work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u8);

impl TypeId {
    /// Number of distinct types.
    pub const COUNT: usize = 9;

    /// All nine types in ascending order.
    pub const ALL: [TypeId; 9] = [
        TypeId(1),
        TypeId(2),
        TypeId(3),
        TypeId(4),
        TypeId(5),
        TypeId(6),
        TypeId(7),
        TypeId(8),
        TypeId(9),
    ];

    /// Build a type id from its number, `None` outside 1–9.
    pub fn new(number: u8) -> Option<Self> {
        (1..=9).contains(&number).then_some(Self(number))
    }

    /// Build a type id from a raw (possibly negative) selection value.
    pub fn from_i64(number: i64) -> Option<Self> {
        u8::try_from(number).ok().and_then(Self::new)
    }

    /// Parse the UI's string form (`"1"`..`"9"`, surrounding whitespace ignored).
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<u8>().ok().and_then(Self::new)
    }

    /// The type number (1–9).
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position, for indexing fixed-size score arrays.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Inverse of [`TypeId::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index + 1).ok().and_then(Self::new)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TypeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct TypeIdVisitor;

impl<'de> Visitor<'de> for TypeIdVisitor {
    type Value = TypeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a personality type number 1-9")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TypeId, E> {
        u8::try_from(v)
            .ok()
            .and_then(TypeId::new)
            .ok_or_else(|| E::custom(format!("type {} is outside 1-9", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TypeId, E> {
        TypeId::from_i64(v).ok_or_else(|| E::custom(format!("type {} is outside 1-9", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TypeId, E> {
        TypeId::parse(v).ok_or_else(|| E::custom(format!("type '{}' is not 1-9", v)))
    }
}

impl<'de> Deserialize<'de> for TypeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TypeIdVisitor)
    }
}

// ============================================================================
// Instinctual variants
// ============================================================================

/// The three instinctual variants a user distributes energy tokens across.
///
/// Declaration order is the fixed tie-break priority when two variants hold
/// the same token count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Instinct {
    #[serde(rename = "self")]
    SelfPreservation,
    #[serde(rename = "oneToOne")]
    OneToOne,
    #[serde(rename = "social")]
    Social,
}

impl Instinct {
    /// All variants in tie-break priority order.
    pub const ALL: [Instinct; 3] = [Self::SelfPreservation, Self::OneToOne, Self::Social];

    /// Human-readable label used in narratives.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SelfPreservation => "Self-Preservation",
            Self::OneToOne => "One-to-One",
            Self::Social => "Social",
        }
    }
}

impl fmt::Display for Instinct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Categorical outputs
// ============================================================================

/// How firmly the chosen wing is supported by the auxiliary choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WingStrength {
    Strong,
    Moderate,
}

/// How consciously a growth or stress direction is accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowStrength {
    Conscious,
    Developing,
    LessDeveloped,
}

/// Shape of an instinctual stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackType {
    /// One instinct holds at least six of ten tokens.
    Dominant,
    /// Top two instincts within a token of each other, third still above one.
    Balanced,
    /// The last instinct is nearly absent.
    Polarized,
    /// Clear ordering with every instinct still in play.
    Integrated,
}

impl fmt::Display for StackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dominant => "dominant",
            Self::Balanced => "balanced",
            Self::Polarized => "polarized",
            Self::Integrated => "integrated",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
