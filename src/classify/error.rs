//! Input-shape errors raised by the classifiers.

use thiserror::Error;

/// A malformed input that a caller should have caught before classifying.
///
/// "Not enough information yet" is never an error; those classifiers
/// return `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The selection array has the wrong number of entries.
    #[error("expected {expected} selections, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    /// A selection value is outside its allowed range.
    #[error("selection[{index}] = {value} is outside 0..={max}")]
    OutOfRange { index: usize, value: i64, max: i64 },
}
