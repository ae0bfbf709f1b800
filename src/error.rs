use thiserror::Error;

use crate::types::Category;

/// Caller-correctable input errors. Internal invariant violations (for example a
/// Score Table miss) panic instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("expected exactly 5 dice, got {0}")]
    DiceCount(usize),

    #[error("die {index} has value {value}, expected 1..=6")]
    DieOutOfRange { index: usize, value: i32 },

    #[error("rolls_left must be non-negative, got {0}")]
    NegativeRolls(i32),

    #[error("category id {0} is outside 0..=11")]
    UnknownCategory(i32),

    #[error("no open categories: no recommendation available")]
    NoOpenCategories,

    #[error("category {} has already been scored", .0.name())]
    AlreadyScored(Category),
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;
