//! Game constants for five-dice Yacht.
//!
//! - |C| = [`CATEGORY_COUNT`] = 12 (Ones..Sixes, Choice, Four of a Kind,
//!   Full House, Small/Large Straight, Yacht)
//! - |R_{5,6}| = [`NUM_DICE_SETS`] = 252 sorted 5-dice multisets
//! - keep masks: [`NUM_KEEP_MASKS`] = 2^5 subsets of die positions

/// Number of scoring categories.
pub const CATEGORY_COUNT: usize = 12;

/// Number of dice in a hand.
pub const NUM_DICE: usize = 5;

/// Number of distinct sorted 5-dice multisets from {1..6}: C(10,5) = 252.
pub const NUM_DICE_SETS: usize = 252;

/// `index_lookup` entry for a slot that is not a sorted dice set.
pub const DICE_SET_MISS: u8 = u8::MAX;

/// Number of keep subsets over 5 die positions.
pub const NUM_KEEP_MASKS: usize = 1 << NUM_DICE;

/// Keep mask with every position set.
pub const KEEP_ALL_MASK: u8 = (NUM_KEEP_MASKS - 1) as u8;

/// Bits of a [`crate::types::CategorySet`] that name a real category.
pub const ALL_CATEGORIES_MASK: u16 = (1 << CATEGORY_COUNT) - 1;

/// Probabilities closer than this are treated as tied.
pub const EPS: f64 = 1e-12;

/// Success probability assigned to a three-of-a-kind keep when chasing
/// Four of a Kind. Heuristic, not the exact reroll probability; changing it
/// changes recommended play.
pub const FOUR_KIND_THREE_RUN_PROBABILITY: f64 = 0.33;

/// Expected value of one unconstrained die.
pub const MEAN_DIE_VALUE: f64 = 3.5;

/// Fixed scores.
pub const SMALL_STRAIGHT_SCORE: i32 = 15;
pub const LARGE_STRAIGHT_SCORE: i32 = 30;
pub const YACHT_SCORE: i32 = 50;

/// Upper-section bonus: 35 points once Ones..Sixes reach 63.
pub const UPPER_BONUS: u32 = 35;
pub const UPPER_BONUS_THRESHOLD: u32 = 63;

/// Category indices, stable for the lifetime of the game.
pub const CATEGORY_ONES: usize = 0;
pub const CATEGORY_TWOS: usize = 1;
pub const CATEGORY_THREES: usize = 2;
pub const CATEGORY_FOURS: usize = 3;
pub const CATEGORY_FIVES: usize = 4;
pub const CATEGORY_SIXES: usize = 5;
pub const CATEGORY_CHOICE: usize = 6;
pub const CATEGORY_FOUR_OF_A_KIND: usize = 7;
pub const CATEGORY_FULL_HOUSE: usize = 8;
pub const CATEGORY_SMALL_STRAIGHT: usize = 9;
pub const CATEGORY_LARGE_STRAIGHT: usize = 10;
pub const CATEGORY_YACHT: usize = 11;

/// Human-readable category names.
pub const CATEGORY_NAMES: [&str; CATEGORY_COUNT] = [
    "Ones",
    "Twos",
    "Threes",
    "Fours",
    "Fives",
    "Sixes",
    "Choice",
    "Four of a Kind",
    "Full House",
    "Small Straight",
    "Large Straight",
    "Yacht",
];
