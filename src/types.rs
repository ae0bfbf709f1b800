//! Core data structures: categories, keep masks, outcome distributions and the
//! engine context.
//!
//! The central type is [`YachtContext`], which holds the Score Table and the
//! Outcome Distribution Cache. It is built once by
//! [`crate::phase0_tables::precompute_lookup_tables`] (or [`YachtContext::build`])
//! and then shared immutably across threads; nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{AdvisorError, AdvisorResult};

/// One of the 12 scoring categories, in fixed index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    Ones = 0,
    Twos = 1,
    Threes = 2,
    Fours = 3,
    Fives = 4,
    Sixes = 5,
    Choice = 6,
    FourOfAKind = 7,
    FullHouse = 8,
    SmallStraight = 9,
    LargeStraight = 10,
    Yacht = 11,
}

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::Choice,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yacht,
    ];

    pub const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    /// Hand categories in the order the pattern solver visits them.
    pub const HANDS: [Category; 5] = [
        Category::Yacht,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::LargeStraight,
        Category::SmallStraight,
    ];

    /// Hand categories in breakdown display order.
    pub const HAND_DISPLAY_ORDER: [Category; 5] = [
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yacht,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map a caller-supplied category id (0..=11) to a category.
    pub fn from_id(id: i32) -> AdvisorResult<Self> {
        if (0..CATEGORY_COUNT as i32).contains(&id) {
            Ok(Self::ALL[id as usize])
        } else {
            Err(AdvisorError::UnknownCategory(id))
        }
    }

    pub fn name(self) -> &'static str {
        CATEGORY_NAMES[self.index()]
    }

    pub fn is_hand(self) -> bool {
        matches!(
            self,
            Category::FourOfAKind
                | Category::FullHouse
                | Category::SmallStraight
                | Category::LargeStraight
                | Category::Yacht
        )
    }

    /// Face value counted by an upper-section category (Ones = 1 .. Sixes = 6).
    pub fn upper_face(self) -> Option<i32> {
        if self.index() <= CATEGORY_SIXES {
            Some(self.index() as i32 + 1)
        } else {
            None
        }
    }

    /// Ranking priority among equally likely hands; higher wins.
    pub fn hand_priority(self) -> u8 {
        match self {
            Category::Yacht => 5,
            Category::LargeStraight => 4,
            Category::FullHouse => 3,
            Category::FourOfAKind => 2,
            Category::SmallStraight => 1,
            _ => 0,
        }
    }
}

/// Set of categories as a 12-bit mask (bit i = category i).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CategorySet(u16);

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet(0);
    pub const ALL: CategorySet = CategorySet(ALL_CATEGORIES_MASK);

    /// Build from caller-supplied ids. Duplicates collapse; any id outside
    /// 0..=11 is rejected.
    pub fn from_ids(ids: &[i32]) -> AdvisorResult<Self> {
        let mut set = Self::EMPTY;
        for &id in ids {
            set.insert(Category::from_id(id)?);
        }
        Ok(set)
    }

    pub fn from_bits(bits: u16) -> Self {
        Self(bits & ALL_CATEGORIES_MASK)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn insert(&mut self, cat: Category) {
        self.0 |= 1 << cat.index();
    }

    pub fn remove(&mut self, cat: Category) {
        self.0 &= !(1 << cat.index());
    }

    #[inline(always)]
    pub fn contains(self, cat: Category) -> bool {
        (self.0 & (1 << cat.index())) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Open categories in index order.
    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |&c| self.contains(c))
    }

    pub fn has_open_hand(self) -> bool {
        Category::HANDS.iter().any(|&c| self.contains(c))
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for cat in iter {
            set.insert(cat);
        }
        set
    }
}

/// Subset of the 5 die positions to keep: bit j set means position j is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct KeepMask(u8);

impl KeepMask {
    /// Reroll everything.
    pub const NONE: KeepMask = KeepMask(0);
    /// Keep every die.
    pub const ALL: KeepMask = KeepMask(KEEP_ALL_MASK);

    pub fn new(bits: u8) -> Self {
        assert!(bits <= KEEP_ALL_MASK, "keep mask out of range: {}", bits);
        Self(bits)
    }

    pub fn from_indices(indices: &[usize]) -> Self {
        let mut bits = 0u8;
        for &i in indices {
            assert!(i < NUM_DICE, "die position out of range: {}", i);
            bits |= 1 << i;
        }
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn keeps(self, pos: usize) -> bool {
        (self.0 & (1 << pos)) != 0
    }

    pub fn kept_count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn reroll_count(self) -> usize {
        NUM_DICE - self.kept_count()
    }

    /// Kept positions, ascending.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..NUM_DICE).filter(move |&i| self.keeps(i))
    }

    /// Kept values in position order, packed at the front; second item is the count.
    #[inline]
    pub fn kept_values(self, dice: &[i32; 5]) -> ([i32; 5], usize) {
        let mut out = [0i32; 5];
        let mut n = 0;
        for i in 0..NUM_DICE {
            if self.keeps(i) {
                out[n] = dice[i];
                n += 1;
            }
        }
        (out, n)
    }

    /// Kept face values sorted descending (the tie-break key).
    pub fn kept_values_desc(self, dice: &[i32; 5]) -> Vec<i32> {
        let (vals, n) = self.kept_values(dice);
        let mut v = vals[..n].to_vec();
        v.sort_unstable_by(|a, b| b.cmp(a));
        v
    }

    /// All 32 masks in ascending order.
    pub fn all() -> impl Iterator<Item = KeepMask> {
        (0..=KEEP_ALL_MASK).map(KeepMask)
    }

    /// Masks worth evaluating given the rerolls left: everything when a reroll
    /// remains, only "keep all" otherwise. Always ascending.
    pub fn candidates(rolls_left: u32) -> impl Iterator<Item = KeepMask> {
        let start = if rolls_left == 0 { KEEP_ALL_MASK } else { 0 };
        (start..=KEEP_ALL_MASK).map(KeepMask)
    }
}

/// One sorted outcome of rerolling k dice. Only `faces[..k]` is meaningful.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    pub faces: [i32; 5],
    pub probability: f64,
}

/// Probability distribution over sorted outcomes of rerolling `rerolled` dice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutcomeDistribution {
    pub rerolled: usize,
    pub outcomes: Vec<Outcome>,
}

impl OutcomeDistribution {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn total_probability(&self) -> f64 {
        self.outcomes.iter().map(|o| o.probability).sum()
    }
}

/// Engine handle: all precomputed, immutable lookup tables.
///
/// - `all_dice_sets` → R_{5,6} (252 sorted 5-dice multisets)
/// - `index_lookup` → sorted dice values → index in R_{5,6}
/// - `precomputed_scores` → Score Table, score for dice set r in category c
/// - `distributions` → Outcome Distribution Cache, one entry per k in 0..=5
pub struct YachtContext {
    /// R_{5,6}: all 252 distinct sorted 5-dice multisets.
    pub all_dice_sets: [[i32; 5]; NUM_DICE_SETS],
    /// |R_{5,6}| (252 once built).
    pub num_combinations: usize,
    /// Reverse lookup: `index_lookup[d1-1][d2-1][d3-1][d4-1][d5-1]` for sorted dice;
    /// every other slot holds [`DICE_SET_MISS`].
    pub index_lookup: [[[[[u8; 6]; 6]; 6]; 6]; 6],
    /// precomputed_scores[r][c] for dice set r and category c.
    pub precomputed_scores: [[i32; CATEGORY_COUNT]; NUM_DICE_SETS],
    /// distributions[k]: outcomes of rerolling k dice.
    pub distributions: Vec<OutcomeDistribution>,
}

impl Default for YachtContext {
    fn default() -> Self {
        Self::new()
    }
}

impl YachtContext {
    /// Empty context; fill it with [`crate::phase0_tables::precompute_lookup_tables`].
    pub fn new() -> Self {
        Self {
            all_dice_sets: [[0; 5]; NUM_DICE_SETS],
            num_combinations: 0,
            index_lookup: [[[[[DICE_SET_MISS; 6]; 6]; 6]; 6]; 6],
            precomputed_scores: [[0; CATEGORY_COUNT]; NUM_DICE_SETS],
            distributions: Vec::new(),
        }
    }

    /// Build a ready-to-use context.
    pub fn build() -> Self {
        let mut ctx = Self::new();
        crate::phase0_tables::precompute_lookup_tables(&mut ctx);
        ctx
    }

    pub fn is_built(&self) -> bool {
        self.num_combinations == NUM_DICE_SETS && self.distributions.len() == NUM_DICE + 1
    }

    /// Score Table lookup for dice already in ascending order.
    #[inline(always)]
    pub fn score_sorted(&self, sorted: &[i32; 5], category: Category) -> i32 {
        let ds = crate::dice_mechanics::find_dice_set_index(self, sorted);
        self.precomputed_scores[ds][category.index()]
    }

    /// Score Table lookup for dice in any order.
    #[inline]
    pub fn score(&self, dice: &[i32; 5], category: Category) -> i32 {
        let mut sorted = *dice;
        sorted.sort_unstable();
        self.score_sorted(&sorted, category)
    }

    /// Outcome distribution for rerolling `k` dice (0..=5).
    ///
    /// # Panics
    /// Panics if `k > 5` or the context has not been built.
    #[inline]
    pub fn distribution(&self, k: usize) -> &OutcomeDistribution {
        assert!(k <= NUM_DICE, "cannot reroll {} dice", k);
        &self.distributions[k]
    }
}
