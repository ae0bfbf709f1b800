//! Per-player scorecard bookkeeping: which categories are still open, the
//! upper-section bonus, and the running total.
//!
//! A slot holds `None` until the category is scored. The open slots are the
//! `open_categories` input of [`crate::api_computations::solve_best_move`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::CATEGORY_COUNT;
use crate::dice_mechanics::validate_dice;
use crate::error::{AdvisorError, AdvisorResult};
use crate::game_mechanics::upper_bonus;
use crate::types::{Category, CategorySet, YachtContext};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    slots: [Option<u32>; CATEGORY_COUNT],
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a caller-supplied list. Shorter lists are padded with open
    /// slots, longer lists are truncated to 12.
    pub fn from_slots(slots: &[Option<u32>]) -> Self {
        let mut card = Self::new();
        for (dst, src) in card.slots.iter_mut().zip(slots) {
            *dst = *src;
        }
        card
    }

    pub fn slots(&self) -> &[Option<u32>; CATEGORY_COUNT] {
        &self.slots
    }

    pub fn get(&self, category: Category) -> Option<u32> {
        self.slots[category.index()]
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn open_categories(&self) -> CategorySet {
        Category::ALL
            .iter()
            .copied()
            .filter(|c| self.slots[c.index()].is_none())
            .collect()
    }

    pub fn upper_subtotal(&self) -> u32 {
        Category::UPPER
            .iter()
            .filter_map(|c| self.slots[c.index()])
            .sum()
    }

    pub fn upper_bonus(&self) -> u32 {
        upper_bonus(self.upper_subtotal())
    }

    pub fn lower_subtotal(&self) -> u32 {
        Category::ALL
            .iter()
            .filter(|c| c.upper_face().is_none())
            .filter_map(|c| self.slots[c.index()])
            .sum()
    }

    /// Upper subtotal + bonus + lower subtotal.
    pub fn total(&self) -> u32 {
        self.upper_subtotal() + self.upper_bonus() + self.lower_subtotal()
    }

    /// Score `dice` into an open `category` and return the points written.
    /// A zero score still fills the slot.
    pub fn record(
        &mut self,
        ctx: &YachtContext,
        category: Category,
        dice: &[i32],
    ) -> AdvisorResult<u32> {
        let dice = validate_dice(dice)?;
        if self.slots[category.index()].is_some() {
            return Err(AdvisorError::AlreadyScored(category));
        }
        let points = ctx.score(&dice, category) as u32;
        self.slots[category.index()] = Some(points);
        debug!(category = category.name(), points, total = self.total(), "scored");
        Ok(points)
    }
}

/// Points each open category would give for `dice`, in category order.
pub fn score_preview(
    ctx: &YachtContext,
    dice: &[i32],
    open: CategorySet,
) -> AdvisorResult<Vec<(Category, i32)>> {
    let dice = validate_dice(dice)?;
    Ok(open.iter().map(|c| (c, ctx.score(&dice, c))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_is_all_open() {
        let card = Scorecard::new();
        assert_eq!(card.open_categories(), CategorySet::ALL);
        assert_eq!(card.total(), 0);
        assert!(!card.is_complete());
    }

    #[test]
    fn test_from_slots_pads_and_truncates() {
        let short = Scorecard::from_slots(&[Some(3), None, Some(9)]);
        assert_eq!(short.get(Category::Ones), Some(3));
        assert_eq!(short.get(Category::Threes), Some(9));
        assert_eq!(short.open_categories().len(), 10);

        let long = Scorecard::from_slots(&[Some(1); 15]);
        assert!(long.is_complete());
        assert!(long.open_categories().is_empty());
    }

    #[test]
    fn test_upper_bonus_and_total() {
        // 3×Ones..3×Sixes = 3+6+9+12+15+18 = 63.
        let mut slots = vec![Some(3), Some(6), Some(9), Some(12), Some(15), Some(18)];
        slots.extend([Some(20), None, Some(25), None, None, Some(50)]);
        let card = Scorecard::from_slots(&slots);
        assert_eq!(card.upper_subtotal(), 63);
        assert_eq!(card.upper_bonus(), 35);
        assert_eq!(card.lower_subtotal(), 95);
        assert_eq!(card.total(), 63 + 35 + 95);

        let card = Scorecard::from_slots(&[Some(62)]);
        assert_eq!(card.upper_bonus(), 0);
        assert_eq!(card.total(), 62);
    }

    #[test]
    fn test_record() {
        let ctx = YachtContext::build();
        let mut card = Scorecard::new();
        assert_eq!(card.record(&ctx, Category::FullHouse, &[3, 2, 3, 2, 3]), Ok(13));
        assert_eq!(card.get(Category::FullHouse), Some(13));
        assert!(!card.open_categories().contains(Category::FullHouse));
        assert_eq!(
            card.record(&ctx, Category::FullHouse, &[6, 6, 6, 6, 6]),
            Err(AdvisorError::AlreadyScored(Category::FullHouse))
        );
        assert_eq!(card.record(&ctx, Category::Yacht, &[1, 2, 3, 4, 5]), Ok(0));
        assert_eq!(card.get(Category::Yacht), Some(0));
        assert_eq!(card.total(), 13);
    }

    #[test]
    fn test_record_rejects_bad_dice() {
        let ctx = YachtContext::build();
        let mut card = Scorecard::new();
        assert_eq!(
            card.record(&ctx, Category::Choice, &[1, 2, 3, 4, 7]),
            Err(AdvisorError::DieOutOfRange { index: 4, value: 7 })
        );
        assert_eq!(
            card.record(&ctx, Category::Choice, &[0, 2, 3, 4, 5]),
            Err(AdvisorError::DieOutOfRange { index: 0, value: 0 })
        );
        assert_eq!(
            card.record(&ctx, Category::Choice, &[1, 2, 3]),
            Err(AdvisorError::DiceCount(3))
        );
        assert_eq!(card.get(Category::Choice), None);
        assert_eq!(card.open_categories(), CategorySet::ALL);
    }

    #[test]
    fn test_score_preview() {
        let ctx = YachtContext::build();
        let open: CategorySet = [Category::Sixes, Category::Choice, Category::LargeStraight]
            .into_iter()
            .collect();
        let preview = score_preview(&ctx, &[2, 3, 4, 5, 6], open);
        assert_eq!(
            preview,
            Ok(vec![
                (Category::Sixes, 6),
                (Category::Choice, 20),
                (Category::LargeStraight, 30)
            ])
        );
        assert_eq!(
            score_preview(&ctx, &[2, 3, 4, 5, 9], open),
            Err(AdvisorError::DieOutOfRange { index: 4, value: 9 })
        );
    }
}
