//! Yacht scoring rules and the upper-section bonus.
//!
//! [`calculate_category_score`] is the direct rule evaluation; hot paths use
//! the precomputed Score Table through [`crate::types::YachtContext::score`].

use crate::constants::*;
use crate::dice_mechanics::count_faces;
use crate::types::Category;

/// Straights as face bitmasks (bit f = face f present).
const SMALL_STRAIGHTS: [u8; 3] = [0b0001_1110, 0b0011_1100, 0b0111_1000];
const LARGE_STRAIGHTS: [u8; 2] = [0b0011_1110, 0b0111_1100];

/// Score for placing a 5-dice roll in the given category.
///
/// Categories Ones..Sixes score face × count; Choice, Four of a Kind and
/// Full House score the sum of all five dice when satisfied; the straights and
/// Yacht score fixed values. Five of a kind counts as a Full House.
pub fn calculate_category_score(dice: &[i32; 5], category: Category) -> i32 {
    let face_count = count_faces(dice);
    let sum_all: i32 = dice.iter().sum();

    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.index() + 1;
            face_count[face] * face as i32
        }
        Category::Choice => sum_all,
        Category::FourOfAKind => {
            if face_count[1..].iter().any(|&n| n >= 4) {
                sum_all
            } else {
                0
            }
        }
        Category::FullHouse => {
            let has_three = face_count[1..].contains(&3);
            let has_pair = face_count[1..].contains(&2);
            let has_five = face_count[1..].contains(&5);
            if (has_three && has_pair) || has_five {
                sum_all
            } else {
                0
            }
        }
        Category::SmallStraight => {
            let present = face_bits(&face_count);
            if SMALL_STRAIGHTS.iter().any(|&s| present & s == s) {
                SMALL_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::LargeStraight => {
            let present = face_bits(&face_count);
            if LARGE_STRAIGHTS.iter().any(|&s| present & s == s) {
                LARGE_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::Yacht => {
            if face_count[1..].contains(&5) {
                YACHT_SCORE
            } else {
                0
            }
        }
    }
}

fn face_bits(face_count: &[i32; 7]) -> u8 {
    let mut bits = 0u8;
    for f in 1..=6 {
        if face_count[f] > 0 {
            bits |= 1 << f;
        }
    }
    bits
}

/// Upper-section bonus for a given Ones..Sixes subtotal.
pub fn upper_bonus(upper_subtotal: u32) -> u32 {
    if upper_subtotal >= UPPER_BONUS_THRESHOLD {
        UPPER_BONUS
    } else {
        0
    }
}
