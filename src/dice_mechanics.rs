use crate::constants::{DICE_SET_MISS, NUM_DICE};
use crate::error::{AdvisorError, AdvisorResult};
use crate::types::YachtContext;

/// Count occurrences of each face (1-6) in a 5-dice set.
/// face_count[0] is unused; face_count[f] = count of face f.
pub fn count_faces(dice: &[i32; 5]) -> [i32; 7] {
    let mut face_count = [0i32; 7];
    for &d in dice {
        face_count[d as usize] += 1;
    }
    face_count
}

/// Normalize dice to canonical sorted form (ascending).
#[inline]
pub fn sort_dice_set(arr: &mut [i32; 5]) {
    arr.sort_unstable();
}

/// Map a sorted dice set to its index in R_{5,6} (0-251).
///
/// # Panics
/// Panics on a Score Table miss: unsorted dice, a value outside 1..=6, or a
/// context whose tables were never built. Every reachable hand is covered, so
/// a miss is a programming error.
#[inline(always)]
pub fn find_dice_set_index(ctx: &YachtContext, dice: &[i32; 5]) -> usize {
    let idx = ctx.index_lookup[(dice[0] - 1) as usize][(dice[1] - 1) as usize]
        [(dice[2] - 1) as usize][(dice[3] - 1) as usize][(dice[4] - 1) as usize];
    assert!(idx != DICE_SET_MISS, "dice set {:?} not in lookup table", dice);
    idx as usize
}

/// Merge `kept` dice with a reroll outcome into one sorted 5-dice hand.
#[inline]
pub fn merge_kept_with_outcome(kept: &[i32], outcome: &[i32]) -> [i32; 5] {
    debug_assert_eq!(kept.len() + outcome.len(), NUM_DICE);
    let mut out = [0i32; 5];
    out[..kept.len()].copy_from_slice(kept);
    out[kept.len()..].copy_from_slice(outcome);
    sort_dice_set(&mut out);
    out
}

/// Validate caller-supplied dice: exactly 5 values, each in 1..=6.
/// Position order is preserved.
pub fn validate_dice(dice: &[i32]) -> AdvisorResult<[i32; 5]> {
    let arr: [i32; 5] = dice
        .try_into()
        .map_err(|_| AdvisorError::DiceCount(dice.len()))?;
    for (index, &value) in arr.iter().enumerate() {
        if !(1..=6).contains(&value) {
            return Err(AdvisorError::DieOutOfRange { index, value });
        }
    }
    Ok(arr)
}

/// Positions whose die shows `face`, ascending.
pub fn positions_of_face(dice: &[i32; 5], face: i32) -> Vec<usize> {
    (0..NUM_DICE).filter(|&i| dice[i] == face).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_dice_set() {
        let mut d1 = [5, 3, 1, 4, 2];
        sort_dice_set(&mut d1);
        assert_eq!(d1, [1, 2, 3, 4, 5]);

        let mut d2 = [3, 3, 3, 3, 3];
        sort_dice_set(&mut d2);
        assert_eq!(d2, [3, 3, 3, 3, 3]);
    }

    #[test]
    fn test_find_dice_set_index() {
        let ctx = YachtContext::build();
        assert_eq!(find_dice_set_index(&ctx, &[1, 1, 1, 1, 1]), 0);
        assert_eq!(find_dice_set_index(&ctx, &[6, 6, 6, 6, 6]), 251);

        for i in 0..252 {
            assert_eq!(find_dice_set_index(&ctx, &ctx.all_dice_sets[i]), i);
        }
    }

    #[test]
    fn test_only_sorted_slots_are_filled() {
        let ctx = YachtContext::build();
        let filled = ctx
            .index_lookup
            .iter()
            .flatten()
            .flatten()
            .flatten()
            .flatten()
            .filter(|&&i| i != DICE_SET_MISS)
            .count();
        assert_eq!(filled, 252);
    }

    #[test]
    #[should_panic(expected = "not in lookup table")]
    fn test_unsorted_lookup_panics() {
        let ctx = YachtContext::build();
        find_dice_set_index(&ctx, &[6, 5, 4, 3, 2]);
    }

    #[test]
    fn test_count_faces() {
        let fc = count_faces(&[1, 1, 2, 3, 3]);
        assert_eq!(fc[1], 2);
        assert_eq!(fc[2], 1);
        assert_eq!(fc[3], 2);
        assert_eq!(fc[4] + fc[5] + fc[6], 0);
    }

    #[test]
    fn test_merge_kept_with_outcome() {
        assert_eq!(merge_kept_with_outcome(&[6, 2], &[1, 4, 3]), [1, 2, 3, 4, 6]);
        assert_eq!(merge_kept_with_outcome(&[], &[5, 5, 1, 1, 2]), [1, 1, 2, 5, 5]);
        assert_eq!(merge_kept_with_outcome(&[4, 3, 2, 1, 6], &[]), [1, 2, 3, 4, 6]);
    }

    #[test]
    fn test_validate_dice() {
        assert_eq!(validate_dice(&[6, 1, 2, 3, 4]), Ok([6, 1, 2, 3, 4]));
        assert_eq!(validate_dice(&[1, 2, 3, 4]), Err(AdvisorError::DiceCount(4)));
        assert_eq!(
            validate_dice(&[1, 2, 3, 4, 5, 6]),
            Err(AdvisorError::DiceCount(6))
        );
        assert_eq!(
            validate_dice(&[1, 2, 7, 4, 5]),
            Err(AdvisorError::DieOutOfRange { index: 2, value: 7 })
        );
        assert_eq!(
            validate_dice(&[0, 2, 3, 4, 5]),
            Err(AdvisorError::DieOutOfRange { index: 0, value: 0 })
        );
    }

    #[test]
    fn test_positions_of_face() {
        assert_eq!(positions_of_face(&[6, 1, 6, 6, 2], 6), vec![0, 2, 3]);
        assert!(positions_of_face(&[6, 1, 6, 6, 2], 4).is_empty());
    }
}
