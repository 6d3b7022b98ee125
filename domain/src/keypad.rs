//! Referee keypad mapping
//!
//! Each referee has a two-button keypad wired as keyboard digits:
//!
//! | Key | Referee | Vote  |
//! |-----|---------|-------|
//! | `1` | 1       | White |
//! | `2` | 1       | Red   |
//! | `3` | 2       | White |
//! | `4` | 2       | Red   |
//! | `5` | 3       | White |
//! | `6` | 3       | Red   |

use crate::decision::{RefereeSlot, Vote};

/// Map a key to the referee vote it stands for, if any.
///
/// ```
/// use refbox_domain::{keypad, RefereeSlot, Vote};
///
/// assert_eq!(keypad::map_key('4'), Some((RefereeSlot::TWO, Vote::Red)));
/// assert_eq!(keypad::map_key('x'), None);
/// ```
pub fn map_key(key: char) -> Option<(RefereeSlot, Vote)> {
    let digit = key.to_digit(10)?;
    if !(1..=6).contains(&digit) {
        return None;
    }
    let slot = RefereeSlot::ALL[((digit - 1) / 2) as usize];
    let vote = if digit % 2 == 1 { Vote::White } else { Vote::Red };
    Some((slot, vote))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys() {
        let expected = [
            ('1', RefereeSlot::ONE, Vote::White),
            ('2', RefereeSlot::ONE, Vote::Red),
            ('3', RefereeSlot::TWO, Vote::White),
            ('4', RefereeSlot::TWO, Vote::Red),
            ('5', RefereeSlot::THREE, Vote::White),
            ('6', RefereeSlot::THREE, Vote::Red),
        ];
        for (key, slot, vote) in expected {
            assert_eq!(map_key(key), Some((slot, vote)), "key {key}");
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        for key in ['0', '7', '9', 'a', ' ', 'r'] {
            assert_eq!(map_key(key), None, "key {key:?}");
        }
    }
}
