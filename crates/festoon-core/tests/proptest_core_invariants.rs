//! Property-based invariant tests for core primitives.
//!
//! Verifies:
//! 1. `wrap_coordinate` always lands in `[0, extent)` for any finite input.
//! 2. Wrapping is idempotent.
//! 3. Stagger offsets are exact multiples of the delay.
//! 4. Digit grouping round-trips back to the number once separators are removed.
//! 5. `SeededRandom` ranges stay within bounds for any seed.
//! 6. Key matching never reports completion for a sequence that lacks the pattern.

use std::time::Duration;

use festoon_core::animation::stagger::stagger_offsets;
use festoon_core::geometry::{Point, Size, wrap_coordinate};
use festoon_core::key_sequence::{KONAMI_CODE, KeySequenceMatcher};
use festoon_core::locale::group_digits;
use festoon_core::random::{RandomSource, SeededRandom};
use proptest::prelude::*;

proptest! {
    #[test]
    fn wrap_lands_in_bounds(value in -1.0e9f64..1.0e9, extent in 1u32..10_000) {
        let extent = f64::from(extent);
        let w = wrap_coordinate(value, extent);
        prop_assert!((0.0..extent).contains(&w), "{value} wrapped to {w} in {extent}");
    }

    #[test]
    fn wrap_is_idempotent(value in -1.0e6f64..1.0e6, extent in 1u32..4096) {
        let extent = f64::from(extent);
        let once = wrap_coordinate(value, extent);
        prop_assert_eq!(wrap_coordinate(once, extent), once);
    }

    #[test]
    fn size_wrap_is_contained(x in -1.0e7f64..1.0e7, y in -1.0e7f64..1.0e7, w in 1u32..5000, h in 1u32..5000) {
        let size = Size::new(w, h);
        prop_assert!(size.contains(size.wrap(Point::new(x, y))));
    }

    #[test]
    fn stagger_is_exact(count in 0usize..400, delay_ms in 0u64..100) {
        let delay = Duration::from_millis(delay_ms);
        let offsets = stagger_offsets(count, delay);
        prop_assert_eq!(offsets.len(), count);
        for (i, offset) in offsets.iter().enumerate() {
            prop_assert_eq!(*offset, delay * i as u32);
        }
    }

    #[test]
    fn grouping_preserves_digits(value in any::<i64>()) {
        let grouped = group_digits(value, ",");
        let stripped: String = grouped.chars().filter(|c| *c != ',').collect();
        prop_assert_eq!(stripped, value.to_string());
    }

    #[test]
    fn seeded_range_in_bounds(seed in any::<u64>(), lo in -500.0f64..0.0, span in 0.001f64..500.0) {
        let rng = SeededRandom::new(seed);
        for _ in 0..64 {
            let v = rng.range(lo, lo + span);
            prop_assert!(v >= lo && v <= lo + span);
        }
    }

    #[test]
    fn no_completion_without_trailing_a(keys in proptest::collection::vec("[ab]|ArrowUp|ArrowDown|ArrowLeft|ArrowRight", 0..40)) {
        let mut matcher = KeySequenceMatcher::new(KONAMI_CODE);
        for key in keys.iter() {
            let done = matcher.feed(key).is_complete();
            if done {
                prop_assert_eq!(key.as_str(), "a");
            }
        }
    }
}
