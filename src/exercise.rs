//! # Note Sequence Generator
//!
//! Builds the ordered list of (string, fret) pairs that make up a fingering
//! exercise.
//!
//! ## Pattern
//! The forefinger walks up the neck one fret at a time, from `first_fret` to
//! `last_fret`. At each position every string is played once with each
//! finger, so a position yields `strings * fingers` notes. The string order
//! alternates between positions:
//! - odd forefinger fret: last string to first (low E up to high E in
//!   standard tuning)
//! - even forefinger fret: first string to last
//!
//! When `invert_when_backwards` is set the finger order also flips on even
//! positions, so the pattern mirrors itself on the way back.
//!
//! ## Shuffling
//! - `shuffle_fingers` alone shuffles the finger pattern once for the whole
//!   exercise (fingering exercise).
//! - `shuffle_fingers` with `shuffle_per_string` shuffles the frets of every
//!   string group independently (reading exercise).
//!
//! ## Example
//! ```rust
//! use gtpm::exercise::{generate_notes, FingeringOptions, Note};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let notes = generate_notes(2, 1, 2, &[0, 1], FingeringOptions::fixed(), &mut rng);
//! assert_eq!(notes[0], Note::new(1, 1));
//! assert_eq!(notes.len(), 8);
//! ```

use rand::seq::SliceRandom;
use rand::Rng;

/// A single note of the exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub string_index: usize,
    pub fret: u32,
}

impl Note {
    pub fn new(string_index: usize, fret: u32) -> Self {
        Self { string_index, fret }
    }
}

/// Order in which strings are visited at one fret position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// String index 0 first
    Forward,
    /// Last string index first
    Backward,
}

impl Direction {
    /// Direction used when the forefinger sits on `fret`
    pub fn for_fret(fret: u32) -> Self {
        if fret % 2 == 0 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    fn apply<T: Copy>(self, items: &[T]) -> Vec<T> {
        match self {
            Direction::Forward => items.to_vec(),
            Direction::Backward => items.iter().rev().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingeringOptions {
    pub shuffle_fingers: bool,
    /// Ignored when `shuffle_fingers` is false
    pub shuffle_per_string: bool,
    pub invert_when_backwards: bool,
}

impl FingeringOptions {
    /// No shuffling, mirrored finger order on the way back
    pub fn fixed() -> Self {
        Self {
            shuffle_fingers: false,
            shuffle_per_string: false,
            invert_when_backwards: true,
        }
    }
}

impl Default for FingeringOptions {
    fn default() -> Self {
        Self {
            shuffle_fingers: true,
            shuffle_per_string: false,
            invert_when_backwards: true,
        }
    }
}

/// Generate the exercise note sequence.
///
/// Produces exactly `(last_fret - first_fret + 1) * num_strings * fingers.len()`
/// notes (none when `first_fret > last_fret`). Fingers are fret offsets from
/// the forefinger position.
///
/// Frets past `u32::MAX` saturate. `ExerciseConfig::validate` keeps every
/// fret within MIDI range, so validated configurations never reach that.
pub fn generate_notes<R: Rng + ?Sized>(
    num_strings: usize,
    first_fret: u32,
    last_fret: u32,
    fingers: &[u32],
    options: FingeringOptions,
    rng: &mut R,
) -> Vec<Note> {
    let mut fingers = fingers.to_vec();
    if options.shuffle_fingers && !options.shuffle_per_string {
        fingers.shuffle(rng);
        tracing::debug!(?fingers, "shuffled finger pattern");
    }
    let inv_fingers: Vec<u32> = fingers.iter().rev().copied().collect();
    let strings: Vec<usize> = (0..num_strings).collect();

    let positions = if first_fret <= last_fret {
        (last_fret - first_fret) as usize + 1
    } else {
        0
    };
    let capacity = positions
        .checked_mul(num_strings)
        .and_then(|n| n.checked_mul(fingers.len()))
        .unwrap_or(0);
    let mut notes = Vec::with_capacity(capacity);

    for forefinger_fret in first_fret..=last_fret {
        let direction = Direction::for_fret(forefinger_fret);
        let finger_order = if options.invert_when_backwards {
            direction.apply(&inv_fingers)
        } else {
            fingers.clone()
        };

        for string_index in direction.apply(&strings) {
            let mut frets: Vec<u32> = finger_order
                .iter()
                .map(|f| f.saturating_add(forefinger_fret))
                .collect();
            if options.shuffle_fingers && options.shuffle_per_string {
                frets.shuffle(rng);
            }
            notes.extend(frets.into_iter().map(|fret| Note::new(string_index, fret)));
        }
    }

    tracing::debug!(count = notes.len(), first_fret, last_fret, "generated notes");
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// String indices in visiting order, one entry per string group
    fn string_groups(notes: &[Note], group_len: usize) -> Vec<usize> {
        notes.chunks(group_len).map(|g| g[0].string_index).collect()
    }

    #[test]
    fn test_standard_tuning_single_position() {
        let notes = generate_notes(6, 1, 1, &[0, 1, 2, 3], FingeringOptions::fixed(), &mut rng());

        assert_eq!(notes.len(), 24);
        assert_eq!(string_groups(&notes, 4), vec![5, 4, 3, 2, 1, 0]);
        for group in notes.chunks(4) {
            let frets: Vec<u32> = group.iter().map(|n| n.fret).collect();
            assert_eq!(frets, vec![1, 2, 3, 4]);
            assert!(group.iter().all(|n| n.string_index == group[0].string_index));
        }
    }

    #[test]
    fn test_note_count() {
        for (strings, first, last, fingers) in [(6, 1, 7, 4), (4, 0, 0, 3), (7, 5, 12, 2)] {
            let finger_list: Vec<u32> = (0..fingers).collect();
            let notes = generate_notes(
                strings,
                first,
                last,
                &finger_list,
                FingeringOptions::default(),
                &mut rng(),
            );
            assert_eq!(
                notes.len(),
                (last - first + 1) as usize * strings * fingers as usize
            );
        }
    }

    #[test]
    fn test_direction_alternates() {
        let notes = generate_notes(3, 1, 4, &[0, 1], FingeringOptions::fixed(), &mut rng());
        // 4 positions, 3 strings per position
        let groups = string_groups(&notes, 2);
        assert_eq!(groups, vec![2, 1, 0, 0, 1, 2, 2, 1, 0, 0, 1, 2]);
    }

    #[test]
    fn test_finger_order_mirrors_on_even_frets() {
        let notes = generate_notes(1, 1, 2, &[0, 1, 2, 3], FingeringOptions::fixed(), &mut rng());
        let frets: Vec<u32> = notes.iter().map(|n| n.fret).collect();
        assert_eq!(frets, vec![1, 2, 3, 4, 5, 4, 3, 2]);
    }

    #[test]
    fn test_no_inversion_keeps_finger_order() {
        let options = FingeringOptions {
            invert_when_backwards: false,
            ..FingeringOptions::fixed()
        };
        let notes = generate_notes(1, 1, 2, &[0, 1, 2, 3], options, &mut rng());
        let frets: Vec<u32> = notes.iter().map(|n| n.fret).collect();
        assert_eq!(frets, vec![1, 2, 3, 4, 2, 3, 4, 5]);
    }

    #[test]
    fn test_global_shuffle_keeps_one_pattern() {
        let options = FingeringOptions {
            invert_when_backwards: false,
            ..FingeringOptions::default()
        };
        let notes = generate_notes(6, 3, 3, &[0, 1, 2, 3], options, &mut rng());
        let pattern: Vec<u32> = notes[..4].iter().map(|n| n.fret).collect();
        for group in notes.chunks(4) {
            let frets: Vec<u32> = group.iter().map(|n| n.fret).collect();
            assert_eq!(frets, pattern);
        }
        let mut sorted = pattern.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_per_string_shuffle_preserves_notes() {
        let options = FingeringOptions {
            shuffle_per_string: true,
            ..FingeringOptions::default()
        };
        let shuffled = generate_notes(6, 1, 7, &[0, 1, 2, 3], options, &mut rng());
        let fixed = generate_notes(6, 1, 7, &[0, 1, 2, 3], FingeringOptions::fixed(), &mut rng());

        assert_eq!(shuffled.len(), fixed.len());
        let count = |notes: &[Note]| {
            let mut map: HashMap<Note, usize> = HashMap::new();
            for note in notes {
                *map.entry(*note).or_default() += 1;
            }
            map
        };
        assert_eq!(count(&shuffled), count(&fixed));
        // String traversal is unaffected by shuffling
        assert_eq!(string_groups(&shuffled, 4), string_groups(&fixed, 4));
    }

    #[test]
    fn test_seed_reproducible() {
        let options = FingeringOptions {
            shuffle_per_string: true,
            ..FingeringOptions::default()
        };
        let a = generate_notes(6, 1, 7, &[0, 1, 2, 3], options, &mut StdRng::seed_from_u64(9));
        let b = generate_notes(6, 1, 7, &[0, 1, 2, 3], options, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_range() {
        let notes = generate_notes(6, 5, 4, &[0, 1], FingeringOptions::fixed(), &mut rng());
        assert!(notes.is_empty());
    }

    #[test]
    fn test_fret_overflow_saturates() {
        let notes = generate_notes(1, 1, 1, &[u32::MAX, 0], FingeringOptions::fixed(), &mut rng());
        let frets: Vec<u32> = notes.iter().map(|n| n.fret).collect();
        // fret 1 is odd: fingers in their given order
        assert_eq!(frets, vec![u32::MAX, 1]);
    }
}
