//! Pitch name and frequency conversions
//!
//! Tuning labels use scientific pitch notation: a letter, optional
//! accidentals and an octave number ("E5", "F#1", "Bb2", "C-1").
//! Middle C is C4 = MIDI 60 and A4 = MIDI 69 = 440 Hz.

use crate::error::GtpmError;

/// Note letter to semitone offset from C
fn letter_to_semitone(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Convert a pitch name to a MIDI note number.
///
/// The octave defaults to 4 when omitted. Any number of `#` (sharp) or
/// `b` (flat) signs may follow the letter.
///
/// # Examples
/// ```
/// use gtpm::pitch::str_to_midi;
///
/// assert_eq!(str_to_midi("A4").unwrap(), 69);
/// assert_eq!(str_to_midi("E3").unwrap(), 52);
/// assert_eq!(str_to_midi("F#1").unwrap(), 30);
/// assert_eq!(str_to_midi("Bb2").unwrap(), 46);
/// assert_eq!(str_to_midi("C").unwrap(), 60);
/// ```
pub fn str_to_midi(name: &str) -> Result<u8, GtpmError> {
    let err = |message: String| GtpmError::PitchError {
        label: name.to_string(),
        message,
    };

    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    let letter = chars.next().ok_or_else(|| err("empty pitch name".to_string()))?;
    let base = letter_to_semitone(letter)
        .ok_or_else(|| err(format!("unknown note letter '{}'", letter)))?;

    let rest = chars.as_str();
    let accidentals_len = rest
        .find(|c: char| c != '#' && c != 'b')
        .unwrap_or(rest.len());
    let (accidentals, octave_str) = rest.split_at(accidentals_len);
    let alter: i32 = accidentals
        .chars()
        .map(|c| if c == '#' { 1 } else { -1 })
        .sum();

    let octave: i32 = if octave_str.is_empty() {
        4
    } else {
        octave_str
            .parse()
            .map_err(|_| err(format!("invalid octave '{}'", octave_str)))?
    };

    // C-1 is MIDI 0
    let midi = octave
        .checked_add(1)
        .and_then(|o| o.checked_mul(12))
        .and_then(|m| m.checked_add(base + alter))
        .ok_or_else(|| err(format!("octave {} is out of range", octave)))?;
    u8::try_from(midi)
        .ok()
        .filter(|m| *m <= 127)
        .ok_or_else(|| err(format!("MIDI note {} is outside 0..=127", midi)))
}

/// Convert a (possibly fractional) MIDI note number to a frequency in Hz.
///
/// ```
/// use gtpm::pitch::midi_to_freq;
///
/// assert_eq!(midi_to_freq(69.0), 440.0);
/// assert_eq!(midi_to_freq(81.0), 880.0);
/// ```
pub fn midi_to_freq(midi: f64) -> f64 {
    440.0 * 2f64.powf((midi - 69.0) / 12.0)
}
