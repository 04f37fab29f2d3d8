//! Guitar description: an ordered list of tuned strings.
//!
//! String index 0 is the first label of the tuning specification. With the
//! default "E5 B4 G4 D4 A3 E3" tuning that is the highest string, which is
//! also the top row of the tablature.

use std::ops::Index;
use std::slice::Iter;

use crate::error::GtpmError;
use crate::pitch::str_to_midi;

/// A single string, identified by its tuning label (e.g. "E3").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuitarString {
    tune: String,
}

impl GuitarString {
    pub fn new(tune: impl Into<String>) -> Self {
        Self { tune: tune.into() }
    }

    pub fn tune(&self) -> &str {
        &self.tune
    }

    /// MIDI note of the open string
    pub fn midi(&self) -> Result<u8, GtpmError> {
        str_to_midi(&self.tune)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Guitar {
    strings: Vec<GuitarString>,
}

impl Guitar {
    /// Build a guitar from a whitespace-separated tuning specification.
    ///
    /// ```
    /// use gtpm::Guitar;
    ///
    /// let guitar = Guitar::new("E5 B4 G4 D4 A3 E3");
    /// assert_eq!(guitar.len(), 6);
    /// assert_eq!(guitar[5].tune(), "E3");
    /// ```
    pub fn new(tuning: &str) -> Self {
        Self {
            strings: tuning.split_whitespace().map(GuitarString::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GuitarString> {
        self.strings.get(index)
    }

    pub fn iter(&self) -> Iter<'_, GuitarString> {
        self.strings.iter()
    }

    /// Tuning labels in string order
    pub fn tunes(&self) -> Vec<&str> {
        self.strings.iter().map(GuitarString::tune).collect()
    }

    /// MIDI notes of the open strings, failing on the first invalid label
    pub fn midi_tuning(&self) -> Result<Vec<u8>, GtpmError> {
        self.strings.iter().map(GuitarString::midi).collect()
    }
}

impl Index<usize> for Guitar {
    type Output = GuitarString;

    fn index(&self, index: usize) -> &GuitarString {
        &self.strings[index]
    }
}

impl<'a> IntoIterator for &'a Guitar {
    type Item = &'a GuitarString;
    type IntoIter = Iter<'a, GuitarString>;

    fn into_iter(self) -> Self::IntoIter {
        self.strings.iter()
    }
}
