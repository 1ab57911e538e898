//! Pitches, chords and note lengths

use std::fmt;

use serde::{Deserialize, Serialize};

/// Natural pitch classes (the C major scale)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl PitchClass {
    /// C major, one octave
    pub const C_MAJOR: [PitchClass; 7] = [
        PitchClass::C,
        PitchClass::D,
        PitchClass::E,
        PitchClass::F,
        PitchClass::G,
        PitchClass::A,
        PitchClass::B,
    ];

    /// Semitones above C
    pub fn semitone(self) -> u8 {
        match self {
            PitchClass::C => 0,
            PitchClass::D => 2,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::G => 7,
            PitchClass::A => 9,
            PitchClass::B => 11,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::D => "D",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::G => "G",
            PitchClass::A => "A",
            PitchClass::B => "B",
        }
    }
}

/// A pitch in scientific notation (C4 = middle C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub class: PitchClass,
    pub octave: u8,
}

impl Note {
    pub const fn new(class: PitchClass, octave: u8) -> Self {
        Self { class, octave }
    }

    /// Degree `index` of C major counted up from C in `base_octave`
    ///
    /// Indices past 6 continue into the following octaves.
    pub fn c_major(index: usize, base_octave: u8) -> Self {
        let class = PitchClass::C_MAJOR[index % 7];
        let octave = base_octave.saturating_add((index / 7).min(u8::MAX as usize) as u8);
        Self { class, octave }
    }

    /// MIDI note number (C4 = 60)
    pub fn midi(self) -> u32 {
        12 * (self.octave as u32 + 1) + self.class.semitone() as u32
    }

    /// Equal-tempered frequency with A4 = 440 Hz
    pub fn frequency(self) -> f64 {
        440.0 * 2f64.powf((self.midi() as f64 - 69.0) / 12.0)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class.as_str(), self.octave)
    }
}

/// Musical note lengths at 120 BPM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteLength {
    Half,
    Quarter,
}

impl NoteLength {
    pub fn seconds(self) -> f64 {
        match self {
            NoteLength::Half => 1.0,
            NoteLength::Quarter => 0.5,
        }
    }
}

/// Triads of C major the mapper may drop in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chord {
    I,
    IV,
    V,
    Vi,
}

impl Chord {
    pub const ALL: [Chord; 4] = [Chord::I, Chord::IV, Chord::V, Chord::Vi];

    /// Root-position voicing, lowest note first
    pub fn notes(self) -> [Note; 3] {
        use PitchClass::*;
        match self {
            Chord::I => [Note::new(C, 3), Note::new(E, 3), Note::new(G, 3)],
            Chord::IV => [Note::new(F, 3), Note::new(A, 3), Note::new(C, 4)],
            Chord::V => [Note::new(G, 3), Note::new(B, 3), Note::new(D, 4)],
            Chord::Vi => [Note::new(A, 3), Note::new(C, 4), Note::new(E, 4)],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Chord::I => "I",
            Chord::IV => "IV",
            Chord::V => "V",
            Chord::Vi => "vi",
        }
    }
}

/// Accent sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Percussion {
    /// Deep C2 quarter note
    #[default]
    Bass,
    /// Short pitch-dropping thump
    Kick,
}

impl Percussion {
    /// Pitch the accent is tuned to
    pub fn note(self) -> Note {
        match self {
            Percussion::Bass => Note::new(PitchClass::C, 2),
            Percussion::Kick => Note::new(PitchClass::C, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Note::new(PitchClass::C, 3).to_string(), "C3");
        assert_eq!(Note::new(PitchClass::A, 4).to_string(), "A4");
    }

    #[test]
    fn test_frequency() {
        assert!((Note::new(PitchClass::A, 4).frequency() - 440.0).abs() < 1e-9);
        assert!((Note::new(PitchClass::C, 4).frequency() - 261.6256).abs() < 1e-3);
        assert!((Percussion::Bass.note().frequency() - 65.4064).abs() < 1e-3);
    }

    #[test]
    fn test_c_major_spans_octaves() {
        assert_eq!(Note::c_major(0, 2), Note::new(PitchClass::C, 2));
        assert_eq!(Note::c_major(6, 2), Note::new(PitchClass::B, 2));
        assert_eq!(Note::c_major(7, 2), Note::new(PitchClass::C, 3));
        assert_eq!(Note::c_major(20, 2), Note::new(PitchClass::B, 4));
    }

    #[test]
    fn test_chords_ascend() {
        for chord in Chord::ALL {
            let [a, b, c] = chord.notes();
            assert!(a.midi() < b.midi() && b.midi() < c.midi(), "{}", chord.as_str());
        }
    }
}
