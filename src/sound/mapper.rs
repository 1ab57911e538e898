//! Collision-to-sound mapping
//!
//! Turns each collision into music:
//! - horizontal position picks the scale degree (left = C, right = B)
//! - impact speed picks the octave and the loudness
//! - every Nth collision adds a bass accent
//! - now and then a whole triad rings out, at most once per chord interval

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::backend::AudioBackend;
use super::note::{Chord, Note, NoteLength, PitchClass};
use crate::sim::CollisionEvent;
use crate::tuning::SoundTuning;

/// Lowest octave collision notes are drawn from
pub const BASE_OCTAVE: u8 = 2;
/// Degrees per octave of the scale
pub const SCALE_DEGREES: usize = 7;

pub struct SoundMapper {
    tuning: SoundTuning,
    total_collisions: u64,
    last_chord_time: Option<f64>,
    rng: Pcg32,
}

impl SoundMapper {
    pub fn new(seed: u64, tuning: SoundTuning) -> Self {
        Self {
            tuning,
            total_collisions: 0,
            last_chord_time: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Collisions heard since start
    pub fn total_collisions(&self) -> u64 {
        self.total_collisions
    }

    pub fn last_chord_time(&self) -> Option<f64> {
        self.last_chord_time
    }

    /// Play whatever a collision should sound like
    ///
    /// `width` is the drawable width used to place `event.pos.x` on the
    /// scale, `now` is the same clock the simulation runs on. Does nothing
    /// at all while `audio` is not ready.
    pub fn on_collision(
        &mut self,
        event: &CollisionEvent,
        width: f64,
        now: f64,
        audio: &mut dyn AudioBackend,
    ) {
        if !audio.is_ready() {
            return;
        }

        let speed = event.relative_speed.abs();

        self.total_collisions += 1;
        if self.total_collisions % self.tuning.bass_every == 0 {
            log::debug!("Accent on collision {}", self.total_collisions);
            audio.play_percussion(self.tuning.accent, self.tuning.bass_volume);
        }

        if self.chord_due(now) && self.rng.random::<f64>() < self.tuning.chord_probability {
            let chord = Chord::ALL[self.rng.random_range(0..Chord::ALL.len())];
            let volume = self.chord_volume(speed);
            log::debug!("Chord {} at vol {:.3}", chord.as_str(), volume);
            if volume > 0.0 {
                for (i, note) in chord.notes().into_iter().enumerate() {
                    let offset = i as f64 * self.tuning.chord_stagger;
                    audio.play_note(note, NoteLength::Half, volume, offset);
                }
            }
            self.last_chord_time = Some(now);
        }

        let note = self.note_for(event.pos.x, width, speed);
        let volume = self.note_volume(speed);
        if volume > 0.0 {
            log::trace!("Note {} vol {:.3}", note, volume);
            audio.play_note(note, NoteLength::Half, volume, 0.0);
        }
    }

    /// Soft note confirming that audio just started
    pub fn greet(&self, audio: &mut dyn AudioBackend) {
        if audio.is_ready() {
            audio.play_note(
                Note::new(PitchClass::C, 3),
                NoteLength::Half,
                self.tuning.greeting_volume,
                0.0,
            );
        }
    }

    fn chord_due(&self, now: f64) -> bool {
        match self.last_chord_time {
            None => true,
            Some(last) => now - last > self.tuning.chord_interval,
        }
    }

    /// Scale degree 0..=6 for a horizontal position
    pub fn scale_degree(x: f64, width: f64) -> usize {
        if !(width > 0.0) {
            return 0;
        }
        let degree = ((x / width) * SCALE_DEGREES as f64).floor();
        // NaN and negatives saturate to 0
        (degree.max(0.0) as usize).min(SCALE_DEGREES - 1)
    }

    /// Octave offset 0, 1 or 2 for a collision speed
    pub fn octave_tier(&self, speed: f64) -> usize {
        let normalized = speed.abs() * self.tuning.octave_speed_normalize;
        if normalized > self.tuning.octave_high_threshold {
            2
        } else if normalized > self.tuning.octave_mid_threshold {
            1
        } else {
            0
        }
    }

    pub fn note_for(&self, x: f64, width: f64, speed: f64) -> Note {
        let index = Self::scale_degree(x, width) + self.octave_tier(speed) * SCALE_DEGREES;
        Note::c_major(index, BASE_OCTAVE)
    }

    pub fn note_volume(&self, speed: f64) -> f64 {
        (speed.abs() * self.tuning.note_volume_gain).min(self.tuning.note_volume_cap)
    }

    pub fn chord_volume(&self, speed: f64) -> f64 {
        (speed.abs() * self.tuning.chord_volume_gain).min(self.tuning.chord_volume_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CollisionSource;
    use crate::sound::backend::{AudioCall, RecordingBackend, SilentBackend};
    use crate::sound::note::Percussion;
    use glam::DVec2;

    fn quiet_tuning() -> SoundTuning {
        SoundTuning {
            chord_probability: 0.0,
            ..Default::default()
        }
    }

    fn event(speed: f64, x: f64) -> CollisionEvent {
        CollisionEvent {
            relative_speed: speed,
            pos: DVec2::new(x, 0.0),
            source: CollisionSource::Pair,
        }
    }

    #[test]
    fn test_position_picks_degree() {
        let mapper = SoundMapper::new(1, quiet_tuning());
        assert_eq!(mapper.note_for(0.0, 700.0, 10.0), Note::new(PitchClass::C, 2));
        assert_eq!(mapper.note_for(350.0, 700.0, 10.0), Note::new(PitchClass::F, 2));
        assert_eq!(mapper.note_for(699.0, 700.0, 10.0), Note::new(PitchClass::B, 2));
        // Right edge and beyond stay on the top degree
        assert_eq!(SoundMapper::scale_degree(700.0, 700.0), 6);
        assert_eq!(SoundMapper::scale_degree(-5.0, 700.0), 0);
        assert_eq!(SoundMapper::scale_degree(10.0, 0.0), 0);
    }

    #[test]
    fn test_speed_picks_octave() {
        let mapper = SoundMapper::new(1, quiet_tuning());
        assert_eq!(mapper.octave_tier(0.0), 0);
        assert_eq!(mapper.octave_tier(29.0), 0);
        assert_eq!(mapper.octave_tier(31.0), 1);
        assert_eq!(mapper.octave_tier(59.0), 1);
        assert_eq!(mapper.octave_tier(61.0), 2);
        assert_eq!(mapper.octave_tier(-350.0), 2);
        assert_eq!(mapper.note_for(0.0, 700.0, 200.0), Note::new(PitchClass::C, 4));
    }

    #[test]
    fn test_volume_and_octave_monotonic() {
        let mapper = SoundMapper::new(1, quiet_tuning());
        let mut last = (0.0, 0, 0.0);
        for i in 0..=1000 {
            let speed = i as f64 * 0.5;
            let now = (mapper.note_volume(speed), mapper.octave_tier(speed), mapper.chord_volume(speed));
            assert!(now.0 >= last.0 && now.1 >= last.1 && now.2 >= last.2);
            assert!(now.0 <= 0.2 && now.2 <= 0.12);
            last = now;
        }
    }

    #[test]
    fn test_zero_speed_is_silent() {
        let mut mapper = SoundMapper::new(1, quiet_tuning());
        let mut audio = RecordingBackend::ready();
        mapper.on_collision(&event(0.0, 100.0), 700.0, 0.0, &mut audio);
        assert_eq!(mapper.note_volume(0.0), 0.0);
        assert!(audio.calls.is_empty());
        assert_eq!(mapper.total_collisions(), 1);
    }

    #[test]
    fn test_main_note_played() {
        let mut mapper = SoundMapper::new(1, quiet_tuning());
        let mut audio = RecordingBackend::ready();
        mapper.on_collision(&event(50.0, 100.0), 700.0, 0.0, &mut audio);
        assert_eq!(
            audio.calls,
            vec![AudioCall::Note {
                note: Note::new(PitchClass::D, 3),
                length: NoteLength::Half,
                volume: 50.0 * crate::consts::NOTE_VOLUME_GAIN,
                when_offset: 0.0,
            }]
        );
    }

    #[test]
    fn test_bass_on_every_sixteenth() {
        let mut mapper = SoundMapper::new(1, quiet_tuning());
        let mut audio = RecordingBackend::ready();
        for i in 0..16 {
            mapper.on_collision(&event(50.0, 100.0), 700.0, i as f64, &mut audio);
            let expected = if i == 15 { 1 } else { 0 };
            assert_eq!(audio.percussion_count(), expected, "after collision {}", i + 1);
        }
        assert!(matches!(
            audio.calls.last(),
            Some(AudioCall::Note { .. })
        ));
        assert!(audio.calls.contains(&AudioCall::Percussion {
            kind: Percussion::Bass,
            volume: 0.6,
        }));
    }

    #[test]
    fn test_unready_audio_is_noop() {
        let mut mapper = SoundMapper::new(1, SoundTuning::default());
        let mut audio = SilentBackend;
        for i in 0..32 {
            mapper.on_collision(&event(300.0, 100.0), 700.0, i as f64, &mut audio);
        }
        assert_eq!(mapper.total_collisions(), 0);
        assert_eq!(mapper.last_chord_time(), None);
    }

    #[test]
    fn test_chord_rate_limited() {
        let tuning = SoundTuning {
            chord_probability: 1.0,
            ..Default::default()
        };
        let mut mapper = SoundMapper::new(9, tuning);
        let mut audio = RecordingBackend::ready();

        mapper.on_collision(&event(40.0, 100.0), 700.0, 10.0, &mut audio);
        // Three chord notes staggered, then the main note
        let notes: Vec<_> = audio.notes().collect();
        assert_eq!(notes.len(), 4);
        let offsets: Vec<f64> = notes.iter().take(3).map(|n| n.2).collect();
        assert_eq!(offsets, vec![0.0, 0.02, 0.04]);
        assert!(notes.iter().take(3).all(|n| (n.1 - 0.06).abs() < 1e-12));
        let chord_notes = [notes[0].0, notes[1].0, notes[2].0];
        assert!(Chord::ALL.iter().any(|c| c.notes() == chord_notes));
        assert_eq!(mapper.last_chord_time(), Some(10.0));

        // Within the interval: main note only
        audio.clear();
        mapper.on_collision(&event(40.0, 100.0), 700.0, 11.5, &mut audio);
        assert_eq!(audio.notes().count(), 1);

        // After the interval the chord comes back
        audio.clear();
        mapper.on_collision(&event(40.0, 100.0), 700.0, 12.5, &mut audio);
        assert_eq!(audio.notes().count(), 4);
        assert_eq!(mapper.last_chord_time(), Some(12.5));
    }

    #[test]
    fn test_greeting() {
        let mapper = SoundMapper::new(1, SoundTuning::default());
        let mut audio = RecordingBackend::new();
        mapper.greet(&mut audio);
        assert!(audio.calls.is_empty());

        audio.init();
        mapper.greet(&mut audio);
        assert_eq!(
            audio.notes().collect::<Vec<_>>(),
            vec![(Note::new(PitchClass::C, 3), 0.2, 0.0)]
        );
    }
}
