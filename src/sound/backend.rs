//! Audio capability
//!
//! The sound mapper only ever talks to [`AudioBackend`]. Playback is
//! fire-and-forget: nothing is returned, and calls made before the backend
//! is ready are dropped rather than queued.

use super::note::{Note, NoteLength, Percussion};
use crate::settings::Settings;

/// Something that can make the chimes audible
pub trait AudioBackend {
    /// Start the engine. Browsers only allow this from a user gesture.
    /// Returns whether the backend is ready afterwards.
    fn init(&mut self) -> bool;

    fn is_ready(&self) -> bool;

    /// Play `note` for `length` at `volume` (0.0 - 1.0), `when_offset` seconds from now
    fn play_note(&mut self, note: Note, length: NoteLength, volume: f64, when_offset: f64);

    /// Play an accent at `volume` (0.0 - 1.0)
    fn play_percussion(&mut self, kind: Percussion, volume: f64);
}

/// Backend that never starts; every sound is dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn init(&mut self) -> bool {
        false
    }

    fn is_ready(&self) -> bool {
        false
    }

    fn play_note(&mut self, _note: Note, _length: NoteLength, _volume: f64, _when_offset: f64) {}

    fn play_percussion(&mut self, _kind: Percussion, _volume: f64) {}
}

/// Native backend that writes every audible sound to the log
#[derive(Debug, Clone, Default)]
pub struct LogBackend {
    settings: Settings,
    ready: bool,
    notes_played: u64,
    accents_played: u64,
}

impl LogBackend {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ready: false,
            notes_played: 0,
            accents_played: 0,
        }
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn notes_played(&self) -> u64 {
        self.notes_played
    }

    pub fn accents_played(&self) -> u64 {
        self.accents_played
    }
}

impl AudioBackend for LogBackend {
    fn init(&mut self) -> bool {
        if !self.ready {
            log::info!("Log audio backend started");
        }
        self.ready = true;
        true
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn play_note(&mut self, note: Note, length: NoteLength, volume: f64, when_offset: f64) {
        let vol = (volume * self.settings.chime_gain()).clamp(0.0, 1.0);
        if !self.ready || vol <= 0.0 {
            return;
        }
        self.notes_played += 1;
        log::debug!(
            "note {} ({:.1} Hz) {:?} vol {:.3} +{:.2}s",
            note,
            note.frequency(),
            length,
            vol,
            when_offset
        );
    }

    fn play_percussion(&mut self, kind: Percussion, volume: f64) {
        let vol = (volume * self.settings.accent_gain()).clamp(0.0, 1.0);
        if !self.ready || vol <= 0.0 {
            return;
        }
        self.accents_played += 1;
        log::debug!("accent {:?} vol {:.3}", kind, vol);
    }
}

/// One call made against a [`RecordingBackend`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCall {
    Note {
        note: Note,
        length: NoteLength,
        volume: f64,
        when_offset: f64,
    },
    Percussion {
        kind: Percussion,
        volume: f64,
    },
}

/// Backend that records calls verbatim (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    ready: bool,
    pub calls: Vec<AudioCall>,
}

impl RecordingBackend {
    /// A backend that has not been started
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that is already started
    pub fn ready() -> Self {
        Self {
            ready: true,
            calls: Vec::new(),
        }
    }

    pub fn notes(&self) -> impl Iterator<Item = (Note, f64, f64)> + '_ {
        self.calls.iter().filter_map(|call| match *call {
            AudioCall::Note {
                note,
                volume,
                when_offset,
                ..
            } => Some((note, volume, when_offset)),
            AudioCall::Percussion { .. } => None,
        })
    }

    pub fn percussion_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, AudioCall::Percussion { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl AudioBackend for RecordingBackend {
    fn init(&mut self) -> bool {
        self.ready = true;
        true
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn play_note(&mut self, note: Note, length: NoteLength, volume: f64, when_offset: f64) {
        if !self.ready {
            return;
        }
        self.calls.push(AudioCall::Note {
            note,
            length,
            volume,
            when_offset,
        });
    }

    fn play_percussion(&mut self, kind: Percussion, volume: f64) {
        if !self.ready {
            return;
        }
        self.calls.push(AudioCall::Percussion { kind, volume });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::note::PitchClass;

    const C3: Note = Note::new(PitchClass::C, 3);

    #[test]
    fn test_silent_never_ready() {
        let mut backend = SilentBackend;
        assert!(!backend.init());
        assert!(!backend.is_ready());
    }

    #[test]
    fn test_log_backend_drops_before_init() {
        let mut backend = LogBackend::new(Settings::default());
        backend.play_note(C3, NoteLength::Half, 0.2, 0.0);
        assert_eq!(backend.notes_played(), 0);

        assert!(backend.init());
        backend.play_note(C3, NoteLength::Half, 0.2, 0.0);
        backend.play_percussion(Percussion::Bass, 0.6);
        assert_eq!(backend.notes_played(), 1);
        assert_eq!(backend.accents_played(), 1);
    }

    #[test]
    fn test_log_backend_respects_mute() {
        let mut backend = LogBackend::new(Settings::default());
        backend.init();
        backend.settings_mut().muted = true;
        backend.play_note(C3, NoteLength::Half, 0.2, 0.0);
        backend.play_percussion(Percussion::Bass, 0.6);
        assert_eq!(backend.notes_played(), 0);
        assert_eq!(backend.accents_played(), 0);
    }

    #[test]
    fn test_recording_backend() {
        let mut backend = RecordingBackend::new();
        backend.play_note(C3, NoteLength::Half, 0.2, 0.0);
        assert!(backend.calls.is_empty());

        backend.init();
        backend.play_note(C3, NoteLength::Half, 0.2, 0.02);
        backend.play_percussion(Percussion::Bass, 0.6);
        assert_eq!(backend.notes().collect::<Vec<_>>(), vec![(C3, 0.2, 0.02)]);
        assert_eq!(backend.percussion_count(), 1);
    }
}
