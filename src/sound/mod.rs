//! Sound module
//!
//! Maps collisions to notes and hands them to an [`AudioBackend`]. The
//! simulation never depends on anything in here: physics runs the same
//! whether or not audio has started.

pub mod backend;
pub mod mapper;
pub mod note;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use backend::{AudioBackend, AudioCall, LogBackend, RecordingBackend, SilentBackend};
pub use mapper::SoundMapper;
pub use note::{Chord, Note, NoteLength, Percussion, PitchClass};
#[cfg(target_arch = "wasm32")]
pub use web::WebSynth;
