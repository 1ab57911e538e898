//! Ball Chimes - bouncing balls that play music when they collide
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (balls, pointer field, collisions)
//! - `sound`: Collision-to-note mapping and audio backends
//! - `toy`: Facade the front-end drives (resize, step, pointer, audio start)
//! - `tuning`: Data-driven physics and sound constants
//! - `settings`: Listener preferences (volume, mute)

pub mod settings;
pub mod sim;
pub mod sound;
pub mod toy;
pub mod tuning;

pub use settings::Settings;
pub use toy::Toy;
pub use tuning::{PhysicsTuning, SoundTuning, Tuning};

use glam::DVec2;

/// Default tuning constants
pub mod consts {
    /// Number of balls spawned per layout
    pub const BALL_COUNT: usize = 16;
    /// Spawn radius range (uniform in [min, max))
    pub const BALL_MIN_RADIUS: f64 = 15.0;
    pub const BALL_MAX_RADIUS: f64 = 30.0;
    /// Spawn velocity components are uniform in [-BALL_START_SPEED, BALL_START_SPEED)
    pub const BALL_START_SPEED: f64 = 1.0;

    /// Speed cap, pixels per tick
    pub const MAX_SPEED: f64 = 3.5;
    /// Per-tick velocity damping
    pub const DRAG: f64 = 0.999;

    /// Pointer repulsion
    pub const POINTER_RADIUS: f64 = 120.0;
    pub const POINTER_STRENGTH: f64 = 5.0;

    /// Minimum seconds between sound-triggering ball-ball contacts, per ball
    pub const COLLISION_COOLDOWN: f64 = 0.05;
    /// Pixels/tick -> collision speed units fed to the sound mapper
    pub const SPEED_SCALE: f64 = 100.0;

    /// Every Nth collision plays the bass accent
    pub const BASS_EVERY: u64 = 16;
    pub const BASS_VOLUME: f64 = 0.6;

    /// Chords
    pub const CHORD_INTERVAL: f64 = 2.0;
    pub const CHORD_PROBABILITY: f64 = 0.3;
    pub const CHORD_STAGGER: f64 = 0.02;
    pub const CHORD_VOLUME_CAP: f64 = 0.12;
    pub const CHORD_VOLUME_GAIN: f64 = 0.0015;

    /// Main collision note
    pub const NOTE_VOLUME_CAP: f64 = 0.2;
    pub const NOTE_VOLUME_GAIN: f64 = 0.002;
    /// Collision speed -> normalized speed for octave selection
    pub const OCTAVE_SPEED_NORMALIZE: f64 = 0.01;
    pub const OCTAVE_MID_THRESHOLD: f64 = 0.3;
    pub const OCTAVE_HIGH_THRESHOLD: f64 = 0.6;

    /// Note played once when audio first starts
    pub const GREETING_VOLUME: f64 = 0.2;
}

/// Rescale `vel` to `max` if it is faster, keeping its direction
#[inline]
pub fn clamp_speed(vel: DVec2, max: f64) -> DVec2 {
    let speed = vel.length();
    if speed > max && speed > 0.0 {
        vel * (max / speed)
    } else {
        vel
    }
}

/// Clamp one coordinate into [radius, extent - radius]
///
/// When the ball is wider than the extent the lower bound wins, which keeps
/// `clamp` from panicking on an inverted range.
#[inline]
pub fn clamp_axis(value: f64, radius: f64, extent: f64) -> f64 {
    value.min(extent - radius).max(radius)
}
