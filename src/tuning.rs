//! Data-driven physics and sound balance
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! JSON file only needs the keys it wants to override.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sound::Percussion;

/// Physics constants for the ball simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub ball_count: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    pub start_speed: f64,
    pub max_speed: f64,
    /// Velocity multiplier applied every tick, in (0, 1)
    pub drag: f64,
    pub pointer_radius: f64,
    pub pointer_strength: f64,
    /// Seconds between sound-triggering ball-ball contacts, per ball
    pub collision_cooldown: f64,
    /// Scale from pixels/tick to collision speed units
    pub speed_scale: f64,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            ball_count: BALL_COUNT,
            min_radius: BALL_MIN_RADIUS,
            max_radius: BALL_MAX_RADIUS,
            start_speed: BALL_START_SPEED,
            max_speed: MAX_SPEED,
            drag: DRAG,
            pointer_radius: POINTER_RADIUS,
            pointer_strength: POINTER_STRENGTH,
            collision_cooldown: COLLISION_COOLDOWN,
            speed_scale: SPEED_SCALE,
        }
    }
}

/// Constants for the collision-to-sound mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundTuning {
    pub bass_every: u64,
    /// Accent played every `bass_every` collisions
    pub accent: Percussion,
    pub bass_volume: f64,
    pub chord_interval: f64,
    /// Chance that an eligible collision starts a chord, in [0, 1]
    pub chord_probability: f64,
    pub chord_stagger: f64,
    pub chord_volume_cap: f64,
    pub chord_volume_gain: f64,
    pub note_volume_cap: f64,
    pub note_volume_gain: f64,
    pub octave_speed_normalize: f64,
    pub octave_mid_threshold: f64,
    pub octave_high_threshold: f64,
    pub greeting_volume: f64,
}

impl Default for SoundTuning {
    fn default() -> Self {
        Self {
            bass_every: BASS_EVERY,
            accent: Percussion::Bass,
            bass_volume: BASS_VOLUME,
            chord_interval: CHORD_INTERVAL,
            chord_probability: CHORD_PROBABILITY,
            chord_stagger: CHORD_STAGGER,
            chord_volume_cap: CHORD_VOLUME_CAP,
            chord_volume_gain: CHORD_VOLUME_GAIN,
            note_volume_cap: NOTE_VOLUME_CAP,
            note_volume_gain: NOTE_VOLUME_GAIN,
            octave_speed_normalize: OCTAVE_SPEED_NORMALIZE,
            octave_mid_threshold: OCTAVE_MID_THRESHOLD,
            octave_high_threshold: OCTAVE_HIGH_THRESHOLD,
            greeting_volume: GREETING_VOLUME,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub sound: SoundTuning,
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, String> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|err| format!("Invalid tuning JSON: {err}"))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value is inside the range the simulation relies on
    pub fn validate(&self) -> Result<(), String> {
        let p = &self.physics;
        if p.ball_count == 0 {
            return Err("ball_count must be at least 1".to_owned());
        }
        if !(p.min_radius > 0.0) {
            return Err(format!("min_radius must be positive, got {}", p.min_radius));
        }
        if p.max_radius < p.min_radius {
            return Err(format!(
                "max_radius ({}) must be >= min_radius ({})",
                p.max_radius, p.min_radius
            ));
        }
        if !(p.drag > 0.0 && p.drag < 1.0) {
            return Err(format!("drag must be in (0, 1), got {}", p.drag));
        }
        if !(p.max_speed > 0.0) {
            return Err(format!("max_speed must be positive, got {}", p.max_speed));
        }
        non_negative(&[
            ("start_speed", p.start_speed),
            ("pointer_radius", p.pointer_radius),
            ("pointer_strength", p.pointer_strength),
            ("collision_cooldown", p.collision_cooldown),
            ("speed_scale", p.speed_scale),
        ])?;

        let s = &self.sound;
        if s.bass_every == 0 {
            return Err("bass_every must be at least 1".to_owned());
        }
        if !(0.0..=1.0).contains(&s.chord_probability) {
            return Err(format!(
                "chord_probability must be in [0, 1], got {}",
                s.chord_probability
            ));
        }
        // when_offset and volume must never go negative
        non_negative(&[
            ("chord_interval", s.chord_interval),
            ("chord_stagger", s.chord_stagger),
            ("chord_volume_gain", s.chord_volume_gain),
            ("note_volume_gain", s.note_volume_gain),
            ("octave_speed_normalize", s.octave_speed_normalize),
        ])?;
        if s.octave_high_threshold < s.octave_mid_threshold {
            return Err("octave_high_threshold must be >= octave_mid_threshold".to_owned());
        }
        for (name, value) in [
            ("bass_volume", s.bass_volume),
            ("chord_volume_cap", s.chord_volume_cap),
            ("note_volume_cap", s.note_volume_cap),
            ("greeting_volume", s.greeting_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be in [0, 1], got {value}"));
            }
        }
        Ok(())
    }
}

fn non_negative(fields: &[(&str, f64)]) -> Result<(), String> {
    for &(name, value) in fields {
        if !(value >= 0.0) {
            return Err(format!("{name} must be >= 0, got {value}"));
        }
    }
    Ok(())
}
