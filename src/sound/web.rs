//! Browser audio backend using the Web Audio API
//!
//! Every chime is a fresh sine oscillator behind a gain envelope: soft
//! attack, long exponential tail. No external files needed.

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use super::backend::AudioBackend;
use super::note::{Note, NoteLength, Percussion};
use crate::settings::Settings;

/// Chime envelope (seconds)
const CHIME_ATTACK: f64 = 0.15;
const CHIME_RELEASE: f64 = 1.8;
/// Web Audio cannot ramp exponentially to zero
const SILENCE: f32 = 0.0001;

/// Oscillator-graph synth
pub struct WebSynth {
    ctx: Option<AudioContext>,
    settings: Settings,
}

impl WebSynth {
    /// Create an unstarted synth; call `init` from a user gesture
    pub fn new(settings: Settings) -> Self {
        Self {
            ctx: None,
            settings,
        }
    }

    /// Create an oscillator wired through a fresh gain node to the output
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Deep bass accent - slow attack, quarter-note body
    fn play_bass(ctx: &AudioContext, vol: f32) {
        let freq = Percussion::Bass.note().frequency() as f32;
        let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();
        let end = t + NoteLength::Quarter.seconds() + 0.8;

        gain.gain().set_value_at_time(SILENCE, t).ok();
        gain.gain().linear_ramp_to_value_at_time(vol, t + 0.12).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(vol * 0.15, t + 0.52)
            .ok();
        gain.gain().exponential_ramp_to_value_at_time(SILENCE, end).ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(end + 0.05).ok();
    }

    /// Kick accent - solid thump with a falling pitch
    fn play_kick(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(SILENCE, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }
}

impl AudioBackend for WebSynth {
    fn init(&mut self) -> bool {
        if self.ctx.is_none() {
            match AudioContext::new() {
                Ok(ctx) => {
                    log::info!("AudioContext created");
                    self.ctx = Some(ctx);
                }
                Err(_) => {
                    log::warn!("Failed to create AudioContext - audio disabled");
                    return false;
                }
            }
        }
        // Resume context if suspended (browsers require user gesture)
        if let Some(ctx) = &self.ctx {
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
        self.is_ready()
    }

    fn is_ready(&self) -> bool {
        self.ctx
            .as_ref()
            .is_some_and(|ctx| ctx.state() != AudioContextState::Closed)
    }

    fn play_note(&mut self, note: Note, length: NoteLength, volume: f64, when_offset: f64) {
        let vol = (volume * self.settings.chime_gain()).clamp(0.0, 1.0) as f32;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        let freq = note.frequency() as f32;
        let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time() + when_offset.max(0.0);
        let end = t + length.seconds() + CHIME_RELEASE;

        gain.gain().set_value_at_time(SILENCE, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol, t + CHIME_ATTACK)
            .ok();
        gain.gain().exponential_ramp_to_value_at_time(SILENCE, end).ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(end + 0.05).ok();
    }

    fn play_percussion(&mut self, kind: Percussion, volume: f64) {
        let vol = (volume * self.settings.accent_gain()).clamp(0.0, 1.0) as f32;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        match kind {
            Percussion::Bass => Self::play_bass(ctx, vol),
            Percussion::Kick => Self::play_kick(ctx, vol),
        }
    }
}
