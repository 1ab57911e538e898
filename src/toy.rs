//! The whole toy behind a handful of entry points
//!
//! Front-ends push in surface size, pointer movement and user gestures, and
//! call [`Toy::step`] once per frame with their clock. Collisions flow
//! straight from the step into the sound mapper and out to the backend.

use glam::DVec2;

use crate::sim::{Ball, TickOutcome, World, tick};
use crate::sound::{AudioBackend, SoundMapper};
use crate::tuning::Tuning;

pub struct Toy<A: AudioBackend> {
    world: World,
    mapper: SoundMapper,
    audio: A,
    greeted: bool,
}

impl<A: AudioBackend> Toy<A> {
    /// Build a toy; balls appear once `resize` gives it a surface
    pub fn new(seed: u64, tuning: Tuning, audio: A) -> Self {
        Self {
            world: World::new(seed, tuning.physics),
            // Decorrelate chord decisions from spawn positions
            mapper: SoundMapper::new(seed ^ 0x9E37_79B9_7F4A_7C15, tuning.sound),
            audio,
            greeted: false,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.world.resize(width, height);
    }

    /// Re-randomize every ball
    pub fn reset(&mut self) {
        self.world.respawn();
    }

    /// Advance one frame
    ///
    /// Returns the balls to draw, or `None` when the surface has no area
    /// yet and the frame was skipped.
    pub fn step(&mut self, now: f64) -> Option<&[Ball]> {
        let width = self.world.width();
        let mapper = &mut self.mapper;
        let audio = &mut self.audio;
        let outcome = tick(&mut self.world, now, &mut |event| {
            mapper.on_collision(&event, width, now, audio);
        });
        match outcome {
            TickOutcome::Advanced => Some(self.world.balls.as_slice()),
            TickOutcome::Deferred => None,
        }
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.world.set_pointer(Some(DVec2::new(x, y)));
    }

    pub fn on_pointer_leave(&mut self) {
        self.world.set_pointer(None);
    }

    /// Start audio (browsers only allow it inside a click or touch handler)
    ///
    /// Returns whether audio is running. The first successful start plays
    /// a soft greeting note.
    pub fn on_user_gesture(&mut self) -> bool {
        let ready = self.audio.init();
        if ready && !self.greeted {
            self.greeted = true;
            log::info!("Audio started");
            self.mapper.greet(&mut self.audio);
        }
        ready
    }

    pub fn balls(&self) -> &[Ball] {
        &self.world.balls
    }

    pub fn bounds(&self) -> DVec2 {
        self.world.bounds
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Collisions that reached the audio backend
    pub fn total_collisions(&self) -> u64 {
        self.mapper.total_collisions()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}
