//! Simulation world state
//!
//! Owns the balls, the drawable bounds and the latest pointer position.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use crate::tuning::PhysicsTuning;

/// The ball world
#[derive(Debug, Clone)]
pub struct World {
    /// Balls in spawn order
    pub balls: Vec<Ball>,
    /// Drawable area (width, height); zero while the surface is unsized
    pub bounds: DVec2,
    /// Latest pointer position in canvas coordinates, `None` when outside
    pub pointer: Option<DVec2>,
    pub tuning: PhysicsTuning,
    /// Completed steps
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Create an empty, unsized world; balls spawn once bounds are known
    pub fn new(seed: u64, tuning: PhysicsTuning) -> Self {
        Self {
            balls: Vec::new(),
            bounds: DVec2::ZERO,
            pointer: None,
            tuning,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether the drawable surface has been sized
    pub fn has_area(&self) -> bool {
        self.bounds.x > 0.0 && self.bounds.y > 0.0
    }

    pub fn width(&self) -> f64 {
        self.bounds.x
    }

    pub fn height(&self) -> f64 {
        self.bounds.y
    }

    /// Adopt new bounds and reseat the balls inside them
    ///
    /// Balls that still fit are clamped into the new area. If any ball is
    /// now wider than the surface, or there were no balls yet, the whole
    /// layout is re-randomized. A zero-sized surface keeps the balls as they
    /// are; steps defer until a real size arrives.
    pub fn resize(&mut self, width: f64, height: f64) {
        let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.bounds = DVec2::new(sanitize(width), sanitize(height));

        if !self.has_area() {
            log::info!("Surface has no area yet ({}x{})", width, height);
            return;
        }

        let bounds = self.bounds;
        if !self.balls.is_empty() && self.balls.iter().all(|b| b.fits(bounds)) {
            for ball in &mut self.balls {
                ball.clamp_to(bounds);
            }
            log::info!("Resized to {}x{}, kept {} balls", bounds.x, bounds.y, self.balls.len());
        } else {
            self.respawn();
        }
    }

    /// Replace every ball with a fresh random one inside the bounds
    pub fn respawn(&mut self) {
        self.balls.clear();
        if !self.has_area() {
            return;
        }
        for _ in 0..self.tuning.ball_count {
            let id = self.next_entity_id();
            let ball = Ball::spawn(id, &mut self.rng, self.bounds, &self.tuning);
            self.balls.push(ball);
        }
        log::info!(
            "Spawned {} balls in {}x{}",
            self.balls.len(),
            self.bounds.x,
            self.bounds.y
        );
    }

    pub fn set_pointer(&mut self, pointer: Option<DVec2>) {
        self.pointer = pointer;
    }

    /// Total kinetic energy with unit masses (diagnostics)
    pub fn kinetic_energy(&self) -> f64 {
        self.balls.iter().map(|b| 0.5 * b.vel.length_squared()).sum()
    }
}
