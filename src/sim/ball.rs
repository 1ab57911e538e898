//! Ball entity

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::PhysicsTuning;
use crate::{clamp_axis, clamp_speed};

/// Number of colour tokens a ball can carry (front-end palette size)
pub const PALETTE_SIZE: u8 = 6;

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: DVec2,
    /// Velocity in pixels per tick
    pub vel: DVec2,
    pub radius: f64,
    /// Palette index (rendering only)
    pub color: u8,
    /// Pointer is within the influence radius (rendering only)
    #[serde(default)]
    pub hovered: bool,
    /// Clock reading (seconds) of the last sound-triggering ball contact
    #[serde(default)]
    pub last_collision_time: Option<f64>,
    /// Minimum seconds between sound-triggering ball contacts
    pub collision_cooldown: f64,
}

impl Ball {
    pub fn new(id: u32, pos: DVec2, vel: DVec2, radius: f64) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color: 0,
            hovered: false,
            last_collision_time: None,
            collision_cooldown: crate::consts::COLLISION_COOLDOWN,
        }
    }

    /// Spawn a ball at a random spot fully inside `bounds`
    ///
    /// `bounds` must have positive area. The radius shrinks to fit a surface
    /// smaller than the ball's diameter.
    pub fn spawn(id: u32, rng: &mut impl Rng, bounds: DVec2, tuning: &PhysicsTuning) -> Self {
        let radius = if tuning.max_radius > tuning.min_radius {
            rng.random_range(tuning.min_radius..tuning.max_radius)
        } else {
            tuning.min_radius
        };
        let radius = radius.min(bounds.x.min(bounds.y) / 2.0);

        let pos = DVec2::new(
            radius + rng.random::<f64>() * (bounds.x - 2.0 * radius),
            radius + rng.random::<f64>() * (bounds.y - 2.0 * radius),
        );
        let vel = DVec2::new(
            (rng.random::<f64>() - 0.5) * 2.0 * tuning.start_speed,
            (rng.random::<f64>() - 0.5) * 2.0 * tuning.start_speed,
        );

        let mut ball = Self::new(id, pos, vel, radius);
        ball.color = rng.random_range(0..PALETTE_SIZE);
        ball.collision_cooldown = tuning.collision_cooldown;
        ball
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Isotropic damping
    pub fn apply_drag(&mut self, drag: f64) {
        self.vel *= drag;
    }

    pub fn limit_speed(&mut self, max_speed: f64) {
        self.vel = clamp_speed(self.vel, max_speed);
    }

    /// Advance one tick and hard-clamp into `bounds`
    pub fn integrate(&mut self, bounds: DVec2) {
        self.pos += self.vel;
        self.clamp_to(bounds);
    }

    /// Hard-clamp the centre into [radius, extent - radius] on both axes
    pub fn clamp_to(&mut self, bounds: DVec2) {
        self.pos.x = clamp_axis(self.pos.x, self.radius, bounds.x);
        self.pos.y = clamp_axis(self.pos.y, self.radius, bounds.y);
    }

    /// Whether the ball can sit inside `bounds` at all
    pub fn fits(&self, bounds: DVec2) -> bool {
        2.0 * self.radius <= bounds.x && 2.0 * self.radius <= bounds.y
    }

    /// Whether enough time has passed since the last sound-triggering contact
    pub fn cooldown_elapsed(&self, now: f64) -> bool {
        match self.last_collision_time {
            None => true,
            Some(last) => now - last > self.collision_cooldown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_inside_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = DVec2::new(640.0, 480.0);
        let tuning = PhysicsTuning::default();
        for id in 0..200 {
            let ball = Ball::spawn(id, &mut rng, bounds, &tuning);
            assert!(ball.radius >= tuning.min_radius && ball.radius < tuning.max_radius);
            assert!(ball.pos.x >= ball.radius && ball.pos.x <= bounds.x - ball.radius);
            assert!(ball.pos.y >= ball.radius && ball.pos.y <= bounds.y - ball.radius);
            assert!(ball.vel.x.abs() <= tuning.start_speed);
            assert!(ball.vel.y.abs() <= tuning.start_speed);
            assert!(ball.color < PALETTE_SIZE);
            assert_eq!(ball.last_collision_time, None);
        }
    }

    #[test]
    fn test_spawn_shrinks_to_tiny_surface() {
        let mut rng = Pcg32::seed_from_u64(1);
        let bounds = DVec2::new(20.0, 100.0);
        let ball = Ball::spawn(1, &mut rng, bounds, &PhysicsTuning::default());
        assert!(ball.radius <= 10.0);
        assert!(ball.fits(bounds));
        assert!((ball.pos.x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_integrate_clamps() {
        let mut ball = Ball::new(1, DVec2::new(95.0, 50.0), DVec2::new(10.0, 0.0), 10.0);
        ball.integrate(DVec2::new(100.0, 100.0));
        assert_eq!(ball.pos, DVec2::new(90.0, 50.0));
    }

    #[test]
    fn test_cooldown() {
        let mut ball = Ball::new(1, DVec2::ZERO, DVec2::ZERO, 10.0);
        assert!(ball.cooldown_elapsed(0.0));
        ball.last_collision_time = Some(1.0);
        assert!(!ball.cooldown_elapsed(1.01));
        assert!(!ball.cooldown_elapsed(1.04));
        assert!(ball.cooldown_elapsed(1.06));
    }

    #[test]
    fn test_drag_and_limit() {
        let mut ball = Ball::new(1, DVec2::ZERO, DVec2::new(10.0, 0.0), 10.0);
        ball.apply_drag(0.5);
        assert_eq!(ball.vel, DVec2::new(5.0, 0.0));
        ball.limit_speed(3.5);
        assert!((ball.speed() - 3.5).abs() < 1e-12);
    }
}
