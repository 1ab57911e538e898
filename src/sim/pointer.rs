//! Pointer repulsion field
//!
//! The cursor (or a touch) pushes nearby balls radially away from itself,
//! harder the closer they are.

use glam::DVec2;

use super::ball::Ball;
use crate::tuning::PhysicsTuning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerField {
    /// Influence radius in pixels
    pub radius: f64,
    /// Velocity added at zero distance, pixels/tick
    pub strength: f64,
}

impl PointerField {
    pub fn from_tuning(tuning: &PhysicsTuning) -> Self {
        Self {
            radius: tuning.pointer_radius,
            strength: tuning.pointer_strength,
        }
    }

    /// Velocity change for a ball centred at `pos`
    ///
    /// `None` when the ball is outside the influence radius. A ball sitting
    /// exactly on the pointer has no defined push direction and gets
    /// `Some(ZERO)`: it still counts as hovered.
    pub fn push_at(&self, pos: DVec2, pointer: DVec2) -> Option<DVec2> {
        let away = pos - pointer;
        let distance = away.length();
        if distance >= self.radius {
            return None;
        }
        if distance == 0.0 {
            return Some(DVec2::ZERO);
        }
        let magnitude = (self.radius - distance) / self.radius * self.strength;
        Some(away / distance * magnitude)
    }

    /// Apply the field to one ball and refresh its hover flag
    pub fn apply(&self, ball: &mut Ball, pointer: Option<DVec2>) {
        match pointer.and_then(|p| self.push_at(ball.pos, p)) {
            Some(push) => {
                ball.vel += push;
                ball.hovered = true;
            }
            None => ball.hovered = false,
        }
    }
}
