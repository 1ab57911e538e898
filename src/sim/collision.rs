//! Collision detection and response
//!
//! Walls reflect one velocity component. Ball-ball contacts are treated as
//! perfectly elastic between equal masses: the velocity components along the
//! contact normal are swapped and the tangential components are kept, so ball
//! size never changes the exchange.

use glam::DVec2;

use super::ball::Ball;

/// Where a collision happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSource {
    Wall,
    Pair,
}

/// A sound-worthy collision, handed straight to the sound mapper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Scaled impact speed (see `PhysicsTuning::speed_scale`)
    pub relative_speed: f64,
    pub pos: DVec2,
    pub source: CollisionSource,
}

/// Axes on which a ball touched a wall this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub x: bool,
    pub y: bool,
}

/// Reflect the velocity of a ball overlapping a wall
///
/// Each axis is tested independently, so a ball in a corner flips both
/// components in the same tick.
pub fn bounce_off_walls(ball: &mut Ball, bounds: DVec2) -> WallHits {
    let hits = WallHits {
        x: ball.pos.x + ball.radius > bounds.x || ball.pos.x - ball.radius < 0.0,
        y: ball.pos.y + ball.radius > bounds.y || ball.pos.y - ball.radius < 0.0,
    };
    if hits.x {
        ball.vel.x = -ball.vel.x;
    }
    if hits.y {
        ball.vel.y = -ball.vel.y;
    }
    hits
}

/// Outcome of resolving an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Midpoint between the separated centres
    pub midpoint: DVec2,
    /// |va - vb| after the exchange, pixels/tick
    pub relative_speed: f64,
}

/// Resolve a ball-ball overlap in place
///
/// Returns `None` when the balls do not overlap, or when their centres
/// coincide and the contact normal is undefined.
pub fn resolve_pair(a: &mut Ball, b: &mut Ball) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let reach = a.radius + b.radius;
    if distance >= reach || distance == 0.0 {
        return None;
    }

    let normal = delta / distance;
    let tangent = normal.perp();

    // Normal/tangent frame
    let (an, at) = (a.vel.dot(normal), a.vel.dot(tangent));
    let (bn, bt) = (b.vel.dot(normal), b.vel.dot(tangent));

    a.vel = normal * bn + tangent * at;
    b.vel = normal * an + tangent * bt;

    // Split the overlap so the balls end up exactly touching
    let half_overlap = (reach - distance) / 2.0;
    a.pos -= normal * half_overlap;
    b.pos += normal * half_overlap;

    Some(Contact {
        midpoint: (a.pos + b.pos) / 2.0,
        relative_speed: (a.vel - b.vel).length(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball(x: f64, y: f64, dx: f64, dy: f64, radius: f64) -> Ball {
        Ball::new(0, DVec2::new(x, y), DVec2::new(dx, dy), radius)
    }

    fn kinetic(a: &Ball, b: &Ball) -> f64 {
        a.vel.length_squared() + b.vel.length_squared()
    }

    #[test]
    fn test_wall_bounce_left() {
        let mut b = ball(5.0, 50.0, -2.0, 1.5, 10.0);
        let hits = bounce_off_walls(&mut b, DVec2::new(100.0, 100.0));
        assert_eq!(hits, WallHits { x: true, y: false });
        assert_eq!(b.vel, DVec2::new(2.0, 1.5));
    }

    #[test]
    fn test_wall_bounce_corner() {
        let mut b = ball(95.0, 95.0, 1.0, 2.0, 10.0);
        let hits = bounce_off_walls(&mut b, DVec2::new(100.0, 100.0));
        assert!(hits.x && hits.y);
        assert_eq!(b.vel, DVec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_no_wall_contact() {
        let mut b = ball(50.0, 50.0, 1.0, 1.0, 10.0);
        let hits = bounce_off_walls(&mut b, DVec2::new(100.0, 100.0));
        assert_eq!(hits, WallHits::default());
        assert_eq!(b.vel, DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_head_on_swaps_velocities() {
        let mut a = ball(100.0, 100.0, 2.0, 0.0, 10.0);
        let mut b = ball(118.0, 100.0, -2.0, 0.0, 10.0);
        let contact = resolve_pair(&mut a, &mut b).unwrap();
        assert!((a.vel.x + 2.0).abs() < 1e-12);
        assert!((b.vel.x - 2.0).abs() < 1e-12);
        assert!(a.vel.y.abs() < 1e-12 && b.vel.y.abs() < 1e-12);
        assert!((contact.relative_speed - 4.0).abs() < 1e-12);
        assert!((a.pos.distance(b.pos) - 20.0).abs() < 1e-9);
        assert!((contact.midpoint - DVec2::new(109.0, 100.0)).length() < 1e-9);
    }

    #[test]
    fn test_glancing_keeps_tangent() {
        // Contact normal along +x; the y components are tangential
        let mut a = ball(0.0, 0.0, 1.0, 3.0, 10.0);
        let mut b = ball(15.0, 0.0, 0.0, -1.0, 10.0);
        resolve_pair(&mut a, &mut b).unwrap();
        assert!((a.vel - DVec2::new(0.0, 3.0)).length() < 1e-12);
        assert!((b.vel - DVec2::new(1.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_separated_pair_untouched() {
        let mut a = ball(0.0, 0.0, 1.0, 0.0, 10.0);
        let mut b = ball(20.0, 0.0, -1.0, 0.0, 10.0);
        assert_eq!(resolve_pair(&mut a, &mut b), None);
        assert_eq!(a.vel, DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_coincident_centres_skipped() {
        let mut a = ball(50.0, 50.0, 1.0, 0.0, 10.0);
        let mut b = ball(50.0, 50.0, -1.0, 0.0, 12.0);
        assert_eq!(resolve_pair(&mut a, &mut b), None);
        assert!(a.pos.is_finite() && a.vel.is_finite());
        assert!(b.pos.is_finite() && b.vel.is_finite());
    }

    proptest! {
        #[test]
        fn prop_pair_conserves_energy_and_tangent(
            ax in -50.0f64..50.0, ay in -50.0f64..50.0,
            ox in -20.0f64..20.0, oy in -20.0f64..20.0,
            avx in -4.0f64..4.0, avy in -4.0f64..4.0,
            bvx in -4.0f64..4.0, bvy in -4.0f64..4.0,
            ra in 5.0f64..30.0, rb in 5.0f64..30.0,
        ) {
            let offset = DVec2::new(ox, oy);
            prop_assume!(offset.length() > 1e-3 && offset.length() < ra + rb);

            let mut a = ball(ax, ay, avx, avy, ra);
            let mut b = ball(ax + ox, ay + oy, bvx, bvy, rb);
            let energy_before = kinetic(&a, &b);
            let tangent = offset.normalize().perp();
            let (at, bt) = (a.vel.dot(tangent), b.vel.dot(tangent));

            let contact = resolve_pair(&mut a, &mut b);
            prop_assert!(contact.is_some());

            prop_assert!((kinetic(&a, &b) - energy_before).abs() < 1e-9);
            prop_assert!((a.vel.dot(tangent) - at).abs() < 1e-9);
            prop_assert!((b.vel.dot(tangent) - bt).abs() < 1e-9);
            prop_assert!((a.pos.distance(b.pos) - (ra + rb)).abs() < 1e-9);
        }
    }
}
