//! One simulation step
//!
//! Advances every ball once. Called by whatever drives the frame loop
//! (`requestAnimationFrame` in the browser, a plain loop natively and in
//! tests) with the current clock reading.

use super::collision::{CollisionEvent, CollisionSource, bounce_off_walls, resolve_pair};
use super::pointer::PointerField;
use super::state::World;

/// What a step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// All balls were advanced
    Advanced,
    /// The surface has no area yet; try again next frame
    Deferred,
}

/// Advance the world by one tick
///
/// `now` is a monotonic clock in seconds, used only for per-ball sound
/// cooldowns. Collision events are delivered to `emit` as they happen.
pub fn tick(world: &mut World, now: f64, emit: &mut dyn FnMut(CollisionEvent)) -> TickOutcome {
    if !world.has_area() {
        return TickOutcome::Deferred;
    }
    if world.balls.is_empty() {
        world.respawn();
    }

    let bounds = world.bounds;
    let tuning = &world.tuning;
    let field = PointerField::from_tuning(tuning);
    let balls = &mut world.balls;

    for i in 0..balls.len() {
        let (head, rest) = balls.split_at_mut(i + 1);
        let ball = &mut head[i];

        let pointer = world.pointer;
        field.apply(ball, pointer);
        ball.apply_drag(tuning.drag);
        ball.limit_speed(tuning.max_speed);

        // Wall contacts are never cooldown-gated
        let hits = bounce_off_walls(ball, bounds);
        if hits.x && ball.vel.x != 0.0 {
            emit(CollisionEvent {
                relative_speed: ball.vel.x.abs() * tuning.speed_scale,
                pos: ball.pos,
                source: CollisionSource::Wall,
            });
        }
        if hits.y && ball.vel.y != 0.0 {
            emit(CollisionEvent {
                relative_speed: ball.vel.y.abs() * tuning.speed_scale,
                pos: ball.pos,
                source: CollisionSource::Wall,
            });
        }

        ball.integrate(bounds);

        // Earlier balls already tested themselves against this one
        for other in rest.iter_mut() {
            let Some(contact) = resolve_pair(ball, other) else {
                continue;
            };
            if ball.cooldown_elapsed(now) {
                ball.last_collision_time = Some(now);
                emit(CollisionEvent {
                    relative_speed: contact.relative_speed * tuning.speed_scale,
                    pos: contact.midpoint,
                    source: CollisionSource::Pair,
                });
            }
        }
    }

    // Separation and the normal exchange can undo the per-ball clamps
    for ball in balls.iter_mut() {
        ball.limit_speed(tuning.max_speed);
        ball.clamp_to(bounds);
    }

    world.time_ticks += 1;
    TickOutcome::Advanced
}
