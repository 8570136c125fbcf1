//! Entity physics: velocity integration, gravity, ground clamp, friction.
//!
//! Integration is per step (one `update` call), not scaled by the frame delta.

use hecs::World;

use crisis_core::components::Enemy;
use crisis_core::constants::*;
use crisis_core::types::Body;

/// How a body responds to gravity and ground contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsProfile {
    pub gravity: f64,
    pub ground_y: f64,
    /// Horizontal velocity multiplier per step, if any.
    pub friction: Option<f64>,
    /// Gravity applies even while grounded.
    pub always_falls: bool,
}

pub const PLAYER_PHYSICS: PhysicsProfile = PhysicsProfile {
    gravity: PLAYER_GRAVITY,
    ground_y: PLAYER_GROUND_Y,
    friction: Some(FRICTION),
    always_falls: false,
};

/// Enemy horizontal motion is owned by the AI, so no passive friction.
pub const ENEMY_PHYSICS: PhysicsProfile = PhysicsProfile {
    gravity: ENEMY_GRAVITY,
    ground_y: ENEMY_GROUND_Y,
    friction: None,
    always_falls: true,
};

/// Advance one body by a single step.
pub fn advance(body: &mut Body, profile: &PhysicsProfile) {
    body.position += body.velocity;

    if body.airborne || profile.always_falls {
        body.velocity.y += profile.gravity;
    }

    if body.position.y >= profile.ground_y {
        body.position.y = profile.ground_y;
        body.velocity.y = 0.0;
        body.airborne = false;
    }

    if let Some(friction) = profile.friction {
        body.velocity.x *= friction;
    }
}

/// Keep a body horizontally inside the arena.
pub fn clamp_to_arena(body: &mut Body) {
    let max_x = (ARENA_WIDTH - body.size.x).max(0.0);
    body.position.x = body.position.x.clamp(0.0, max_x);
}

/// Advance every enemy body.
pub fn run(world: &mut World) {
    for (_entity, (_enemy, body)) in world.query_mut::<(&Enemy, &mut Body)>() {
        advance(body, &ENEMY_PHYSICS);
    }
}
