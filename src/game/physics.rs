//! Rapier setup and the collision category constants.
//!
//! Contact between the block and the goal is detection-only: the goal is a
//! sensor and each body's filter admits only the other's category, so the
//! pair generates contact events but is never resolved by impulse exchange.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
        100.0,
    ));

    #[cfg(feature = "dev")]
    app.add_plugins(RapierDebugRenderPlugin::default());

    app.add_systems(Startup, configure_gravity);
}

/// World gravity in pixels per second squared, pointing down.
const WORLD_GRAVITY: f32 = -980.0;

/// Collision category of the block (`1 << 1`).
pub const BLOCK_GROUP: Group = Group::GROUP_2;

/// Collision category of the goal (`1 << 2`).
pub const GOAL_GROUP: Group = Group::GROUP_3;

fn configure_gravity(mut rapier_config: Query<&mut RapierConfiguration>) {
    let Ok(mut config) = rapier_config.single_mut() else {
        return;
    };
    config.gravity = Vect::new(0.0, WORLD_GRAVITY);
}
