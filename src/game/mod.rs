//! The slingshot toy's gameplay module.
//!
//! This module contains the whole interaction loop:
//! - Rapier physics bridge (categories, gravity, contact filtering)
//! - Block and goal entity factories
//! - Slingshot drag/launch input
//! - Score tracking and the HUD
//! - Off-screen recycle loop with a deferred respawn

mod block;
mod goal;
mod hud;
mod physics;
mod score;
mod slingshot;

use bevy::prelude::*;

pub use block::{RoundGeneration, SpawnBlock};
pub use goal::{GOAL_POSITION, SpawnGoal};
pub use score::Score;
pub use slingshot::SLING_ANCHOR;
use slingshot::SLINGSHOT_RADIUS;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        physics::plugin,
        score::plugin,
        block::plugin,
        goal::plugin,
        slingshot::plugin,
        hud::plugin,
    ));

    app.add_systems(Startup, spawn_scene);
}

/// Set up the initial scene: the slingshot post, a block resting in the
/// sling, and the goal at its fixed starting position.
fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut block_events: EventWriter<SpawnBlock>,
    mut goal_events: EventWriter<SpawnGoal>,
) {
    commands.spawn((
        Name::new("Slingshot Post"),
        Mesh2d(meshes.add(Circle::new(SLINGSHOT_RADIUS))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(0.5, 0.5, 0.5)))),
        Transform::from_translation(SLING_ANCHOR.extend(0.0)),
    ));

    block_events.write(SpawnBlock {
        position: SLING_ANCHOR,
    });
    goal_events.write(SpawnGoal {
        position: Some(GOAL_POSITION),
        force: false,
    });

    info!("Scene spawned - drag the block to launch!");
}
