//! The block: the single launchable projectile.
//!
//! The block spawns frozen in the sling and only becomes a dynamic body when
//! launched. Once it leaves the visible window it is recycled, and a deferred
//! respawn brings it (plus a goal, if one is missing) back after a short
//! pacing delay.

use bevy::{prelude::*, window::PrimaryWindow};
use bevy_rapier2d::prelude::*;

use super::{
    goal::SpawnGoal,
    physics::{BLOCK_GROUP, GOAL_GROUP},
    slingshot::{Dragged, SLING_ANCHOR},
};
use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Block>();
    app.register_type::<RoundGeneration>();
    app.add_event::<SpawnBlock>();
    app.init_resource::<RoundGeneration>();
    app.init_resource::<PendingRespawn>();

    app.add_systems(
        Update,
        (
            tick_pending_respawn.in_set(AppSystems::TickTimers),
            (spawn_block, recycle_offscreen_block).in_set(AppSystems::Update),
        ),
    );
}

/// Radius of the block's circular body in pixels.
pub const BLOCK_RADIUS: f32 = 20.0;

/// Mass of the block. Light, so a full pull clears the screen.
const BLOCK_MASS: f32 = 0.1;

/// Pacing delay before an off-screen block is replaced. Purely visual.
const RESPAWN_DELAY_SECS: f32 = 0.2;

/// Event requesting a fresh block. Any existing block is destroyed first, so
/// at most one block is alive at a time.
#[derive(Event, Debug, Clone)]
pub struct SpawnBlock {
    pub position: Vec2,
}

/// Marker component for the block entity.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Block;

/// Monotonic round counter. Bumped whenever the scene is repopulated
/// manually, so stale deferred respawns can be detected and dropped.
#[derive(Resource, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct RoundGeneration(pub u64);

/// The deferred respawn scheduled by the recycle loop, if any.
#[derive(Resource, Debug, Default)]
struct PendingRespawn(Option<RespawnTask>);

#[derive(Debug)]
struct RespawnTask {
    timer: Timer,
    generation: u64,
}

impl RespawnTask {
    fn new(generation: u64) -> Self {
        Self {
            timer: Timer::from_seconds(RESPAWN_DELAY_SECS, TimerMode::Once),
            generation,
        }
    }

    /// A task is stale once a manual new-round or reset has already
    /// repopulated the scene.
    fn is_stale(&self, current_generation: u64) -> bool {
        self.generation != current_generation
    }
}

/// Destroy-then-create handler for [`SpawnBlock`] requests.
fn spawn_block(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut events: EventReader<SpawnBlock>,
    existing: Query<Entity, With<Block>>,
) {
    // Coalesce duplicate requests; only the last one per frame wins.
    let Some(event) = events.read().last() else {
        return;
    };

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    commands.spawn((
        Name::new("Block"),
        Block,
        Transform::from_translation(event.position.extend(1.0)),
        Mesh2d(meshes.add(Circle::new(BLOCK_RADIUS))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(0.9, 0.2, 0.2)))),
        // Frozen until launched by the slingshot.
        RigidBody::Fixed,
        Collider::ball(BLOCK_RADIUS),
        ColliderMassProperties::Mass(BLOCK_MASS),
        CollisionGroups::new(BLOCK_GROUP, GOAL_GROUP),
        ActiveEvents::COLLISION_EVENTS,
        Velocity::zero(),
        ExternalImpulse::default(),
    ));

    info!("Spawned block at {:?}", event.position);
}

/// Per-frame recycle check: once the block's bounds no longer intersect the
/// visible window, destroy it and schedule the deferred respawn. A block
/// held in the sling is exempt; the clamp region may dip below the window
/// edge.
fn recycle_offscreen_block(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    blocks: Query<(Entity, &Transform), (With<Block>, Without<Dragged>)>,
    generation: Res<RoundGeneration>,
    mut pending: ResMut<PendingRespawn>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((entity, transform)) = blocks.single() else {
        return;
    };

    let visible = Rect::from_center_size(Vec2::ZERO, Vec2::new(window.width(), window.height()));
    let bounds = Rect::from_center_size(
        transform.translation.truncate(),
        Vec2::splat(BLOCK_RADIUS * 2.0),
    );
    if !visible.intersect(bounds).is_empty() {
        return;
    }

    commands.entity(entity).despawn();
    pending.0 = Some(RespawnTask::new(generation.0));
    info!("Block left the visible bounds, respawn scheduled");
}

/// Fire the deferred respawn once its timer elapses, unless a manual reset
/// already started a new round in the meantime.
fn tick_pending_respawn(
    time: Res<Time>,
    generation: Res<RoundGeneration>,
    mut pending: ResMut<PendingRespawn>,
    mut block_events: EventWriter<SpawnBlock>,
    mut goal_events: EventWriter<SpawnGoal>,
) {
    let Some(task) = pending.0.as_mut() else {
        return;
    };
    task.timer.tick(time.delta());
    if !task.timer.just_finished() {
        return;
    }

    if task.is_stale(generation.0) {
        info!(
            "Dropping stale respawn (generation {} superseded by {})",
            task.generation, generation.0
        );
    } else {
        block_events.write(SpawnBlock {
            position: SLING_ANCHOR,
        });
        goal_events.write(SpawnGoal {
            position: None,
            force: false,
        });
    }
    pending.0 = None;
}
