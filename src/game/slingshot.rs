//! Slingshot drag and launch.
//!
//! Pointer-down grabs the block (or starts a new round on empty space),
//! pointer-move drags it against the clamp policy, and pointer-up launches
//! it with an impulse derived from the pull.

use bevy::{prelude::*, window::PrimaryWindow};
use bevy_rapier2d::prelude::*;

use super::{
    block::{BLOCK_RADIUS, Block, RoundGeneration, SpawnBlock},
    goal::SpawnGoal,
};
use crate::{AppSystems, menus::Menu};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Dragged>();

    // While the confirmation dialog is open it captures all input; physics
    // keeps simulating underneath.
    app.add_systems(
        Update,
        (begin_drag, drag_block, release_block)
            .chain()
            .in_set(AppSystems::RecordInput)
            .run_if(in_state(Menu::None)),
    );
}

/// Fixed launch origin of the slingshot.
pub const SLING_ANCHOR: Vec2 = Vec2::new(0.0, -300.0);

/// Maximum distance the block can be pulled away from the anchor.
pub const MAX_SLING_DISTANCE: f32 = 150.0;

/// Radius of the slingshot post visual.
pub const SLINGSHOT_RADIUS: f32 = 3.0;

/// Per-axis impulse scale. Horizontal launches travel further than the raw
/// pull distance, vertical ones slightly less.
const IMPULSE_SCALE: Vec2 = Vec2::new(1.2, 1.1);

/// Marker for the block while it is held in the sling.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Dragged;

/// Clamp a drag position against the sling constraint policy, in order:
/// pointer above the anchor pins y to the anchor's height with x set along
/// the original direction; a pull longer than [`MAX_SLING_DISTANCE`] is
/// clamped to exactly that distance, preserving direction; anything else
/// passes through untouched.
pub(crate) fn clamp_drag_position(anchor: Vec2, pointer: Vec2) -> Vec2 {
    let offset = pointer - anchor;
    let distance = offset.length();
    if distance <= f32::EPSILON {
        return pointer;
    }

    if pointer.y > anchor.y {
        Vec2::new(
            anchor.x + (offset.x / distance) * MAX_SLING_DISTANCE,
            anchor.y,
        )
    } else if distance > MAX_SLING_DISTANCE {
        anchor + (offset / distance) * MAX_SLING_DISTANCE
    } else {
        pointer
    }
}

/// The launch impulse for a block released at `release`.
pub(crate) fn launch_impulse(anchor: Vec2, release: Vec2) -> Vec2 {
    (anchor - release) * IMPULSE_SCALE
}

fn cursor_world_position(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
) -> Option<Vec2> {
    let cursor = window.cursor_position()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}

/// Pointer-down dispatch: grab the block if the press lands on it,
/// otherwise start a fresh round.
fn begin_drag(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    interactions: Query<&Interaction>,
    blocks: Query<(Entity, &Transform), With<Block>>,
    mut generation: ResMut<RoundGeneration>,
    mut block_events: EventWriter<SpawnBlock>,
    mut goal_events: EventWriter<SpawnGoal>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    // UI controls sit on top of the scene, like a topmost-node hit test.
    if interactions.iter().any(|i| *i != Interaction::None) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Some(cursor) = cursor_world_position(window, camera, camera_transform) else {
        return;
    };

    if let Ok((entity, transform)) = blocks.single() {
        let center = transform.translation.truncate();
        if cursor.distance(center) <= BLOCK_RADIUS {
            commands
                .entity(entity)
                .insert((Dragged, RigidBody::Fixed, Velocity::zero()));
            info!("Grabbed block at {:?}", center);
            return;
        }
    }

    // Tapping empty space starts a fresh round.
    generation.0 += 1;
    block_events.write(SpawnBlock {
        position: SLING_ANCHOR,
    });
    goal_events.write(SpawnGoal {
        position: None,
        force: false,
    });
    info!("New round started (generation {})", generation.0);
}

/// Follow the pointer while dragging, constrained by the clamp policy. The
/// block stays non-dynamic the whole time.
fn drag_block(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut blocks: Query<&mut Transform, (With<Block>, With<Dragged>)>,
) {
    let Ok(mut transform) = blocks.single_mut() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Some(cursor) = cursor_world_position(window, camera, camera_transform) else {
        return;
    };

    let clamped = clamp_drag_position(SLING_ANCHOR, cursor);
    transform.translation.x = clamped.x;
    transform.translation.y = clamped.y;
}

/// Launch on release: re-enable dynamic simulation and apply the impulse
/// once.
fn release_block(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    blocks: Query<(Entity, &Transform), (With<Block>, With<Dragged>)>,
) {
    if !mouse.just_released(MouseButton::Left) {
        return;
    }
    let Ok((entity, transform)) = blocks.single() else {
        return;
    };

    let impulse = launch_impulse(SLING_ANCHOR, transform.translation.truncate());
    commands.entity(entity).remove::<Dragged>().insert((
        RigidBody::Dynamic,
        ExternalImpulse {
            impulse,
            torque_impulse: 0.0,
        },
    ));
    info!("Launched block with impulse {:?}", impulse);
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: Vec2 = Vec2::new(0.0, -300.0);

    #[test]
    fn test_drag_above_anchor_pins_y() {
        let clamped = clamp_drag_position(ANCHOR, Vec2::new(50.0, -200.0));
        assert_eq!(clamped.y, ANCHOR.y);
        assert!((clamped.x - ANCHOR.x).abs() <= MAX_SLING_DISTANCE);
    }

    #[test]
    fn test_long_drag_clamps_to_max_distance() {
        // Straight-down pull of 200 clamps to 150 along the same direction.
        let clamped = clamp_drag_position(ANCHOR, Vec2::new(0.0, -500.0));
        assert!((clamped - Vec2::new(0.0, -450.0)).length() < 1e-3);
    }

    #[test]
    fn test_long_drag_preserves_direction() {
        let clamped = clamp_drag_position(Vec2::ZERO, Vec2::new(-300.0, -400.0));
        assert!((clamped.length() - MAX_SLING_DISTANCE).abs() < 1e-3);
        assert!((clamped - Vec2::new(-90.0, -120.0)).length() < 1e-3);
    }

    #[test]
    fn test_short_drag_below_anchor_passes_through() {
        let pointer = Vec2::new(40.0, -350.0);
        assert_eq!(clamp_drag_position(ANCHOR, pointer), pointer);
    }

    #[test]
    fn test_drag_at_anchor_is_untouched() {
        assert_eq!(clamp_drag_position(ANCHOR, ANCHOR), ANCHOR);
    }

    #[test]
    fn test_launch_impulse_formula() {
        let impulse = launch_impulse(ANCHOR, Vec2::new(0.0, -450.0));
        assert!((impulse - Vec2::new(0.0, 165.0)).length() < 1e-3);

        let impulse = launch_impulse(ANCHOR, Vec2::new(100.0, -400.0));
        assert!((impulse - Vec2::new(-120.0, 110.0)).length() < 1e-3);
    }
}
