//! The goal: a static rectangular sensor the block is launched at.
//!
//! Hitting it scores a point and removes it; the recycle loop or an explicit
//! new round brings the next one in.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use super::{
    physics::{BLOCK_GROUP, GOAL_GROUP},
    score::Score,
};
use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Goal>();
    app.add_event::<SpawnGoal>();

    app.add_systems(
        Update,
        (spawn_goal, handle_goal_contact).in_set(AppSystems::Update),
    );
}

/// Where the goal sits at scene start and after a reset.
pub const GOAL_POSITION: Vec2 = Vec2::new(0.0, 300.0);

/// Size of the goal bar in pixels.
const GOAL_SIZE: Vec2 = Vec2::new(100.0, 10.0);

/// Event requesting a goal. Ignored while a goal already exists, unless
/// `force` is set. A missing position is drawn at random.
#[derive(Event, Debug, Clone)]
pub struct SpawnGoal {
    pub position: Option<Vec2>,
    pub force: bool,
}

/// Marker component for the goal entity.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Goal;

/// Draw a goal position at integer resolution, x in [-250, 250] and
/// y in [0, 400].
fn random_goal_position() -> Vec2 {
    let mut rng = rand::rng();
    let x = rng.random_range(-250..=250);
    let y = rng.random_range(0..=400);
    Vec2::new(x as f32, y as f32)
}

/// Handler for [`SpawnGoal`] requests, honoring the existing-goal guard.
fn spawn_goal(
    mut commands: Commands,
    mut events: EventReader<SpawnGoal>,
    existing: Query<Entity, With<Goal>>,
) {
    let mut current = existing.iter().next();

    for event in events.read() {
        if current.is_some() && !event.force {
            continue;
        }
        if let Some(entity) = current.take() {
            commands.entity(entity).despawn();
        }

        let position = event.position.unwrap_or_else(random_goal_position);
        let entity = commands
            .spawn((
                Name::new("Goal"),
                Goal,
                Sprite {
                    color: Color::srgba(0.4, 0.4, 0.9, 0.8),
                    custom_size: Some(GOAL_SIZE),
                    ..default()
                },
                Transform::from_translation(position.extend(0.0)),
                RigidBody::Fixed,
                Collider::cuboid(GOAL_SIZE.x / 2.0, GOAL_SIZE.y / 2.0),
                Sensor,
                CollisionGroups::new(GOAL_GROUP, BLOCK_GROUP),
                ActiveEvents::COLLISION_EVENTS,
            ))
            .id();
        current = Some(entity);

        info!("Spawned goal at {:?}", position);
    }
}

/// Score a hit when a contact involving exactly the block and goal
/// categories starts, then remove the goal. Respawn is left to the recycle
/// loop or an explicit new round.
fn handle_goal_contact(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    groups: Query<&CollisionGroups>,
    goals: Query<(), With<Goal>>,
    mut score: ResMut<Score>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };
        let (Ok(group_a), Ok(group_b)) = (groups.get(*a), groups.get(*b)) else {
            continue;
        };
        if group_a.memberships | group_b.memberships != BLOCK_GROUP | GOAL_GROUP {
            continue;
        }

        score.0 += 1;
        let goal_entity = if goals.contains(*a) { *a } else { *b };
        if let Ok(mut entity) = commands.get_entity(goal_entity) {
            entity.despawn();
        }
        info!("Goal hit! Score is now {}", score.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_event::<SpawnGoal>();
        app.add_systems(Update, spawn_goal);
        app
    }

    fn goal_positions(app: &mut App) -> Vec<Vec2> {
        let mut goals = app.world_mut().query_filtered::<&Transform, With<Goal>>();
        goals
            .iter(app.world())
            .map(|t| t.translation.truncate())
            .collect()
    }

    #[test]
    fn test_spawn_goal_is_noop_while_goal_exists() {
        let mut app = test_app();
        app.world_mut().send_event(SpawnGoal {
            position: Some(GOAL_POSITION),
            force: false,
        });
        app.update();
        app.world_mut().send_event(SpawnGoal {
            position: Some(Vec2::new(50.0, 100.0)),
            force: false,
        });
        app.update();

        assert_eq!(goal_positions(&mut app), vec![GOAL_POSITION]);
    }

    #[test]
    fn test_forced_spawn_replaces_existing_goal() {
        let mut app = test_app();
        app.world_mut().send_event(SpawnGoal {
            position: Some(Vec2::new(50.0, 100.0)),
            force: false,
        });
        app.update();
        app.world_mut().send_event(SpawnGoal {
            position: Some(GOAL_POSITION),
            force: true,
        });
        app.update();
        app.update();

        assert_eq!(goal_positions(&mut app), vec![GOAL_POSITION]);
    }

    fn contact_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<Score>();
        app.add_event::<CollisionEvent>();
        app.add_systems(Update, handle_goal_contact);
        app
    }

    #[test]
    fn test_goal_contact_scores_and_removes_goal() {
        use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

        let mut app = contact_app();
        let block = app
            .world_mut()
            .spawn(CollisionGroups::new(BLOCK_GROUP, GOAL_GROUP))
            .id();
        let goal = app
            .world_mut()
            .spawn((Goal, CollisionGroups::new(GOAL_GROUP, BLOCK_GROUP)))
            .id();
        app.world_mut()
            .send_event(CollisionEvent::Started(block, goal, CollisionEventFlags::SENSOR));
        app.update();

        assert_eq!(app.world().resource::<Score>().0, 1);
        let mut goals = app.world_mut().query_filtered::<(), With<Goal>>();
        assert_eq!(goals.iter(app.world()).count(), 0);
    }

    #[test]
    fn test_contact_without_goal_category_is_ignored() {
        use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

        let mut app = contact_app();
        let a = app
            .world_mut()
            .spawn(CollisionGroups::new(BLOCK_GROUP, GOAL_GROUP))
            .id();
        let b = app
            .world_mut()
            .spawn(CollisionGroups::new(BLOCK_GROUP, GOAL_GROUP))
            .id();
        app.world_mut()
            .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
        app.update();

        assert_eq!(app.world().resource::<Score>().0, 0);
    }

    #[test]
    fn test_random_goal_position_stays_in_range() {
        for _ in 0..1000 {
            let position = random_goal_position();
            assert!((-250.0..=250.0).contains(&position.x));
            assert!((0.0..=400.0).contains(&position.y));
            assert_eq!(position.x, position.x.trunc());
            assert_eq!(position.y, position.y.trunc());
        }
    }
}
