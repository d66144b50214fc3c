//! The reset confirmation dialog.
//!
//! Entering [`Menu::ResetConfirm`] spawns the overlay subtree; leaving the
//! state tears the whole subtree down, so repeated show/hide is idempotent.

use bevy::{input::common_conditions::input_just_pressed, prelude::*};

use crate::{
    game::{GOAL_POSITION, RoundGeneration, SLING_ANCHOR, Score, SpawnBlock, SpawnGoal},
    menus::Menu,
    theme::widget,
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::ResetConfirm), spawn_reset_dialog);
    app.add_systems(
        Update,
        go_back.run_if(in_state(Menu::ResetConfirm).and(input_just_pressed(KeyCode::Escape))),
    );
}

fn spawn_reset_dialog(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Reset Dialog"),
        // Semi-transparent mask over the scene.
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        GlobalZIndex(2),
        StateScoped(Menu::ResetConfirm),
        children![
            widget::header("Are you sure?"),
            widget::button("Confirm", confirm_reset),
            widget::button("Cancel", close_dialog),
        ],
    ));
}

fn confirm_reset(
    _: Trigger<Pointer<Click>>,
    mut score: ResMut<Score>,
    mut generation: ResMut<RoundGeneration>,
    mut block_events: EventWriter<SpawnBlock>,
    mut goal_events: EventWriter<SpawnGoal>,
    mut next_menu: ResMut<NextState<Menu>>,
) {
    score.0 = 0;
    // The bump invalidates any pending deferred respawn, so the reset has to
    // repopulate the sling itself.
    generation.0 += 1;
    block_events.write(SpawnBlock {
        position: SLING_ANCHOR,
    });
    goal_events.write(SpawnGoal {
        position: Some(GOAL_POSITION),
        force: true,
    });
    next_menu.set(Menu::None);
    info!("Session reset");
}

fn close_dialog(_: Trigger<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(Menu::None);
}

fn go_back(mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(Menu::None);
}
