//! Heads-up display: the score label and the reset control.

use bevy::prelude::*;

use super::score::Score;
use crate::{
    menus::Menu,
    theme::{palette::HEADER_TEXT, widget},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud);
    app.add_systems(Update, update_score_label);
}

/// Marker for the score label text.
#[derive(Component)]
struct ScoreLabel;

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("Score Banner"),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            top: Val::Px(24.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Pickable::IGNORE,
        children![(
            Name::new("Score Label"),
            ScoreLabel,
            Text("Drag!".to_string()),
            TextFont::from_font_size(64.0),
            TextColor(HEADER_TEXT),
        )],
    ));

    commands.spawn((
        Name::new("Reset Corner"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            right: Val::Px(16.0),
            ..default()
        },
        children![widget::button_small("RESET", open_reset_dialog)],
    ));
}

fn open_reset_dialog(_: Trigger<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(Menu::ResetConfirm);
}

/// Keep the label in sync with the score. A zero score reads "Drag!", both
/// at scene start and after a confirmed reset.
fn update_score_label(score: Res<Score>, mut labels: Query<&mut Text, With<ScoreLabel>>) {
    if !score.is_changed() {
        return;
    }
    for mut text in &mut labels {
        text.0 = if score.0 == 0 {
            "Drag!".to_string()
        } else {
            score.0.to_string()
        };
    }
}
