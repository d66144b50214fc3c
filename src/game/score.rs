//! Session score. Lives only as long as the app runs; there is no
//! persistence across sessions.

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Score>();
    app.register_type::<Score>();
}

/// Resource tracking the number of goals hit this session.
#[derive(Resource, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct Score(pub u32);
