//! Overlay menus layered on top of the scene.

mod reset_confirm;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.init_state::<Menu>();
    app.enable_state_scoped_entities::<Menu>();

    app.add_plugins(reset_confirm::plugin);
}

#[derive(States, Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Menu {
    #[default]
    None,
    ResetConfirm,
}
