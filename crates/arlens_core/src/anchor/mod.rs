//! Anchor domain — anchor node одной tracked картинки + его subtree
//!
//! Subtree (ChildOf anchor):
//! - 4 × CornerMarker (рамка)
//! - 1 × DetailPanel (описание + аллергены)
//! - 1 × ContentItem (текущее блюдо)
//! - N × MenuButton (по кнопке на пункт меню)

use bevy::prelude::*;

pub mod build;
pub mod components;
pub mod interaction;
pub mod layout;


pub use build::{build_anchor_subtrees, spawn_anchor};
pub use components::{
    AnchorBuildState, AttachedRenderable, AugmentedImageAnchor, ContentItem, Corner, CornerMarker, DetailPanel,
    MenuButton, MenuButtonTapped,
};
pub use interaction::handle_menu_button_taps;

use crate::ArLensSet;

/// Anchor Plugin
///
/// Порядок внутри frame (через ArLensSet):
/// 1. build_anchor_subtrees — после reconciliation (новые anchors строятся в том же frame)
/// 2. handle_menu_button_taps — после build (кнопки уже существуют)
pub struct AnchorPlugin;

impl Plugin for AnchorPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MenuButtonTapped>().add_systems(
            Update,
            (
                build_anchor_subtrees.in_set(ArLensSet::Build),
                handle_menu_button_taps.in_set(ArLensSet::Interact),
            ),
        );
    }
}
