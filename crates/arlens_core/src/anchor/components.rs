//! Anchor node компоненты: сам anchor + маркеры child nodes

use bevy::prelude::*;

use crate::renderable::Renderable;
use crate::tracking::{ImageIndex, Pose, TrackedImage};

/// Anchor node одной распознанной картинки
///
/// Transform entity = center pose картинки. Все child nodes позиционируются
/// относительно него, world coordinates не нужны.
#[derive(Component, Debug, Clone)]
pub struct AugmentedImageAnchor {
    pub image_index: ImageIndex,
    /// Пункт меню, показанный при build (картинка N → пункт N)
    pub content_index: usize,
    pub center_pose: Pose,
    pub extent_x: f32,
    pub extent_z: f32,
}

impl AugmentedImageAnchor {
    pub fn from_image(image: &TrackedImage) -> Self {
        Self {
            image_index: image.index,
            content_index: image.index.content_index(),
            center_pose: image.center_pose,
            extent_x: image.extent_x,
            extent_z: image.extent_z,
        }
    }
}

/// Build state machine: Unbuilt → Waiting → Built
///
/// Waiting = ровно одно "ожидание" на node: resume приходит через
/// RenderableSettled, рекурсии и висящих closures нет.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnchorBuildState {
    /// Нужно (пере)построить subtree в этом frame
    #[default]
    Unbuilt,
    /// Есть незавершённые загрузки — ждём RenderableSettled
    Waiting,
    Built,
}

/// Угол рамки вокруг картинки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    UpperLeft,
    UpperRight,
    LowerRight,
    LowerLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::UpperLeft, Corner::UpperRight, Corner::LowerRight, Corner::LowerLeft];
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerMarker(pub Corner);

/// Панель с описанием блюда (header) и аллергенами
///
/// Текст читается из Content Registry в момент build / tap — не обновляется задним числом.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub content_index: usize,
    pub header: String,
    pub allergens: String,
}

/// "Текущее" блюдо над картинкой (меняется кнопками)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentItem {
    pub content_index: usize,
}

/// Кнопка выбора блюда (фиксированный индекс пункта меню)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuButton {
    pub content_index: usize,
}

/// Renderable, прикреплённый к node (set-renderable в host scene graph)
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct AttachedRenderable(pub Renderable);

/// Event: пользователь тапнул MenuButton (tap handler host'а)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuButtonTapped {
    pub button: Entity,
}
