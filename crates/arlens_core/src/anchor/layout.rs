//! Local transforms child nodes — чистые функции от extents картинки
//!
//! Никакого состояния между frames: одинаковые extents → одинаковый layout.

use bevy::prelude::*;

use super::components::Corner;

/// Размер картинки, под который подобраны масштабы моделей (метры)
pub const REFERENCE_EXTENT: f32 = 0.2;

/// Detail panel: над верхним краем картинки, наклонена к камере (~45° вокруг X)
pub const DETAIL_PANEL_OFFSET_Z: f32 = -0.6;
pub const DETAIL_PANEL_SCALE: f32 = 0.25;
pub const PANEL_TILT: Quat = Quat::from_xyzw(0.383, 0.0, 0.0, -0.924);

/// Кнопки: ряд под нижним краем картинки
pub const BUTTON_OFFSET_Z: f32 = 0.65;
pub const BUTTON_SPACING: f32 = 0.3;
pub const BUTTON_SCALE: f32 = 0.1;

/// Масштаб + поворот (yaw, градусы) каждого блюда
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentPose {
    pub scale: f32,
    pub yaw_degrees: f32,
}

/// Порядок = Content Registry (sushi, burger, pizza, rice)
pub const CONTENT_POSES: [ContentPose; 4] = [
    ContentPose { scale: 0.08, yaw_degrees: 0.0 },
    ContentPose { scale: 0.05, yaw_degrees: 45.0 },
    ContentPose { scale: 0.1, yaw_degrees: 0.0 },
    ContentPose { scale: 0.06, yaw_degrees: 90.0 },
];

/// Для пунктов меню сверх таблицы (кастомный manifest)
pub const FALLBACK_CONTENT_POSE: ContentPose = ContentPose { scale: 0.07, yaw_degrees: 0.0 };

pub fn corner_transform(corner: Corner, extent_x: f32, extent_z: f32) -> Transform {
    let half_x = 0.5 * extent_x;
    let half_z = 0.5 * extent_z;

    let position = match corner {
        Corner::UpperLeft => Vec3::new(-half_x, 0.0, -half_z),
        Corner::UpperRight => Vec3::new(half_x, 0.0, -half_z),
        Corner::LowerRight => Vec3::new(half_x, 0.0, half_z),
        Corner::LowerLeft => Vec3::new(-half_x, 0.0, half_z),
    };

    Transform::from_translation(position)
}

pub fn detail_panel_transform(extent_z: f32) -> Transform {
    Transform::from_translation(Vec3::new(0.0, 0.0, DETAIL_PANEL_OFFSET_Z * extent_z))
        .with_rotation(PANEL_TILT.normalize())
        .with_scale(Vec3::splat(DETAIL_PANEL_SCALE))
}

pub fn content_pose(content_index: usize) -> ContentPose {
    CONTENT_POSES
        .get(content_index)
        .copied()
        .unwrap_or(FALLBACK_CONTENT_POSE)
}

/// Блюдо стоит в центре картинки, масштаб пропорционален её ширине
pub fn content_item_transform(content_index: usize, extent_x: f32) -> Transform {
    let pose = content_pose(content_index);
    let scale = pose.scale * (extent_x / REFERENCE_EXTENT);

    Transform::from_rotation(Quat::from_rotation_y(pose.yaw_degrees.to_radians()))
        .with_scale(Vec3::splat(scale))
}

/// Кнопка `slot` из `count`, центрированный ряд
pub fn button_transform(slot: usize, count: usize, extent_x: f32, extent_z: f32) -> Transform {
    let center = (count.saturating_sub(1)) as f32 * 0.5;
    let x = (slot as f32 - center) * BUTTON_SPACING * extent_x;

    Transform::from_translation(Vec3::new(x, 0.0, BUTTON_OFFSET_Z * extent_z))
        .with_rotation(PANEL_TILT.normalize())
        .with_scale(Vec3::splat(BUTTON_SCALE))
}
