//! Anchor node lifecycle: spawn (new) + build subtree
//!
//! NAMING: "build" = (пере)создать child nodes anchor'а из resolved renderables
//! и текущих строк Content Registry.

use bevy::prelude::*;

use super::components::{
    AnchorBuildState, AttachedRenderable, AugmentedImageAnchor, ContentItem, Corner, CornerMarker, DetailPanel,
    MenuButton,
};
use super::layout;
use crate::content::ContentRegistry;
use crate::logger;
use crate::renderable::{AnchorRenderables, AssetManifest, RenderableHandle, RenderableLoader, RenderableSettled};
use crate::tracking::TrackedImage;

/// Создаёт anchor node для картинки (без геометрии)
///
/// Сразу аллоцирует entity и стартует загрузки, если они ещё не в полёте
/// (идемпотентно — безопасно для нескольких anchors). Subtree строит
/// `build_anchor_subtrees` в этом же frame.
pub fn spawn_anchor(
    commands: &mut Commands,
    image: &TrackedImage,
    loader: &mut RenderableLoader,
    manifest: &AssetManifest,
) -> Entity {
    let renderables = AnchorRenderables::acquire(manifest, loader);

    commands
        .spawn((
            AugmentedImageAnchor::from_image(image),
            renderables,
            AnchorBuildState::Unbuilt,
            image.center_pose.to_transform(),
            Name::new(format!("AugmentedImageAnchor {}", image.index)),
        ))
        .id()
}

/// Система: build для anchors в состоянии Unbuilt (+ Waiting, если что-то догрузилось)
///
/// 1. Anchor pose = center pose картинки
/// 2. Есть незавершённые загрузки → Waiting, геометрия не трогается
/// 3. Иначе старый subtree удаляется, новый строится из resolved renderables
///    (Failed ассеты просто не прикрепляются)
pub fn build_anchor_subtrees(
    mut commands: Commands,
    mut settled_events: EventReader<RenderableSettled>,
    loader: Res<RenderableLoader>,
    content: Res<ContentRegistry>,
    mut anchors: Query<(
        Entity,
        &AugmentedImageAnchor,
        &AnchorRenderables,
        &mut AnchorBuildState,
        &mut Transform,
        Option<&Children>,
    )>,
) {
    // Resume сигнал для Waiting anchors (событие consumed, даже если anchors нет)
    let resumed = settled_events.read().count() > 0;

    for (entity, anchor, renderables, mut state, mut transform, children) in anchors.iter_mut() {
        match *state {
            AnchorBuildState::Built => continue,
            AnchorBuildState::Waiting if !resumed => continue,
            _ => {}
        }

        *transform = anchor.center_pose.to_transform();

        if !renderables.all_settled(&loader) {
            if *state != AnchorBuildState::Waiting {
                logger::log(&format!(
                    "⏳ Anchor {} waiting for {} renderables",
                    anchor.image_index,
                    renderables.pending_count(&loader)
                ));
            }
            *state = AnchorBuildState::Waiting;
            continue;
        }

        // Rebuild: предыдущий subtree целиком уходит
        if let Some(children) = children {
            let children: &[Entity] = children;
            for &child in children {
                commands.entity(child).despawn();
            }
        }

        spawn_anchor_children(&mut commands, entity, anchor, renderables, &loader, &content);
        *state = AnchorBuildState::Built;

        logger::log_info(&format!(
            "🖼️ Anchor {} built (content #{}, extents {:.2}x{:.2})",
            anchor.image_index, anchor.content_index, anchor.extent_x, anchor.extent_z
        ));
    }
}

/// Спавнит child nodes одного anchor'а
fn spawn_anchor_children(
    commands: &mut Commands,
    parent: Entity,
    anchor: &AugmentedImageAnchor,
    renderables: &AnchorRenderables,
    loader: &RenderableLoader,
    content: &ContentRegistry,
) {
    // Рамка
    for (corner, handle) in Corner::ALL.into_iter().zip(renderables.corners.iter()) {
        let child = commands
            .spawn((
                CornerMarker(corner),
                layout::corner_transform(corner, anchor.extent_x, anchor.extent_z),
                ChildOf(parent),
            ))
            .id();
        attach_renderable(commands, child, loader, handle);
    }

    // Detail panel — текст читается из registry сейчас (не задним числом)
    let detail = commands
        .spawn((
            DetailPanel {
                content_index: anchor.content_index,
                header: content.translation(anchor.content_index),
                allergens: content.allergen(anchor.content_index).to_string(),
            },
            layout::detail_panel_transform(anchor.extent_z),
            ChildOf(parent),
        ))
        .id();
    attach_renderable(commands, detail, loader, &renderables.detail);

    // Текущее блюдо
    let item = commands
        .spawn((
            ContentItem {
                content_index: anchor.content_index,
            },
            layout::content_item_transform(anchor.content_index, anchor.extent_x),
            ChildOf(parent),
        ))
        .id();
    if let Some(handle) = renderables.content.get(anchor.content_index) {
        attach_renderable(commands, item, loader, handle);
    }

    // Кнопки — по одной на пункт меню
    let button_count = content.item_count();
    for content_index in 0..button_count {
        let button = commands
            .spawn((
                MenuButton { content_index },
                layout::button_transform(content_index, button_count, anchor.extent_x, anchor.extent_z),
                ChildOf(parent),
            ))
            .id();
        attach_renderable(commands, button, loader, &renderables.button);
    }
}

/// set-renderable: только если handle resolved (Failed → node без геометрии)
fn attach_renderable(commands: &mut Commands, node: Entity, loader: &RenderableLoader, handle: &RenderableHandle) {
    if let Some(renderable) = loader.peek(handle) {
        commands.entity(node).insert(AttachedRenderable(renderable.clone()));
    }
}
