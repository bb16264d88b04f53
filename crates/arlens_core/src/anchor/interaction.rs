//! MenuButton tap → смена текущего блюда + текста detail panel

use bevy::prelude::*;

use super::components::{AttachedRenderable, AugmentedImageAnchor, ContentItem, DetailPanel, MenuButton, MenuButtonTapped};
use super::layout;
use crate::content::ContentRegistry;
use crate::logger;
use crate::renderable::{AnchorRenderables, RenderableLoader};

/// Система: обработка MenuButtonTapped
///
/// Кнопка знает только свой фиксированный content_index. Sibling ContentItem
/// получает renderable/scale/rotation этого блюда, DetailPanel — строки из
/// Content Registry по тому же индексу.
pub fn handle_menu_button_taps(
    mut commands: Commands,
    mut taps: EventReader<MenuButtonTapped>,
    loader: Res<RenderableLoader>,
    content: Res<ContentRegistry>,
    buttons: Query<(&MenuButton, &ChildOf)>,
    anchors: Query<(&AugmentedImageAnchor, &AnchorRenderables, &Children)>,
    mut items: Query<(&mut ContentItem, &mut Transform)>,
    mut panels: Query<&mut DetailPanel>,
) {
    for tap in taps.read() {
        // Anchor мог быть выселен в этом же frame — тихо игнорируем
        let Ok((button, child_of)) = buttons.get(tap.button) else {
            logger::log(&format!("Tap on stale button {:?} ignored", tap.button));
            continue;
        };

        let Ok((anchor, renderables, children)) = anchors.get(child_of.parent()) else {
            continue;
        };

        let index = button.content_index;
        let model = renderables.content.get(index).and_then(|handle| loader.peek(handle));
        let siblings: &[Entity] = children;

        for &sibling in siblings {
            if let Ok((mut item, mut transform)) = items.get_mut(sibling) {
                item.content_index = index;
                *transform = layout::content_item_transform(index, anchor.extent_x);

                match model {
                    Some(renderable) => {
                        commands.entity(sibling).insert(AttachedRenderable(renderable.clone()));
                    }
                    None => {
                        commands.entity(sibling).remove::<AttachedRenderable>();
                    }
                }
            }

            if let Ok(mut panel) = panels.get_mut(sibling) {
                panel.content_index = index;
                panel.header = content.translation(index);
                panel.allergens = content.allergen(index).to_string();
            }
        }

        logger::log(&format!("👆 Menu button #{} tapped", index));
    }
}
